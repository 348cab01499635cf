//! Tokens of the C++ subset the scanner cares about.

use std::fmt;

/// A token from the source text.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// The source text of this token.
    pub lexeme: &'src str,
    /// Line the token starts on (1-indexed).
    pub line: u32,
}

impl<'src> Token<'src> {
    #[inline]
    pub fn new(kind: TokenKind, lexeme: &'src str, line: u32) -> Self {
        Self { kind, lexeme, line }
    }

    /// Whether this is an identifier or a number.
    ///
    /// Two adjacent word tokens need a space between them when a type is
    /// spelled back out (`unsigned int`).
    #[inline]
    pub fn is_word(&self) -> bool {
        matches!(self.kind, TokenKind::Identifier | TokenKind::Number)
    }

    #[inline]
    pub fn is_ident(&self, name: &str) -> bool {
        self.kind == TokenKind::Identifier && self.lexeme == name
    }

    /// The contents of a string literal, without quotes.
    pub fn string_value(&self) -> Option<&'src str> {
        match self.kind {
            TokenKind::StringLiteral => self
                .lexeme
                .strip_prefix('"')
                .map(|s| s.strip_suffix('"').unwrap_or(s)),
            _ => None,
        }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?} @ {})", self.kind, self.lexeme, self.line)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Number,
    /// `"..."`, quotes included in the lexeme.
    StringLiteral,
    /// `'x'`
    CharLiteral,
    /// `::`
    Scope,
    LeftParen,
    RightParen,
    Comma,
    Less,
    Greater,
    Semicolon,
    /// Any other punctuation character.
    Punct,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::StringLiteral => "string literal",
            TokenKind::CharLiteral => "character literal",
            TokenKind::Scope => "'::'",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::Less => "'<'",
            TokenKind::Greater => "'>'",
            TokenKind::Semicolon => "';'",
            TokenKind::Punct => "punctuation",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
