//! Tokenizer for C++ source text.
//!
//! Only what the scanner needs is distinguished: identifiers, literals, `::`
//! and the punctuation that delimits macro arguments. Comments and
//! preprocessor directives are skipped, so macro definitions are never
//! mistaken for invocations.

use crate::cursor::{Cursor, is_ident_continue, is_ident_start};
use crate::token::{Token, TokenKind};

/// Converts source text into a stream of [`Token`]s.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    /// Whether only whitespace has been seen since the last newline.
    at_line_start: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            at_line_start: true,
        }
    }

    /// Skip whitespace, comments and preprocessor lines.
    fn skip_trivia(&mut self) {
        loop {
            match self.cursor.peek() {
                Some('\n') => {
                    self.cursor.advance();
                    self.at_line_start = true;
                }
                Some(c) if c.is_whitespace() => {
                    self.cursor.advance();
                }
                Some('/') if self.cursor.check_str("//") => {
                    self.cursor.eat_while(|c| c != '\n');
                }
                Some('/') if self.cursor.check_str("/*") => {
                    self.skip_block_comment();
                }
                Some('#') if self.at_line_start => {
                    self.skip_directive();
                }
                _ => return,
            }
        }
    }

    fn skip_block_comment(&mut self) {
        self.cursor.advance();
        self.cursor.advance();
        while !self.cursor.is_eof() {
            if self.cursor.check_str("*/") {
                self.cursor.advance();
                self.cursor.advance();
                return;
            }
            self.cursor.advance();
        }
    }

    /// Skip to the end of a directive, following `\` line continuations.
    fn skip_directive(&mut self) {
        while let Some(c) = self.cursor.advance() {
            match c {
                '\\' => {
                    self.cursor.eat('\r');
                    self.cursor.eat('\n');
                }
                '\n' => break,
                _ => {}
            }
        }
        self.at_line_start = true;
    }

    fn scan_quoted(&mut self, quote: char) {
        self.cursor.advance();
        while let Some(c) = self.cursor.advance() {
            match c {
                '\\' => {
                    self.cursor.advance();
                }
                c if c == quote || c == '\n' => break,
                _ => {}
            }
        }
    }

    fn scan_token(&mut self) -> Option<Token<'src>> {
        self.skip_trivia();
        let first = self.cursor.peek()?;
        self.at_line_start = false;

        let line = self.cursor.line();
        let start = self.cursor.offset();

        let kind = match first {
            c if is_ident_start(c) => {
                self.cursor.eat_while(is_ident_continue);
                TokenKind::Identifier
            }
            c if c.is_ascii_digit() => {
                self.cursor.eat_while(|c| c.is_ascii_alphanumeric() || c == '.');
                TokenKind::Number
            }
            '"' => {
                self.scan_quoted('"');
                TokenKind::StringLiteral
            }
            '\'' => {
                self.scan_quoted('\'');
                TokenKind::CharLiteral
            }
            ':' if self.cursor.check_str("::") => {
                self.cursor.advance();
                self.cursor.advance();
                TokenKind::Scope
            }
            _ => {
                self.cursor.advance();
                match first {
                    '(' => TokenKind::LeftParen,
                    ')' => TokenKind::RightParen,
                    ',' => TokenKind::Comma,
                    '<' => TokenKind::Less,
                    '>' => TokenKind::Greater,
                    ';' => TokenKind::Semicolon,
                    _ => TokenKind::Punct,
                }
            }
        };

        Some(Token::new(kind, self.cursor.slice_from(start), line))
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        self.scan_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(source: &str) -> Vec<(TokenKind, String)> {
        Lexer::new(source)
            .map(|t| (t.kind, t.lexeme.to_string()))
            .collect()
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).map(|t| t.kind).collect()
    }

    #[test]
    fn empty_source() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \n\t ").is_empty());
    }

    #[test]
    fn identifiers_and_scope() {
        assert_eq!(
            kinds("Phonon::State s;"),
            vec![
                TokenKind::Identifier,
                TokenKind::Scope,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn string_with_escapes() {
        let tokens = tokenize(r#""say \"hi\"" x"#);
        assert_eq!(tokens[0], (TokenKind::StringLiteral, r#""say \"hi\"""#.to_string()));
        assert_eq!(tokens[1], (TokenKind::Identifier, "x".to_string()));
    }

    #[test]
    fn comments_are_skipped() {
        let tokens = tokenize("a // BACKEND_GET(int, x, \"y\")\n/* b */ c");
        let lexemes: Vec<_> = tokens.iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(lexemes, vec!["a", "c"]);
    }

    #[test]
    fn directives_are_skipped() {
        let source = "#define BACKEND_CALL(name) \\\n    invoke(name)\n  # include <x.h>\nfoo";
        let lexemes: Vec<_> = tokenize(source).into_iter().map(|(_, l)| l).collect();
        assert_eq!(lexemes, vec!["foo"]);
    }

    #[test]
    fn hash_mid_line_is_punctuation() {
        assert_eq!(kinds("a # b"), vec![TokenKind::Identifier, TokenKind::Punct, TokenKind::Identifier]);
    }

    #[test]
    fn lines_are_tracked() {
        let lines: Vec<u32> = Lexer::new("a\n\nb /*\n*/ c").map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 3, 4]);
    }
}
