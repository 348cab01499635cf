//! Forward-scanning state machine over the token stream.
//!
//! Three invocation shapes are recognised:
//! - backend accessor macros: `BACKEND_GET(Ret, var, "name")`,
//!   `BACKEND_GET2(Ret, var, "name", T1, a1, T2, a2)`, `BACKEND_CALL("name")`,
//!   `BACKEND_CALL1("name", T1, a1)` and their `pBACKEND_*` twins
//! - `NAMEDESCRIPTIONFROMINDEX(prefix)`, standing for
//!   `QString <prefix>Name(int)` and `QString <prefix>Description(int)`
//! - `QMetaObject::invokeMethod(obj, "name", [conn,] [Q_RETURN_ARG(Ret, r),] Q_ARG(T, a)...)`
//!
//! A token that does not fit the current state abandons the partial match
//! and is re-examined from the idle state.

use tracing::trace;

use crate::Signature;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

const NAME_DESCRIPTION_MACRO: &str = "NAMEDESCRIPTIONFROMINDEX";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,

    // Backend accessor macros.
    BackendOpen,
    BackendReturnType,
    BackendReturnVar,
    BackendName,
    BackendAfterName,
    BackendArgType,
    BackendArgValue,

    // Name/description macro.
    NameDescOpen,
    NameDescPrefix,
    NameDescClose,

    // Reflective invoke.
    InvokeScope,
    InvokeMethod,
    InvokeOpen,
    InvokeTarget,
    InvokeName,
    InvokeNextArg,
    InvokeArg,
    InvokeMacroOpen,
    InvokeMacroType,
    InvokeMacroValue,
    InvokeSkipArg,
}

/// What has been collected for the invocation being matched.
#[derive(Debug, Default)]
struct Pending<'src> {
    name: String,
    params: Vec<String>,
    return_type: String,
    /// Type being collected.
    type_tokens: Vec<Token<'src>>,
    /// Whether the backend macro carries a return type (`GET`, not `CALL`).
    has_return: bool,
    /// Whether the `Q_*ARG` being read is `Q_RETURN_ARG`.
    return_arg: bool,
    /// Nesting of `(` in skipped expressions.
    parens: u32,
    /// Nesting of `<` in collected types.
    angles: u32,
    line: u32,
}

/// Scans one source text for signatures.
pub struct Scanner<'src> {
    origin: &'src str,
    state: State,
    pending: Pending<'src>,
    found: Vec<Signature>,
}

impl<'src> Scanner<'src> {
    /// `origin` labels the signatures found (usually the file path).
    pub fn new(origin: &'src str) -> Self {
        Self {
            origin,
            state: State::Idle,
            pending: Pending::default(),
            found: Vec::new(),
        }
    }

    /// Scan `source`, returning signatures in the order they appear.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn scan(mut self, source: &'src str) -> Vec<Signature> {
        for token in Lexer::new(source) {
            self.step(token);
        }
        if self.state != State::Idle {
            trace!(origin = self.origin, line = self.pending.line, "unterminated invocation at end of input");
        }
        self.found
    }

    fn step(&mut self, tok: Token<'src>) {
        use TokenKind as K;

        match self.state {
            State::Idle => self.start(tok),

            State::BackendOpen => match tok.kind {
                K::LeftParen if self.pending.has_return => self.state = State::BackendReturnType,
                K::LeftParen => self.state = State::BackendName,
                _ => self.abandon(tok),
            },
            State::BackendReturnType => {
                if let Some(ty) = self.collect_type(tok) {
                    self.pending.return_type = ty;
                    self.state = State::BackendReturnVar;
                }
            }
            State::BackendReturnVar => match self.skip_expression(tok) {
                Some(K::Comma) => self.state = State::BackendName,
                Some(_) => self.abandon(tok),
                None => {}
            },
            State::BackendName => match tok.string_value() {
                Some(name) => {
                    self.pending.name = name.to_string();
                    self.state = State::BackendAfterName;
                }
                None => self.abandon(tok),
            },
            State::BackendAfterName => match tok.kind {
                K::Comma => self.state = State::BackendArgType,
                K::RightParen => self.emit(),
                _ => self.abandon(tok),
            },
            State::BackendArgType => {
                if let Some(ty) = self.collect_type(tok) {
                    self.pending.params.push(ty);
                    self.state = State::BackendArgValue;
                }
            }
            State::BackendArgValue => match self.skip_expression(tok) {
                Some(K::Comma) => self.state = State::BackendArgType,
                Some(K::RightParen) => self.emit(),
                Some(_) => self.abandon(tok),
                None => {}
            },

            State::NameDescOpen => match tok.kind {
                K::LeftParen => self.state = State::NameDescPrefix,
                _ => self.abandon(tok),
            },
            State::NameDescPrefix => match tok.kind {
                K::Identifier => {
                    self.pending.name = tok.lexeme.to_string();
                    self.state = State::NameDescClose;
                }
                _ => self.abandon(tok),
            },
            State::NameDescClose => match tok.kind {
                K::RightParen => self.emit_name_description(),
                _ => self.abandon(tok),
            },

            State::InvokeScope => match tok.kind {
                K::Scope => self.state = State::InvokeMethod,
                _ => self.abandon(tok),
            },
            State::InvokeMethod => {
                if tok.is_ident("invokeMethod") {
                    self.state = State::InvokeOpen;
                } else {
                    self.abandon(tok);
                }
            }
            State::InvokeOpen => match tok.kind {
                K::LeftParen => self.state = State::InvokeTarget,
                _ => self.abandon(tok),
            },
            State::InvokeTarget => match self.skip_expression(tok) {
                Some(K::Comma) => self.state = State::InvokeName,
                Some(_) => self.abandon(tok),
                None => {}
            },
            State::InvokeName => match tok.string_value() {
                Some(name) => {
                    self.pending.name = name.to_string();
                    self.state = State::InvokeNextArg;
                }
                None => self.abandon(tok),
            },
            State::InvokeNextArg => match tok.kind {
                K::Comma => self.state = State::InvokeArg,
                K::RightParen => self.emit(),
                _ => self.abandon(tok),
            },
            State::InvokeArg => {
                if tok.is_ident("Q_RETURN_ARG") || tok.is_ident("Q_ARG") {
                    self.pending.return_arg = tok.lexeme == "Q_RETURN_ARG";
                    self.state = State::InvokeMacroOpen;
                } else {
                    // Connection type or another plain argument.
                    self.state = State::InvokeSkipArg;
                    self.step(tok);
                }
            }
            State::InvokeMacroOpen => match tok.kind {
                K::LeftParen => self.state = State::InvokeMacroType,
                _ => self.abandon(tok),
            },
            State::InvokeMacroType => {
                if let Some(ty) = self.collect_type(tok) {
                    if self.pending.return_arg {
                        self.pending.return_type = ty;
                    } else {
                        self.pending.params.push(ty);
                    }
                    self.state = State::InvokeMacroValue;
                }
            }
            State::InvokeMacroValue => match self.skip_expression(tok) {
                Some(K::RightParen) => self.state = State::InvokeNextArg,
                Some(_) => self.abandon(tok),
                None => {}
            },
            State::InvokeSkipArg => match self.skip_expression(tok) {
                Some(K::Comma) => self.state = State::InvokeArg,
                Some(K::RightParen) => self.emit(),
                Some(_) => self.abandon(tok),
                None => {}
            },
        }
    }

    /// Idle: look for the first token of a recognised shape.
    fn start(&mut self, tok: Token<'src>) {
        if tok.kind != TokenKind::Identifier {
            return;
        }

        let next = if let Some(has_return) = backend_macro(tok.lexeme) {
            self.pending.has_return = has_return;
            State::BackendOpen
        } else if tok.lexeme == NAME_DESCRIPTION_MACRO {
            State::NameDescOpen
        } else if tok.lexeme == "QMetaObject" {
            State::InvokeScope
        } else {
            return;
        };

        self.pending.line = tok.line;
        self.state = next;
    }

    /// Add `tok` to the type being collected.
    ///
    /// Returns the normalised type once a `,` outside template brackets
    /// ends it. Tokens that cannot be part of a type abandon the match.
    fn collect_type(&mut self, tok: Token<'src>) -> Option<String> {
        match tok.kind {
            TokenKind::Comma if self.pending.angles == 0 => {
                if self.pending.type_tokens.is_empty() {
                    self.abandon(tok);
                    return None;
                }
                let tokens = std::mem::take(&mut self.pending.type_tokens);
                return Some(normalize_type(&tokens));
            }
            TokenKind::Less => self.pending.angles += 1,
            TokenKind::Greater if self.pending.angles > 0 => self.pending.angles -= 1,
            TokenKind::LeftParen
            | TokenKind::RightParen
            | TokenKind::Semicolon
            | TokenKind::StringLiteral
            | TokenKind::Greater => {
                self.abandon(tok);
                return None;
            }
            _ => {}
        }
        self.pending.type_tokens.push(tok);
        None
    }

    /// Skip an argument expression.
    ///
    /// Returns the kind of a `,` or `)` at nesting depth zero, which ends
    /// the expression, or of a `;`, which cannot occur inside one.
    fn skip_expression(&mut self, tok: Token<'src>) -> Option<TokenKind> {
        match tok.kind {
            TokenKind::LeftParen => {
                self.pending.parens += 1;
                None
            }
            TokenKind::RightParen if self.pending.parens > 0 => {
                self.pending.parens -= 1;
                None
            }
            TokenKind::Comma if self.pending.parens > 0 => None,
            TokenKind::Comma | TokenKind::RightParen | TokenKind::Semicolon => Some(tok.kind),
            _ => None,
        }
    }

    fn emit(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        trace!(origin = self.origin, line = pending.line, name = %pending.name, "found invocation");
        self.found.push(Signature {
            name: pending.name,
            params: pending.params,
            return_type: pending.return_type,
            origin: self.origin.to_string(),
            line: pending.line,
        });
        self.state = State::Idle;
    }

    fn emit_name_description(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        for suffix in ["Name", "Description"] {
            self.found.push(Signature {
                name: format!("{}{suffix}", pending.name),
                params: vec!["int".to_string()],
                return_type: "QString".to_string(),
                origin: self.origin.to_string(),
                line: pending.line,
            });
        }
        self.state = State::Idle;
    }

    /// Drop the partial match and re-examine `tok` from idle.
    fn abandon(&mut self, tok: Token<'src>) {
        trace!(origin = self.origin, line = tok.line, state = ?self.state, "abandoned partial invocation");
        self.pending = Pending::default();
        self.state = State::Idle;
        self.start(tok);
    }
}

/// `Some(has_return)` for `BACKEND_GET<n>`, `BACKEND_CALL<n>` and their
/// `p`-prefixed forms.
fn backend_macro(ident: &str) -> Option<bool> {
    let rest = ident.strip_prefix('p').unwrap_or(ident);
    let rest = rest.strip_prefix("BACKEND_")?;
    let (has_return, count) = if let Some(count) = rest.strip_prefix("GET") {
        (true, count)
    } else if let Some(count) = rest.strip_prefix("CALL") {
        (false, count)
    } else {
        return None;
    };
    count.chars().all(|c| c.is_ascii_digit()).then_some(has_return)
}

/// Spell a type back out: a space only between adjacent words, and after
/// commas inside template arguments.
fn normalize_type(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    let mut prev: Option<&Token<'_>> = None;
    for tok in tokens {
        if let Some(prev) = prev {
            if (prev.is_word() && tok.is_word()) || prev.kind == TokenKind::Comma {
                out.push(' ');
            }
        }
        out.push_str(tok.lexeme);
        prev = Some(tok);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Vec<String> {
        Scanner::new("test.cpp")
            .scan(source)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn backend_get_and_call() {
        let source = r#"
            qreal AudioOutput::volume() const
            {
                qreal ret = 1.0;
                BACKEND_GET(qreal, ret, "volume");
                return ret;
            }
            void AudioOutput::setVolume(qreal v)
            {
                BACKEND_CALL1("setVolume", qreal, v);
            }
            void MediaObject::stop() { pBACKEND_CALL("stop"); }
        "#;
        assert_eq!(
            scan(source),
            vec!["qreal volume()", "void setVolume(qreal)", "void stop()"]
        );
    }

    #[test]
    fn backend_with_several_arguments() {
        let source = r#"BACKEND_GET2(bool, ok, "setDevice", const QString &, name, QList<int>, ids);"#;
        assert_eq!(scan(source), vec!["bool setDevice(const QString&, QList<int>)"]);
    }

    #[test]
    fn expressions_in_arguments_are_skipped() {
        let source = r#"BACKEND_CALL2("seek", qint64, qMax(0, time), bool, (a && b));"#;
        assert_eq!(scan(source), vec!["void seek(qint64, bool)"]);
    }

    #[test]
    fn name_description_macro() {
        let source = "NAMEDESCRIPTIONFROMINDEX(audioOutputDevice)";
        assert_eq!(
            scan(source),
            vec![
                "QString audioOutputDeviceName(int)",
                "QString audioOutputDeviceDescription(int)",
            ]
        );
    }

    #[test]
    fn invoke_method() {
        let source = r#"
            QMetaObject::invokeMethod(d->backend, "currentTime", Qt::DirectConnection,
                                      Q_RETURN_ARG(qint64, ret));
            QMetaObject::invokeMethod(obj, "setTickInterval", Q_ARG(qint32, interval));
            QMetaObject::invokeMethod(obj, "play");
        "#;
        assert_eq!(
            scan(source),
            vec![
                "qint64 currentTime()",
                "void setTickInterval(qint32)",
                "void play()",
            ]
        );
    }

    #[test]
    fn invoke_with_template_type() {
        let source = r#"QMetaObject::invokeMethod(o, "map", Q_RETURN_ARG(QMap<int, QString>, m), Q_ARG(Phonon::State, s));"#;
        assert_eq!(scan(source), vec!["QMap<int, QString> map(Phonon::State)"]);
    }

    #[test]
    fn macro_definitions_and_non_literal_names_are_ignored() {
        let source = r#"
            #define BACKEND_GET(returnType, returnVar, methodName) \
                QMetaObject::invokeMethod(d->m_backendObject, methodName, Qt::DirectConnection, Q_RETURN_ARG(returnType, returnVar))
            QMetaObject::invokeMethod(obj, name);
            BACKEND_GET(int, x, dynamicName);
        "#;
        assert!(scan(source).is_empty());
    }

    #[test]
    fn abandoned_match_restarts_on_identifier() {
        let source = r#"BACKEND_CALL BACKEND_CALL("pause");"#;
        assert_eq!(scan(source), vec!["void pause()"]);
    }

    #[test]
    fn records_line_of_invocation() {
        let found = Scanner::new("x.cpp").scan("\n\n  BACKEND_CALL(\n\"a\");");
        assert_eq!(found[0].line, 3);
        assert_eq!(found[0].origin, "x.cpp");
    }

    #[test]
    fn backend_macro_names() {
        assert_eq!(backend_macro("BACKEND_GET"), Some(true));
        assert_eq!(backend_macro("BACKEND_GET3"), Some(true));
        assert_eq!(backend_macro("pBACKEND_CALL1"), Some(false));
        assert_eq!(backend_macro("BACKEND_CALLX"), None);
        assert_eq!(backend_macro("BACKEND"), None);
        assert_eq!(backend_macro("pBACKEND"), None);
    }
}
