//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a lexer handler that emits the matched
//!   text as a token of a fixed kind

/// Creates a Token instance.
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $lexeme:expr, $span:expr) => {
        Token {
            kind: $kind,
            lexeme: $lexeme,
            span: $span,
        }
    };
}

/// Creates a lexer handler that pushes the whole match as one token.
///
/// The handler advances the lexer past the matched text.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new(r"\A[;,.(){}]").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Punctuation),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr) => {
        |lexer: &mut Lexer, regex: &Regex| -> Result<(), Error> {
            let matched = lexer.matched(regex);
            let span = Span {
                start: lexer.pos,
                end: lexer.pos + matched.len(),
            };
            lexer.push(MK_TOKEN!($kind, matched, span));
            lexer.advance_n(span.end - span.start);
            Ok(())
        }
    };
}
