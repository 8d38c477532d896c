use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// The only error surfaced by the front end.
///
/// Lexical and grammatical failures share this type; `internal_error` carries
/// the message and `position` says where it happened.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> Position {
        self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedBlockComment => "UnterminatedBlockComment",
            ErrorImpl::UnrecognisedCharacter { .. } => "UnrecognisedCharacter",
            ErrorImpl::MalformedNumber { .. } => "MalformedNumber",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedEndOfInput => "UnexpectedEndOfInput",
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::ExpectedIdentifierAfter { .. } => "ExpectedIdentifierAfter",
            ErrorImpl::InvalidIncrementTarget => "InvalidIncrementTarget",
            ErrorImpl::ExpectedExpression => "ExpectedExpression",
            ErrorImpl::TrailingTokenAfterExpression { .. } => "TrailingTokenAfterExpression",
            ErrorImpl::TrailingTokenAfterStatement { .. } => "TrailingTokenAfterStatement",
            ErrorImpl::NestedTooDeeply { .. } => "NestedTooDeeply",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("add the closing `\"`"))
            }
            ErrorImpl::UnterminatedBlockComment => {
                ErrorTip::Suggestion(String::from("close the comment with `*/`"))
            }
            ErrorImpl::MalformedNumber { .. } => ErrorTip::Suggestion(String::from(
                "a decimal point must be followed by at least one digit",
            )),
            ErrorImpl::ExpectedToken { message, .. } if message.contains("';'") => {
                ErrorTip::Suggestion(String::from("did you miss a semicolon?"))
            }
            ErrorImpl::InvalidIncrementTarget | ErrorImpl::ExpectedIdentifierAfter { .. } => {
                ErrorTip::Suggestion(String::from("`++` and `--` only apply to plain variables"))
            }
            ErrorImpl::NestedTooDeeply { .. } => ErrorTip::Suggestion(String::from(
                "split the nested part into separate statements",
            )),
            ErrorImpl::TrailingTokenAfterExpression { .. } => ErrorTip::Suggestion(
                String::from("statements end with `;`, try statement mode"),
            ),
            _ => ErrorTip::None,
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// What the parser found where it expected something else.
#[derive(Debug, Clone, PartialEq)]
pub enum Found {
    Token(String),
    EndOfInput,
}

impl Display for Found {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Found::Token(lexeme) => write!(f, "'{}'", lexeme),
            Found::EndOfInput => write!(f, "end of input"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("Unterminated string")]
    UnterminatedString,
    #[error("Unterminated block comment")]
    UnterminatedBlockComment,
    #[error("Unrecognized character: {character}")]
    UnrecognisedCharacter { character: char },
    #[error("Malformed number: {token}")]
    MalformedNumber { token: String },
    #[error("Unexpected token: '{token}'")]
    UnexpectedToken { token: String },
    #[error("Unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("{message}. Got: {found}")]
    ExpectedToken { message: String, found: Found },
    #[error("Expected identifier after {operator}")]
    ExpectedIdentifierAfter { operator: String },
    #[error("Post-increment/decrement can only be applied to variables")]
    InvalidIncrementTarget,
    #[error("Expected expression")]
    ExpectedExpression,
    #[error("Unexpected token after expression: '{token}'")]
    TrailingTokenAfterExpression { token: String },
    #[error("Unexpected token after statement: '{token}'")]
    TrailingTokenAfterStatement { token: String },
    #[error("Nested too deeply: more than {limit} levels")]
    NestedTooDeeply { limit: usize },
}
