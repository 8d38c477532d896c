use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    /// Scanning rules in priority order. Every regex is anchored with `\A`,
    /// so a rule either matches at the cursor or not at all.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new(r"\A[ \t\r\n\x0B\x0C]+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"\A[A-Za-z_][A-Za-z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new(r"\A[0-9]+(?:\.[0-9]*)?").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new(r#"\A"(?:[^"\\]|\\(?s:.))*""#).unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::String) },
        RegexPattern { regex: Regex::new(r#"\A""#).unwrap(), handler: unterminated_string_handler },
        RegexPattern { regex: Regex::new(r"\A//[^\n]*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comment) },
        RegexPattern { regex: Regex::new(r"\A/\*(?s:.*?)\*/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comment) },
        RegexPattern { regex: Regex::new(r"\A/\*").unwrap(), handler: unterminated_comment_handler },
        RegexPattern { regex: Regex::new(r"\A(?:==|!=|<=|>=|&&|\|\||\+\+|--|\+=|-=|\*=|/=|%=|<<|>>)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Operator) },
        RegexPattern { regex: Regex::new(r"\A[-+*/%^=!<>]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Operator) },
        RegexPattern { regex: Regex::new(r"\A[;,.(){}]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Punctuation) },
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        Lexer {
            tokens: vec![],
            source: source.to_string(),
            pos: 0,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    /// Text matched by `regex` at the cursor, or an empty string.
    pub fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn error(&self, error_impl: ErrorImpl) -> Error {
        Error::new(error_impl, Position::Source(self.pos))
    }
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = lexer.matched(regex).len();
    lexer.advance_n(matched);
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let value = lexer.matched(regex);
    let kind = if RESERVED_LOOKUP.contains(value.as_str()) {
        TokenKind::Keyword
    } else {
        TokenKind::Identifier
    };

    let span = Span {
        start: lexer.pos,
        end: lexer.pos + value.len(),
    };
    lexer.push(MK_TOKEN!(kind, value, span));
    lexer.advance_n(span.end - span.start);
    Ok(())
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = lexer.matched(regex);

    // The fraction is optional, its digits are not
    if matched.ends_with('.') {
        return Err(lexer.error(ErrorImpl::MalformedNumber { token: matched }));
    }

    let span = Span {
        start: lexer.pos,
        end: lexer.pos + matched.len(),
    };
    lexer.push(MK_TOKEN!(TokenKind::Number, matched, span));
    lexer.advance_n(span.end - span.start);
    Ok(())
}

fn unterminated_string_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<(), Error> {
    Err(lexer.error(ErrorImpl::UnterminatedString))
}

fn unterminated_comment_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<(), Error> {
    Err(lexer.error(ErrorImpl::UnterminatedBlockComment))
}

/// Scans `source` into tokens, comments included.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source);

    while !lex.at_eof() {
        let pattern = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(lex.remainder()));

        match pattern {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex)?,
            None => {
                return Err(lex.error(ErrorImpl::UnrecognisedCharacter { character: lex.at() }));
            }
        }
    }

    debug!("tokenized {} bytes into {} tokens", source.len(), lex.tokens.len());
    Ok(lex.tokens)
}

/// Drops comment tokens; parsers never see them.
pub fn strip_comments(tokens: Vec<Token>) -> Vec<Token> {
    tokens
        .into_iter()
        .filter(|token| token.kind != TokenKind::Comment)
        .collect()
}
