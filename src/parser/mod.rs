//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! Two parsers share one borrowed token buffer:
//!
//! - `ExpressionParser` climbs the binary precedence tiers held in
//!   `lookups::BP_LOOKUP`, then handles unary, increment and primary forms.
//! - `StatementParser` dispatches on the leading keyword or punctuation
//!   through its statement lookup table and hands each inline expression to
//!   a fresh `ExpressionParser` over a sub-slice of the buffer.
//!
//! Both expect comment tokens to be stripped beforehand. The first
//! violation aborts the parse; there is no recovery.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
