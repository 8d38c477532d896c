//! Error types for the front end.
//!
//! Every stage reports failures through the single `Error` type defined
//! here. It pairs a message-producing `ErrorImpl` with a `Position`:
//!
//! - a byte offset into the source for tokenizer failures
//! - a token index for parser failures
//!
//! The first error aborts the whole parse; nothing is recovered.

pub mod errors;
