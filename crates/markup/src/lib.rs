//! Markup scanning for the fallback renderer: a simplified SGML-subset
//! tokenizer plus a bounded entity decoder.
//!
//! The tokenizer reports lowercased tag and attribute names, unescaped text
//! and attribute values, and flags self-closing (and void) elements.
//! Consumers drive a converter from the resulting event stream.

mod entities;
mod tokenizer;
mod types;

pub use crate::entities::decode_entities;
pub use crate::tokenizer::tokenize;
pub use crate::types::Token;
