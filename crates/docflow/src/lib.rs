//! Lightweight HTML-to-document conversion.
//!
//! A [`SegmentBuilder`] consumes one document's worth of parse events
//! (start tag, end tag, text), with text and attribute values already
//! entity-decoded by the producer, and produces an ordered sequence of typed
//! [`Segment`]s: inline runs, breaks, rules, links, images, and form-control
//! summaries. Two serializers render that sequence independently:
//! [`text::render`] to normalized plain text and [`html::render`] to a
//! sanitized, styleable fragment.
//!
//! The converter never fails. Malformed markup degrades to emptier output;
//! unknown tags are transparent and their text flows through.

mod builder;
mod control;
pub mod html;
mod segment;
pub mod text;
mod url;

pub use crate::builder::SegmentBuilder;
pub use crate::segment::{Control, ControlKind, Segment};
