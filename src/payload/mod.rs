//! # Payload Core
//!
//! The parsing discipline shared by every decoder: a bit cursor, typed
//! primitive reads, field wrapping, and the result/issue model.

pub mod cursor;
pub mod field;
pub mod issue;
pub mod reader;
pub mod result;
pub mod unit;
pub mod value;

pub use cursor::{BitCursor, CursorPosition};
pub use field::FieldFormatter;
pub use issue::{DecodeIssue, IssueKind};
pub use reader::PayloadReader;
pub use result::{merge_occurrences, DecodeResult, Occurrences, OutputShape};
pub use unit::Unit;
pub use value::{Record, Value};
