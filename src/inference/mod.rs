//! Type-inference heuristics for schema samples
//!
//! Turns concrete example values and CSV header names into canonical schema
//! nodes. Used by the forward converters wherever the sample carries data
//! rather than explicit type declarations.
//!
//! ## Features
//!
//! - **Value inference** - Map example values to schema nodes with
//!   conservative defaults (null → string, empty array → array of strings)
//! - **Format detection** - Recognize date-time, date, email, URI and UUID
//!   strings via static regex tables
//! - **Header heuristics** - Best-effort CSV column typing from header names

mod formats;
mod headers;
mod value;

pub use formats::detect_format;
pub use headers::infer_column_node;
pub use value::infer_node;
