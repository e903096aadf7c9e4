//! Font text encoding.
//!
//! Reports are set in the PDF Base-14 fonts; this module keeps text within the
//! single-byte range those fonts can show.

pub mod encoding;

pub use encoding::{encode_literal, is_latin1_char, sanitize, to_latin1_bytes};
