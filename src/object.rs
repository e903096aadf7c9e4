//! Objects written into a report PDF.
//!
//! Objects only flow one way, from the writer into the serializer, so the
//! model carries no accessors for reading a document back.

use std::collections::HashMap;

/// Key-value map; the serializer sorts keys so output is byte-stable.
pub type Dictionary = HashMap<String, Object>;

/// A value in the report's object graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// `null`
    Null,
    /// `true` / `false`
    Boolean(bool),
    /// Whole number, used for counts, lengths and ids
    Integer(i64),
    /// Coordinates and sizes in points
    Real(f64),
    /// Latin-1 bytes, escaped on output
    String(Vec<u8>),
    /// `/Name` token, stored without the slash
    Name(String),
    /// `[ ... ]`
    Array(Vec<Object>),
    /// `<< ... >>`
    Dictionary(Dictionary),
    /// Page content or other binary payload. `Length` is filled in on output.
    Stream {
        /// Entries besides `Length`
        dict: Dictionary,
        /// Payload, compressed or not
        data: bytes::Bytes,
    },
    /// Pointer to an object written elsewhere in the file
    Reference(ObjectRef),
}

/// `id gen R`. Reports never update objects, so `gen` stays 0 in practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef {
    /// Position in the xref table
    pub id: u32,
    /// Generation
    pub gen: u16,
}

impl ObjectRef {
    /// Reference to object `id` at generation `gen`.
    pub fn new(id: u32, gen: u16) -> Self {
        Self { id, gen }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} R", self.id, self.gen)
    }
}

impl From<ObjectRef> for Object {
    fn from(r: ObjectRef) -> Self {
        Object::Reference(r)
    }
}
