//! Object syntax for report files.
//!
//! Dictionary keys are written sorted and reals are trimmed, so the same
//! report always serializes to the same bytes. Everything is written into
//! memory, so nothing here can fail.

use crate::object::{Dictionary, Object, ObjectRef};

/// Writes [`Object`]s as PDF syntax.
#[derive(Debug, Clone, Default)]
pub struct ObjectSerializer {
    /// Dictionary entries on one line
    compact: bool,
}

impl ObjectSerializer {
    /// One dictionary entry per line, for reading output by eye.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries separated by single spaces. Used for real files.
    pub fn compact() -> Self {
        Self { compact: true }
    }

    /// Object syntax as bytes.
    pub fn serialize(&self, obj: &Object) -> Vec<u8> {
        let mut buf = Vec::new();
        self.write_object(&mut buf, obj);
        buf
    }

    /// Object syntax as text; non-UTF-8 string bytes are replaced.
    pub fn serialize_to_string(&self, obj: &Object) -> String {
        String::from_utf8_lossy(&self.serialize(obj)).into_owned()
    }

    /// `id gen obj ... endobj` wrapper around an object.
    pub fn serialize_indirect(&self, id: u32, gen: u16, obj: &Object) -> Vec<u8> {
        let mut buf = format!("{} {} obj\n", id, gen).into_bytes();
        self.write_object(&mut buf, obj);
        buf.extend_from_slice(b"\nendobj\n");
        buf
    }

    fn write_object(&self, buf: &mut Vec<u8>, obj: &Object) {
        match obj {
            Object::Null => buf.extend_from_slice(b"null"),
            Object::Boolean(b) => buf.extend_from_slice(if *b { b"true" } else { b"false" }),
            Object::Integer(i) => buf.extend_from_slice(i.to_string().as_bytes()),
            Object::Real(r) => buf.extend_from_slice(format_real(*r, 5).as_bytes()),
            Object::String(s) => write_string(buf, s),
            Object::Name(n) => write_name(buf, n),
            Object::Array(arr) => {
                buf.push(b'[');
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 {
                        buf.push(b' ');
                    }
                    self.write_object(buf, item);
                }
                buf.push(b']');
            },
            Object::Dictionary(dict) => self.write_dictionary(buf, dict),
            Object::Stream { dict, data } => {
                let mut dict = dict.clone();
                dict.entry("Length".to_string())
                    .or_insert(Object::Integer(data.len() as i64));
                self.write_dictionary(buf, &dict);
                buf.extend_from_slice(b"\nstream\n");
                buf.extend_from_slice(data);
                buf.extend_from_slice(b"\nendstream");
            },
            Object::Reference(r) => buf.extend_from_slice(r.to_string().as_bytes()),
        }
    }

    fn write_dictionary(&self, buf: &mut Vec<u8>, dict: &Dictionary) {
        buf.extend_from_slice(b"<<");

        // Sorted keys keep output byte-for-byte reproducible
        let mut keys: Vec<&String> = dict.keys().collect();
        keys.sort();

        for key in keys {
            if !self.compact {
                buf.extend_from_slice(b"\n  ");
            }
            write_name(buf, key);
            buf.push(b' ');
            self.write_object(buf, &dict[key]);
        }

        if !self.compact && !dict.is_empty() {
            buf.push(b'\n');
        }
        buf.extend_from_slice(b">>");
    }
}

/// Format a real number with at most `decimals` places and no trailing zeros.
pub(crate) fn format_real(value: f64, decimals: usize) -> String {
    if value.fract() == 0.0 {
        return format!("{}", value as i64);
    }
    let formatted = format!("{:.*}", decimals, value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Literal `(...)` syntax for printable ASCII, hex `<...>` otherwise.
fn write_string(buf: &mut Vec<u8>, data: &[u8]) {
    let printable = data
        .iter()
        .all(|&b| b == b'\n' || b == b'\r' || b == b'\t' || (0x20..=0x7E).contains(&b));

    if printable {
        buf.push(b'(');
        for &byte in data {
            match byte {
                b'(' => buf.extend_from_slice(b"\\("),
                b')' => buf.extend_from_slice(b"\\)"),
                b'\\' => buf.extend_from_slice(b"\\\\"),
                b'\n' => buf.extend_from_slice(b"\\n"),
                b'\r' => buf.extend_from_slice(b"\\r"),
                b'\t' => buf.extend_from_slice(b"\\t"),
                _ => buf.push(byte),
            }
        }
        buf.push(b')');
    } else {
        buf.push(b'<');
        for byte in data {
            buf.extend_from_slice(format!("{:02X}", byte).as_bytes());
        }
        buf.push(b'>');
    }
}

/// Names escape delimiters, whitespace and non-ASCII bytes as `#xx`.
fn write_name(buf: &mut Vec<u8>, name: &str) {
    buf.push(b'/');
    for byte in name.bytes() {
        match byte {
            b'!'
            | b'"'
            | b'$'..=b'&'
            | b'\''
            | b'*'..=b'.'
            | b'0'..=b'9'
            | b';'
            | b'='
            | b'?'
            | b'@'
            | b'A'..=b'Z'
            | b'^'..=b'z'
            | b'|'
            | b'~' => buf.push(byte),
            _ => buf.extend_from_slice(format!("#{:02X}", byte).as_bytes()),
        }
    }
}

/// Shorthand constructors used when building the document.
impl ObjectSerializer {
    /// `/s`
    pub fn name(s: &str) -> Object {
        Object::Name(s.to_string())
    }

    /// String from already-encoded bytes.
    pub fn bytes(b: impl Into<Vec<u8>>) -> Object {
        Object::String(b.into())
    }

    /// Integer.
    pub fn integer(i: i64) -> Object {
        Object::Integer(i)
    }

    /// Dictionary from key/value pairs.
    pub fn dict(entries: Vec<(&str, Object)>) -> Object {
        Object::Dictionary(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    /// `id gen R`
    pub fn reference(r: ObjectRef) -> Object {
        r.into()
    }

    /// `[llx lly urx ury]` from an origin and a size.
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Object {
        Object::Array(vec![
            Object::Real(x),
            Object::Real(y),
            Object::Real(x + width),
            Object::Real(y + height),
        ])
    }
}
