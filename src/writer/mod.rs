//! Writing report pages as PDF.
//!
//! ```text
//! placed lines (text, position in pt, Base-14 face)
//!     ↓
//! ContentStreamBuilder   one drawing program per page
//!     ↓
//! PdfWriter              fonts, page tree, Info, xref, trailer
//!     ↓
//! ObjectSerializer       sorted, trimmed object syntax
//! ```
//!
//! Line breaking measures with the same Base-14 widths ([`FontManager`],
//! [`TextLayout`]) that end up in the file, so layout and output agree.
//! [`RunningTemplate`] holds the header and footer stamped on every page.

mod content_stream;
mod font_manager;
mod object_serializer;
mod page_template;
mod pdf_writer;

pub use content_stream::{ContentStreamBuilder, ContentStreamOp};
pub use font_manager::{FontFamily, FontInfo, FontManager, FontWeight, TextLayout};
pub use object_serializer::ObjectSerializer;
pub use page_template::{Anchor, Field, PageContext, RunningLine, RunningStyle, RunningTemplate};
pub use pdf_writer::{PageBuilder, PdfWriter, PdfWriterConfig, A4_POINTS};
