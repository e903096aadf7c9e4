//! Document model and assembly.
//!
//! ```text
//! ReportRequest ──assemble──▶ Vec<PageBlock> ──Renderer──▶ bytes
//!                    │
//!                    └── Flow (LayoutCursor in, LayoutCursor out)
//! ```

mod assembler;
mod block;
mod cursor;
mod model;

pub use assembler::{assemble, Assembler};
pub use block::{Align, BlockKind, BlockStyle, PageBlock};
pub use cursor::{Flow, LayoutCursor, PlacedLine, Placement};
pub use model::{ReportRequest, Section};
