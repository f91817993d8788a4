//! Page layout: blocks, the cursor-based engine, and report composition.

pub mod block;
/// Fixed cover page.
pub mod cover;
pub mod engine;
/// Text measurement and word-wrap.
pub mod measure;
pub mod page;
pub mod report;
/// Palette and type styles.
pub mod style;

pub use block::{Block, Card, Frame, Table, TableRow};
pub use engine::DocumentLayoutEngine;
pub use measure::{AverageGlyph, TextMeasure, wrap_text};
pub use page::{Color, DrawOp, Page};
pub use report::render;
