//! Closed set of layout blocks with a uniform measure/draw contract.
//!
//! Every block reports its height for a given frame before it is placed, and
//! draws itself below a `top` coordinate. Heights are deterministic, so the
//! engine can decide page breaks before anything is painted.

use super::measure::{TextMeasure, wrap_text};
use super::page::{Align, Color, Page, TextStyle};
use super::style;

pub const LINE_HEIGHT: f32 = 13.0;
pub const SECTION_HEADER_HEIGHT: f32 = 26.0;
pub const SUB_HEADER_HEIGHT: f32 = 18.0;
pub const KEY_VALUE_HEIGHT: f32 = 14.0;
pub const DIVIDER_HEIGHT: f32 = 16.0;
pub const TABLE_HEADER_HEIGHT: f32 = 14.0;
pub const DEFAULT_ROW_HEIGHT: f32 = 13.0;
/// Card box plus the gap below it.
pub const CARD_HEIGHT: f32 = 96.0;
const CARD_BOX_HEIGHT: f32 = 88.0;
const NOTE_PADDING: f32 = 2.0;
/// Bands extend this far past the content margins.
const BLEED: f32 = 5.0;

/// Horizontal geometry and text measurement shared by all blocks on a page.
pub struct Frame<'a> {
    pub margin_x: f32,
    pub page_width: f32,
    pub measure: &'a dyn TextMeasure,
}

impl Frame<'_> {
    pub fn left(&self) -> f32 {
        self.margin_x
    }

    pub fn right(&self) -> f32 {
        self.page_width - self.margin_x
    }

    pub fn content_width(&self) -> f32 {
        self.right() - self.left()
    }

    fn band_width(&self) -> f32 {
        self.content_width() + 2.0 * BLEED
    }
}

/// A row of table cells, optionally led by a coloured marker dot.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<String>,
    pub marker: Option<Color>,
}

impl TableRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self {
            cells,
            marker: None,
        }
    }

    pub fn with_marker(mut self, marker: Color) -> Self {
        self.marker = Some(marker);
        self
    }
}

/// Fixed-column table. The header band is drawn once; data rows may continue
/// on following pages but a row is never split.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub widths: Vec<f32>,
    /// Empty headers suppress the header band.
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
    pub row_height: f32,
    /// Right-align the last cell against the content edge.
    pub align_last_right: bool,
}

impl Table {
    pub fn new(widths: &[f32], headers: &[&str]) -> Self {
        Self {
            widths: widths.to_vec(),
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            rows: Vec::new(),
            row_height: DEFAULT_ROW_HEIGHT,
            align_last_right: false,
        }
    }

    pub fn with_row_height(mut self, row_height: f32) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn with_last_column_right(mut self) -> Self {
        self.align_last_right = true;
        self
    }

    pub fn push(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    pub fn header_height(&self) -> f32 {
        if self.headers.is_empty() {
            0.0
        } else {
            TABLE_HEADER_HEIGHT
        }
    }

    pub fn height(&self) -> f32 {
        self.header_height() + self.rows.len() as f32 * self.row_height
    }

    /// Header plus first row, the part that is never separated.
    pub fn lead_height(&self) -> f32 {
        if self.rows.is_empty() {
            self.header_height()
        } else {
            self.header_height() + self.row_height
        }
    }

    pub fn draw_header(&self, page: &mut Page, top: f32, frame: &Frame<'_>) {
        if self.headers.is_empty() {
            return;
        }
        page.rect(
            frame.left() - BLEED,
            top,
            frame.band_width(),
            TABLE_HEADER_HEIGHT,
            style::NAVY,
        );
        let baseline = top + TABLE_HEADER_HEIGHT - 4.0;
        let mut x = frame.left();
        for (label, width) in self.headers.iter().zip(&self.widths) {
            page.text(x, baseline, label.as_str(), style::TABLE_HEADER);
            x += width;
        }
    }

    /// Draws data row `index`; even indices get the shaded background.
    pub fn draw_row(&self, page: &mut Page, top: f32, index: usize, frame: &Frame<'_>) {
        let Some(row) = self.rows.get(index) else {
            return;
        };
        if index % 2 == 0 {
            page.rect(
                frame.left() - BLEED,
                top,
                frame.band_width(),
                self.row_height,
                style::ROW_ALT,
            );
        }
        let baseline = top + self.row_height - 4.0;
        let mut x = frame.left();
        if let Some(marker) = row.marker {
            page.circle(x + 5.0, top + self.row_height / 2.0, 4.0, marker);
            x += 15.0;
        }
        let last = row.cells.len().saturating_sub(1);
        for (i, (cell, width)) in row.cells.iter().zip(&self.widths).enumerate() {
            if self.align_last_right && i == last {
                page.text(
                    frame.right(),
                    baseline,
                    cell.as_str(),
                    style::TABLE_CELL.aligned(Align::Right),
                );
            } else {
                page.text(x, baseline, cell.as_str(), style::TABLE_CELL);
            }
            x += width;
        }
    }
}

/// Fixed-height summary of one device's energy and cost horizons.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub subtitle: String,
    pub labels: [String; 4],
    pub energy: [String; 4],
    pub cost: [String; 4],
}

impl Card {
    fn draw(&self, page: &mut Page, top: f32, frame: &Frame<'_>) {
        page.rounded_rect(
            frame.left() - BLEED,
            top,
            frame.band_width(),
            CARD_BOX_HEIGHT,
            style::CARD_BG,
            4.0,
        );
        page.text(frame.left(), top + 14.0, self.title.as_str(), style::BODY_BOLD);
        page.text(frame.left(), top + 27.0, self.subtitle.as_str(), style::BODY_TEXT);

        let col = (frame.content_width() - 10.0) / 4.0;
        for (row, (values, text_style)) in [
            (&self.labels, style::CARD_LABEL),
            (&self.energy, style::CARD_VALUE),
            (&self.cost, style::CARD_VALUE),
        ]
        .into_iter()
        .enumerate()
        {
            let baseline = top + 44.0 + row as f32 * 14.0;
            for (i, value) in values.iter().enumerate() {
                page.text(frame.left() + i as f32 * col, baseline, value.as_str(), text_style);
            }
        }
    }
}

/// A unit of flowing content.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Dark full-width band with a section title.
    SectionHeader(String),
    /// Light band introducing a room's content.
    SubHeader(String),
    /// Label on the left, value right-aligned.
    KeyValue { label: String, value: String },
    /// Word-wrapped text with optional vertical padding.
    Paragraph {
        text: String,
        style: TextStyle,
        padding: f32,
    },
    /// Word-wrapped bullet item.
    Bullet(String),
    Table(Table),
    Card(Card),
    Divider,
    Spacer(f32),
}

impl Block {
    pub fn section(title: impl Into<String>) -> Self {
        Self::SectionHeader(title.into())
    }

    pub fn key_value(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::KeyValue {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn body(text: impl Into<String>) -> Self {
        Self::Paragraph {
            text: text.into(),
            style: style::BODY_TEXT,
            padding: 0.0,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::Paragraph {
            text: text.into(),
            style: style::BODY_BOLD,
            padding: 0.0,
        }
    }

    /// Secondary-coloured paragraph with a little breathing room.
    pub fn note(text: impl Into<String>) -> Self {
        Self::Paragraph {
            text: text.into(),
            style: style::NOTE,
            padding: NOTE_PADDING,
        }
    }

    pub fn bullet(text: impl Into<String>) -> Self {
        Self::Bullet(text.into())
    }

    /// Vertical space the block needs when drawn in `frame`.
    pub fn measure(&self, frame: &Frame<'_>) -> f32 {
        match self {
            Self::SectionHeader(_) => SECTION_HEADER_HEIGHT,
            Self::SubHeader(_) => SUB_HEADER_HEIGHT,
            Self::KeyValue { .. } => KEY_VALUE_HEIGHT,
            Self::Paragraph {
                text,
                style,
                padding,
            } => {
                let lines = wrap_text(text, frame.content_width(), style.size, frame.measure);
                2.0 * padding + lines.len() as f32 * LINE_HEIGHT
            }
            Self::Bullet(text) => bullet_lines(text, frame).len() as f32 * LINE_HEIGHT,
            Self::Table(table) => table.height(),
            Self::Card(_) => CARD_HEIGHT,
            Self::Divider => DIVIDER_HEIGHT,
            Self::Spacer(height) => *height,
        }
    }

    /// Paints the block with its top edge at `top`.
    pub fn draw(&self, page: &mut Page, top: f32, frame: &Frame<'_>) {
        match self {
            Self::SectionHeader(title) => {
                page.rounded_rect(
                    frame.left() - BLEED,
                    top + 6.0,
                    frame.band_width(),
                    18.0,
                    style::SECTION_BG,
                    3.0,
                );
                page.text(frame.left(), top + 19.0, title.as_str(), style::SECTION_HEADER);
            }
            Self::SubHeader(name) => {
                page.rounded_rect(
                    frame.left() - BLEED,
                    top + 2.0,
                    frame.band_width(),
                    14.0,
                    style::SUB_HEADER_BG,
                    3.0,
                );
                page.text(frame.left(), top + 12.0, format!("ROOM: {name}"), style::SUB_HEADER);
            }
            Self::KeyValue { label, value } => {
                let baseline = top + 10.0;
                page.text(frame.left(), baseline, label.as_str(), style::NOTE);
                page.text(
                    frame.right(),
                    baseline,
                    value.as_str(),
                    style::BODY_BOLD.aligned(Align::Right),
                );
            }
            Self::Paragraph {
                text,
                style,
                padding,
            } => {
                let lines = wrap_text(text, frame.content_width(), style.size, frame.measure);
                draw_lines(page, top + padding, frame.left(), lines, *style);
            }
            Self::Bullet(text) => {
                draw_lines(page, top, frame.left(), bullet_lines(text, frame), style::BODY_TEXT);
            }
            Self::Table(table) => {
                table.draw_header(page, top, frame);
                let mut y = top + table.header_height();
                for index in 0..table.rows.len() {
                    table.draw_row(page, y, index, frame);
                    y += table.row_height;
                }
            }
            Self::Card(card) => card.draw(page, top, frame),
            Self::Divider => {
                let y = top + 6.0;
                page.line(frame.left(), y, frame.right(), y, style::RULE, 0.5);
            }
            Self::Spacer(_) => {}
        }
    }
}

const BULLET_MARK: &str = "\u{2022}  ";
const BULLET_CONTINUATION: &str = "    ";

fn bullet_lines(text: &str, frame: &Frame<'_>) -> Vec<String> {
    let size = style::BODY_TEXT.size;
    let indent = frame
        .measure
        .width(BULLET_MARK, size)
        .max(frame.measure.width(BULLET_CONTINUATION, size));
    wrap_text(text, frame.content_width() - indent, size, frame.measure)
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let prefix = if i == 0 { BULLET_MARK } else { BULLET_CONTINUATION };
            format!("{prefix}{line}")
        })
        .collect()
}

fn draw_lines(page: &mut Page, top: f32, x: f32, lines: Vec<String>, text_style: TextStyle) {
    for (i, line) in lines.into_iter().enumerate() {
        let baseline = top + (i + 1) as f32 * LINE_HEIGHT - 3.0;
        page.text(x, baseline, line, text_style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::measure::AverageGlyph;

    fn with_frame<T>(f: impl FnOnce(&Frame<'_>) -> T) -> T {
        let measure = AverageGlyph::new(0.5);
        let frame = Frame {
            margin_x: 50.0,
            page_width: 595.0,
            measure: &measure,
        };
        f(&frame)
    }

    #[test]
    fn fixed_blocks_have_fixed_heights() {
        with_frame(|frame| {
            assert_eq!(Block::section("A").measure(frame), SECTION_HEADER_HEIGHT);
            assert_eq!(Block::key_value("k", "v").measure(frame), KEY_VALUE_HEIGHT);
            assert_eq!(Block::Divider.measure(frame), DIVIDER_HEIGHT);
            assert_eq!(Block::Spacer(7.0).measure(frame), 7.0);
        });
    }

    #[test]
    fn paragraph_height_tracks_wrapped_lines() {
        with_frame(|frame| {
            // 495 pt wide at 5 pt/char holds 99 chars, i.e. 20 words per line
            let text = "word ".repeat(50);
            let block = Block::body(text.trim());
            assert_eq!(block.measure(frame), 3.0 * LINE_HEIGHT);
            let note = Block::note("short");
            assert_eq!(note.measure(frame), LINE_HEIGHT + 4.0);
        });
    }

    #[test]
    fn bullet_continuations_are_indented() {
        with_frame(|frame| {
            let lines = bullet_lines(&"alpha ".repeat(30), frame);
            assert!(lines.len() > 1);
            assert!(lines[0].starts_with('\u{2022}'));
            assert!(lines[1..].iter().all(|l| l.starts_with("    ")));
        });
    }

    #[test]
    fn bullet_lines_fit_content_width() {
        with_frame(|frame| {
            let size = style::BODY_TEXT.size;
            for text in ["a ".repeat(400), "ab cd ".repeat(150), "alpha ".repeat(60)] {
                let lines = bullet_lines(&text, frame);
                assert!(lines.len() > 1);
                for line in &lines {
                    let width = frame.measure.width(line, size);
                    assert!(
                        width <= frame.content_width(),
                        "{width} > {}: {line:?}",
                        frame.content_width()
                    );
                }
            }
        });
    }

    #[test]
    fn table_lead_is_header_and_first_row() {
        let mut table = Table::new(&[100.0], &["H"]).with_row_height(20.0);
        assert_eq!(table.lead_height(), TABLE_HEADER_HEIGHT);
        table.push(TableRow::new(vec!["1".into()]));
        table.push(TableRow::new(vec!["2".into()]));
        assert_eq!(table.lead_height(), TABLE_HEADER_HEIGHT + 20.0);
    }

    #[test]
    fn headerless_table_height_is_rows_only() {
        let mut table = Table::new(&[100.0], &[]).with_row_height(20.0);
        for i in 0..3 {
            table.push(TableRow::new(vec![i.to_string()]));
        }
        assert_eq!(table.header_height(), 0.0);
        assert_eq!(table.height(), 60.0);
    }

    #[test]
    fn rows_alternate_shading_by_index() {
        with_frame(|frame| {
            let mut table = Table::new(&[100.0, 100.0], &["A", "B"]);
            table.push(TableRow::new(vec!["1".into(), "x".into()]));
            table.push(TableRow::new(vec!["2".into(), "y".into()]));
            let mut page = Page::new(1, 595.0, 842.0);
            table.draw_row(&mut page, 100.0, 0, frame);
            let shaded = page.ops.len();
            let mut page = Page::new(1, 595.0, 842.0);
            table.draw_row(&mut page, 100.0, 1, frame);
            assert_eq!(shaded, page.ops.len() + 1);
        });
    }

    #[test]
    fn card_paints_all_twelve_figures() {
        with_frame(|frame| {
            let card = Card {
                title: "Fan".into(),
                subtitle: "Connected Load: 200 W".into(),
                labels: ["Daily", "Weekly", "Monthly", "Yearly"].map(String::from),
                energy: ["1", "7", "30", "365"].map(String::from),
                cost: ["a", "b", "c", "d"].map(String::from),
            };
            let mut page = Page::new(1, 595.0, 842.0);
            Block::Card(card).draw(&mut page, 50.0, frame);
            assert_eq!(page.texts().count(), 14);
            assert!(page.lowest_extent() <= 50.0 + CARD_HEIGHT);
        });
    }
}
