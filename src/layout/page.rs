//! Finished pages as ordered lists of drawing operations.
//!
//! Coordinates are in points with the origin at the top-left corner and `y`
//! growing downward. Text `y` is the baseline.

use serde::Serialize;

/// 24-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    /// Builds a colour from `0xRRGGBB`.
    pub const fn hex(rgb: u32) -> Self {
        Self((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub color: Color,
    pub align: Align,
}

impl TextStyle {
    pub const fn new(size: f32, bold: bool, color: Color) -> Self {
        Self {
            size,
            bold,
            color,
            align: Align::Left,
        }
    }

    pub const fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        fill: Color,
        radius: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Color,
        width: f32,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Color,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        style: TextStyle,
    },
}

/// One fixed-size page surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// 1-based position in the document, cover included.
    pub number: usize,
    pub width: f32,
    pub height: f32,
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn new(number: usize, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, fill: Color) {
        self.rounded_rect(x, y, w, h, fill, 0.0);
    }

    pub fn rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, fill: Color, radius: f32) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            w,
            h,
            fill,
            radius,
        });
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color, width: f32) {
        self.ops.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            width,
        });
    }

    pub fn circle(&mut self, cx: f32, cy: f32, r: f32, fill: Color) {
        self.ops.push(DrawOp::Circle { cx, cy, r, fill });
    }

    pub fn text(&mut self, x: f32, y: f32, text: impl Into<String>, style: TextStyle) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.into(),
            style,
        });
    }

    /// Iterates the text runs on this page in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Returns `true` if any text run contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    /// Largest `y` reached by any operation, text baselines included.
    pub fn lowest_extent(&self) -> f32 {
        self.ops
            .iter()
            .map(|op| match op {
                DrawOp::Rect { y, h, .. } => y + h,
                DrawOp::Line { y1, y2, .. } => y1.max(*y2),
                DrawOp::Circle { cy, r, .. } => cy + r,
                DrawOp::Text { y, .. } => *y,
            })
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colour_components() {
        assert_eq!(Color::hex(0x0A1221), Color(0x0A, 0x12, 0x21));
        assert_eq!(Color::hex(0xFFFFFF), Color(255, 255, 255));
    }

    #[test]
    fn texts_skip_shapes() {
        let mut page = Page::new(1, 100.0, 100.0);
        page.rect(0.0, 0.0, 10.0, 10.0, Color::hex(0));
        page.text(5.0, 20.0, "hello", TextStyle::new(10.0, false, Color::hex(0)));
        assert_eq!(page.texts().collect::<Vec<_>>(), vec!["hello"]);
        assert!(page.contains_text("ell"));
        assert_eq!(page.lowest_extent(), 20.0);
    }
}
