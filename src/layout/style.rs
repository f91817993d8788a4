//! Colour palette and text styles for report pages.

use super::page::{Align, Color, TextStyle};
use crate::analysis::LoadClass;

/// Cover background and table header band.
pub const NAVY: Color = Color::hex(0x0A1221);
/// Accent bars and headline figures.
pub const PRIMARY: Color = Color::hex(0xFFC107);
/// Section header band.
pub const SECTION_BG: Color = Color::hex(0x1E293B);
pub const BODY: Color = Color::hex(0x1A1A1A);
pub const SECONDARY: Color = Color::hex(0x64748B);
/// Muted labels on dark backgrounds.
pub const MUTED: Color = Color::hex(0x94A3B8);
/// Shaded table rows (even row index).
pub const ROW_ALT: Color = Color::hex(0xF1F5F9);
/// Room sub-header band.
pub const SUB_HEADER_BG: Color = Color::hex(0xE2E8F0);
pub const CARD_BG: Color = Color::hex(0xF8FAFC);
pub const RULE: Color = Color::hex(0xCBD5E1);
pub const WHITE: Color = Color::hex(0xFFFFFF);

pub const TITLE: TextStyle = TextStyle::new(28.0, true, WHITE);
pub const SUBTITLE: TextStyle = TextStyle::new(13.0, false, PRIMARY);
pub const SECTION_HEADER: TextStyle = TextStyle::new(11.0, true, WHITE);
pub const SUB_HEADER: TextStyle = TextStyle::new(9.0, true, NAVY);
pub const BODY_TEXT: TextStyle = TextStyle::new(10.0, false, BODY);
pub const BODY_BOLD: TextStyle = TextStyle::new(10.0, true, BODY);
pub const NOTE: TextStyle = TextStyle::new(9.0, false, SECONDARY);
pub const TABLE_HEADER: TextStyle = TextStyle::new(8.0, true, WHITE);
pub const TABLE_CELL: TextStyle = TextStyle::new(8.0, false, BODY);
pub const CARD_LABEL: TextStyle = TextStyle::new(7.0, false, SECONDARY);
pub const CARD_VALUE: TextStyle = TextStyle::new(8.0, true, BODY);
pub const RUNNING_TITLE: TextStyle = TextStyle::new(7.0, true, PRIMARY);
pub const RUNNING_PAGE: TextStyle = TextStyle::new(7.0, false, MUTED).aligned(Align::Right);
pub const COVER_LABEL: TextStyle = TextStyle::new(8.0, false, MUTED);
pub const COVER_VALUE: TextStyle = TextStyle::new(12.0, true, WHITE);
pub const STAT_LABEL: TextStyle = TextStyle::new(8.0, false, MUTED).aligned(Align::Center);
pub const STAT_VALUE: TextStyle = TextStyle::new(15.0, true, PRIMARY).aligned(Align::Center);
pub const FOOTER: TextStyle = TextStyle::new(7.0, false, SECONDARY).aligned(Align::Center);

/// Marker colour for a load class in the reference table.
pub fn load_class_color(class: LoadClass) -> Color {
    match class {
        LoadClass::Low => Color::hex(0x22C55E),
        LoadClass::Medium => Color::hex(0xF59E0B),
        LoadClass::High => Color::hex(0xEF4444),
        LoadClass::Critical => Color::hex(0x7C3AED),
    }
}
