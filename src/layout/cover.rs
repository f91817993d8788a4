//! Fixed-layout cover page with headline KPIs.
//!
//! Positions are laid out for an 842 pt tall page and scaled vertically to
//! the configured height; horizontal positions follow the margin.

use super::page::{Align, Page, TextStyle};
use super::style;
use crate::analysis::ReportModel;
use crate::config::ReportConfig;

const REFERENCE_HEIGHT: f32 = 842.0;
const BLANK: &str = "\u{2014}";

/// Paints the cover onto an empty page.
pub fn paint_cover(page: &mut Page, model: &ReportModel, config: &ReportConfig) {
    let fmt = &config.format;
    let margin = config.page.margin_x;
    let width = page.width;
    let height = page.height;
    let sy = height / REFERENCE_HEIGHT;
    let y = |reference: f32| reference * sy;

    page.rect(0.0, 0.0, width, height, style::NAVY);
    page.rect(0.0, 0.0, width, 8.0, style::PRIMARY);

    page.rounded_rect(margin, y(110.0), 64.0, 64.0, style::PRIMARY, 10.0);
    page.text(
        margin + 32.0,
        y(154.0),
        "E",
        TextStyle::new(26.0, true, style::NAVY).aligned(Align::Center),
    );

    page.text(margin, y(220.0), config.page.title.as_str(), style::TITLE);
    page.text(margin, y(242.0), "Electrical Usage Analysis Report", style::SUBTITLE);
    page.line(margin, y(256.0), width - margin, y(256.0), style::PRIMARY, 2.0);

    let office = office_name(config);
    let tariff = format!("{} / kWh", fmt.currency(model.tariff_per_kwh));
    let info = [
        ("OFFICE / LOCATION", office, margin, 295.0),
        ("GENERATED ON", fmt.date(&model.generated_at), margin, 345.0),
        ("TOTAL ROOMS", model.total_rooms.to_string(), margin, 395.0),
        ("TOTAL DEVICES", model.total_devices.to_string(), margin + 180.0, 395.0),
        ("ELECTRICITY TARIFF", tariff, margin, 445.0),
    ];
    for (label, value, x, top) in info {
        page.text(x, y(top), label, style::COVER_LABEL);
        page.text(x, y(top + 18.0), value, style::COVER_VALUE);
    }

    page.rounded_rect(
        margin - 10.0,
        y(490.0),
        width - 2.0 * margin + 20.0,
        y(592.0) - y(490.0),
        style::SECTION_BG,
        8.0,
    );
    let stats = [
        ("MONTHLY COST", fmt.currency(model.costs.monthly), margin + 65.0),
        ("DAILY ENERGY", fmt.kwh(model.total_energy_kwh, 1), width / 2.0),
        ("YEARLY COST", fmt.currency(model.costs.yearly), width - margin - 65.0),
    ];
    for (label, value, x) in stats {
        page.text(x, y(520.0), label, style::STAT_LABEL);
        page.text(x, y(548.0), value, style::STAT_VALUE);
    }

    page.line(0.0, height - 55.0, width, height - 55.0, style::SECTION_BG, 1.0);
    page.text(
        width / 2.0,
        height - 32.0,
        format!("Generated by {}  \u{b7}  Internal Use Only", config.report.prepared_by),
        style::FOOTER,
    );
    page.text(
        width / 2.0,
        height - 18.0,
        "Values are estimates based on declared device specifications.",
        style::FOOTER,
    );
}

/// Office name, or a dash when blank.
pub fn office_name(config: &ReportConfig) -> String {
    let name = config.report.office_name.trim();
    if name.is_empty() {
        BLANK.to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ReportModelBuilder;
    use crate::inventory::{DeviceRecord, RoomRecord, TariffRate};
    use chrono::NaiveDate;

    fn model() -> Option<ReportModel> {
        let now = NaiveDate::from_ymd_opt(2024, 5, 17)?.and_hms_opt(9, 30, 0)?;
        let rooms = vec![RoomRecord::new(1, "Office")];
        let devices = vec![DeviceRecord::new(1, 1, "PC", 100.0, 10.0, 2)];
        ReportModelBuilder::new()
            .build(&rooms, &devices, TariffRate::new(1000.0), now)
            .ok()
    }

    #[test]
    fn cover_shows_headline_figures() {
        let Some(model) = model() else {
            panic!("fixture should build");
        };
        let config = ReportConfig::a4();
        let mut page = Page::new(1, 595.0, 842.0);
        paint_cover(&mut page, &model, &config);
        assert!(page.contains_text("17 May 2024, 09:30"));
        assert!(page.contains_text("Rp 60.000"));
        assert!(page.contains_text("Rp 730.000"));
        assert!(page.contains_text("2,0 kWh"));
        assert!(page.contains_text("Rp 1.000 / kWh"));
        assert!(page.contains_text("\u{2014}"));
    }

    #[test]
    fn cover_stays_on_a_short_page() {
        let Some(model) = model() else {
            panic!("fixture should build");
        };
        let config = ReportConfig::a5();
        let mut page = Page::new(1, config.page.width, config.page.height);
        paint_cover(&mut page, &model, &config);
        assert!(page.lowest_extent() <= config.page.height);
    }

    #[test]
    fn blank_office_name_renders_dash() {
        let mut config = ReportConfig::a4();
        config.report.office_name = "   ".to_string();
        assert_eq!(office_name(&config), "\u{2014}");
        config.report.office_name = "HQ".to_string();
        assert_eq!(office_name(&config), "HQ");
    }
}
