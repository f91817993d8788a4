//! Console summary of headline figures.

use crate::analysis::ReportModel;
use crate::config::FormatConfig;

/// Renders the summary printed after a model is built.
pub fn summary(model: &ReportModel, fmt: &FormatConfig) -> String {
    let mut lines = vec![
        "--- Energy Summary ---".to_string(),
        format!("Rooms / devices:      {} / {}", model.total_rooms, model.total_devices),
        format!("Tariff:               {} / kWh", fmt.currency(model.tariff_per_kwh)),
        format!("Daily energy:         {}", fmt.kwh(model.total_energy_kwh, 2)),
        format!("Monthly energy:       {}", fmt.kwh(model.monthly_energy_kwh(), 2)),
        format!("Daily cost:           {}", fmt.currency(model.costs.daily)),
        format!("Monthly cost:         {}", fmt.currency(model.costs.monthly)),
        format!("Yearly cost:          {}", fmt.currency(model.costs.yearly)),
        format!("Most consuming room:  {}", model.most_consuming_room),
    ];
    if let Some(top) = model.top_devices.first() {
        lines.push(format!(
            "Top device:           {} ({}, {}/day)",
            top.device.name,
            top.room_name,
            fmt.kwh(top.device.metrics.daily_energy_kwh, 2)
        ));
    }
    lines.join("\n")
}

pub fn print_summary(model: &ReportModel, fmt: &FormatConfig) {
    println!("\n{}", summary(model, fmt));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ReportModelBuilder;
    use crate::inventory::{DeviceRecord, RoomRecord, TariffRate};
    use chrono::NaiveDateTime;

    #[test]
    fn summary_lists_headline_costs() {
        let rooms = vec![RoomRecord::new(1, "Office")];
        let devices = vec![DeviceRecord::new(1, 1, "PC", 100.0, 10.0, 2)];
        let model = ReportModelBuilder::new()
            .build(&rooms, &devices, TariffRate::new(1000.0), NaiveDateTime::default())
            .unwrap_or_else(|e| panic!("fixture should build: {e}"));
        let text = summary(&model, &FormatConfig::default());
        assert!(text.contains("Monthly cost:         Rp 60.000"));
        assert!(text.contains("Most consuming room:  Office"));
        assert!(text.contains("Top device:           PC (Office, 2,00 kWh/day)"));
    }
}
