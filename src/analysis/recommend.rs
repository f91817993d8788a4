//! Rule-based advisory lines derived from a report model.
//!
//! Rules run in a fixed order and each contributes at most one line; the
//! returned order is the display order.

use super::builder::first_max_by;
use super::classify::CRITICAL_LOAD_W;
use super::model::ReportModel;
use crate::config::FormatConfig;

/// Daily usage at or above which a device is treated as always on (h/day).
pub const ALWAYS_ON_HOURS: f64 = 22.0;

/// Device count at which a room is flagged as crowded.
pub const CROWDED_ROOM_DEVICES: usize = 5;

/// Produces the recommendation lines for `model`.
pub fn recommend(model: &ReportModel, fmt: &FormatConfig) -> Vec<String> {
    let mut lines = Vec::new();

    let critical = model
        .devices()
        .filter(|d| d.power_watt > CRITICAL_LOAD_W)
        .count();
    if critical > 0 {
        lines.push(format!(
            "Warning: {critical} critical load device(s) detected (>{CRITICAL_LOAD_W:.0} W). \
             Evaluate necessity and usage schedule."
        ));
    }

    if let Some(room) = first_max_by(&model.rooms, |r| r.monthly_cost) {
        lines.push(format!(
            "Room '{}' is your highest-cost area ({}/month). Prioritize efficiency measures there first.",
            room.name,
            fmt.currency(room.monthly_cost)
        ));
    }

    let always_on = model
        .devices()
        .filter(|d| d.usage_hours_per_day >= ALWAYS_ON_HOURS)
        .count();
    if always_on > 0 {
        lines.push(format!(
            "{always_on} device(s) appear to run nearly 24 h/day. Consider automated shutdown schedules."
        ));
    }

    let busiest = first_max_by(&model.rooms, |r| r.device_count as f64);
    if let Some(room) = busiest.filter(|r| r.device_count >= CROWDED_ROOM_DEVICES) {
        lines.push(format!(
            "Room '{}' has {} devices. Review if all are operationally necessary.",
            room.name, room.device_count
        ));
    }

    lines.push(
        "Replace inefficient equipment nearing end-of-life with energy-rated alternatives."
            .to_string(),
    );
    lines.push("Implement office-wide scheduled shutdown at closing time.".to_string());
    lines.push(format!(
        "Monitor the '{}' room monthly for consumption trends.",
        model.most_consuming_room
    ));

    lines
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::analysis::builder::ReportModelBuilder;
    use crate::inventory::{DeviceRecord, RoomRecord, TariffRate};

    fn model(rooms: &[RoomRecord], devices: &[DeviceRecord]) -> ReportModel {
        ReportModelBuilder::new()
            .build(rooms, devices, TariffRate::new(1000.0), NaiveDateTime::default())
            .expect("fixture should build")
    }

    #[test]
    fn quiet_office_gets_room_line_and_fixed_lines() {
        let rooms = vec![RoomRecord::new(1, "Office")];
        let devices = vec![DeviceRecord::new(1, 1, "Lamp", 20.0, 8.0, 2)];
        let lines = recommend(&model(&rooms, &devices), &FormatConfig::default());
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Room 'Office' is your highest-cost area"));
        assert!(lines[3].contains("'Office'"));
    }

    #[test]
    fn all_rules_fire_in_order() {
        let rooms = vec![RoomRecord::new(1, "Server"), RoomRecord::new(2, "Pantry")];
        let mut devices = vec![
            DeviceRecord::new(1, 2, "Oven", 2400.0, 1.0, 1),
            DeviceRecord::new(2, 1, "Rack", 500.0, 24.0, 1),
        ];
        devices.extend((3..8).map(|id| DeviceRecord::new(id, 1, "Switch", 20.0, 23.0, 1)));
        let lines = recommend(&model(&rooms, &devices), &FormatConfig::default());
        assert_eq!(lines.len(), 7);
        assert!(lines[0].contains("1 critical load device(s)"));
        assert!(lines[1].contains("'Server'"));
        assert!(lines[2].starts_with("6 device(s)"));
        assert!(lines[3].contains("has 6 devices"));
        assert!(lines[4].starts_with("Replace inefficient equipment"));
        assert!(lines[5].starts_with("Implement office-wide"));
        assert!(lines[6].contains("'Server'"));
    }

    #[test]
    fn exactly_2000_w_is_not_critical() {
        let rooms = vec![RoomRecord::new(1, "Lab")];
        let devices = vec![DeviceRecord::new(1, 1, "Kettle", 2000.0, 1.0, 1)];
        let lines = recommend(&model(&rooms, &devices), &FormatConfig::default());
        assert!(!lines.iter().any(|l| l.contains("critical load")));
    }

    #[test]
    fn four_devices_do_not_trigger_crowding() {
        let rooms = vec![RoomRecord::new(1, "Lab")];
        let devices: Vec<_> = (1..5)
            .map(|id| DeviceRecord::new(id, 1, "PC", 100.0, 8.0, 1))
            .collect();
        let lines = recommend(&model(&rooms, &devices), &FormatConfig::default());
        assert!(!lines.iter().any(|l| l.contains("operationally necessary")));
    }

    #[test]
    fn empty_office_still_gets_fixed_lines() {
        let lines = recommend(&model(&[], &[]), &FormatConfig::default());
        assert_eq!(lines.len(), 3);
        assert!(lines[2].contains("'N/A'"));
    }
}
