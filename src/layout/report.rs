//! Composes a [`ReportModel`] into pages: the cover, then sections A to L.

use tracing::info;

use super::block::{Block, Card, Table, TableRow};
use super::cover::{office_name, paint_cover};
use super::engine::DocumentLayoutEngine;
use super::page::Page;
use super::style;
use crate::analysis::aggregator::DAYS_PER_MONTH;
use crate::analysis::{DeviceLine, LoadClass, ReportModel, RoomAggregate};
use crate::config::{FormatConfig, ReportConfig};
use crate::error::RenderError;

const SUMMARY_ROW_HEIGHT: f32 = 14.0;
const INVENTORY_ROW_HEIGHT: f32 = 12.0;

const INTERPRETATION: [&str; 4] = [
    "Values represent estimated operational consumption.",
    "Useful for identifying energy-intensive equipment or spaces.",
    "Supports budgeting, planning, and efficiency initiatives.",
    "Should be reviewed periodically for trend analysis.",
];

/// Renders the complete document.
///
/// The model's recommendations are drawn in the order given. Any failure
/// aborts the render and no pages are returned.
///
/// # Errors
///
/// Returns [`RenderError`] if the page geometry is unusable or the page
/// budget is exhausted.
pub fn render(model: &ReportModel, config: &ReportConfig) -> Result<Vec<Page>, RenderError> {
    let mut engine = DocumentLayoutEngine::new(config.page.clone())?;
    engine.fixed_page(|page| paint_cover(page, model, config))?;
    engine.start_page()?;

    let composer = Composer {
        model,
        config,
        fmt: &config.format,
    };
    for block in composer.report_information() {
        engine.place(&block)?;
    }
    for block in composer.tariff() {
        engine.place(&block)?;
    }
    for block in composer.summary() {
        engine.place(&block)?;
    }
    for block in composer.room_directory() {
        engine.place(&block)?;
    }

    engine.check_overflow(80.0)?;
    place_groups(&mut engine, composer.device_inventory())?;
    engine.check_overflow(80.0)?;
    for block in composer.top_devices() {
        engine.place(&block)?;
    }
    engine.check_overflow(60.0)?;
    for block in composer.top_room() {
        engine.place(&block)?;
    }
    engine.check_overflow(80.0)?;
    place_groups(&mut engine, composer.technical_analysis())?;
    engine.check_overflow(100.0)?;
    for block in composer.load_classification() {
        engine.place(&block)?;
    }
    engine.check_overflow(100.0)?;
    for block in composer.recommendations() {
        engine.place(&block)?;
    }
    engine.check_overflow(80.0)?;
    for block in composer.interpretation() {
        engine.place(&block)?;
    }
    engine.check_overflow(60.0)?;
    for block in composer.disclaimer() {
        engine.place(&block)?;
    }

    let pages = engine.finish()?;
    info!(pages = pages.len(), rooms = model.total_rooms, "report rendered");
    Ok(pages)
}

/// Blocks that open a room group: spacer, sub-header, first content block.
const ROOM_LEAD: usize = 3;

/// Places each group, keeping its leading blocks on one page.
fn place_groups(
    engine: &mut DocumentLayoutEngine,
    groups: Vec<Vec<Block>>,
) -> Result<(), RenderError> {
    for group in groups {
        engine.keep_together(&group[..group.len().min(ROOM_LEAD)])?;
        for block in &group {
            engine.place(block)?;
        }
    }
    Ok(())
}

struct Composer<'a> {
    model: &'a ReportModel,
    config: &'a ReportConfig,
    fmt: &'a FormatConfig,
}

impl Composer<'_> {
    fn report_information(&self) -> Vec<Block> {
        let report = &self.config.report;
        vec![
            Block::section("A. REPORT INFORMATION"),
            Block::key_value("Report Generated", self.fmt.date(&self.model.generated_at)),
            Block::key_value("Reporting Period", report.reporting_period.as_str()),
            Block::key_value("Office / Location", office_name(self.config)),
            Block::key_value("Prepared By", report.prepared_by.as_str()),
            Block::note(
                "Estimated electrical energy analysis based on recorded devices, \
                 usage duration, and configured tariff.",
            ),
            Block::Divider,
        ]
    }

    fn tariff(&self) -> Vec<Block> {
        vec![
            Block::section("B. TARIFF CONFIGURATION"),
            Block::key_value(
                "Electricity Tariff",
                format!("{} / kWh", self.fmt.currency(self.model.tariff_per_kwh)),
            ),
            Block::note("All cost calculations in this report use the tariff above."),
            Block::Divider,
        ]
    }

    fn summary(&self) -> Vec<Block> {
        let m = self.model;
        let f = self.fmt;
        let half = self.config.page.content_width() / 2.0;
        let mut table = Table::new(&[half, half], &[])
            .with_row_height(SUMMARY_ROW_HEIGHT)
            .with_last_column_right();
        let rows = [
            ("Total Rooms Monitored", m.total_rooms.to_string()),
            ("Total Devices Recorded", m.total_devices.to_string()),
            ("Daily Energy", f.kwh(m.total_energy_kwh, 2)),
            ("Weekly Energy", f.kwh(m.weekly_energy_kwh(), 2)),
            ("Monthly Energy", f.kwh(m.monthly_energy_kwh(), 2)),
            ("Daily Cost", f.currency(m.costs.daily)),
            ("Weekly Cost", f.currency(m.costs.weekly)),
            ("Monthly Cost", f.currency(m.costs.monthly)),
            ("Yearly Cost", f.currency(m.costs.yearly)),
        ];
        for (label, value) in rows {
            table.push(TableRow::new(vec![label.to_string(), value]));
        }

        let mut blocks = vec![Block::section("C. OVERALL ENERGY SUMMARY"), Block::Table(table)];
        if !m.device_type_totals.is_empty() {
            let mut by_type = Table::new(&[half, half], &[])
                .with_row_height(SUMMARY_ROW_HEIGHT)
                .with_last_column_right();
            for total in &m.device_type_totals {
                by_type.push(TableRow::new(vec![
                    total.name.clone(),
                    f.kwh(total.daily_energy_kwh, 2),
                ]));
            }
            blocks.push(Block::Spacer(6.0));
            blocks.push(Block::bold("Daily Energy by Device Type"));
            blocks.push(Block::Table(by_type));
        }
        blocks.push(Block::Divider);
        blocks
    }

    fn room_directory(&self) -> Vec<Block> {
        let f = self.fmt;
        let mut table = Table::new(
            &self.config.columns.rooms,
            &["No", "Room Name", "Description", "Dev", "kWh/Day", "Cost/Month", "Share"],
        );
        for (i, room) in self.model.rooms.iter().enumerate() {
            table.push(TableRow::new(vec![
                (i + 1).to_string(),
                clip(&room.name, 22),
                clip(room.description.as_deref().unwrap_or("-"), 17),
                room.device_count.to_string(),
                f.number(room.energy_kwh, 2),
                f.currency(room.monthly_cost),
                f.percent(room.percentage, 1),
            ]));
        }
        vec![
            Block::section("D. OFFICE ROOM DIRECTORY"),
            Block::note("All monitored rooms with energy and cost estimates."),
            Block::Spacer(6.0),
            Block::Table(table),
            Block::Divider,
        ]
    }

    fn device_inventory(&self) -> Vec<Vec<Block>> {
        let mut groups = vec![vec![
            Block::section("E. DEVICE INVENTORY PER ROOM"),
            Block::note("Detailed list of devices grouped by room."),
        ]];
        for room in &self.model.rooms {
            let content = if room.devices.is_empty() {
                Block::note("No devices recorded.")
            } else {
                Block::Table(self.inventory_table(room))
            };
            groups.push(vec![
                Block::Spacer(8.0),
                Block::SubHeader(room.name.clone()),
                content,
                Block::Spacer(6.0),
            ]);
        }
        groups.push(vec![Block::Divider]);
        groups
    }

    fn inventory_table(&self, room: &RoomAggregate) -> Table {
        let f = self.fmt;
        let mut table = Table::new(
            &self.config.columns.devices,
            &["No", "Device Name", "Watt", "Qty", "Hrs/Day", "kWh/Day", "Cost/Day"],
        )
        .with_row_height(INVENTORY_ROW_HEIGHT);
        for (i, device) in room.devices.iter().enumerate() {
            table.push(TableRow::new(vec![
                (i + 1).to_string(),
                clip(&device.name, 22),
                f.number(device.power_watt, 0),
                device.quantity.to_string(),
                f.number(device.usage_hours_per_day, 1),
                f.number(device.metrics.daily_energy_kwh, 3),
                f.currency(device.metrics.daily_cost),
            ]));
        }
        table
    }

    fn top_devices(&self) -> Vec<Block> {
        let f = self.fmt;
        let mut table = Table::new(
            &self.config.columns.top_devices,
            &["#", "Device", "Room", "Watt", "Hrs/Day", "kWh/Day", "Cost/Day"],
        )
        .with_row_height(INVENTORY_ROW_HEIGHT);
        for (i, ranked) in self.model.top_devices.iter().enumerate() {
            let device = &ranked.device;
            table.push(TableRow::new(vec![
                (i + 1).to_string(),
                clip(&device.name, 18),
                clip(&ranked.room_name, 16),
                f.number(device.power_watt, 0),
                f.number(device.usage_hours_per_day, 1),
                f.number(device.metrics.daily_energy_kwh, 3),
                f.currency(device.metrics.daily_cost),
            ]));
        }
        vec![
            Block::section(format!("F. TOP {} HIGHEST ENERGY DEVICES", table.rows.len().max(1))),
            Block::note("Devices consuming the most electricity across all rooms (daily basis)."),
            Block::Spacer(6.0),
            Block::Table(table),
            Block::Divider,
        ]
    }

    fn top_room(&self) -> Vec<Block> {
        let f = self.fmt;
        let mut blocks = vec![Block::section("G. HIGHEST ENERGY CONSUMPTION ROOM")];
        match self.model.top_room() {
            Some(room) => blocks.extend([
                Block::key_value("Room", room.name.as_str()),
                Block::key_value("Estimated Daily Energy", f.kwh(room.energy_kwh, 2)),
                Block::key_value(
                    "Estimated Monthly Energy",
                    f.kwh(room.energy_kwh * DAYS_PER_MONTH, 2),
                ),
                Block::key_value("Estimated Monthly Cost", f.currency(room.monthly_cost)),
                Block::key_value("Share of Total", f.percent(room.percentage, 1)),
            ]),
            None => blocks.push(Block::note("No rooms recorded.")),
        }
        blocks.push(Block::Divider);
        blocks
    }

    fn technical_analysis(&self) -> Vec<Vec<Block>> {
        let mut groups = vec![vec![Block::section("H. TECHNICAL DEVICE ANALYSIS")]];
        for room in &self.model.rooms {
            let mut group = vec![Block::Spacer(8.0), Block::SubHeader(room.name.clone())];
            group.extend(room.devices.iter().map(|d| Block::Card(self.device_card(d))));
            groups.push(group);
        }
        groups.push(vec![Block::Divider]);
        groups
    }

    fn device_card(&self, device: &DeviceLine) -> Card {
        let f = self.fmt;
        let metrics = &device.metrics;
        let costs = metrics.costs();
        Card {
            title: format!(
                "{}  \u{b7}  {} W  \u{d7}  qty {}  \u{d7}  {} h/day",
                device.name,
                f.number(device.power_watt, 0),
                device.quantity,
                f.number(device.usage_hours_per_day, 1),
            ),
            subtitle: format!(
                "Connected Load: {} W  \u{b7}  {}",
                f.number(metrics.connected_load_w, 0),
                device.load_class().label(),
            ),
            labels: ["Daily", "Weekly", "Monthly", "Yearly"].map(String::from),
            energy: [
                metrics.daily_energy_kwh,
                metrics.weekly_energy_kwh(),
                metrics.monthly_energy_kwh,
                metrics.yearly_energy_kwh,
            ]
            .map(|v| f.kwh(v, 2)),
            cost: [costs.daily, costs.weekly, costs.monthly, costs.yearly].map(|v| f.currency(v)),
        }
    }

    fn load_classification(&self) -> Vec<Block> {
        let half = self.config.page.content_width() / 2.0;
        let mut table = Table::new(&[half, half], &[])
            .with_row_height(SUMMARY_ROW_HEIGHT)
            .with_last_column_right();
        for class in LoadClass::ALL {
            table.push(
                TableRow::new(vec![class.label().to_string(), class.range().to_string()])
                    .with_marker(style::load_class_color(class)),
            );
        }
        vec![
            Block::section("I. LOAD CLASSIFICATION REFERENCE"),
            Block::Table(table),
            Block::Divider,
        ]
    }

    fn recommendations(&self) -> Vec<Block> {
        let mut blocks = vec![Block::section("J. ENERGY MANAGEMENT RECOMMENDATIONS")];
        blocks.extend(self.model.recommendations.iter().map(Block::bullet));
        blocks.push(Block::Divider);
        blocks
    }

    fn interpretation(&self) -> Vec<Block> {
        let mut blocks = vec![Block::section("K. INTERPRETATION GUIDELINES")];
        blocks.extend(INTERPRETATION.into_iter().map(Block::bullet));
        blocks.push(Block::Divider);
        blocks
    }

    fn disclaimer(&self) -> Vec<Block> {
        vec![
            Block::section("L. DISCLAIMER"),
            Block::note(
                "All values are engineering estimates derived from declared wattage and \
                 usage duration. Actual consumption may vary depending on equipment \
                 efficiency and environmental conditions.",
            ),
            Block::bold(
                "This report is intended for internal evaluation and planning purposes only.",
            ),
        ]
    }
}

fn clip(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
