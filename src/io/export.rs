//! CSV export of the per-device energy breakdown.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::analysis::ReportModel;

/// Column header for the device breakdown export.
const HEADER: &str = "room,device,power_w,quantity,hours_per_day,\
                      daily_kwh,daily_cost,monthly_cost,load_class";

/// Exports one row per device to a CSV file at the given path.
///
/// Rows follow room order, then device order within each room, so identical
/// models produce identical files.
///
/// # Arguments
///
/// * `model` - Built report model
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(model: &ReportModel, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(model, buf)
}

/// Writes the device breakdown as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(model: &ReportModel, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for room in &model.rooms {
        for d in &room.devices {
            wtr.write_record(&[
                room.name.clone(),
                d.name.clone(),
                format!("{:.1}", d.power_watt),
                d.quantity.to_string(),
                format!("{:.2}", d.usage_hours_per_day),
                format!("{:.4}", d.metrics.daily_energy_kwh),
                format!("{:.2}", d.metrics.daily_cost),
                format!("{:.2}", d.metrics.costs().monthly),
                d.load_class().label().to_string(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
