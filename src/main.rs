//! Office energy report entry point: CLI wiring and pipeline execution.

use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use tracing::{error, info};

use office_energy_report::cli::Cli;
use office_energy_report::error::ReportError;
use office_energy_report::inventory::Inventory;
use office_energy_report::io::JsonFileSink;
use office_energy_report::io::export::export_csv;
use office_energy_report::logging::init_logging;
use office_energy_report::pipeline::generate_report;
use office_energy_report::reporting::print_summary;

fn run(cli: &Cli) -> Result<(), ReportError> {
    let config = cli.load_config()?;
    let inventory = Inventory::from_file(&cli.inventory)?;
    info!(
        rooms = inventory.rooms.len(),
        devices = inventory.devices.len(),
        "inventory loaded"
    );

    let mut sink = JsonFileSink::new(&cli.out);
    let now = Local::now().naive_local();
    let report = generate_report(&inventory, &config, now, &mut sink)?;
    print_summary(&report.model, &config.format);
    eprintln!("Report ({} pages) written to {}", report.page_count, report.location);

    if let Some(path) = &cli.csv {
        export_csv(&report.model, path).map_err(office_energy_report::error::SinkError::from)?;
        eprintln!("Device breakdown written to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(cli.log_json) {
        eprintln!("warning: logging unavailable: {e}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "report generation failed");
            eprintln!("error: {e}");
            ExitCode::from(1)
        }
    }
}
