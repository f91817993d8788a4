//! End-to-end report generation: validate, build, recommend, render, write.

use chrono::NaiveDateTime;
use tracing::info;

use crate::analysis::{ReportModel, ReportModelBuilder, recommend};
use crate::config::ReportConfig;
use crate::error::{ReportError, ReportResult};
use crate::inventory::{Inventory, TariffRate};
use crate::io::DocumentSink;
use crate::layout::render;

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub model: ReportModel,
    pub page_count: usize,
    /// Locator returned by the sink.
    pub location: String,
}

/// Builds the report model, recommendations included, without rendering.
///
/// # Errors
///
/// Returns [`ReportError::Config`] for an invalid configuration or
/// [`ReportError::Input`] for malformed inventory values.
pub fn build_model(
    inventory: &Inventory,
    config: &ReportConfig,
    now: NaiveDateTime,
) -> ReportResult<ReportModel> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ReportError::Config(errors));
    }
    let tariff = TariffRate::resolve(inventory.tariff, config.report.default_tariff_per_kwh);
    let model = ReportModelBuilder::new().build(&inventory.rooms, &inventory.devices, tariff, now)?;
    let recommendations = recommend(&model, &config.format);
    Ok(model.with_recommendations(recommendations))
}

/// Runs the whole pipeline and hands the finished pages to `sink`.
///
/// Nothing reaches the sink unless every earlier step succeeded.
///
/// # Errors
///
/// Returns the first failure from configuration, input validation,
/// rendering, or the sink.
pub fn generate_report(
    inventory: &Inventory,
    config: &ReportConfig,
    now: NaiveDateTime,
    sink: &mut dyn DocumentSink,
) -> ReportResult<GeneratedReport> {
    let model = build_model(inventory, config, now)?;
    let pages = render(&model, config)?;
    let location = sink.write(&pages)?;
    info!(pages = pages.len(), location = %location, "report generated");
    Ok(GeneratedReport {
        model,
        page_count: pages.len(),
        location,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InputError, RenderError};
    use crate::inventory::{DeviceRecord, RoomRecord};
    use crate::io::MemorySink;

    fn inventory() -> Inventory {
        Inventory {
            rooms: vec![RoomRecord::new(1, "Office")],
            devices: vec![DeviceRecord::new(1, 1, "PC", 100.0, 10.0, 2)],
            tariff: Some(TariffRate::new(1000.0)),
        }
    }

    #[test]
    fn generates_into_memory() {
        let mut sink = MemorySink::new();
        let result = generate_report(
            &inventory(),
            &ReportConfig::a4(),
            NaiveDateTime::default(),
            &mut sink,
        );
        let Ok(report) = result else {
            panic!("pipeline should succeed: {:?}", result.err());
        };
        assert_eq!(report.location, "memory://1");
        assert_eq!(sink.last().map(<[_]>::len), Some(report.page_count));
        assert_eq!(report.model.costs.monthly, 60_000.0);
        assert!(!report.model.recommendations.is_empty());
    }

    #[test]
    fn missing_tariff_falls_back_to_config() {
        let mut inv = inventory();
        inv.tariff = None;
        let model = build_model(&inv, &ReportConfig::a4(), NaiveDateTime::default());
        assert!(model.is_ok_and(|m| m.tariff_per_kwh == 1444.70));
    }

    #[test]
    fn invalid_config_reports_all_errors() {
        let mut config = ReportConfig::a4();
        config.page.max_pages = 0;
        config.format.date_format.clear();
        let result = build_model(&inventory(), &config, NaiveDateTime::default());
        assert!(matches!(result, Err(ReportError::Config(ref errors)) if errors.len() == 2));
    }

    #[test]
    fn invalid_device_never_reaches_sink() {
        let mut inv = inventory();
        inv.devices[0].quantity = 0;
        let mut sink = MemorySink::new();
        let result = generate_report(&inv, &ReportConfig::a4(), NaiveDateTime::default(), &mut sink);
        assert!(matches!(
            result,
            Err(ReportError::Input(InputError::NonPositiveQuantity { value: 0, .. }))
        ));
        assert!(sink.documents.is_empty());
    }

    #[test]
    fn render_failure_never_reaches_sink() {
        let mut config = ReportConfig::a4();
        config.page.max_pages = 1;
        let mut sink = MemorySink::new();
        let result = generate_report(&inventory(), &config, NaiveDateTime::default(), &mut sink);
        assert!(matches!(
            result,
            Err(ReportError::Render(RenderError::PageLimitExceeded { limit: 1 }))
        ));
        assert!(sink.documents.is_empty());
    }
}
