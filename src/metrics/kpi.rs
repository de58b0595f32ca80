//! KPI summary computation from the two model documents.

use serde::Serialize;

use crate::error::EngineError;
use crate::model::{PpaModel, UpfrontModel};

/// Fixed system-lifetime assumption used for lifetime CO2 offset.
pub const SYSTEM_LIFETIME_YEARS: f64 = 20.0;

/// PPA has no upfront cost, so payback is instantaneous by construction.
pub const PPA_ROI_PERIOD: &str = "Immediate";

/// ROI period reported when no projection row ever breaks even.
pub const ROI_BEYOND_HORIZON: &str = ">20";

/// Aggregate KPI bundle for the dashboard header cards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiBundle {
    /// Projected energy production over one year (kWh).
    pub annual_energy_production: f64,
    /// Tonnes of CO2 offset over the system lifetime.
    #[serde(rename = "lifetimeCO2Offset")]
    pub lifetime_co2_offset: f64,
    /// Equivalent trees planted per year.
    pub equivalent_trees: f64,
    /// PPA pricing-model figures.
    pub ppa: ModelKpis,
    /// Upfront-purchase pricing-model figures.
    pub upfront: ModelKpis,
}

/// Per-pricing-model KPI pair.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelKpis {
    /// Total savings over the modeled horizon (RM).
    pub lifetime_savings: f64,
    /// Payback period: a year label, `"Immediate"`, or `">20"`.
    pub roi_period: String,
}

/// Computes the KPI bundle from the typed PPA and UPFRONT documents.
///
/// # Errors
///
/// Returns [`EngineError::DataIntegrity`] if the UPFRONT projection is empty
/// (no terminal ROI row to report). Missing fields are rejected earlier, at
/// document parse time — this function never substitutes zeros.
pub fn compute_kpis(ppa: &PpaModel, upfront: &UpfrontModel) -> Result<KpiBundle, EngineError> {
    let ppa_lifetime_savings: f64 = ppa.projection.iter().map(|row| row.annual_savings).sum();

    let terminal = upfront.projection.last().ok_or_else(|| {
        EngineError::integrity(format!(
            "UPFRONT.projection[\"{}\"]",
            crate::model::UPFRONT_ROI_KEY
        ))
    })?;

    // First row whose cumulative ROI is strictly positive marks break-even.
    let upfront_roi_period = upfront
        .projection
        .iter()
        .find(|row| row.cumulative_roi > 0.0)
        .map_or_else(|| ROI_BEYOND_HORIZON.to_string(), |row| row.year.to_string());

    Ok(KpiBundle {
        annual_energy_production: ppa.monthly_energy_production * 12.0,
        lifetime_co2_offset: ppa.esg.annual_tonnes_co2_reduced * SYSTEM_LIFETIME_YEARS,
        equivalent_trees: ppa.esg.trees_planted_per_year,
        ppa: ModelKpis {
            lifetime_savings: ppa_lifetime_savings,
            roi_period: PPA_ROI_PERIOD.to_string(),
        },
        upfront: ModelKpis {
            lifetime_savings: terminal.cumulative_roi,
            roi_period: upfront_roi_period,
        },
    })
}
