//! Flattened monthly records for the dashboard table and bill charts.

use serde::Serialize;

use crate::model::PpaModel;

/// One calendar month of consumption, production, and billing figures.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRecord {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1–12.
    pub month: u32,
    /// Energy consumed (kWh).
    pub energy_consumed: f64,
    /// Energy produced (kWh).
    pub energy_produced: f64,
    /// Bill with solar (RM). The same document-level scalar for every
    /// record — an intentional simplification in the source data export.
    pub bill_with_solar: f64,
    /// Bill without solar (RM).
    pub bill_without_solar: f64,
}

/// Flattens the PPA monthly table into one record per row, in row order.
pub fn flatten_monthly(ppa: &PpaModel) -> Vec<MonthlyRecord> {
    ppa.monthly
        .iter()
        .map(|row| MonthlyRecord {
            year: row.year,
            month: row.month,
            energy_consumed: row.energy_consumed,
            energy_produced: row.energy_produced,
            bill_with_solar: ppa.total_monthly_bill_with_solar,
            bill_without_solar: row.bill_without_solar,
        })
        .collect()
}
