//! Raw financial-model documents and their typed row form.
//!
//! Documents arrive as spreadsheet-shaped JSON: sibling mappings from
//! stringified row indices to values (`projection.Year`,
//! `projection["Annual Savings (RM)"]`, the `monthly_data` columns). The
//! parse boundary converts each pseudo-table into an ordered `Vec` of row
//! structs so the cross-column key-alignment invariant becomes structural
//! instead of a runtime assumption downstream.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EngineError;

/// Literal column key for PPA annual savings in the raw projection table.
pub const ANNUAL_SAVINGS_KEY: &str = "Annual Savings (RM)";

/// Literal column key for cumulative ROI in the raw upfront projection table.
pub const UPFRONT_ROI_KEY: &str = "Upfront Purchase ROI";

/// Financial-model variant key.
///
/// Orders `Ppa < Upfront`, matching the store's `modelType` ascending
/// ordering guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ModelType {
    #[serde(rename = "PPA")]
    Ppa,
    #[serde(rename = "UPFRONT")]
    Upfront,
}

impl ModelType {
    /// Wire name of the variant (`"PPA"` / `"UPFRONT"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ppa => "PPA",
            Self::Upfront => "UPFRONT",
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw numeric cell. Spreadsheet exports deliver native numbers and
/// numeric-looking strings interchangeably; both coerce to `f64`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Num(f64),
    Text(String),
}

impl RawNumber {
    fn to_f64(&self, path: &str) -> Result<f64, EngineError> {
        match self {
            Self::Num(v) => Ok(*v),
            Self::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| EngineError::integrity(path.to_string())),
        }
    }
}

/// One column of a row-index-keyed pseudo-table.
type ColumnMap = HashMap<String, RawNumber>;

#[derive(Debug, Deserialize)]
struct RawEsg {
    #[serde(rename = "annual_tonnes_of_CO2_reduced")]
    annual_tonnes_of_co2_reduced: Option<RawNumber>,
    trees_planted_per_year: Option<RawNumber>,
}

#[derive(Debug, Deserialize)]
struct RawPpaDocument {
    monthly_energy_production: Option<RawNumber>,
    #[serde(rename = "ESG")]
    esg: Option<RawEsg>,
    projection: Option<HashMap<String, ColumnMap>>,
    monthly_data: Option<HashMap<String, ColumnMap>>,
    total_monthly_bill_with_solar: Option<RawNumber>,
}

#[derive(Debug, Deserialize)]
struct RawUpfrontDocument {
    projection: Option<HashMap<String, ColumnMap>>,
}

/// Environmental figures carried by the PPA document.
#[derive(Debug, Clone, PartialEq)]
pub struct Esg {
    /// Tonnes of CO2 reduced per year.
    pub annual_tonnes_co2_reduced: f64,
    /// Equivalent trees planted per year (already annualized).
    pub trees_planted_per_year: f64,
}

/// One row of the PPA savings projection.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionRow {
    /// Projection year (1-based horizon year, e.g. 1..=20).
    pub year: f64,
    /// Annual savings for that year (RM).
    pub annual_savings: f64,
}

/// One row of the upfront-purchase ROI projection.
#[derive(Debug, Clone, PartialEq)]
pub struct RoiRow {
    /// Projection year.
    pub year: f64,
    /// Cumulative ROI at the end of that year (RM). Negative or zero while
    /// the system has not yet paid for itself.
    pub cumulative_roi: f64,
}

/// One calendar month of observed/modeled data from the PPA document.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRow {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1–12.
    pub month: u32,
    /// Energy consumed (kWh).
    pub energy_consumed: f64,
    /// Energy produced (kWh).
    pub energy_produced: f64,
    /// Utility bill without solar (RM).
    pub bill_without_solar: f64,
    /// Peak sun hours for the month.
    pub peak_sun_hours: f64,
}

/// Typed PPA model document with all pseudo-tables converted to row order.
#[derive(Debug, Clone, PartialEq)]
pub struct PpaModel {
    /// Average monthly energy production (kWh/month).
    pub monthly_energy_production: f64,
    /// Environmental figures.
    pub esg: Esg,
    /// Savings projection rows in ascending row-index order.
    pub projection: Vec<ProjectionRow>,
    /// Monthly data rows in ascending row-index order.
    pub monthly: Vec<MonthlyRow>,
    /// Single bill-with-solar scalar applied uniformly to every monthly
    /// record. A known simplification in the source data, kept as-is.
    pub total_monthly_bill_with_solar: f64,
}

/// Typed UPFRONT model document.
#[derive(Debug, Clone, PartialEq)]
pub struct UpfrontModel {
    /// ROI projection rows in ascending row-index order.
    pub projection: Vec<RoiRow>,
}

/// Sorts the row keys of a column by integer value, not string order
/// (`"10"` sorts after `"2"`).
fn ordered_keys(column: &ColumnMap, path: &str) -> Result<Vec<String>, EngineError> {
    let mut keys: Vec<(i64, String)> = Vec::with_capacity(column.len());
    for key in column.keys() {
        let idx: i64 = key
            .parse()
            .map_err(|_| EngineError::integrity(format!("{path}[\"{key}\"]")))?;
        keys.push((idx, key.clone()));
    }
    keys.sort_unstable_by_key(|(idx, _)| *idx);
    Ok(keys.into_iter().map(|(_, key)| key).collect())
}

fn table_column<'a>(
    table: &'a HashMap<String, ColumnMap>,
    table_path: &str,
    name: &str,
) -> Result<&'a ColumnMap, EngineError> {
    table
        .get(name)
        .ok_or_else(|| EngineError::integrity(format!("{table_path}[\"{name}\"]")))
}

/// Sibling columns must share the anchor's key set exactly. Length equality
/// plus per-key lookup below implies set equality.
fn require_same_len(anchor: usize, column: &ColumnMap, path: &str) -> Result<(), EngineError> {
    if column.len() == anchor {
        Ok(())
    } else {
        Err(EngineError::integrity(path.to_string()))
    }
}

fn cell(column: &ColumnMap, key: &str, path: &str) -> Result<f64, EngineError> {
    let full = format!("{path}[\"{key}\"]");
    column
        .get(key)
        .ok_or_else(|| EngineError::integrity(full.clone()))?
        .to_f64(&full)
}

impl PpaModel {
    /// Parses a raw PPA document.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DataIntegrity`] naming the offending path when
    /// a required field is absent, a cell is non-numeric, a row key is not an
    /// integer, or sibling columns disagree on their key sets.
    pub fn from_value(doc: &Value) -> Result<Self, EngineError> {
        let raw: RawPpaDocument = serde_json::from_value(doc.clone())
            .map_err(|e| EngineError::integrity(format!("PPA ({e})")))?;

        let monthly_energy_production = raw
            .monthly_energy_production
            .ok_or_else(|| EngineError::integrity("PPA.monthly_energy_production"))?
            .to_f64("PPA.monthly_energy_production")?;

        let esg = raw.esg.ok_or_else(|| EngineError::integrity("PPA.ESG"))?;
        let esg = Esg {
            annual_tonnes_co2_reduced: esg
                .annual_tonnes_of_co2_reduced
                .ok_or_else(|| EngineError::integrity("PPA.ESG.annual_tonnes_of_CO2_reduced"))?
                .to_f64("PPA.ESG.annual_tonnes_of_CO2_reduced")?,
            trees_planted_per_year: esg
                .trees_planted_per_year
                .ok_or_else(|| EngineError::integrity("PPA.ESG.trees_planted_per_year"))?
                .to_f64("PPA.ESG.trees_planted_per_year")?,
        };

        let table = raw
            .projection
            .ok_or_else(|| EngineError::integrity("PPA.projection"))?;
        let years = table_column(&table, "PPA.projection", "Year")?;
        let savings = table_column(&table, "PPA.projection", ANNUAL_SAVINGS_KEY)?;
        let savings_path = format!("PPA.projection[\"{ANNUAL_SAVINGS_KEY}\"]");
        require_same_len(years.len(), savings, &savings_path)?;

        let mut projection = Vec::with_capacity(years.len());
        for key in ordered_keys(years, "PPA.projection.Year")? {
            projection.push(ProjectionRow {
                year: cell(years, &key, "PPA.projection.Year")?,
                annual_savings: cell(savings, &key, &savings_path)?,
            });
        }

        let table = raw
            .monthly_data
            .ok_or_else(|| EngineError::integrity("PPA.monthly_data"))?;
        let year_col = table_column(&table, "PPA.monthly_data", "year")?;
        let month_col = table_column(&table, "PPA.monthly_data", "month")?;
        let consumed_col = table_column(&table, "PPA.monthly_data", "E_consumed")?;
        let produced_col = table_column(&table, "PPA.monthly_data", "E_produced")?;
        let bill_col = table_column(&table, "PPA.monthly_data", "bill_without_solar")?;
        let psh_col = table_column(&table, "PPA.monthly_data", "peak_sun_hours")?;
        for (column, name) in [
            (month_col, "month"),
            (consumed_col, "E_consumed"),
            (produced_col, "E_produced"),
            (bill_col, "bill_without_solar"),
            (psh_col, "peak_sun_hours"),
        ] {
            require_same_len(
                year_col.len(),
                column,
                &format!("PPA.monthly_data.{name}"),
            )?;
        }

        let mut monthly = Vec::with_capacity(year_col.len());
        for key in ordered_keys(year_col, "PPA.monthly_data.year")? {
            let month_path = format!("PPA.monthly_data.month[\"{key}\"]");
            let month_raw = cell(month_col, &key, "PPA.monthly_data.month")?;
            if month_raw.fract() != 0.0 || !(1.0..=12.0).contains(&month_raw) {
                return Err(EngineError::integrity(month_path));
            }
            monthly.push(MonthlyRow {
                year: cell(year_col, &key, "PPA.monthly_data.year")? as i32,
                month: month_raw as u32,
                energy_consumed: cell(consumed_col, &key, "PPA.monthly_data.E_consumed")?,
                energy_produced: cell(produced_col, &key, "PPA.monthly_data.E_produced")?,
                bill_without_solar: cell(bill_col, &key, "PPA.monthly_data.bill_without_solar")?,
                peak_sun_hours: cell(psh_col, &key, "PPA.monthly_data.peak_sun_hours")?,
            });
        }

        let total_monthly_bill_with_solar = raw
            .total_monthly_bill_with_solar
            .ok_or_else(|| EngineError::integrity("PPA.total_monthly_bill_with_solar"))?
            .to_f64("PPA.total_monthly_bill_with_solar")?;

        Ok(Self {
            monthly_energy_production,
            esg,
            projection,
            monthly,
            total_monthly_bill_with_solar,
        })
    }
}

impl UpfrontModel {
    /// Parses a raw UPFRONT document.
    ///
    /// # Errors
    ///
    /// Same integrity conditions as [`PpaModel::from_value`].
    pub fn from_value(doc: &Value) -> Result<Self, EngineError> {
        let raw: RawUpfrontDocument = serde_json::from_value(doc.clone())
            .map_err(|e| EngineError::integrity(format!("UPFRONT ({e})")))?;

        let table = raw
            .projection
            .ok_or_else(|| EngineError::integrity("UPFRONT.projection"))?;
        let years = table_column(&table, "UPFRONT.projection", "Year")?;
        let roi = table_column(&table, "UPFRONT.projection", UPFRONT_ROI_KEY)?;
        let roi_path = format!("UPFRONT.projection[\"{UPFRONT_ROI_KEY}\"]");
        require_same_len(years.len(), roi, &roi_path)?;

        let mut projection = Vec::with_capacity(years.len());
        for key in ordered_keys(years, "UPFRONT.projection.Year")? {
            projection.push(RoiRow {
                year: cell(years, &key, "UPFRONT.projection.Year")?,
                cumulative_roi: cell(roi, &key, &roi_path)?,
            });
        }

        Ok(Self { projection })
    }
}
