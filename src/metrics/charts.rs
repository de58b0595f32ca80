//! Chart-ready series computed from the two model documents.
//!
//! The literal JSON keys embedded in the point structs (e.g.
//! `"Annual Savings (MYR)"`) are part of the public API contract and feed
//! the frontend chart library directly.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::EngineError;
use crate::model::{PpaModel, UpfrontModel};

/// All chart series for the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartBundle {
    /// One point per PPA projection row, in row order.
    pub ppa_savings: Vec<SavingsPoint>,
    /// One point per UPFRONT projection row, in row order.
    pub upfront_roi: Vec<RoiPoint>,
    /// One point per distinct calendar month seen in the monthly data.
    pub psh: Vec<PshPoint>,
}

/// Annual-savings line point.
#[derive(Debug, Clone, Serialize)]
pub struct SavingsPoint {
    /// Axis label, `"Year {n}"`.
    pub name: String,
    #[serde(rename = "Annual Savings (MYR)")]
    pub annual_savings: f64,
}

/// Cumulative-ROI line point.
#[derive(Debug, Clone, Serialize)]
pub struct RoiPoint {
    /// Axis label, `"Year {n}"`.
    pub name: String,
    #[serde(rename = "Cumulative ROI (MYR)")]
    pub cumulative_roi: f64,
}

/// Average peak-sun-hours point for one calendar month.
#[derive(Debug, Clone, Serialize)]
pub struct PshPoint {
    /// Abbreviated English month name.
    pub name: String,
    /// Month number, 1–12.
    pub month: u32,
    #[serde(rename = "Peak Sun Hours")]
    pub peak_sun_hours: f64,
}

/// Builds all chart series from the typed documents.
///
/// Peak-sun-hours points average `peak_sun_hours` across every row sharing a
/// month value, so multiple years of data collapse into one point per
/// calendar month. Output order follows the first occurrence of each month
/// while scanning rows, matching the upstream contract, not calendar order.
///
/// # Errors
///
/// Returns [`EngineError::DataIntegrity`] if a month value cannot be mapped
/// to a calendar month name.
pub fn build_charts(ppa: &PpaModel, upfront: &UpfrontModel) -> Result<ChartBundle, EngineError> {
    let ppa_savings = ppa
        .projection
        .iter()
        .map(|row| SavingsPoint {
            name: format!("Year {}", row.year),
            annual_savings: row.annual_savings,
        })
        .collect();

    let upfront_roi = upfront
        .projection
        .iter()
        .map(|row| RoiPoint {
            name: format!("Year {}", row.year),
            cumulative_roi: row.cumulative_roi,
        })
        .collect();

    // (month, sum, count) in first-encountered order. Row counts are small
    // (<= 240 for 20 years), so a linear scan per row is fine.
    let mut groups: Vec<(u32, f64, usize)> = Vec::new();
    for row in &ppa.monthly {
        match groups.iter_mut().find(|g| g.0 == row.month) {
            Some(group) => {
                group.1 += row.peak_sun_hours;
                group.2 += 1;
            }
            None => groups.push((row.month, row.peak_sun_hours, 1)),
        }
    }

    let mut psh = Vec::with_capacity(groups.len());
    for (month, sum, count) in groups {
        psh.push(PshPoint {
            name: month_abbreviation(month)?,
            month,
            peak_sun_hours: sum / count as f64,
        });
    }

    Ok(ChartBundle {
        ppa_savings,
        upfront_roi,
        psh,
    })
}

/// Abbreviated English month name for a 1-based month number.
fn month_abbreviation(month: u32) -> Result<String, EngineError> {
    // The reference year is arbitrary; only the month label matters.
    NaiveDate::from_ymd_opt(2021, month, 1)
        .map(|date| date.format("%b").to_string())
        .ok_or_else(|| EngineError::integrity(format!("PPA.monthly_data.month = {month}")))
}

#[cfg(test)]
mod tests {
    use crate::model::{Esg, MonthlyRow, ProjectionRow, RoiRow};

    use super::*;

    fn monthly_row(year: i32, month: u32, psh: f64) -> MonthlyRow {
        MonthlyRow {
            year,
            month,
            energy_consumed: 900.0,
            energy_produced: 1000.0,
            bill_without_solar: 450.0,
            peak_sun_hours: psh,
        }
    }

    fn make_ppa(monthly: Vec<MonthlyRow>) -> PpaModel {
        PpaModel {
            monthly_energy_production: 1000.0,
            esg: Esg {
                annual_tonnes_co2_reduced: 5.0,
                trees_planted_per_year: 120.0,
            },
            projection: vec![
                ProjectionRow {
                    year: 1.0,
                    annual_savings: 1500.0,
                },
                ProjectionRow {
                    year: 2.0,
                    annual_savings: 1600.0,
                },
            ],
            monthly,
            total_monthly_bill_with_solar: 210.0,
        }
    }

    fn make_upfront() -> UpfrontModel {
        UpfrontModel {
            projection: vec![
                RoiRow {
                    year: 1.0,
                    cumulative_roi: -500.0,
                },
                RoiRow {
                    year: 2.0,
                    cumulative_roi: -100.0,
                },
                RoiRow {
                    year: 3.0,
                    cumulative_roi: 300.0,
                },
            ],
        }
    }

    #[test]
    fn savings_series_matches_projection_rows() {
        let charts = build_charts(&make_ppa(Vec::new()), &make_upfront()).expect("valid inputs");
        assert_eq!(charts.ppa_savings.len(), 2);
        assert_eq!(charts.ppa_savings[0].name, "Year 1");
        assert_eq!(charts.ppa_savings[1].annual_savings, 1600.0);
    }

    #[test]
    fn roi_series_matches_its_own_row_count() {
        let charts = build_charts(&make_ppa(Vec::new()), &make_upfront()).expect("valid inputs");
        // series lengths track their own source documents independently
        assert_eq!(charts.upfront_roi.len(), 3);
        assert_eq!(charts.ppa_savings.len(), 2);
        assert_eq!(charts.upfront_roi[2].cumulative_roi, 300.0);
    }

    #[test]
    fn psh_averages_rows_sharing_a_month() {
        let ppa = make_ppa(vec![
            monthly_row(2022, 1, 4.0),
            monthly_row(2023, 1, 6.0),
            monthly_row(2023, 2, 5.0),
        ]);
        let charts = build_charts(&ppa, &make_upfront()).expect("valid inputs");
        assert_eq!(charts.psh.len(), 2);
        assert_eq!(charts.psh[0].month, 1);
        assert_eq!(charts.psh[0].peak_sun_hours, 5.0);
        assert_eq!(charts.psh[0].name, "Jan");
        assert_eq!(charts.psh[1].peak_sun_hours, 5.0);
    }

    #[test]
    fn psh_preserves_first_encountered_month_order() {
        // Data starting mid-year must not be re-sorted into calendar order.
        let ppa = make_ppa(vec![
            monthly_row(2022, 11, 4.5),
            monthly_row(2022, 12, 4.2),
            monthly_row(2023, 1, 4.8),
            monthly_row(2023, 11, 4.1),
        ]);
        let charts = build_charts(&ppa, &make_upfront()).expect("valid inputs");
        let months: Vec<u32> = charts.psh.iter().map(|p| p.month).collect();
        assert_eq!(months, vec![11, 12, 1]);
        assert_eq!(charts.psh[0].name, "Nov");
    }

    #[test]
    fn psh_length_equals_distinct_month_count() {
        let rows: Vec<MonthlyRow> = (0..24)
            .map(|i| monthly_row(2022 + (i / 12) as i32, (i % 12) as u32 + 1, 4.0))
            .collect();
        let charts = build_charts(&make_ppa(rows), &make_upfront()).expect("valid inputs");
        assert_eq!(charts.psh.len(), 12);
    }

    #[test]
    fn point_serialization_uses_contract_keys() {
        let ppa = make_ppa(vec![monthly_row(2023, 3, 4.7)]);
        let charts = build_charts(&ppa, &make_upfront()).expect("valid inputs");
        let json = serde_json::to_value(&charts).expect("serializable");
        assert!(json["ppaSavings"][0].get("Annual Savings (MYR)").is_some());
        assert!(json["upfrontRoi"][0].get("Cumulative ROI (MYR)").is_some());
        assert!(json["psh"][0].get("Peak Sun Hours").is_some());
        assert_eq!(json["psh"][0]["name"], "Mar");
    }
}
