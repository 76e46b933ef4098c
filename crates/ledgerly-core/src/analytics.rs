//! # Analytics Math
//!
//! Pure aggregation helpers behind the Analytics Engine: densification of
//! daily totals and the short-horizon sales forecaster.
//!
//! ## Densification
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Grouped rows from the store:     Densified window [01..05]:        │
//! │                                                                     │
//! │    2024-01-03 → 160               2024-01-01 → 0                    │
//! │                                   2024-01-02 → 0                    │
//! │                                   2024-01-03 → 160                  │
//! │                                   2024-01-04 → 0                    │
//! │                                   2024-01-05 → 0                    │
//! │                                                                     │
//! │  Trend charts and the forecaster must see "no records" as zero,     │
//! │  never as a missing day.                                            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Forecast Method
//! Least-squares linear fit over the lookback's (day-index, total) pairs,
//! projected forward and clamped at zero (revenue cannot be negative).
//! The lookback length is a tunable parameter owned by the engine layer,
//! not a hidden constant here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::money::Money;

// =============================================================================
// Output Types
// =============================================================================

/// One day's summed total for a record set (sales or expenses).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total_cents: i64,
}

impl DailyTotal {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// One item's summed sale amount in a window, for top-N reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTotal {
    pub item: String,
    pub total_cents: i64,
}

/// One category's summed spend in a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount_cents: i64,
}

/// One projected day of the sales forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    /// Projected total in cents, clamped to >= 0.
    pub predicted_cents: i64,
}

// =============================================================================
// Densification
// =============================================================================

/// Expands grouped (date, sum) rows into one entry per calendar day in
/// `[from, to]` inclusive, filling gaps with zero.
///
/// Rows outside the window are ignored; an inverted window yields an empty
/// sequence.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use ledgerly_core::analytics::densify_daily;
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
/// let totals = densify_daily(d(1), d(5), &[(d(3), 160)]);
/// assert_eq!(totals.len(), 5);
/// assert_eq!(totals[2].total_cents, 160);
/// assert_eq!(totals[4].total_cents, 0);
/// ```
pub fn densify_daily(
    from: NaiveDate,
    to: NaiveDate,
    rows: &[(NaiveDate, i64)],
) -> Vec<DailyTotal> {
    let by_date: HashMap<NaiveDate, i64> = rows.iter().copied().collect();

    let mut out = Vec::new();
    let mut day = from;
    while day <= to {
        out.push(DailyTotal {
            date: day,
            total_cents: by_date.get(&day).copied().unwrap_or(0),
        });
        match day.succ_opt() {
            Some(next) => day = next,
            None => break, // NaiveDate::MAX; nothing beyond it
        }
    }
    out
}

// =============================================================================
// Forecast
// =============================================================================

/// Projects `horizon_days` of daily sales totals from a densified history.
///
/// Fits a least-squares line over the history's (day-index, total) pairs and
/// evaluates it at each future index, immediately following the history.
/// Every projected value is clamped to >= 0.
///
/// Degenerate cases:
/// - one day of history → every point equals that day's total
/// - empty history → empty output; there is no date to anchor projections to.
///   Callers must densify their window first (see [`densify_daily`]), which
///   turns a window with no records into all-zero days and therefore an
///   all-zero flat projection.
///
/// Pure function of its inputs; calling it repeatedly is side-effect free.
pub fn linear_forecast(history: &[DailyTotal], horizon_days: u32) -> Vec<ForecastPoint> {
    let Some(last) = history.last() else {
        return Vec::new();
    };

    let n = history.len();
    let (slope, intercept) = if n < 2 {
        (0.0, history[0].total_cents as f64)
    } else {
        fit_line(history)
    };

    let mut out = Vec::with_capacity(horizon_days as usize);
    let mut day = last.date;
    for step in 0..horizon_days {
        let Some(next) = day.succ_opt() else { break };
        day = next;

        let x = (n as f64) + step as f64;
        let projected = intercept + slope * x;
        out.push(ForecastPoint {
            date: day,
            predicted_cents: (projected.round() as i64).max(0),
        });
    }
    out
}

/// Least-squares fit over (index, total) pairs. Requires len >= 2.
///
/// Returns (slope, intercept) in cents per day-index. A history of equal
/// totals gives slope exactly 0.0: the numerator is a sum of products with a
/// zero factor, with no rounding involved.
fn fit_line(history: &[DailyTotal]) -> (f64, f64) {
    let n = history.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = history.iter().map(|d| d.total_cents as f64).sum::<f64>() / n;

    let mut num = 0.0;
    let mut den = 0.0;
    for (i, day) in history.iter().enumerate() {
        let dx = i as f64 - mean_x;
        num += dx * (day.total_cents as f64 - mean_y);
        den += dx * dx;
    }

    // den is 0 only for n < 2, which the caller already handled
    let slope = num / den;
    let intercept = mean_y - slope * mean_x;
    (slope, intercept)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn history(totals: &[i64]) -> Vec<DailyTotal> {
        totals
            .iter()
            .enumerate()
            .map(|(i, &t)| DailyTotal {
                date: d(1 + i as u32),
                total_cents: t,
            })
            .collect()
    }

    #[test]
    fn test_densify_has_no_gaps() {
        // Only one record on the 3rd; all five days must still appear
        let totals = densify_daily(d(1), d(5), &[(d(3), 16000)]);

        assert_eq!(totals.len(), 5);
        assert_eq!(totals[2].date, d(3));
        assert_eq!(totals[2].total_cents, 16000);
        assert_eq!(totals.iter().filter(|t| t.total_cents == 0).count(), 4);
    }

    #[test]
    fn test_densify_single_day_and_inverted_window() {
        let one = densify_daily(d(4), d(4), &[(d(4), 100)]);
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].total_cents, 100);

        assert!(densify_daily(d(5), d(1), &[]).is_empty());
    }

    #[test]
    fn test_densify_ignores_rows_outside_window() {
        let totals = densify_daily(d(2), d(3), &[(d(1), 999), (d(2), 50)]);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].total_cents, 50);
        assert_eq!(totals[1].total_cents, 0);
    }

    #[test]
    fn test_forecast_flat_history_projects_flat() {
        // 10 equal days → slope exactly 0 → 7 identical points
        let hist = history(&[7500; 10]);
        let points = linear_forecast(&hist, 7);

        assert_eq!(points.len(), 7);
        assert!(points.iter().all(|p| p.predicted_cents == 7500));
        // Dates immediately follow the lookback window
        assert_eq!(points[0].date, d(11));
        assert_eq!(points[6].date, d(17));
    }

    #[test]
    fn test_forecast_never_negative() {
        // Sharply declining: the fitted line crosses zero inside the horizon
        let hist = history(&[10000, 8000, 6000, 4000, 2000]);
        let points = linear_forecast(&hist, 7);

        assert_eq!(points.len(), 7);
        assert!(points.iter().all(|p| p.predicted_cents >= 0));
        // The line hits zero at day index 5 (the first projected day)
        assert_eq!(points[0].predicted_cents, 0);
        assert_eq!(points[6].predicted_cents, 0);
    }

    #[test]
    fn test_forecast_rising_trend_keeps_rising() {
        let hist = history(&[1000, 2000, 3000, 4000]);
        let points = linear_forecast(&hist, 3);

        assert_eq!(points[0].predicted_cents, 5000);
        assert_eq!(points[1].predicted_cents, 6000);
        assert_eq!(points[2].predicted_cents, 7000);
    }

    #[test]
    fn test_forecast_degenerate_single_day() {
        let hist = history(&[4200]);
        let points = linear_forecast(&hist, 3);

        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| p.predicted_cents == 4200));
    }

    #[test]
    fn test_forecast_empty_history() {
        assert!(linear_forecast(&[], 7).is_empty());
    }

    #[test]
    fn test_forecast_is_repeatable() {
        let hist = history(&[100, 200, 300]);
        assert_eq!(linear_forecast(&hist, 5), linear_forecast(&hist, 5));
    }
}
