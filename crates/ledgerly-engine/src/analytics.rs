//! # Analytics Engine
//!
//! Read-only insight over the ledger: daily series, top items, expense
//! breakdowns, short-term sales forecasts and the daily summary.
//!
//! ## Division of Labor
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Repositories (SQL)              ledgerly-core (pure)               │
//! │  ──────────────────              ─────────────────────              │
//! │  GROUP BY date/item/category     densify_daily (zero fill)          │
//! │  SUM / COALESCE / LIMIT          linear_forecast (least squares)    │
//! │                                                                     │
//! │  The engine wires one to the other; it holds no math of its own.    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineResult;
use ledgerly_core::analytics::{
    densify_daily, linear_forecast, CategoryTotal, DailyTotal, ForecastPoint, ItemTotal,
};
use ledgerly_core::{Money, DEFAULT_FORECAST_LOOKBACK_DAYS};
use ledgerly_db::Database;

/// Which ledger the daily series is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Sales,
    Expenses,
}

/// One day's position: sales in, expenses out, net profit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub sales_cents: i64,
    pub expenses_cents: i64,
    pub net_cents: i64,
}

impl DailySummary {
    pub fn sales(&self) -> Money {
        Money::from_cents(self.sales_cents)
    }

    pub fn expenses(&self) -> Money {
        Money::from_cents(self.expenses_cents)
    }

    pub fn net(&self) -> Money {
        Money::from_cents(self.net_cents)
    }
}

/// Engine for analytics queries.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    db: Database,
    lookback_days: u32,
}

impl AnalyticsEngine {
    /// Creates a new AnalyticsEngine with the default forecast lookback.
    pub fn new(db: Database) -> Self {
        AnalyticsEngine {
            db,
            lookback_days: DEFAULT_FORECAST_LOOKBACK_DAYS,
        }
    }

    /// Overrides the forecast lookback window (days of history fitted).
    /// Values below 1 are clamped to 1.
    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days.max(1);
        self
    }

    /// One total per calendar day in `[from, to]` inclusive, zero-filled.
    /// An inverted window yields an empty series.
    pub async fn daily_totals(
        &self,
        kind: RecordKind,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<DailyTotal>> {
        let rows = match kind {
            RecordKind::Sales => self.db.sales().daily_totals(from, to).await?,
            RecordKind::Expenses => self.db.expenses().daily_totals(from, to).await?,
        };

        Ok(densify_daily(from, to, &rows))
    }

    /// Top-n items by summed sale amount in the window, descending,
    /// ties broken by item name.
    pub async fn top_items(
        &self,
        n: u32,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<ItemTotal>> {
        let rows = self.db.sales().top_items(n, from, to).await?;

        Ok(rows
            .into_iter()
            .map(|(item, total_cents)| ItemTotal { item, total_cents })
            .collect())
    }

    /// Summed spend per category in the window, largest first. Categories
    /// with no spend are simply absent.
    pub async fn expense_breakdown(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<CategoryTotal>> {
        let rows = self.db.expenses().breakdown(from, to).await?;

        Ok(rows
            .into_iter()
            .map(|(category, amount_cents)| CategoryTotal {
                category,
                amount_cents,
            })
            .collect())
    }

    /// Projects daily sales totals `horizon_days` past `as_of`.
    ///
    /// Fits a least-squares line over the trailing zero-filled lookback
    /// window ending at `as_of`; with fewer than two days of history the
    /// projection is flat. Every projected value is clamped to >= 0.
    pub async fn forecast(
        &self,
        as_of: NaiveDate,
        horizon_days: u32,
    ) -> EngineResult<Vec<ForecastPoint>> {
        let from = as_of - Duration::days(i64::from(self.lookback_days) - 1);
        let rows = self.db.sales().daily_totals(from, as_of).await?;
        let history = densify_daily(from, as_of, &rows);

        debug!(
            lookback_days = self.lookback_days,
            horizon_days, "Computing sales forecast"
        );
        Ok(linear_forecast(&history, horizon_days))
    }

    /// That day's sales total, expense total and net profit.
    pub async fn daily_summary(&self, date: NaiveDate) -> EngineResult<DailySummary> {
        let sales_cents = self.db.sales().total_on(date).await?;
        let expenses_cents = self.db.expenses().total_on(date).await?;

        Ok(DailySummary {
            date,
            sales_cents,
            expenses_cents,
            net_cents: sales_cents - expenses_cents,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::BillingEngine;
    use crate::stock::{StockAdjustment, StockEngine};
    use ledgerly_db::DbConfig;

    async fn setup() -> (Database, BillingEngine, AnalyticsEngine) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        (
            db.clone(),
            BillingEngine::new(db.clone()),
            AnalyticsEngine::new(db),
        )
    }

    async fn stock(db: &Database, item: &str, qty: i64) {
        StockEngine::new(db.clone())
            .adjust(
                item,
                qty,
                StockAdjustment::Restock {
                    threshold: 5,
                    unit_cost_cents: 1000,
                },
            )
            .await
            .unwrap();
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[tokio::test]
    async fn test_daily_totals_are_gap_free() {
        let (db, billing, analytics) = setup().await;
        stock(&db, "Sugar", 100).await;
        billing
            .record_sale("Sugar", 2, 5000, "", Some(date(2)))
            .await
            .unwrap();
        billing
            .record_sale("Sugar", 1, 5000, "", Some(date(5)))
            .await
            .unwrap();

        let series = analytics
            .daily_totals(RecordKind::Sales, date(1), date(5))
            .await
            .unwrap();
        assert_eq!(series.len(), 5);
        let totals: Vec<i64> = series.iter().map(|d| d.total_cents).collect();
        assert_eq!(totals, vec![0, 10000, 0, 0, 5000]);
    }

    #[tokio::test]
    async fn test_expense_series_and_breakdown() {
        let (_db, billing, analytics) = setup().await;
        billing
            .record_expense("fuel", "A", 3000, Some(date(2)), None)
            .await
            .unwrap();
        billing
            .record_expense("rent", "B", 50000, Some(date(3)), None)
            .await
            .unwrap();
        billing
            .record_expense("fuel", "A", 1000, Some(date(3)), None)
            .await
            .unwrap();

        let series = analytics
            .daily_totals(RecordKind::Expenses, date(1), date(3))
            .await
            .unwrap();
        let totals: Vec<i64> = series.iter().map(|d| d.total_cents).collect();
        assert_eq!(totals, vec![0, 3000, 51000]);

        let breakdown = analytics.expense_breakdown(date(1), date(31)).await.unwrap();
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, "rent");
        assert_eq!(breakdown[0].amount_cents, 50000);
        assert_eq!(breakdown[1].category, "fuel");
        assert_eq!(breakdown[1].amount_cents, 4000);
    }

    #[tokio::test]
    async fn test_top_items_by_amount() {
        let (db, billing, analytics) = setup().await;
        stock(&db, "Sugar", 100).await;
        stock(&db, "Tea", 100).await;
        billing
            .record_sale("Sugar", 2, 5000, "", Some(date(1)))
            .await
            .unwrap();
        billing
            .record_sale("Tea", 30, 1000, "", Some(date(2)))
            .await
            .unwrap();

        let top = analytics.top_items(2, date(1), date(31)).await.unwrap();
        assert_eq!(top[0].item, "Tea");
        assert_eq!(top[0].total_cents, 30000);
        assert_eq!(top[1].item, "Sugar");
        assert_eq!(top[1].total_cents, 10000);
    }

    #[tokio::test]
    async fn test_flat_history_forecasts_flat() {
        let (db, billing, analytics) = setup().await;
        let analytics = analytics.with_lookback_days(10);
        stock(&db, "Sugar", 1000).await;

        // One 75.00 sale on each of the 10 lookback days
        for day in 1..=10 {
            billing
                .record_sale("Sugar", 1, 7500, "", Some(date(day)))
                .await
                .unwrap();
        }

        let forecast = analytics.forecast(date(10), 7).await.unwrap();
        assert_eq!(forecast.len(), 7);
        assert_eq!(forecast[0].date, date(11));
        assert_eq!(forecast[6].date, date(17));
        assert!(forecast.iter().all(|p| p.predicted_cents == 7500));
    }

    #[tokio::test]
    async fn test_declining_history_floors_at_zero() {
        let (db, billing, analytics) = setup().await;
        let analytics = analytics.with_lookback_days(5);
        stock(&db, "Sugar", 1000).await;

        for (i, cents) in [10000i64, 8000, 6000, 4000, 2000].iter().enumerate() {
            billing
                .record_sale("Sugar", 1, *cents, "", Some(date(i as u32 + 1)))
                .await
                .unwrap();
        }

        let forecast = analytics.forecast(date(5), 7).await.unwrap();
        assert!(forecast.iter().all(|p| p.predicted_cents >= 0));
        // The fitted line crosses zero on the first projected day
        assert_eq!(forecast[0].predicted_cents, 0);
    }

    #[tokio::test]
    async fn test_forecast_with_no_history_is_flat_zero() {
        let (_db, _billing, analytics) = setup().await;
        let forecast = analytics.forecast(date(20), 3).await.unwrap();
        assert_eq!(forecast.len(), 3);
        assert!(forecast.iter().all(|p| p.predicted_cents == 0));
    }

    #[tokio::test]
    async fn test_daily_summary_net_profit() {
        let (db, billing, analytics) = setup().await;
        stock(&db, "Sugar", 100).await;
        billing
            .record_sale("Sugar", 2, 5000, "", Some(date(15)))
            .await
            .unwrap();
        billing
            .record_expense("fuel", "A", 3500, Some(date(15)), None)
            .await
            .unwrap();

        let summary = analytics.daily_summary(date(15)).await.unwrap();
        assert_eq!(summary.sales_cents, 10000);
        assert_eq!(summary.expenses_cents, 3500);
        assert_eq!(summary.net_cents, 6500);
        assert_eq!(summary.net(), Money::from_cents(6500));

        let empty = analytics.daily_summary(date(16)).await.unwrap();
        assert_eq!(empty.net_cents, 0);
    }
}
