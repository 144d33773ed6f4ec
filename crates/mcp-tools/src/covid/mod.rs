//! COVID-19 queries against the `world` table.
//!
//! [`CovidQueries`] is the tool-facing surface: every method returns display text. "No rows" and
//! database failures are part of that text, never an error.

pub mod check;
pub mod format;
pub mod schema;
pub mod store;

pub use schema::Metric;
pub use store::{CovidStore, DEFAULT_DATABASE_URI};

use crate::error::ToolError;

pub const DEFAULT_LIMIT: i64 = 10;

fn query_failed(tool: &str, e: &ToolError) -> String {
    tracing::warn!(tool, error = %e, "database query failed");
    format!("查詢失敗: {e}")
}

#[derive(Debug, Clone)]
pub struct CovidQueries {
    store: CovidStore,
}

impl CovidQueries {
    #[must_use]
    pub fn new(store: CovidStore) -> Self {
        Self { store }
    }

    /// Newest rows for countries whose name contains `country`.
    pub async fn by_country(&self, country: &str, limit: i64) -> String {
        match self.store.by_country(country, limit).await {
            Ok(rows) if rows.is_empty() => format!("找不到國家「{country}」的資料"),
            Ok(rows) => format::by_country(country, &rows),
            Err(e) => query_failed("get_covid_by_country", &e),
        }
    }

    /// Top countries by confirmed cases on `date` (`YYYY-MM-DD`).
    pub async fn by_date(&self, date: &str) -> String {
        match self.store.by_date(date).await {
            Ok(rows) if rows.is_empty() => format!("找不到日期 {date} 的資料"),
            Ok(rows) => format::by_date(date, &rows),
            Err(e) => query_failed("get_covid_by_date", &e),
        }
    }

    /// Highest `metric` (`confirmed` or `deaths`) on the latest date.
    pub async fn top_countries(&self, metric: &str, limit: i64) -> String {
        let Ok(metric) = metric.parse::<Metric>() else {
            return "metric 請填 'confirmed' 或 'deaths'".to_string();
        };
        match self.store.top_countries(metric, limit).await {
            Ok(rows) if rows.is_empty() => "查無資料".to_string(),
            Ok(rows) => format::top_countries(metric, limit, &rows),
            Err(e) => query_failed("get_top_countries", &e),
        }
    }

    pub async fn summary(&self) -> String {
        match self.store.summary().await {
            Ok(s) => format::summary(&s),
            Err(e) => query_failed("get_covid_summary", &e),
        }
    }

    pub async fn columns(&self) -> String {
        match self.store.columns(schema::TABLE).await {
            Ok(cols) if cols.is_empty() => {
                format!("找不到資料表「{}」，請檢查 SCHEMA 設定", schema::TABLE)
            }
            Ok(cols) => format::columns(schema::TABLE, &cols),
            Err(e) => query_failed("list_table_columns", &e),
        }
    }
}
