//! Human-readable rendering of query results.

use super::schema::Metric;
use super::store::{ColumnInfo, CountryRow, CountryTotals, Summary};
use std::fmt::Display;

/// `1234567` -> `1,234,567`.
#[must_use]
pub fn thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn or_none<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}

#[must_use]
pub fn by_country(country: &str, rows: &[CountryRow]) -> String {
    let mut lines = vec![format!("國家: {country} | 共 {} 筆\n", rows.len())];
    for r in rows {
        let mut line = format!(
            "  日期: {} | 確診: {} | 死亡: {}",
            r.date,
            or_none(r.confirmed),
            or_none(r.deaths)
        );
        if let Some(recovered) = r.recovered {
            line.push_str(&format!(" | 康復: {recovered}"));
        }
        lines.push(line);
    }
    lines.join("\n")
}

#[must_use]
pub fn by_date(date: &str, rows: &[CountryTotals]) -> String {
    let total_confirmed: i64 = rows.iter().filter_map(|r| r.confirmed).sum();
    let total_deaths: i64 = rows.iter().filter_map(|r| r.deaths).sum();

    let mut lines = vec![format!(
        "日期: {date} | 前 20 國確診總和: {total_confirmed} | 死亡總和: {total_deaths}\n"
    )];
    lines.extend(rows.iter().map(|r| {
        format!(
            "  {}: 確診 {} | 死亡 {}",
            r.country,
            or_none(r.confirmed),
            or_none(r.deaths)
        )
    }));
    lines.join("\n")
}

#[must_use]
pub fn top_countries(metric: Metric, limit: i64, rows: &[CountryTotals]) -> String {
    let mut lines = vec![format!("全球 {} 前 {limit} 名國家:\n", metric.label())];
    for (i, r) in rows.iter().enumerate() {
        let value = match metric {
            Metric::Confirmed => r.confirmed,
            Metric::Deaths => r.deaths,
        };
        lines.push(format!(
            "  {}. {}: {}",
            i + 1,
            r.country,
            thousands(value.unwrap_or(0))
        ));
    }
    lines.join("\n")
}

#[must_use]
pub fn summary(s: &Summary) -> String {
    format!(
        "COVID-19 world 資料摘要:\n  總筆數: {}\n  國家數: {}\n  日期範圍: {} ~ {}\n  最新日期全球確診總和: {}\n  最新日期全球死亡總和: {}",
        thousands(s.rows),
        s.countries,
        or_none(s.first_date.as_deref()),
        or_none(s.last_date.as_deref()),
        thousands(s.confirmed),
        thousands(s.deaths),
    )
}

#[must_use]
pub fn columns(table: &str, cols: &[ColumnInfo]) -> String {
    let mut lines = vec![format!("資料表 {table} 的欄位:\n")];
    lines.extend(
        cols.iter()
            .map(|c| format!("  - {}: {}", c.name, c.data_type)),
    );
    lines.join("\n")
}
