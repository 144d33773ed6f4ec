//! Table layout and the fixed SQL statements run against it.
//!
//! Column names are Traditional Chinese and must be quoted. Every statement aliases its columns
//! to ASCII names and casts them to `text`/`bigint`, so rows decode the same whatever numeric or
//! date type the import produced. User-supplied values are always bound, never formatted in.

use std::fmt;
use std::str::FromStr;

pub const TABLE: &str = "world";
pub const COL_COUNTRY: &str = "國家";
pub const COL_DATE: &str = "日期";
pub const COL_CONFIRMED: &str = "總確診數";
pub const COL_DEATHS: &str = "總死亡數";
pub const COL_RECOVERED: &str = "解除隔離數";

/// Rows returned by the per-date query.
pub const BY_DATE_LIMIT: i64 = 20;

/// Quote a PostgreSQL identifier.
#[must_use]
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Ranking column for [`top_countries_sql`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Confirmed,
    Deaths,
}

impl Metric {
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            Self::Confirmed => COL_CONFIRMED,
            Self::Deaths => COL_DEATHS,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Confirmed => "確診數",
            Self::Deaths => "死亡數",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMetric(pub String);

impl fmt::Display for UnknownMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown metric '{}'", self.0)
    }
}

impl std::error::Error for UnknownMetric {}

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(Self::Confirmed),
            "deaths" => Ok(Self::Deaths),
            other => Err(UnknownMetric(other.to_string())),
        }
    }
}

/// `$1` = `%name%` pattern, `$2` = row limit.
#[must_use]
pub fn by_country_sql() -> String {
    let t = quote_ident(TABLE);
    let country = quote_ident(COL_COUNTRY);
    let date = quote_ident(COL_DATE);
    format!(
        "SELECT {country}::text AS country, {date}::text AS date, \
         {confirmed}::bigint AS confirmed, {deaths}::bigint AS deaths, \
         {recovered}::bigint AS recovered \
         FROM {t} WHERE {country} ILIKE $1 ORDER BY {date} DESC LIMIT $2",
        confirmed = quote_ident(COL_CONFIRMED),
        deaths = quote_ident(COL_DEATHS),
        recovered = quote_ident(COL_RECOVERED),
    )
}

/// `$1` = date rendered as text (`YYYY-MM-DD`).
#[must_use]
pub fn by_date_sql() -> String {
    let t = quote_ident(TABLE);
    let confirmed = quote_ident(COL_CONFIRMED);
    format!(
        "SELECT {country}::text AS country, {confirmed}::bigint AS confirmed, \
         {deaths}::bigint AS deaths \
         FROM {t} WHERE {date}::text = $1 ORDER BY {confirmed} DESC NULLS LAST LIMIT {BY_DATE_LIMIT}",
        country = quote_ident(COL_COUNTRY),
        deaths = quote_ident(COL_DEATHS),
        date = quote_ident(COL_DATE),
    )
}

/// Rows on the latest date ranked by `metric`. `$1` = row limit.
#[must_use]
pub fn top_countries_sql(metric: Metric) -> String {
    let t = quote_ident(TABLE);
    let date = quote_ident(COL_DATE);
    format!(
        "WITH latest AS (SELECT MAX({date}) AS max_date FROM {t}) \
         SELECT {t}.{country}::text AS country, {t}.{confirmed}::bigint AS confirmed, \
         {t}.{deaths}::bigint AS deaths \
         FROM {t}, latest WHERE {t}.{date} = latest.max_date \
         ORDER BY {t}.{order} DESC NULLS LAST LIMIT $1",
        country = quote_ident(COL_COUNTRY),
        confirmed = quote_ident(COL_CONFIRMED),
        deaths = quote_ident(COL_DEATHS),
        order = quote_ident(metric.column()),
    )
}

#[must_use]
pub fn row_count_sql() -> String {
    format!("SELECT COUNT(*) AS cnt FROM {}", quote_ident(TABLE))
}

#[must_use]
pub fn country_count_sql() -> String {
    format!(
        "SELECT COUNT(DISTINCT {}) AS cnt FROM {}",
        quote_ident(COL_COUNTRY),
        quote_ident(TABLE)
    )
}

#[must_use]
pub fn date_range_sql() -> String {
    let date = quote_ident(COL_DATE);
    format!(
        "SELECT MIN({date})::text AS min_d, MAX({date})::text AS max_d FROM {}",
        quote_ident(TABLE)
    )
}

/// Confirmed/deaths totals over the rows of the latest date.
#[must_use]
pub fn latest_totals_sql() -> String {
    let t = quote_ident(TABLE);
    let date = quote_ident(COL_DATE);
    format!(
        "SELECT COALESCE(SUM({confirmed}), 0)::bigint AS tc, COALESCE(SUM({deaths}), 0)::bigint AS td \
         FROM {t} WHERE {date} = (SELECT MAX({date}) FROM {t})",
        confirmed = quote_ident(COL_CONFIRMED),
        deaths = quote_ident(COL_DEATHS),
    )
}

/// `$1` = table name.
pub const COLUMNS_SQL: &str = "SELECT column_name::text AS column_name, data_type::text AS data_type \
     FROM information_schema.columns WHERE table_name = $1 ORDER BY ordinal_position";
