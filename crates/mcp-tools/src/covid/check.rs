//! `covid-check`: run every COVID tool once against a live database and report.

use super::CovidQueries;
use std::io::Write;

const FAILED_MARKER: &str = "查詢失敗";
const RULE: &str = "==================================================";

/// Outcome of one smoke step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub tool: &'static str,
    pub description: &'static str,
    pub ok: bool,
    pub output: String,
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars()
        .take(max_chars)
        .collect::<String>()
        .replace('\n', " ")
}

/// Run the five tools plus the invalid-metric guard.
pub async fn run_checks(queries: &CovidQueries) -> Vec<CheckResult> {
    let mut results = Vec::new();

    let steps: [(&'static str, &'static str, String); 5] = [
        ("list_table_columns", "列出資料表欄位", queries.columns().await),
        ("get_covid_summary", "取得資料摘要", queries.summary().await),
        (
            "get_covid_by_country",
            "查詢台灣疫情",
            queries.by_country("台灣", 3).await,
        ),
        (
            "get_covid_by_date",
            "查詢指定日期",
            queries.by_date("2024-01-15").await,
        ),
        (
            "get_top_countries",
            "查詢確診前 5 名",
            queries.top_countries("confirmed", 5).await,
        ),
    ];
    for (tool, description, output) in steps {
        results.push(CheckResult {
            tool,
            description,
            ok: !output.contains(FAILED_MARKER),
            output,
        });
    }

    let invalid = queries.top_countries("invalid", 10).await;
    results.push(CheckResult {
        tool: "get_top_countries",
        description: "無效 metric 回傳錯誤訊息",
        ok: invalid.contains("metric 請填"),
        output: invalid,
    });

    results
}

/// Print a report for `results`; returns whether every step passed.
pub fn write_report(out: &mut dyn Write, results: &[CheckResult]) -> std::io::Result<bool> {
    let mut all_ok = true;
    for r in results {
        let mark = if r.ok { "✓" } else { "✗" };
        writeln!(out, "{mark} {}: {}", r.tool, r.description)?;
        if r.ok {
            if r.tool == "list_table_columns" {
                writeln!(out, "{}", r.output)?;
            } else {
                writeln!(out, "  結果預覽: {}...", preview(&r.output, 100))?;
            }
        } else {
            all_ok = false;
            writeln!(out, "  資料庫錯誤: {}...", preview(&r.output, 150))?;
            if r.output.contains("does not exist") && r.tool != "list_table_columns" {
                writeln!(
                    out,
                    "  >>> 欄位不符，請對照 list_table_columns 的欄位清單 <<<"
                )?;
            }
        }
        writeln!(out)?;
    }

    writeln!(out, "{RULE}")?;
    if all_ok {
        writeln!(out, "✓ 所有測試通過")?;
    } else {
        writeln!(out, "✗ 部分測試失敗（可能是資料庫未連線或 world 表不存在）")?;
    }
    Ok(all_ok)
}
