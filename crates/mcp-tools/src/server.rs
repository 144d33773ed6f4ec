//! MCP server handlers.
//!
//! Three independent servers, one per deployment: `custom` (small helpers), `weather`, and
//! `covid`. Every tool returns plain text; failures are rendered into that text by the layer
//! below, so no tool call ends in an MCP error.

use crate::basic;
use crate::covid::{self, CovidQueries};
use crate::weather::WeatherClient;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{ServerHandler, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::Deserialize;

fn tools_only_info(instructions: &str) -> ServerInfo {
    ServerInfo {
        instructions: Some(instructions.into()),
        capabilities: ServerCapabilities::builder().enable_tools().build(),
        ..Default::default()
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct HelloArgs {
    /// 要打招呼的對象
    pub name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddArgs {
    pub a: i64,
    pub b: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UppercaseArgs {
    /// 使用者輸入的英文文字
    pub text: String,
}

#[derive(Clone)]
pub struct CustomServer {
    tool_router: ToolRouter<Self>,
}

impl Default for CustomServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl CustomServer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "向指定對象打招呼。")]
    fn hello(&self, Parameters(HelloArgs { name }): Parameters<HelloArgs>) -> String {
        basic::hello(&name)
    }

    #[tool(description = "將兩個整數相加。")]
    fn add(&self, Parameters(AddArgs { a, b }): Parameters<AddArgs>) -> String {
        basic::add(a, b).to_string()
    }

    #[tool(description = "將輸入文字轉為大寫。")]
    fn uppercase(&self, Parameters(UppercaseArgs { text }): Parameters<UppercaseArgs>) -> String {
        basic::uppercase(&text)
    }
}

#[tool_handler]
impl ServerHandler for CustomServer {
    fn get_info(&self) -> ServerInfo {
        tools_only_info("Custom Tools: greeting, integer addition, and upper-casing text.")
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct WeatherArgs {
    /// 要查詢的城市名稱，應為台灣城市之一（例如 台北、高雄、花蓮）
    pub city: String,
}

#[derive(Clone)]
pub struct WeatherServer {
    client: WeatherClient,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl WeatherServer {
    #[must_use]
    pub fn new(client: WeatherClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "查詢指定城市的天氣概況。支援城市: 台北, 新北, 桃園, 台中, 台南, 高雄, 基隆, 新竹, 嘉義, 宜蘭, 苗栗, 南投, 彰化, 雲林, 嘉義縣, 屏東, 花蓮, 台東, 澎湖, 金門, 連江"
    )]
    async fn get_weather(&self, Parameters(WeatherArgs { city }): Parameters<WeatherArgs>) -> String {
        self.client.get_weather(&city).await
    }
}

#[tool_handler]
impl ServerHandler for WeatherServer {
    fn get_info(&self) -> ServerInfo {
        tools_only_info("Current weather for cities in Taiwan (Open-Meteo).")
    }
}

fn default_limit() -> i64 {
    covid::DEFAULT_LIMIT
}

fn default_metric() -> String {
    "confirmed".to_string()
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ByCountryArgs {
    /// 國家/地區名稱（如 台灣、美國、日本、歐洲）
    pub country_name: String,
    /// 回傳筆數，預設 10
    #[serde(default = "default_limit")]
    pub limit: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ByDateArgs {
    /// 日期，格式 YYYY-MM-DD（如 2022-04-18）
    pub date_str: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TopCountriesArgs {
    /// 排序依據：'confirmed'（總確診數）或 'deaths'（總死亡數）
    #[serde(default = "default_metric")]
    pub metric: String,
    /// 回傳筆數，預設 10
    #[serde(default = "default_limit")]
    pub limit: i64,
}

#[derive(Clone)]
pub struct CovidServer {
    queries: CovidQueries,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CovidServer {
    #[must_use]
    pub fn new(queries: CovidQueries) -> Self {
        Self {
            queries,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "查詢指定國家或地區的 COVID-19 疫情數據，依日期由新到舊排序。")]
    async fn get_covid_by_country(
        &self,
        Parameters(ByCountryArgs {
            country_name,
            limit,
        }): Parameters<ByCountryArgs>,
    ) -> String {
        self.queries.by_country(&country_name, limit).await
    }

    #[tool(description = "查詢指定日期的全球 COVID-19 疫情摘要（前 20 國依確診數排序）。")]
    async fn get_covid_by_date(
        &self,
        Parameters(ByDateArgs { date_str }): Parameters<ByDateArgs>,
    ) -> String {
        self.queries.by_date(&date_str).await
    }

    #[tool(description = "查詢確診或死亡數最高的國家/地區（取最新日期的資料，含全球、洲別）。")]
    async fn get_top_countries(
        &self,
        Parameters(TopCountriesArgs { metric, limit }): Parameters<TopCountriesArgs>,
    ) -> String {
        self.queries.top_countries(&metric, limit).await
    }

    #[tool(
        description = "取得 COVID-19 world 資料庫的整體摘要：總筆數、國家/地區數、日期範圍、最新日期的全球確診與死亡總和。"
    )]
    async fn get_covid_summary(&self) -> String {
        self.queries.summary().await
    }

    #[tool(description = "列出 world 資料表的所有欄位名稱與型別，供確認 schema 或除錯用。")]
    async fn list_table_columns(&self) -> String {
        self.queries.columns().await
    }
}

#[tool_handler]
impl ServerHandler for CovidServer {
    fn get_info(&self) -> ServerInfo {
        tools_only_info("COVID-19 statistics from the Postgres `world` table.")
    }
}
