use std::env;
use std::path::PathBuf;

/// Default spreadsheet the maintenance system exports
const DEFAULT_INPUT_PATH: &str = "cmms.xlsx";
const DEFAULT_REPORT_DIR: &str = "report";
const DEFAULT_PORT: u16 = 8000;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    /// Spreadsheet with the maintenance records
    pub input_path: PathBuf,
    /// Worksheet to read; the first one when unset
    pub sheet_name: Option<String>,
    /// Directory the chart images are written to and served from
    pub report_dir: PathBuf,
    /// Base URL used to build the chart links sent to the webhook
    pub public_base_url: String,
    /// Automation webhook receiving chart links (disabled when unset)
    pub webhook_url: Option<String>,
    pub webhook_timeout_secs: u64,
    /// TTF/OTF font used for chart text; system fonts are searched when unset
    pub chart_font_path: Option<PathBuf>,
    /// Requests per second allowed on /generate-charts per peer (0 disables)
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            sheet_name: None,
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            public_base_url: format!("http://localhost:{}", DEFAULT_PORT),
            webhook_url: None,
            webhook_timeout_secs: 10,
            chart_font_path: None,
            rate_limit_per_second: 1,
            rate_limit_burst: 3,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = var("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        Self {
            port,
            input_path: var("INPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.input_path),
            sheet_name: var("SHEET_NAME"),
            report_dir: var("REPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.report_dir),
            public_base_url: var("PUBLIC_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| format!("http://localhost:{}", port)),
            webhook_url: var("WEBHOOK_URL"),
            webhook_timeout_secs: var("WEBHOOK_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.webhook_timeout_secs),
            chart_font_path: var("CHART_FONT_PATH").map(PathBuf::from),
            rate_limit_per_second: var("RATE_LIMIT_PER_SECOND")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.rate_limit_per_second),
            rate_limit_burst: var("RATE_LIMIT_BURST")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.rate_limit_burst),
        }
    }

    /// Check if chart generation is rate limited
    pub fn rate_limit_enabled(&self) -> bool {
        self.rate_limit_per_second > 0 && self.rate_limit_burst > 0
    }
}
