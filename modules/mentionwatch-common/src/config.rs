use std::env;

/// Default monitored keyword set; override with MONITOR_KEYWORDS.
const DEFAULT_KEYWORDS: &str = "ruul,tipalti,payouts,paddle";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Postgres
    pub database_url: String,

    // Search provider
    pub firecrawl_api_key: String,

    // LLM provider
    pub nvidia_api_key: String,
    pub llm_model: String,
    pub llm_base_url: Option<String>,

    // Pipeline
    pub keywords: Vec<String>,
    pub scrape_timeout_secs: u64,

    // Web server
    pub web_host: String,
    pub web_port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            database_url: required_env("DATABASE_URL"),
            firecrawl_api_key: required_env("FIRECRAWL_API_KEY"),
            nvidia_api_key: required_env("NVIDIA_API_KEY"),
            llm_model: env::var("LLM_MODEL")
                .unwrap_or_else(|_| "meta/llama-3.1-8b-instruct".to_string()),
            llm_base_url: env::var("LLM_BASE_URL").ok(),
            keywords: parse_keywords(
                &env::var("MONITOR_KEYWORDS").unwrap_or_else(|_| DEFAULT_KEYWORDS.to_string()),
            ),
            scrape_timeout_secs: env::var("SCRAPE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .expect("SCRAPE_TIMEOUT_SECS must be a number"),
            web_host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_port: env::var("WEB_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("WEB_PORT must be a number"),
        }
    }
}

fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
