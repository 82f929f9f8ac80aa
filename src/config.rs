use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LedgerConfig {
    /// Decimal places for client-facing amounts (internal units are 10^-decimals)
    pub decimals: u32,
    /// Command queue capacity
    pub queue_size: usize,
    /// Per-request reply timeout
    pub request_timeout_ms: u64,
    #[serde(default)]
    pub journal: JournalConfig,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            decimals: 2,
            queue_size: 1024,
            request_timeout_ms: 2000,
            journal: JournalConfig::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JournalConfig {
    pub enabled: bool,
    pub path: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: "./data/economy/journal.csv".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Self {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .unwrap_or_else(|_| panic!("Failed to read config file: {}", config_path));
        serde_yaml::from_str(&content).expect("Failed to parse config yaml")
    }
}
