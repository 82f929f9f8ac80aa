//! SimpleEconomy - Account Ledger Service
//!
//! Main entry point. Architecture:
//!
//! ```text
//! ┌──────────┐    ┌──────────────┐    ┌──────────────┐    ┌──────────┐
//! │  Config  │───▶│  LedgerCore  │───▶│ LedgerService│───▶│ Gateway  │
//! │  (YAML)  │    │(Journal+Map) │    │ (cmd loop)   │    │ (HTTP)   │
//! └──────────┘    └──────────────┘    └──────────────┘    └──────────┘
//! ```
//!
//! The service handle is injected into the gateway as `Arc<dyn
//! EconomyProvider>`; nothing in the process holds a global provider.

use std::path::Path;
use std::sync::Arc;

use simple_economy::config::AppConfig;
use simple_economy::gateway::{self, AppState};
use simple_economy::ledger::{EconomyProvider, LedgerCore, LedgerService, ServiceConfig};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env);
    let _log_guard = simple_economy::logging::init_logging(&config);

    tracing::info!("Starting SimpleEconomy ledger service in {} mode", env);

    let core = if config.ledger.journal.enabled {
        let path = Path::new(&config.ledger.journal.path);
        tracing::info!(path = %path.display(), "Journal enabled");
        LedgerCore::with_journal(path)?
    } else {
        tracing::warn!("Journal disabled: balances will not survive a restart");
        LedgerCore::new()
    };

    let handle = LedgerService::spawn(
        core,
        ServiceConfig {
            queue_size: config.ledger.queue_size,
            request_timeout_ms: config.ledger.request_timeout_ms,
        },
    );
    let provider: Arc<dyn EconomyProvider> = Arc::new(handle);

    let state = Arc::new(AppState::new(provider, config.ledger.decimals));

    let port = get_port_override().unwrap_or(config.gateway.port);
    gateway::serve(state, &config.gateway.host, port).await
}
