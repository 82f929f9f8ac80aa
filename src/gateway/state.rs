//! Shared gateway state

use std::sync::Arc;

use crate::ledger::EconomyProvider;

/// State shared by all gateway handlers.
///
/// The provider is injected at construction; the gateway never reaches for a
/// global to find its ledger.
pub struct AppState {
    /// The economy provider every handler delegates to
    pub provider: Arc<dyn EconomyProvider>,
    /// Decimal places used to parse and format client amounts
    pub decimals: u32,
}

impl AppState {
    pub fn new(provider: Arc<dyn EconomyProvider>, decimals: u32) -> Self {
        Self { provider, decimals }
    }
}
