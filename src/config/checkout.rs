//! Checkout Config

use clap::Args;

/// Checkout settings.
#[derive(Debug, Clone, Args)]
pub struct CheckoutConfig {
    /// Simulated payment processing time in milliseconds
    #[arg(long, env = "PAYMENT_DELAY_MS", default_value_t = 3_000_u64)]
    pub payment_delay_ms: u64,
}
