//! Notification Config

use clap::Args;

/// Notification timing settings.
#[derive(Debug, Clone, Args)]
pub struct NotificationConfig {
    /// Default display time in milliseconds
    #[arg(
        long = "notification-ttl-ms",
        env = "NOTIFICATION_TTL_MS",
        default_value_t = 5_000_u64
    )]
    pub ttl_ms: u64,

    /// Window in milliseconds within which identical notifications collapse
    #[arg(
        long = "notification-suppression-ms",
        env = "NOTIFICATION_SUPPRESSION_MS",
        default_value_t = 1_000_u64
    )]
    pub suppression_ms: u64,

    /// Suppression window in milliseconds for cart notifications
    #[arg(long, env = "CART_SUPPRESSION_MS", default_value_t = 500_u64)]
    pub cart_suppression_ms: u64,
}
