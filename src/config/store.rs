//! Store Config

use std::path::PathBuf;

use clap::Args;

/// Local profile storage settings.
#[derive(Debug, Clone, Args)]
pub struct StoreConfig {
    /// Directory holding the cart, order log and theme
    #[arg(long, env = "STOREFRONT_PROFILE_DIR", default_value = ".storefront")]
    pub profile_dir: PathBuf,
}
