pub mod adapter;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod utils;

pub use adapter::{process_events, EncodedGame, Market, RequestParams};
pub use config::Config;
pub use error::{AdapterError, Result};
pub use models::*;
pub use utils::*;

/// Initialize logging for the binaries; `RUST_LOG` overrides the default level
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
