pub mod changes;
pub mod domain_filter;
pub mod endpoint;
pub mod error;
mod client;
mod config;
mod provider;
mod status;
mod usg;
mod webhook;
mod webhook_json;

/// External-DNS compares this header value as a plain string, so it is kept
/// as the exact bytes the protocol expects.
const MEDIATYPE: &str = "application/external.dns.webhook+json;version=1";

/// Package version baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Git commit the binary was built from, when the build exports `GIT_COMMIT`.
pub const COMMIT: Option<&str> = option_env!("GIT_COMMIT");

/// Version string for the startup banner, with the commit when known.
pub fn version_full() -> String {
    match COMMIT {
        Some(commit) => format!("{VERSION} ({commit})"),
        None => VERSION.to_string(),
    }
}

pub use client::{Record, RecordApi, UsgClient};
pub use config::Config;
pub use provider::Provider;
pub use status::{AlwaysHealthy, Status};
pub use usg::UsgProvider;
pub use webhook::Webhook;
