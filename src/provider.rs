use crate::{changes::Changes, domain_filter::DomainFilter, endpoint::Endpoint, error::Result};
use async_trait::async_trait;
use std::fmt::Debug;

/// What the webhook server needs from a DNS backend.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The domains this provider claims authority over. Never fails.
    async fn domain_filter(&self) -> DomainFilter;
    /// Current state of the backend as protocol endpoints.
    async fn records(&self) -> Result<Vec<Endpoint>>;
    /// Apply one reconciliation diff.
    async fn apply_changes(&self, changes: Changes) -> Result<()>;
    /// Provider specific adjustments of records before the controller plans.
    async fn adjust_endpoints(&self, endpoints: Vec<Endpoint>) -> Result<Vec<Endpoint>> {
        Ok(endpoints)
    }
}
