use actix_web::http::StatusCode;
use async_trait::async_trait;
use std::fmt::Debug;

/// Health information served away from the protocol port so probes never
/// contend with reconciliation traffic.
/// External-DNS probes `/healthz`, `/readyz` and `/livez` the same way, so a
/// single answer backs all three.
#[async_trait]
pub trait Status: Send + Sync + Debug {
    /// Return if the service is healthy in general.
    async fn healthz(&self) -> (String, StatusCode) {
        ("OK".to_string(), StatusCode::OK)
    }
}

/// The provider holds no local state worth probing; reachable means healthy.
#[derive(Debug)]
pub struct AlwaysHealthy;

#[async_trait]
impl Status for AlwaysHealthy {}
