use serde::{Deserialize, Serialize};

/// The way to inform External-DNS what kind of domains the DNS service
/// provider could handle.
/// The domain names used here do not accept the trailing dot.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DomainFilter {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<String>,
}
