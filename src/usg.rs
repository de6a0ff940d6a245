use crate::{
    changes::Changes,
    client::RecordApi,
    domain_filter::DomainFilter,
    endpoint::Endpoint,
    error::{Error, Result},
    provider::Provider,
};
use async_trait::async_trait;
use logcall::logcall;

/// The backend does not persist TTLs, so every endpoint reported back to the
/// controller carries this one.
const DEFAULT_TTL: i64 = 300;
const RECORD_TYPE_A: &str = "A";

/// Reconciliation logic between the External-DNS endpoint model and the USG
/// record store. Stateless between calls; the backend's current contents are
/// re-listed whenever a name has to be resolved to an id.
#[derive(Debug)]
pub struct UsgProvider<C> {
    client: C,
    domain_filter: Vec<String>,
    dry_run: bool,
}

impl<C: RecordApi> UsgProvider<C> {
    pub fn new(client: C, domain_filter: Vec<String>, dry_run: bool) -> UsgProvider<C> {
        UsgProvider {
            client,
            domain_filter,
            dry_run,
        }
    }

    /// Strips exactly one trailing dot. Names under a configured filter stay
    /// fully qualified; the backend accepts FQDNs as-is.
    fn normalize_dns_name(&self, dns_name: &str) -> String {
        dns_name.strip_suffix('.').unwrap_or(dns_name).to_string()
    }

    /// The backend has no name index, so resolution is a fresh list and a
    /// scan. The only place the scan lives.
    async fn resolve_id_by_name(&self, dns_name: &str) -> Result<Option<String>> {
        let records = self.client.list().await?;
        Ok(records
            .into_iter()
            .find(|record| record.name == dns_name)
            .map(|record| record.id))
    }

    async fn create_record(&self, endpoint: &Endpoint) -> Result<()> {
        let Some(target) = endpoint.targets.first() else {
            return Err(Error::Validation(endpoint.dns_name.clone()));
        };
        // Single target per name; anything past the first is dropped.
        self.client.create(&endpoint.dns_name, target).await?;
        Ok(())
    }

    async fn update_record(&self, old: &Endpoint, new: &Endpoint) -> Result<()> {
        let Some(id) = self.resolve_id_by_name(&old.dns_name).await? else {
            return Err(Error::NotFound(old.dns_name.clone()));
        };
        let Some(target) = new.targets.first() else {
            return Err(Error::Validation(new.dns_name.clone()));
        };
        self.client.update(&id, &new.dns_name, target).await?;
        Ok(())
    }

    async fn delete_record(&self, endpoint: &Endpoint) -> Result<()> {
        match self.resolve_id_by_name(&endpoint.dns_name).await? {
            Some(id) => self.client.delete(&id).await,
            None => {
                // Already gone is the goal state.
                log::info!(
                    "record {} not found, considering it already deleted",
                    endpoint.dns_name
                );
                Ok(())
            }
        }
    }
}

#[async_trait]
impl<C: RecordApi> Provider for UsgProvider<C> {
    #[logcall("debug")]
    async fn domain_filter(&self) -> DomainFilter {
        DomainFilter {
            filters: self.domain_filter.clone(),
        }
    }

    #[logcall("debug")]
    async fn records(&self) -> Result<Vec<Endpoint>> {
        let records = self.client.list().await?;
        Ok(records
            .into_iter()
            .map(|record| Endpoint {
                dns_name: record.name,
                targets: vec![record.target],
                record_type: RECORD_TYPE_A.to_string(),
                record_ttl: DEFAULT_TTL,
                ..Default::default()
            })
            .collect())
    }

    #[logcall("info")]
    async fn apply_changes(&self, changes: Changes) -> Result<()> {
        if self.dry_run {
            log::info!("[DRY RUN] would create {} records", changes.create.len());
            log::info!("[DRY RUN] would update {} records", changes.update.len());
            log::info!("[DRY RUN] would delete {} records", changes.delete.len());
            return Ok(());
        }

        // Creates, then updates, then deletes; the first failure aborts the
        // pass and whatever was applied before it stays applied.
        for endpoint in &changes.create {
            if let Err(e) = self.create_record(endpoint).await {
                log::error!("failed to create record {}: {e}", endpoint.dns_name);
                return Err(e);
            }
            log::info!("created record: {} -> {:?}", endpoint.dns_name, endpoint.targets);
        }

        for pair in &changes.update {
            if let Err(e) = self.update_record(&pair.from, &pair.to).await {
                log::error!("failed to update record {}: {e}", pair.to.dns_name);
                return Err(e);
            }
            log::info!("updated record: {} -> {:?}", pair.to.dns_name, pair.to.targets);
        }

        for endpoint in &changes.delete {
            if let Err(e) = self.delete_record(endpoint).await {
                log::error!("failed to delete record {}: {e}", endpoint.dns_name);
                return Err(e);
            }
            log::info!("deleted record: {}", endpoint.dns_name);
        }

        Ok(())
    }

    /// The backend only handles A records, so everything else is dropped
    /// before the controller plans with it.
    #[logcall("debug")]
    async fn adjust_endpoints(&self, endpoints: Vec<Endpoint>) -> Result<Vec<Endpoint>> {
        Ok(endpoints
            .into_iter()
            .filter(|endpoint| {
                endpoint.record_type == RECORD_TYPE_A || endpoint.record_type.is_empty()
            })
            .map(|mut endpoint| {
                endpoint.record_type = RECORD_TYPE_A.to_string();
                if endpoint.record_ttl == 0 {
                    endpoint.record_ttl = DEFAULT_TTL;
                }
                endpoint.dns_name = self.normalize_dns_name(&endpoint.dns_name);
                endpoint
            })
            .collect())
    }
}
