use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;

/// One A-record as the USG DNS API stores it. The `id` is assigned by the
/// backend and opaque to everything on this side.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub name: String,
    pub target: String,
}

/// CRUD contract of the record store. The provider only ever talks through
/// this, so reconciliation logic can run against an in-memory store in tests.
#[async_trait]
pub trait RecordApi: Send + Sync + Debug {
    async fn list(&self) -> Result<Vec<Record>>;
    async fn create(&self, name: &str, target: &str) -> Result<Record>;
    async fn update(&self, id: &str, name: &str, target: &str) -> Result<Record>;
    async fn delete(&self, id: &str) -> Result<()>;
}

#[derive(Serialize)]
struct WriteRecord<'a> {
    name: &'a str,
    target: &'a str,
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the USG DNS API.
/// A single failed call fails the enclosing operation; there are no retries.
pub struct UsgClient {
    base_url: String,
    token: String,
    http: reqwest::Client,
}

// Keeps the token out of debug logs.
impl Debug for UsgClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsgClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl UsgClient {
    /// `token` is sent verbatim in the `Authorization` header, so a scheme
    /// prefix belongs in the configured value if the backend wants one.
    pub fn new(base_url: &str, token: &str) -> Result<UsgClient> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(UsgClient {
            base_url: base_url.strip_suffix('/').unwrap_or(base_url).to_string(),
            token: token.to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turns a non-success response into `Error::Backend`, keeping whatever
    /// body the backend sent for the log.
    async fn check_status(
        response: reqwest::Response,
        accepted: &[reqwest::StatusCode],
    ) -> Result<reqwest::Response> {
        if accepted.contains(&response.status()) {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(Error::Backend { status, body })
    }
}

#[async_trait]
impl RecordApi for UsgClient {
    async fn list(&self) -> Result<Vec<Record>> {
        log::debug!("GET {}", self.url("/records"));
        let response = self
            .http
            .get(self.url("/records"))
            .header(reqwest::header::AUTHORIZATION, &self.token)
            .send()
            .await?;
        let response = Self::check_status(response, &[reqwest::StatusCode::OK]).await?;
        Ok(response.json().await?)
    }

    async fn create(&self, name: &str, target: &str) -> Result<Record> {
        log::debug!("POST {}", self.url("/records"));
        let response = self
            .http
            .post(self.url("/records"))
            .header(reqwest::header::AUTHORIZATION, &self.token)
            .json(&WriteRecord { name, target })
            .send()
            .await?;
        let response = Self::check_status(
            response,
            &[reqwest::StatusCode::OK, reqwest::StatusCode::CREATED],
        )
        .await?;
        Ok(response.json().await?)
    }

    async fn update(&self, id: &str, name: &str, target: &str) -> Result<Record> {
        let url = self.url(&format!("/records/{id}"));
        log::debug!("PUT {url}");
        let response = self
            .http
            .put(url)
            .header(reqwest::header::AUTHORIZATION, &self.token)
            .json(&WriteRecord { name, target })
            .send()
            .await?;
        let response = Self::check_status(response, &[reqwest::StatusCode::OK]).await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let url = self.url(&format!("/records/{id}"));
        log::debug!("DELETE {url}");
        let response = self
            .http
            .delete(url)
            .header(reqwest::header::AUTHORIZATION, &self.token)
            .send()
            .await?;
        Self::check_status(
            response,
            &[reqwest::StatusCode::OK, reqwest::StatusCode::NO_CONTENT],
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_one_trailing_slash() {
        let client = UsgClient::new("http://dns.local/api/", "token").unwrap();
        assert_eq!(client.url("/records"), "http://dns.local/api/records");

        let client = UsgClient::new("http://dns.local/api", "token").unwrap();
        assert_eq!(client.url("/records/abc"), "http://dns.local/api/records/abc");
    }

    #[test]
    fn record_decodes_from_backend_json() {
        let records: Vec<Record> = serde_json::from_str(
            r#"[{"id": "42", "name": "a.example.com", "target": "1.2.3.4"}]"#,
        )
        .unwrap();
        assert_eq!(records[0].id, "42");
        assert_eq!(records[0].name, "a.example.com");
        assert_eq!(records[0].target, "1.2.3.4");
    }

    #[test]
    fn write_payload_shape() {
        let json = serde_json::to_string(&WriteRecord {
            name: "a.example.com",
            target: "1.2.3.4",
        })
        .unwrap();
        assert_eq!(json, r#"{"name":"a.example.com","target":"1.2.3.4"}"#);
    }
}
