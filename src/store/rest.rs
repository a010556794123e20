//! HTTP implementation of the catalog store client
//!
//! Talks to the hosted store's REST endpoint: one resource per table,
//! filters and projections as query-string pairs, writes as JSON bodies.
//! Authentication is a per-request API key pair of headers.

use serde_json::Value;

use crate::core::config::Config;
use crate::store::query::{Filter, Select};
use crate::store::{CatalogStore, StoreError};

/// REST client for the hosted catalog store
#[derive(Debug)]
pub struct RestStore {
    base_url: String,
    api_key: String,
    agent: ureq::Agent,
}

impl RestStore {
    /// Create a client against a base URL (e.g. `https://db.example/rest/v1`)
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    /// Build a client from loaded configuration
    pub fn from_config(config: &Config) -> Result<Self, ConfigMissing> {
        let url = config.store_url.as_deref().ok_or(ConfigMissing::StoreUrl)?;
        let key = config.store_key.as_deref().ok_or(ConfigMissing::StoreKey)?;
        Ok(Self::new(url, key))
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    fn authed(&self, request: ureq::Request) -> ureq::Request {
        request
            .set("apikey", &self.api_key)
            .set("Authorization", &format!("Bearer {}", self.api_key))
    }

    fn run(
        &self,
        op: &'static str,
        table: &str,
        request: ureq::Request,
        body: Option<&Value>,
    ) -> Result<ureq::Response, StoreError> {
        let result = match body {
            Some(json) => request.send_json(json),
            None => request.call(),
        };
        match result {
            Ok(response) => Ok(response),
            Err(ureq::Error::Status(status, response)) => Err(StoreError::Status {
                status,
                op,
                table: table.to_string(),
                message: response.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(transport)) => Err(StoreError::Transport {
                op,
                table: table.to_string(),
                message: transport.to_string(),
            }),
        }
    }

    fn read_rows(
        &self,
        op: &'static str,
        table: &str,
        response: ureq::Response,
    ) -> Result<Vec<Value>, StoreError> {
        response
            .into_json::<Vec<Value>>()
            .map_err(|e| StoreError::Transport {
                op,
                table: table.to_string(),
                message: format!("invalid response body: {}", e),
            })
    }
}

impl CatalogStore for RestStore {
    fn select(&self, query: &Select) -> Result<Vec<Value>, StoreError> {
        let mut request = self.agent.get(&self.table_url(query.table()));
        for (key, value) in query.query_pairs() {
            request = request.query(&key, &value);
        }
        let response = self.run("select", query.table(), self.authed(request), None)?;
        self.read_rows("select", query.table(), response)
    }

    fn insert(
        &self,
        table: &str,
        payload: Value,
        returning: Option<&str>,
    ) -> Result<Vec<Value>, StoreError> {
        let mut request = self.agent.post(&self.table_url(table));
        match returning {
            Some(projection) => {
                request = request
                    .query("select", projection)
                    .set("Prefer", "return=representation");
            }
            None => {
                request = request.set("Prefer", "return=minimal");
            }
        }
        let response = self.run("insert", table, self.authed(request), Some(&payload))?;
        if returning.is_some() {
            self.read_rows("insert", table, response)
        } else {
            Ok(Vec::new())
        }
    }

    fn update(&self, table: &str, filters: &[Filter], payload: Value) -> Result<(), StoreError> {
        let mut request = self.agent.request("PATCH", &self.table_url(table));
        for filter in filters {
            let (key, value) = filter.query_pair();
            request = request.query(&key, &value);
        }
        request = request.set("Prefer", "return=minimal");
        self.run("update", table, self.authed(request), Some(&payload))?;
        Ok(())
    }

    fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), StoreError> {
        let mut request = self.agent.delete(&self.table_url(table));
        for filter in filters {
            let (key, value) = filter.query_pair();
            request = request.query(&key, &value);
        }
        self.run("delete", table, self.authed(request), None)?;
        Ok(())
    }
}

/// Missing configuration for the REST client
#[derive(Debug, thiserror::Error)]
pub enum ConfigMissing {
    #[error("store URL not configured; set CPT_STORE_URL or store_url in the config file")]
    StoreUrl,

    #[error("store API key not configured; set CPT_STORE_KEY or store_key in the config file")]
    StoreKey,
}
