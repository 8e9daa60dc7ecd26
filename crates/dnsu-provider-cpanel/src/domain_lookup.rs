// DomainLookup module: account domain listing

use dnsu_core::{Error, Result};
use serde_json::Value;

use crate::client::CpanelClient;

const DOMAIN_LOOKUP: &str = "DomainLookup";
const GET_BASE_DOMAINS: &str = "getbasedomains";

impl CpanelClient {
    /// List the base domains of the account
    ///
    /// An account always owns at least its main domain, so an empty answer
    /// is reported as `Error::EmptyResponse`.
    pub async fn base_domains(&self) -> Result<Vec<String>> {
        let rows = self.request(DOMAIN_LOOKUP, GET_BASE_DOMAINS, &[]).await?;
        if rows.is_empty() {
            return Err(Error::empty_response(DOMAIN_LOOKUP, GET_BASE_DOMAINS));
        }

        Ok(rows
            .iter()
            .filter_map(|row| row.get("domain").and_then(Value::as_str))
            .map(str::to_string)
            .collect())
    }
}
