// cPanel JSON API transport
//
// Wraps `reqwest::Client` with cPanel-specific URL construction,
// authentication and envelope unwrapping. Endpoint modules (ZoneEdit,
// DomainLookup) are implemented as inherent or trait methods in separate
// files to keep this module focused on transport mechanics.

use dnsu_core::{EndpointConfig, Error, Result, TlsMode};
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Path of the API2 JSON endpoint, relative to the panel root
pub const JSON_API_PATH: &str = "/json-api/cpanel";

/// cPanel API version spoken by this client
pub const API_VERSION: &str = "2";

/// Scheme token of the Authorization header
const AUTH_SCHEME: &str = "cpanel";

const USER_AGENT: &str = concat!("DNS Updater/", env!("CARGO_PKG_VERSION"));

/// Raw HTTP client for the cPanel API2 JSON interface.
///
/// Every call is a single authenticated GET. The `cpanelresult` envelope is
/// resolved before the caller sees any rows: a `data.reason` field turns a
/// 200 response into an error.
///
/// # Security
///
/// The Debug implementation does NOT expose the API token, and the token is
/// only ever sent in the Authorization header.
pub struct CpanelClient {
    /// Panel root, e.g. `https://cpanel.example.org:2083`
    base_url: Url,

    /// Account username
    username: String,

    /// API token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// HTTP client for API requests
    http: reqwest::Client,
}

impl std::fmt::Debug for CpanelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpanelClient")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("api_token", &"<REDACTED>")
            .finish()
    }
}

impl CpanelClient {
    /// Create a new client from a validated endpoint configuration
    ///
    /// Fails with `Error::Config` before any network activity when the URL,
    /// username or token is missing or the URL has no host.
    pub fn new(config: &EndpointConfig) -> Result<Self> {
        let base_url = config.validate()?;

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT);

        if config.tls == TlsMode::AcceptInvalid {
            warn!(
                "TLS certificate verification disabled for {}",
                base_url.host_str().unwrap_or_default()
            );
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            username: config.username.clone(),
            api_token: config.api_token.clone(),
            http,
        })
    }

    fn auth_header(&self) -> String {
        format!("{} {}:{}", AUTH_SCHEME, self.username, self.api_token)
    }

    /// Call `module::function` with `args` and return the result rows
    ///
    /// The caller's arguments are followed by the four protocol parameters
    /// (user, API version, module, function). No retries are performed.
    ///
    /// # Returns
    ///
    /// - `Ok(rows)`: The `cpanelresult.data` array, possibly empty
    /// - `Err(Error)`: Transport failure, non-2xx status, undecodable body
    ///   or an embedded error reason
    pub async fn request(
        &self,
        module: &str,
        function: &str,
        args: &[(&str, String)],
    ) -> Result<Vec<Value>> {
        let url = self
            .base_url
            .join(JSON_API_PATH)
            .map_err(|e| Error::config(format!("invalid API URL: {e}")))?;

        let mut query: Vec<(&str, &str)> = args.iter().map(|(k, v)| (*k, v.as_str())).collect();
        query.extend([
            ("cpanel_jsonapi_user", self.username.as_str()),
            ("cpanel_jsonapi_apiversion", API_VERSION),
            ("cpanel_jsonapi_module", module),
            ("cpanel_jsonapi_func", function),
        ]);

        debug!("API request {}/{} ({} argument(s))", module, function, args.len());

        let response = self
            .http
            .get(url)
            .query(&query)
            .header(AUTHORIZATION, self.auth_header())
            .send()
            .await
            .map_err(|e| Error::transport(module, function, e.to_string()))?;

        // Buffer the whole body: failures can arrive as 200 with an error payload
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            Error::transport(
                module,
                function,
                format!("failed to read full API response: {e}"),
            )
        })?;

        decode_envelope(module, function, status, &body)
    }
}

/// Resolve a `cpanelresult` envelope into result rows or an error
///
/// 1. Non-2xx status → `Error::HttpStatus`
/// 2. `cpanelresult.data.reason` present → `Error::Api` with the reason
/// 3. `cpanelresult.error` without data → `Error::Api`
/// 4. Otherwise `cpanelresult.data` is the result (missing = no rows,
///    a lone object = one row)
pub(crate) fn decode_envelope(
    module: &str,
    function: &str,
    status: StatusCode,
    body: &str,
) -> Result<Vec<Value>> {
    if !status.is_success() {
        return Err(Error::http_status(module, function, status.to_string()));
    }

    let mut json: Value =
        serde_json::from_str(body).map_err(|e| Error::decode(module, function, e.to_string()))?;

    match json.pointer("/cpanelresult/data/reason") {
        None | Some(Value::Null) => {}
        Some(Value::String(reason)) => return Err(Error::api(module, function, reason.clone())),
        Some(other) => return Err(Error::api(module, function, other.to_string())),
    }

    let data = json
        .pointer_mut("/cpanelresult/data")
        .map(Value::take)
        .unwrap_or(Value::Null);

    match data {
        Value::Array(rows) => Ok(rows),
        Value::Null => match json.pointer("/cpanelresult/error").and_then(Value::as_str) {
            Some(error) => Err(Error::api(module, function, error)),
            None => Ok(Vec::new()),
        },
        row => Ok(vec![row]),
    }
}
