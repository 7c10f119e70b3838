//! Client layer: owns credentials and the HTTP seam, and hosts one facade per resource.

mod accounts;
mod call_hunting;
mod dids;
mod forwarding;
mod general;
mod ivr;
mod lnp;
mod ring_groups;
mod sms;
#[cfg(test)]
mod testing;
mod voicemail;

use std::error::Error as StdError;
use std::sync::{Arc, OnceLock};

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

pub use accounts::Accounts;
pub use call_hunting::CallHunting;
pub use dids::Dids;
pub use forwarding::Forwarding;
pub use general::General;
pub use ivr::Ivr;
pub use lnp::Lnp;
pub use ring_groups::RingGroups;
pub use sms::Sms;
pub use voicemail::Voicemail;

use crate::domain::{ApiResponse, Params, ValidationError};

const DEFAULT_ENDPOINT: &str = "https://voip.ms/api/v1/rest.php";

/// Environment variable holding the default API username (account email).
pub const USERNAME_ENV: &str = "VOIPMS_API_USER";
/// Environment variable holding the default API password.
pub const PASSWORD_ENV: &str = "VOIPMS_API_PASSWORD";

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn get(&self, url: &Url) -> Result<HttpResponse, Box<dyn StdError + Send + Sync>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &Url) -> Result<HttpResponse, Box<dyn StdError + Send + Sync>> {
        // The query string carries the API password.
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(reqwest::Error::without_url)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(reqwest::Error::without_url)?;
        Ok(HttpResponse { status, body })
    }
}

#[derive(Debug)]
/// VoIP.ms API credentials: the account email and the API password set in
/// the customer portal.
///
/// Either part may be absent when neither was passed explicitly nor found in
/// the environment. The client is still usable; VoIP.ms answers such requests
/// with an authentication failure `status`.
pub struct Credentials {
    username: Option<String>,
    password: Option<SecretString>,
}

impl Credentials {
    /// Explicit credentials. Both parts must be non-empty.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: "api_username",
            });
        }
        let password = password.into();
        if password.is_empty() {
            return Err(ValidationError::Empty {
                field: "api_password",
            });
        }
        Ok(Self {
            username: Some(username.trim().to_owned()),
            password: Some(SecretString::new(password.into_boxed_str())),
        })
    }

    /// Read [`USERNAME_ENV`] and [`PASSWORD_ENV`]; missing variables stay unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Explicit pair if given, environment otherwise.
    ///
    /// Passing only one of the two is rejected; empty strings count as absent.
    pub fn resolve(
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Self::resolve_with(username, password, |name| std::env::var(name).ok())
    }

    fn resolve_with(
        username: Option<&str>,
        password: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ValidationError> {
        let username = username.filter(|it| !it.trim().is_empty());
        let password = password.filter(|it| !it.is_empty());
        match (username, password) {
            (Some(username), Some(password)) => Self::new(username, password),
            (None, None) => Ok(Self::from_lookup(lookup)),
            _ => Err(ValidationError::IncompleteCredentials),
        }
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let username = lookup(USERNAME_ENV).filter(|it| !it.trim().is_empty());
        let password = lookup(PASSWORD_ENV)
            .filter(|it| !it.is_empty())
            .map(|it| SecretString::new(it.into_boxed_str()));
        if username.is_none() || password.is_none() {
            debug!("VoIP.ms credentials are incomplete; requests will be rejected remotely");
        }
        Self { username, password }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// `true` when both username and password are known.
    pub fn is_complete(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    fn push_query_params(&self, params: &mut Params) {
        if let Some(username) = &self.username {
            params.insert("api_username", username);
        }
        if let Some(password) = &self.password {
            params.insert("api_password", password.expose_secret());
        }
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`VoipMsClient`] and the resource facades.
///
/// Precondition failures, HTTP failures and unexpected response shapes all
/// travel through this one type. Facades also emit each failure as a
/// `tracing` warning before returning it.
pub enum VoipMsError {
    /// HTTP client / transport failure (DNS, TLS, connection reset, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body is not a JSON object.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// A field the operation depends on is absent from the response.
    #[error("response is missing field `{field}`")]
    MissingField { field: String },

    /// A lookup the operation depends on returned a non-success `status`.
    #[error("VoIP.ms returned status `{status}`")]
    Api { status: String },

    /// The entity to update or delete does not exist.
    #[error("{entity} `{id}` not found")]
    NotFound { entity: &'static str, id: String },

    /// The configured endpoint is not a valid URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// An argument was rejected before any request was sent.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl VoipMsError {
    fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

impl ApiResponse {
    /// Turn a non-success `status` into [`VoipMsError::Api`].
    pub fn ensure_success(self) -> Result<Self, VoipMsError> {
        if self.is_success() {
            return Ok(self);
        }
        Err(VoipMsError::Api {
            status: self.status().unwrap_or("<missing>").to_owned(),
        })
    }
}

#[derive(Debug)]
/// Builder for [`VoipMsClient`].
///
/// Use this when you need to point the client at another endpoint or set a
/// custom user-agent.
pub struct VoipMsClientBuilder {
    credentials: Credentials,
    endpoint: String,
    user_agent: Option<String>,
}

impl VoipMsClientBuilder {
    /// Create a builder with the default endpoint and no user-agent override.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            user_agent: None,
        }
    }

    /// Override the REST endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`VoipMsClient`].
    pub fn build(self) -> Result<VoipMsClient, VoipMsError> {
        Url::parse(&self.endpoint)?;

        let mut builder = reqwest::blocking::Client::builder();
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder
            .build()
            .map_err(|err| VoipMsError::Transport(Box::new(err)))?;

        Ok(VoipMsClient {
            credentials: Arc::new(self.credentials),
            endpoint: self.endpoint,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// Blocking VoIP.ms REST client.
///
/// Every call is one HTTP GET to `https://voip.ms/api/v1/rest.php` with the
/// credentials, the API method name and the method parameters in the query
/// string. The decoded JSON object is returned as-is; check
/// [`ApiResponse::status`] for the vendor outcome.
///
/// Cloning is cheap and clones share the credential pair.
pub struct VoipMsClient {
    credentials: Arc<Credentials>,
    endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl VoipMsClient {
    /// Create a client using the default endpoint.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials: Arc::new(credentials),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::blocking::Client::new(),
            }),
        }
    }

    /// Create a client from [`USERNAME_ENV`] / [`PASSWORD_ENV`].
    pub fn from_env() -> Self {
        Self::new(Credentials::from_env())
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> VoipMsClientBuilder {
        VoipMsClientBuilder::new(credentials)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Call any API method.
    ///
    /// `api_username`, `api_password` and `method` are added to `params`,
    /// replacing same-named entries.
    ///
    /// Errors:
    /// - [`VoipMsError::HttpStatus`] for non-2xx HTTP responses,
    /// - [`VoipMsError::Parse`] when the body is not a JSON object,
    /// - [`VoipMsError::Transport`] for network failures.
    pub fn make_request(&self, method: &str, params: Params) -> Result<ApiResponse, VoipMsError> {
        let method = method.trim();
        if method.is_empty() {
            return Err(ValidationError::Empty { field: "method" }.into());
        }
        let endpoint = Url::parse(&self.endpoint)?;

        let mut query = params;
        self.credentials.push_query_params(&mut query);
        query.insert("method", method);
        let url = crate::transport::encode_request_url(&endpoint, &query);

        debug!(method, params = query.len(), "sending VoIP.ms request");
        let response = self.http.get(&url).map_err(VoipMsError::Transport)?;

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(VoipMsError::HttpStatus {
                status: response.status,
                body,
            });
        }

        let parsed = crate::transport::decode_json_response(&response.body)
            .map_err(|err| VoipMsError::Parse(Box::new(err)))?;
        debug!(
            method,
            status = parsed.status().unwrap_or("<missing>"),
            "VoIP.ms response decoded"
        );
        Ok(parsed)
    }

    /// Check credentials and the API IP allow-list with `getIP`.
    pub fn test_connection(&self) -> Result<ApiResponse, VoipMsError> {
        self.make_request(crate::transport::general::IP_METHOD, Params::new())
    }

    pub fn accounts(&self) -> Accounts {
        Accounts::new(self.clone())
    }

    pub fn call_hunting(&self) -> CallHunting {
        CallHunting::new(self.clone())
    }

    pub fn dids(&self) -> Dids {
        Dids::new(self.clone())
    }

    pub fn forwarding(&self) -> Forwarding {
        Forwarding::new(self.clone())
    }

    pub fn general(&self) -> General {
        General::new(self.clone())
    }

    pub fn ivr(&self) -> Ivr {
        Ivr::new(self.clone())
    }

    pub fn lnp(&self) -> Lnp {
        Lnp::new(self.clone())
    }

    pub fn ring_groups(&self) -> RingGroups {
        RingGroups::new(self.clone())
    }

    pub fn sms(&self) -> Sms {
        Sms::new(self.clone())
    }

    pub fn voicemail(&self) -> Voicemail {
        Voicemail::new(self.clone())
    }
}

/// Build a client for a facade from an optional credential pair.
fn client_from_credentials(
    username: Option<&str>,
    password: Option<&str>,
) -> Result<VoipMsClient, ValidationError> {
    Ok(VoipMsClient::new(Credentials::resolve(username, password)?))
}

/// Run one facade operation, emitting any failure as a diagnostic.
fn report<T>(
    operation: &'static str,
    run: impl FnOnce() -> Result<T, VoipMsError>,
) -> Result<T, VoipMsError> {
    let result = run();
    if let Err(err) = &result {
        warn!(operation, error = %err, "VoIP.ms operation failed");
    }
    result
}

/// Reduce a lookup response to its first record.
///
/// Statuses starting with `no_` (`no_subaccount`, `no_ivr`, …) mean the
/// entity does not exist.
fn first_record(
    response: &ApiResponse,
    collection: &str,
    entity: &'static str,
    id: &str,
) -> Result<Map<String, Value>, VoipMsError> {
    if !response.is_success() {
        let status = response.status().unwrap_or("<missing>");
        if status.starts_with("no_") {
            return Err(VoipMsError::NotFound {
                entity,
                id: id.to_owned(),
            });
        }
        return Err(VoipMsError::Api {
            status: status.to_owned(),
        });
    }
    response
        .first_record(collection)
        .cloned()
        .ok_or_else(|| VoipMsError::missing_field(collection))
}

/// Scalar field of a record rendered as text.
fn record_text(record: &Map<String, Value>, field: &str) -> Result<String, VoipMsError> {
    match record.get(field) {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(value @ (Value::Number(_) | Value::Bool(_))) => Ok(value.to_string()),
        _ => Err(VoipMsError::missing_field(field)),
    }
}

/// Main account number, discovered from `getSubAccounts` on first use.
///
/// Ring groups, IVRs and call huntings use it as their default member.
#[derive(Debug, Clone, Default)]
struct PrimaryAccount(Arc<OnceLock<String>>);

impl PrimaryAccount {
    fn with_value(account: impl Into<String>) -> Result<Self, ValidationError> {
        let account: String = account.into();
        let account = crate::transport::require("account", &account)?.trim().to_owned();
        Ok(Self(Arc::new(OnceLock::from(account))))
    }

    fn get_or_discover(&self, client: &VoipMsClient) -> Result<&str, VoipMsError> {
        if let Some(account) = self.0.get() {
            return Ok(account.as_str());
        }
        let discovered = discover_primary_account(client)?;
        debug!(account = %discovered, "discovered VoIP.ms main account");
        Ok(self.0.get_or_init(|| discovered).as_str())
    }
}

fn discover_primary_account(client: &VoipMsClient) -> Result<String, VoipMsError> {
    let response = Accounts::new(client.clone()).get_subaccounts(None)?;
    let record = first_record(
        &response,
        crate::transport::accounts::COLLECTION,
        "sub account",
        "<any>",
    )?;
    let account = record_text(&record, "account")?;
    let main = account.split('_').next().unwrap_or_default();
    if main.is_empty() {
        return Err(VoipMsError::missing_field("account"));
    }
    Ok(main.to_owned())
}
