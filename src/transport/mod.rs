//! Transport layer: wire-format details (query encoding, JSON decoding, per-endpoint parameters).

pub mod accounts;
pub mod call_hunting;
pub mod dids;
pub mod forwarding;
pub mod general;
pub mod ivr;
pub mod ring_groups;
pub mod sms;
pub mod voicemail;

use serde_json::{Map, Value};
use tracing::trace;
use url::Url;

use crate::domain::{ApiResponse, Params, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object at the top level, got {kind}")]
    NotAnObject { kind: &'static str },
}

/// Append every parameter to the endpoint as a query pair.
pub fn encode_request_url(endpoint: &Url, params: &Params) -> Url {
    let mut url = endpoint.clone();
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params.iter());
    }
    url
}

pub fn decode_json_response(body: &str) -> Result<ApiResponse, TransportError> {
    match serde_json::from_str::<Value>(body)? {
        Value::Object(map) => Ok(ApiResponse::new(map)),
        other => Err(TransportError::NotAnObject {
            kind: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Turn a fetched record into the base parameter set of an update.
///
/// Scalars are kept (numbers and booleans stringified); `null`, arrays and
/// nested objects cannot be expressed as a query value and are dropped.
pub fn params_from_record(record: &Map<String, Value>) -> Params {
    let mut params = Params::new();
    for (key, value) in record {
        match value {
            Value::String(text) => params.insert(key.as_str(), text),
            Value::Number(number) => params.insert(key.as_str(), number),
            Value::Bool(flag) => params.insert(key.as_str(), flag),
            Value::Null | Value::Array(_) | Value::Object(_) => {
                trace!(field = %key, "dropping non-scalar field from record");
            }
        }
    }
    params
}

/// Parameter set holding at most one filter value.
pub fn encode_filter_params(key: &'static str, value: Option<&str>) -> Params {
    let mut params = Params::new();
    params.insert_opt(key, value);
    params
}

pub(crate) fn require<'a>(
    field: &'static str,
    value: &'a str,
) -> Result<&'a str, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(value)
}

/// Default membership target pointing at the main account.
pub(crate) fn main_account_target(primary_account: &str) -> String {
    format!("account:{primary_account}")
}

/// Pick the caller's value, falling back to a default derived from the main account.
pub(crate) fn with_main_account_default(
    field: &'static str,
    explicit: Option<&str>,
    primary_account: Option<&str>,
    default: impl FnOnce(&str) -> String,
) -> Result<String, ValidationError> {
    match (explicit.filter(|value| !value.trim().is_empty()), primary_account) {
        (Some(value), _) => Ok(value.to_owned()),
        (None, Some(account)) => Ok(default(account)),
        (None, None) => Err(ValidationError::Empty { field }),
    }
}
