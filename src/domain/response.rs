use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Value of the top-level `status` field for a successful call.
pub const STATUS_SUCCESS: &str = "success";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
/// Decoded VoIP.ms response: the JSON object returned by the API, kept as-is.
///
/// The top-level `status` field carries the vendor's logical outcome
/// (`"success"` or an error code such as `"invalid_credentials"`), independent
/// of the HTTP status. Facades may add a few convenience fields on top of the
/// vendor payload.
pub struct ApiResponse(Map<String, Value>);

impl ApiResponse {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Vendor `status` field, if present and a string.
    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }

    /// `true` when `status == "success"`.
    pub fn is_success(&self) -> bool {
        self.status() == Some(STATUS_SUCCESS)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert or replace a field, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Records under a collection key such as `accounts` or `forwardings`.
    ///
    /// Returns `None` when the key is missing or is not an array.
    pub fn records(&self, collection: &str) -> Option<&[Value]> {
        self.0
            .get(collection)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    /// First record of a collection, if it is an object.
    pub fn first_record(&self, collection: &str) -> Option<&Map<String, Value>> {
        self.records(collection)?.first()?.as_object()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ApiResponse {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<ApiResponse> for Value {
    fn from(response: ApiResponse) -> Self {
        Value::Object(response.0)
    }
}
