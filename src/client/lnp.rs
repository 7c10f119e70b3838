use serde_json::{Map, Value};

use super::{VoipMsClient, VoipMsError, client_from_credentials, report};
use crate::domain::{ApiResponse, ValidationError};
use crate::transport::dids::{PORTABILITY_METHOD, encode_portability_params};

#[derive(Clone)]
/// Local number portability checks.
pub struct Lnp {
    client: VoipMsClient,
}

impl Lnp {
    pub fn new(client: VoipMsClient) -> Self {
        Self { client }
    }

    pub fn from_credentials(
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::new(client_from_credentials(username, password)?))
    }

    /// Check whether `did` can be ported in.
    ///
    /// Returns `{ "did": <did>, "result": <getPortability response> }`.
    pub fn get_portability(&self, did: &str) -> Result<ApiResponse, VoipMsError> {
        report("get_portability", || {
            let params = encode_portability_params(did)?;
            let response = self.client.make_request(PORTABILITY_METHOD, params)?;

            let mut wrapped = Map::new();
            wrapped.insert("did".to_owned(), Value::from(did));
            wrapped.insert("result".to_owned(), Value::from(response));
            Ok(ApiResponse::new(wrapped))
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::testing::{FakeTransport, make_client};
    use super::*;

    #[test]
    fn portability_wraps_raw_response() {
        let transport = FakeTransport::new();
        transport.respond_json(json!({
            "status": "success",
            "portable": true,
            "plans": [{ "title": "Per minute" }]
        }));

        let response = make_client(&transport)
            .lnp()
            .get_portability("5551234567")
            .unwrap();

        assert_eq!(response.get("did"), Some(&json!("5551234567")));
        assert_eq!(
            response.get("result"),
            Some(&json!({
                "status": "success",
                "portable": true,
                "plans": [{ "title": "Per minute" }]
            }))
        );
        assert_eq!(response.status(), None);
        assert_eq!(transport.last_request().get("did"), Some("5551234567"));
    }

    #[test]
    fn portability_requires_did() {
        let transport = FakeTransport::new();
        let err = make_client(&transport).lnp().get_portability(" ").unwrap_err();
        assert!(matches!(err, VoipMsError::Validation(_)));
        assert_eq!(transport.request_count(), 0);
    }
}
