use super::{VoipMsClient, VoipMsError, client_from_credentials, first_record, record_text, report};
use crate::domain::{ApiResponse, ForwardingUpdate, NewForwarding, ValidationError};
use crate::transport::forwarding::{
    COLLECTION, DELETE_METHOD, GET_METHOD, ID_FIELD, NAME_FIELD, SET_METHOD,
    encode_create_forwarding_params, encode_delete_forwarding_params,
    encode_get_forwardings_params, merge_forwarding_update,
};
use crate::transport::require;

const ENTITY: &str = "forwarding";

#[derive(Clone)]
/// Call forwarding entries (external phone numbers calls can be routed to).
pub struct Forwarding {
    client: VoipMsClient,
}

impl Forwarding {
    pub fn new(client: VoipMsClient) -> Self {
        Self { client }
    }

    pub fn from_credentials(
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::new(client_from_credentials(username, password)?))
    }

    pub fn create_forwarding(&self, request: &NewForwarding) -> Result<ApiResponse, VoipMsError> {
        report("create_forwarding", || {
            let params = encode_create_forwarding_params(request)?;
            let mut response = self.client.make_request(SET_METHOD, params)?;
            response.insert(ID_FIELD, request.phone_number.as_str());
            Ok(response)
        })
    }

    /// Delete a forwarding; the response names the deleted phone number.
    pub fn delete_forwarding(&self, forwarding: &str) -> Result<ApiResponse, VoipMsError> {
        report("delete_forwarding", || {
            let params = encode_delete_forwarding_params(forwarding)?;
            let current = self
                .client
                .make_request(GET_METHOD, encode_get_forwardings_params(Some(forwarding)))?;
            let record = first_record(&current, COLLECTION, ENTITY, forwarding)?;
            let phone_number = record_text(&record, NAME_FIELD)?;

            let mut response = self.client.make_request(DELETE_METHOD, params)?;
            response.insert(NAME_FIELD, phone_number);
            Ok(response)
        })
    }

    pub fn get_forwardings(&self, forwarding: Option<&str>) -> Result<ApiResponse, VoipMsError> {
        report("get_forwardings", || {
            self.client
                .make_request(GET_METHOD, encode_get_forwardings_params(forwarding))
        })
    }

    pub fn update_forwarding(
        &self,
        forwarding: &str,
        update: &ForwardingUpdate,
    ) -> Result<ApiResponse, VoipMsError> {
        report("update_forwarding", || {
            require(ID_FIELD, forwarding)?;
            let current = self
                .client
                .make_request(GET_METHOD, encode_get_forwardings_params(Some(forwarding)))?;
            let record = first_record(&current, COLLECTION, ENTITY, forwarding)?;

            let mut params = merge_forwarding_update(&record, update);
            params.insert(ID_FIELD, forwarding);
            self.client.make_request(SET_METHOD, params)
        })
    }
}
