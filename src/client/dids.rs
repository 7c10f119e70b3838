use super::{VoipMsClient, VoipMsError, client_from_credentials, report};
use crate::domain::{ApiResponse, CancelDid, DidFilter, OrderDid, ValidationError};
use crate::transport::dids::{
    CANCEL_METHOD, GET_INFO_METHOD, ORDER_METHOD, ORDER_TOLL_FREE_METHOD,
    encode_cancel_did_params, encode_get_dids_info_params, encode_order_did_params,
};

#[derive(Clone)]
/// DID ordering, cancellation and lookup.
pub struct Dids {
    client: VoipMsClient,
}

impl Dids {
    pub fn new(client: VoipMsClient) -> Self {
        Self { client }
    }

    pub fn from_credentials(
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::new(client_from_credentials(username, password)?))
    }

    /// Cancel a DID. `test` asks VoIP.ms to validate without cancelling.
    pub fn cancel_did(&self, request: &CancelDid) -> Result<ApiResponse, VoipMsError> {
        report("cancel_did", || {
            let params = encode_cancel_did_params(request)?;
            let mut response = self.client.make_request(CANCEL_METHOD, params)?;
            response.insert("result", "DID canceled");
            response.insert("did", request.did.as_str());
            Ok(response)
        })
    }

    pub fn get_dids_info(&self, filter: &DidFilter) -> Result<ApiResponse, VoipMsError> {
        report("get_dids_info", || {
            self.client
                .make_request(GET_INFO_METHOD, encode_get_dids_info_params(filter))
        })
    }

    /// Order a local DID.
    pub fn order_did(&self, request: &OrderDid) -> Result<ApiResponse, VoipMsError> {
        report("order_did", || self.order(ORDER_METHOD, request, false))
    }

    /// Order a toll-free DID; `billing_type` is not sent.
    pub fn order_toll_free(&self, request: &OrderDid) -> Result<ApiResponse, VoipMsError> {
        report("order_toll_free", || {
            self.order(ORDER_TOLL_FREE_METHOD, request, true)
        })
    }

    fn order(
        &self,
        method: &str,
        request: &OrderDid,
        toll_free: bool,
    ) -> Result<ApiResponse, VoipMsError> {
        let params = encode_order_did_params(request, toll_free)?;
        let mut response = self.client.make_request(method, params)?;
        response.insert("result", "DID ordered");
        response.insert("did", request.did.as_str());
        Ok(response)
    }
}
