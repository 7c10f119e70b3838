use super::{VoipMsClient, VoipMsError, client_from_credentials, report};
use crate::domain::{ApiResponse, SendSms, SmsFilter, ValidationError};
use crate::transport::sms::{GET_METHOD, SEND_METHOD, encode_get_sms_params, encode_send_sms_params};

#[derive(Clone)]
/// SMS history and sending.
pub struct Sms {
    client: VoipMsClient,
}

impl Sms {
    pub fn new(client: VoipMsClient) -> Self {
        Self { client }
    }

    pub fn from_credentials(
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::new(client_from_credentials(username, password)?))
    }

    pub fn get_sms(&self, filter: &SmsFilter) -> Result<ApiResponse, VoipMsError> {
        report("get_sms", || {
            self.client
                .make_request(GET_METHOD, encode_get_sms_params(filter))
        })
    }

    /// Send `request.message()` from an SMS-enabled DID.
    pub fn send_sms(&self, request: &SendSms) -> Result<ApiResponse, VoipMsError> {
        report("send_sms", || {
            self.client
                .make_request(SEND_METHOD, encode_send_sms_params(request))
        })
    }
}
