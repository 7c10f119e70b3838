use super::{VoipMsClient, VoipMsError, client_from_credentials, first_record, report};
use crate::domain::{
    ApiResponse, MailboxId, NewVoicemail, ValidationError, VoicemailFilter, VoicemailUpdate,
};
use crate::transport::voicemail::{
    COLLECTION, CREATE_METHOD, DELETE_METHOD, GET_METHOD, SET_METHOD,
    encode_create_voicemail_params, encode_delete_voicemail_params, encode_get_voicemails_params,
    merge_voicemail_update,
};

#[derive(Clone)]
/// Voicemail boxes.
pub struct Voicemail {
    client: VoipMsClient,
}

impl Voicemail {
    pub fn new(client: VoipMsClient) -> Self {
        Self { client }
    }

    pub fn from_credentials(
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::new(client_from_credentials(username, password)?))
    }

    pub fn create_voicemail(&self, request: &NewVoicemail) -> Result<ApiResponse, VoipMsError> {
        report("create_voicemail", || {
            let params = encode_create_voicemail_params(request)?;
            let mut response = self.client.make_request(CREATE_METHOD, params)?;
            response.insert("voicemail", request.mailbox.as_str());
            response.insert("name", request.name.as_str());
            Ok(response)
        })
    }

    pub fn delete_voicemail(&self, mailbox: &str) -> Result<ApiResponse, VoipMsError> {
        report("delete_voicemail", || {
            let mailbox = MailboxId::new(mailbox)?;
            let mut response = self
                .client
                .make_request(DELETE_METHOD, encode_delete_voicemail_params(&mailbox))?;
            response.insert("result", "Voicemail deleted");
            response.insert("voicemail", mailbox.as_str());
            Ok(response)
        })
    }

    pub fn get_voicemails(&self, filter: &VoicemailFilter) -> Result<ApiResponse, VoipMsError> {
        report("get_voicemails", || {
            self.client
                .make_request(GET_METHOD, encode_get_voicemails_params(filter))
        })
    }

    /// Change a mailbox, keeping every setting the update leaves unset.
    pub fn update_voicemail(
        &self,
        mailbox: &str,
        update: &VoicemailUpdate,
    ) -> Result<ApiResponse, VoipMsError> {
        report("update_voicemail", || {
            let mailbox = MailboxId::new(mailbox)?;
            let filter = VoicemailFilter {
                mailbox: Some(mailbox.clone()),
                client: None,
            };
            let current = self
                .client
                .make_request(GET_METHOD, encode_get_voicemails_params(&filter))?;
            let record = first_record(&current, COLLECTION, "voicemail", mailbox.as_str())?;

            let mut params = merge_voicemail_update(&record, update);
            params.insert(MailboxId::FIELD, &mailbox);
            let name = params.get("name").unwrap_or_default().to_owned();

            let mut response = self.client.make_request(SET_METHOD, params)?;
            response.insert("voicemail", mailbox.as_str());
            response.insert("name", name);
            Ok(response)
        })
    }
}
