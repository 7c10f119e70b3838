use super::{VoipMsClient, VoipMsError, client_from_credentials, report};
use crate::domain::{ApiResponse, DateRange, Params, ValidationError};
use crate::transport::general::{
    BALANCE_METHOD, CONFERENCE_MEMBERS_METHOD, CONFERENCE_METHOD,
    CONFERENCE_RECORDING_FILE_METHOD, CONFERENCE_RECORDINGS_METHOD, COUNTRIES_METHOD, IP_METHOD,
    LANGUAGES_METHOD, LOCALES_METHOD, SEQUENCES_METHOD, SERVERS_METHOD, TRANSACTIONS_METHOD,
    encode_balance_params, encode_conference_members_params, encode_conference_params,
    encode_conference_recording_file_params, encode_conference_recordings_params,
    encode_countries_params, encode_languages_params, encode_locales_params,
    encode_sequences_params, encode_servers_params, encode_transactions_params,
};

#[derive(Clone)]
/// Account-wide information and reference lookups.
pub struct General {
    client: VoipMsClient,
}

impl General {
    pub fn new(client: VoipMsClient) -> Self {
        Self { client }
    }

    pub fn from_credentials(
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::new(client_from_credentials(username, password)?))
    }

    fn call(
        &self,
        operation: &'static str,
        method: &str,
        params: Params,
    ) -> Result<ApiResponse, VoipMsError> {
        report(operation, || self.client.make_request(method, params))
    }

    /// Account balance; `advanced` adds spending statistics.
    pub fn get_balance(&self, advanced: bool) -> Result<ApiResponse, VoipMsError> {
        self.call("get_balance", BALANCE_METHOD, encode_balance_params(advanced))
    }

    pub fn get_conference(&self, conference: Option<&str>) -> Result<ApiResponse, VoipMsError> {
        self.call(
            "get_conference",
            CONFERENCE_METHOD,
            encode_conference_params(conference),
        )
    }

    pub fn get_conference_members(
        &self,
        member: Option<&str>,
    ) -> Result<ApiResponse, VoipMsError> {
        self.call(
            "get_conference_members",
            CONFERENCE_MEMBERS_METHOD,
            encode_conference_members_params(member),
        )
    }

    pub fn get_conference_recordings(
        &self,
        conference: &str,
        range: Option<&DateRange>,
    ) -> Result<ApiResponse, VoipMsError> {
        report("get_conference_recordings", || {
            let params = encode_conference_recordings_params(conference, range)?;
            self.client
                .make_request(CONFERENCE_RECORDINGS_METHOD, params)
        })
    }

    /// Recording audio, base64 encoded by VoIP.ms.
    pub fn get_conference_recording_file(
        &self,
        conference: &str,
        recording: &str,
    ) -> Result<ApiResponse, VoipMsError> {
        report("get_conference_recording_file", || {
            let params = encode_conference_recording_file_params(conference, recording)?;
            self.client
                .make_request(CONFERENCE_RECORDING_FILE_METHOD, params)
        })
    }

    pub fn get_sequences(
        &self,
        sequence: Option<&str>,
        client: Option<&str>,
    ) -> Result<ApiResponse, VoipMsError> {
        self.call(
            "get_sequences",
            SEQUENCES_METHOD,
            encode_sequences_params(sequence, client),
        )
    }

    pub fn get_countries(&self, country: Option<&str>) -> Result<ApiResponse, VoipMsError> {
        self.call(
            "get_countries",
            COUNTRIES_METHOD,
            encode_countries_params(country),
        )
    }

    /// Public IP address VoIP.ms sees for this client.
    pub fn get_ip(&self) -> Result<ApiResponse, VoipMsError> {
        self.call("get_ip", IP_METHOD, Params::new())
    }

    pub fn get_languages(&self, language: Option<&str>) -> Result<ApiResponse, VoipMsError> {
        self.call(
            "get_languages",
            LANGUAGES_METHOD,
            encode_languages_params(language),
        )
    }

    pub fn get_locales(&self, locale: Option<&str>) -> Result<ApiResponse, VoipMsError> {
        self.call("get_locales", LOCALES_METHOD, encode_locales_params(locale))
    }

    /// Server POPs, or the one with id `server_pop`.
    pub fn get_servers(&self, server_pop: Option<&str>) -> Result<ApiResponse, VoipMsError> {
        self.call(
            "get_servers",
            SERVERS_METHOD,
            encode_servers_params(server_pop),
        )
    }

    pub fn get_transactions(&self, range: &DateRange) -> Result<ApiResponse, VoipMsError> {
        self.call(
            "get_transactions",
            TRANSACTIONS_METHOD,
            encode_transactions_params(range),
        )
    }
}
