use super::{
    PrimaryAccount, VoipMsClient, VoipMsError, client_from_credentials, first_record, record_text,
    report,
};
use crate::domain::{ApiResponse, NewRingGroup, RingGroupUpdate, ValidationError};
use crate::transport::require;
use crate::transport::ring_groups::{
    COLLECTION, DELETE_METHOD, FILTER_FIELD, GET_METHOD, NAME_FIELD, SET_METHOD,
    encode_create_ring_group_params, encode_delete_ring_group_params,
    encode_get_ring_groups_params, merge_ring_group_update,
};

const ENTITY: &str = "ring group";

#[derive(Clone)]
/// Ring groups: several members rung together.
pub struct RingGroups {
    client: VoipMsClient,
    primary_account: PrimaryAccount,
}

impl RingGroups {
    pub fn new(client: VoipMsClient) -> Self {
        Self {
            client,
            primary_account: PrimaryAccount::default(),
        }
    }

    pub fn from_credentials(
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::new(client_from_credentials(username, password)?))
    }

    pub fn with_primary_account(
        mut self,
        account: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        self.primary_account = PrimaryAccount::with_value(account)?;
        Ok(self)
    }

    /// Main account number, fetched with `getSubAccounts` on first call.
    pub fn primary_account(&self) -> Result<&str, VoipMsError> {
        self.primary_account.get_or_discover(&self.client)
    }

    /// Create a ring group; without `members` it rings the main account.
    pub fn create_ring_group(&self, request: &NewRingGroup) -> Result<ApiResponse, VoipMsError> {
        report("create_ring_group", || {
            require(NAME_FIELD, &request.name)?;
            require("voicemail", &request.voicemail)?;
            let primary = match request.members.as_deref() {
                Some(members) if !members.trim().is_empty() => None,
                _ => Some(self.primary_account()?),
            };
            let params = encode_create_ring_group_params(request, primary)?;
            let mut response = self.client.make_request(SET_METHOD, params)?;
            response.insert(NAME_FIELD, request.name.as_str());
            Ok(response)
        })
    }

    /// Delete a ring group; the response carries its name under `ring_group`.
    pub fn delete_ring_group(&self, ring_group: &str) -> Result<ApiResponse, VoipMsError> {
        report("delete_ring_group", || {
            let params = encode_delete_ring_group_params(ring_group)?;
            let current = self.client.make_request(
                GET_METHOD,
                encode_get_ring_groups_params(Some(ring_group)),
            )?;
            let record = first_record(&current, COLLECTION, ENTITY, ring_group)?;
            let name = record_text(&record, NAME_FIELD)?;

            let mut response = self.client.make_request(DELETE_METHOD, params)?;
            response.insert(FILTER_FIELD, name);
            Ok(response)
        })
    }

    pub fn get_ring_groups(&self, ring_group: Option<&str>) -> Result<ApiResponse, VoipMsError> {
        report("get_ring_groups", || {
            self.client
                .make_request(GET_METHOD, encode_get_ring_groups_params(ring_group))
        })
    }

    pub fn update_ring_group(
        &self,
        ring_group: &str,
        update: &RingGroupUpdate,
    ) -> Result<ApiResponse, VoipMsError> {
        report("update_ring_group", || {
            require(FILTER_FIELD, ring_group)?;
            let current = self.client.make_request(
                GET_METHOD,
                encode_get_ring_groups_params(Some(ring_group)),
            )?;
            let record = first_record(&current, COLLECTION, ENTITY, ring_group)?;

            let mut params = merge_ring_group_update(&record, update);
            params.insert(FILTER_FIELD, ring_group);
            let name = params.get(NAME_FIELD).unwrap_or_default().to_owned();

            let mut response = self.client.make_request(SET_METHOD, params)?;
            response.insert(NAME_FIELD, name);
            Ok(response)
        })
    }
}
