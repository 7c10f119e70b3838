use super::{VoipMsClient, VoipMsError, client_from_credentials, first_record, report};
use crate::domain::{
    ApiResponse, NewSubaccount, SubaccountName, SubaccountUpdate, ValidationError,
};
use crate::transport::accounts::{
    COLLECTION, CREATE_METHOD, DELETE_METHOD, GET_METHOD, SET_METHOD,
    encode_create_subaccount_params, encode_delete_subaccount_params,
    encode_get_subaccounts_params, merge_subaccount_update, validate_subaccount_update,
};

#[derive(Clone)]
/// Sub-account management (`createSubAccount`, `setSubAccount`, …).
pub struct Accounts {
    client: VoipMsClient,
}

impl Accounts {
    pub fn new(client: VoipMsClient) -> Self {
        Self { client }
    }

    /// Build from an optional credential pair, falling back to the environment.
    pub fn from_credentials(
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::new(client_from_credentials(username, password)?))
    }

    /// Create a sub account.
    ///
    /// The response carries the requested `username` next to the vendor fields.
    pub fn create_subaccount(&self, request: &NewSubaccount) -> Result<ApiResponse, VoipMsError> {
        report("create_subaccount", || {
            let params = encode_create_subaccount_params(request)?;
            let mut response = self.client.make_request(CREATE_METHOD, params)?;
            response.insert("username", request.username.as_str());
            Ok(response)
        })
    }

    /// Delete a sub account by its numeric id.
    pub fn delete_subaccount(&self, id: &str) -> Result<ApiResponse, VoipMsError> {
        report("delete_subaccount", || {
            let params = encode_delete_subaccount_params(id)?;
            let mut response = self.client.make_request(DELETE_METHOD, params)?;
            response.insert("result", "Sub Account deleted");
            response.insert("id", id);
            Ok(response)
        })
    }

    /// List sub accounts, or only `account` (`100000_office`) when given.
    pub fn get_subaccounts(&self, account: Option<&str>) -> Result<ApiResponse, VoipMsError> {
        report("get_subaccounts", || {
            self.client
                .make_request(GET_METHOD, encode_get_subaccounts_params(account))
        })
    }

    /// Change settings of `account`, keeping every field the update leaves unset.
    ///
    /// `account` is the full sub account name (`100000_office`).
    pub fn update_subaccount(
        &self,
        account: &str,
        update: &SubaccountUpdate,
    ) -> Result<ApiResponse, VoipMsError> {
        report("update_subaccount", || {
            let account = SubaccountName::new(account)?;
            validate_subaccount_update(update)?;

            let current = self
                .client
                .make_request(GET_METHOD, encode_get_subaccounts_params(Some(account.as_str())))?;
            let record = first_record(&current, COLLECTION, "sub account", account.as_str())?;

            let params = merge_subaccount_update(&record, update);
            let mut response = self.client.make_request(SET_METHOD, params)?;
            response.insert("subacc", account.as_str());
            Ok(response)
        })
    }
}
