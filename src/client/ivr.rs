use super::{
    PrimaryAccount, VoipMsClient, VoipMsError, client_from_credentials, first_record, record_text,
    report,
};
use crate::domain::{ApiResponse, IvrUpdate, NewIvr, ValidationError};
use crate::transport::ivr::{
    COLLECTION, DELETE_METHOD, GET_METHOD, ID_FIELD, NAME_FIELD, SET_METHOD,
    encode_create_ivr_params, encode_delete_ivr_params, encode_get_ivrs_params, merge_ivr_update,
};
use crate::transport::require;

const ENTITY: &str = "ivr";

#[derive(Clone)]
/// Interactive voice response menus.
///
/// New menus route option 1 to the main account unless `choices` is given.
pub struct Ivr {
    client: VoipMsClient,
    primary_account: PrimaryAccount,
}

impl Ivr {
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

    /// Use `account` as the main account instead of looking it up.
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

    pub fn create_ivr(&self, request: &NewIvr) -> Result<ApiResponse, VoipMsError> {
        report("create_ivr", || {
            require(NAME_FIELD, &request.name)?;
            require("recording", &request.recording)?;
            let primary = match request.choices.as_deref() {
                Some(choices) if !choices.trim().is_empty() => None,
                _ => Some(self.primary_account()?),
            };
            let params = encode_create_ivr_params(request, primary)?;
            let mut response = self.client.make_request(SET_METHOD, params)?;
            response.insert(NAME_FIELD, request.name.as_str());
            Ok(response)
        })
    }

    /// Delete an IVR; the response carries its name under `ivr`.
    pub fn delete_ivr(&self, ivr: &str) -> Result<ApiResponse, VoipMsError> {
        report("delete_ivr", || {
            let params = encode_delete_ivr_params(ivr)?;
            let current = self
                .client
                .make_request(GET_METHOD, encode_get_ivrs_params(Some(ivr)))?;
            let record = first_record(&current, COLLECTION, ENTITY, ivr)?;
            let name = record_text(&record, NAME_FIELD)?;

            let mut response = self.client.make_request(DELETE_METHOD, params)?;
            response.insert(ID_FIELD, name);
            Ok(response)
        })
    }

    pub fn get_ivrs(&self, ivr: Option<&str>) -> Result<ApiResponse, VoipMsError> {
        report("get_ivrs", || {
            self.client.make_request(GET_METHOD, encode_get_ivrs_params(ivr))
        })
    }

    pub fn update_ivr(&self, ivr: &str, update: &IvrUpdate) -> Result<ApiResponse, VoipMsError> {
        report("update_ivr", || {
            require(ID_FIELD, ivr)?;
            let current = self
                .client
                .make_request(GET_METHOD, encode_get_ivrs_params(Some(ivr)))?;
            let record = first_record(&current, COLLECTION, ENTITY, ivr)?;

            let mut params = merge_ivr_update(&record, update);
            params.insert(ID_FIELD, ivr);
            let name = params.get(NAME_FIELD).unwrap_or_default().to_owned();

            let mut response = self.client.make_request(SET_METHOD, params)?;
            response.insert(NAME_FIELD, name);
            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::testing::{FakeTransport, make_client};
    use super::*;
    use crate::domain::IvrTimeout;

    fn subaccounts() -> serde_json::Value {
        json!({
            "status": "success",
            "accounts": [{ "id": "1", "account": "100000_main" }]
        })
    }

    fn ivr_record() -> serde_json::Value {
        json!({
            "status": "success",
            "ivrs": [{
                "ivr": "323",
                "name": "Main menu",
                "recording": "7",
                "timeout": "5",
                "language": "en",
                "voicemailsetup": "1",
                "choices": "1=account:100000"
            }]
        })
    }

    #[test]
    fn create_discovers_primary_account_for_default_choices() {
        let transport = FakeTransport::new();
        transport.respond_json(subaccounts());
        transport.respond_json(json!({ "status": "success", "ivr": 323 }));
        transport.respond_json(json!({ "status": "success", "ivr": 324 }));
        let ivr = make_client(&transport).ivr();

        let response = ivr.create_ivr(&NewIvr::new("Main menu", 7)).unwrap();
        assert_eq!(response.get("name"), Some(&json!("Main menu")));
        ivr.create_ivr(&NewIvr::new("Night menu", 8)).unwrap();

        assert_eq!(
            transport.methods(),
            vec!["getSubAccounts", "setIVR", "setIVR"]
        );
        let requests = transport.requests();
        assert_eq!(requests[1].get("choices"), Some("1=account:100000"));
        assert_eq!(requests[1].get("timeout"), Some("5"));
        assert_eq!(requests[1].get("voicemailsetup"), Some("1"));
        assert_eq!(requests[1].get("language"), Some("en"));
    }

    #[test]
    fn create_with_explicit_choices_skips_lookup() {
        let transport = FakeTransport::new();
        transport.respond_json(json!({ "status": "success" }));

        let request = NewIvr {
            choices: Some("1=fwd:18621".to_owned()),
            timeout: IvrTimeout::new(9).unwrap(),
            ..NewIvr::new("Support", 7)
        };
        make_client(&transport).ivr().create_ivr(&request).unwrap();

        assert_eq!(transport.methods(), vec!["setIVR"]);
        let sent = transport.last_request();
        assert_eq!(sent.get("choices"), Some("1=fwd:18621"));
        assert_eq!(sent.get("timeout"), Some("9"));
    }

    #[test]
    fn create_uses_injected_primary_account() {
        let transport = FakeTransport::new();
        transport.respond_json(json!({ "status": "success" }));

        make_client(&transport)
            .ivr()
            .with_primary_account("200000")
            .unwrap()
            .create_ivr(&NewIvr::new("Main menu", 7))
            .unwrap();

        assert_eq!(transport.methods(), vec!["setIVR"]);
        assert_eq!(
            transport.last_request().get("choices"),
            Some("1=account:200000")
        );
    }

    #[test]
    fn blank_injected_primary_account_is_rejected() {
        let transport = FakeTransport::new();
        let err = make_client(&transport)
            .ivr()
            .with_primary_account(" \t")
            .err()
            .unwrap();
        assert_eq!(err, ValidationError::Empty { field: "account" });
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn create_validates_before_primary_lookup() {
        let transport = FakeTransport::new();
        let err = make_client(&transport)
            .ivr()
            .create_ivr(&NewIvr::new("", 7))
            .unwrap_err();
        assert!(matches!(err, VoipMsError::Validation(_)));
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn delete_attaches_name_under_ivr() {
        let transport = FakeTransport::new();
        transport.respond_json(ivr_record());
        transport.respond_json(json!({ "status": "success" }));

        let response = make_client(&transport).ivr().delete_ivr("323").unwrap();
        assert_eq!(transport.methods(), vec!["getIVRs", "delIVR"]);
        assert_eq!(response.get("ivr"), Some(&json!("Main menu")));
    }

    #[test]
    fn update_merges_and_reports_effective_name() {
        let transport = FakeTransport::new();
        transport.respond_json(ivr_record());
        transport.respond_json(json!({ "status": "success", "ivr": 323 }));

        let update = IvrUpdate {
            timeout: Some(IvrTimeout::new(3).unwrap()),
            ..Default::default()
        };
        let response = make_client(&transport)
            .ivr()
            .update_ivr("323", &update)
            .unwrap();

        assert_eq!(response.get("name"), Some(&json!("Main menu")));
        let submitted = transport.last_request();
        assert_eq!(submitted.get("ivr"), Some("323"));
        assert_eq!(submitted.get("timeout"), Some("3"));
        assert_eq!(submitted.get("recording"), Some("7"));
        assert_eq!(submitted.get("choices"), Some("1=account:100000"));
    }
}
