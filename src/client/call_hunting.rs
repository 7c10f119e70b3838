use super::{
    PrimaryAccount, VoipMsClient, VoipMsError, client_from_credentials, first_record, record_text,
    report,
};
use crate::domain::{ApiResponse, CallHuntingUpdate, NewCallHunting, ValidationError};
use crate::transport::call_hunting::{
    COLLECTION, DELETE_METHOD, GET_METHOD, ID_FIELD, NAME_FIELD, SET_METHOD,
    encode_create_call_hunting_params, encode_delete_call_hunting_params,
    encode_get_call_huntings_params, merge_call_hunting_update,
};
use crate::transport::require;

const ENTITY: &str = "call hunting";

#[derive(Clone)]
/// Call huntings: members rung one after another.
pub struct CallHunting {
    client: VoipMsClient,
    primary_account: PrimaryAccount,
}

impl CallHunting {
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

    pub fn primary_account(&self) -> Result<&str, VoipMsError> {
        self.primary_account.get_or_discover(&self.client)
    }

    pub fn create_call_hunting(
        &self,
        request: &NewCallHunting,
    ) -> Result<ApiResponse, VoipMsError> {
        report("create_call_hunting", || {
            require("name", &request.name)?;
            let primary = match request.members.as_deref() {
                Some(members) if !members.trim().is_empty() => None,
                _ => Some(self.primary_account()?),
            };
            let params = encode_create_call_hunting_params(request, primary)?;
            let mut response = self.client.make_request(SET_METHOD, params)?;
            response.insert("name", request.name.as_str());
            Ok(response)
        })
    }

    /// Delete a call hunting; the response carries its description under `call_hunting`.
    pub fn delete_call_hunting(&self, call_hunting: &str) -> Result<ApiResponse, VoipMsError> {
        report("delete_call_hunting", || {
            let params = encode_delete_call_hunting_params(call_hunting)?;
            let current = self.client.make_request(
                GET_METHOD,
                encode_get_call_huntings_params(Some(call_hunting)),
            )?;
            let record = first_record(&current, COLLECTION, ENTITY, call_hunting)?;
            let name = record_text(&record, NAME_FIELD)?;

            let mut response = self.client.make_request(DELETE_METHOD, params)?;
            response.insert(COLLECTION, name);
            Ok(response)
        })
    }

    pub fn get_call_huntings(
        &self,
        call_hunting: Option<&str>,
    ) -> Result<ApiResponse, VoipMsError> {
        report("get_call_huntings", || {
            self.client
                .make_request(GET_METHOD, encode_get_call_huntings_params(call_hunting))
        })
    }

    pub fn update_call_hunting(
        &self,
        call_hunting: &str,
        update: &CallHuntingUpdate,
    ) -> Result<ApiResponse, VoipMsError> {
        report("update_call_hunting", || {
            require(ID_FIELD, call_hunting)?;
            let current = self.client.make_request(
                GET_METHOD,
                encode_get_call_huntings_params(Some(call_hunting)),
            )?;
            let record = first_record(&current, COLLECTION, ENTITY, call_hunting)?;

            let mut params = merge_call_hunting_update(&record, update);
            params.insert(ID_FIELD, call_hunting);
            let name = params.get(NAME_FIELD).unwrap_or_default().to_owned();

            let mut response = self.client.make_request(SET_METHOD, params)?;
            response.insert("name", name);
            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::testing::{FakeTransport, make_client};
    use super::*;
    use crate::domain::HuntingOrder;

    fn call_hunting_record() -> serde_json::Value {
        json!({
            "status": "success",
            "call_hunting": [{
                "callhunting": "77",
                "description": "Support line",
                "music": "default",
                "recording": "none:",
                "language": "en",
                "order": "follow",
                "members": "account:100000;fwd:18621",
                "ring_time": "25;25",
                "press": "0;0"
            }]
        })
    }

    #[test]
    fn create_sends_name_as_description() {
        let transport = FakeTransport::new();
        transport.respond_json(json!({ "status": "success", "callhunting": 77 }));

        let request = NewCallHunting {
            order: HuntingOrder::Random,
            ..NewCallHunting::new("Support line")
        };
        let response = make_client(&transport)
            .call_hunting()
            .with_primary_account("100000")
            .unwrap()
            .create_call_hunting(&request)
            .unwrap();

        assert_eq!(response.get("name"), Some(&json!("Support line")));
        let sent = transport.last_request();
        assert_eq!(sent.get("method"), Some("setCallHunting"));
        assert_eq!(sent.get("description"), Some("Support line"));
        assert_eq!(sent.get("order"), Some("random"));
        assert_eq!(sent.get("members"), Some("account:100000"));
        assert_eq!(sent.get("ring_time"), Some("25"));
        assert_eq!(sent.get("press"), Some("0"));
    }

    #[test]
    fn primary_account_lookup_happens_on_first_create_only() {
        let transport = FakeTransport::new();
        transport.respond_json(json!({
            "status": "success",
            "accounts": [{ "account": "100000_office" }, { "account": "100000_desk" }]
        }));
        transport.respond_json(json!({ "status": "success" }));
        transport.respond_json(json!({ "status": "success" }));
        let hunting = make_client(&transport).call_hunting();
        assert_eq!(transport.request_count(), 0);

        hunting
            .create_call_hunting(&NewCallHunting::new("First"))
            .unwrap();
        hunting
            .create_call_hunting(&NewCallHunting::new("Second"))
            .unwrap();

        assert_eq!(
            transport.methods(),
            vec!["getSubAccounts", "setCallHunting", "setCallHunting"]
        );
        assert_eq!(hunting.primary_account().unwrap(), "100000");
    }

    #[test]
    fn delete_attaches_description_under_call_hunting() {
        let transport = FakeTransport::new();
        transport.respond_json(call_hunting_record());
        transport.respond_json(json!({ "status": "success" }));

        let response = make_client(&transport)
            .call_hunting()
            .delete_call_hunting("77")
            .unwrap();

        assert_eq!(transport.methods(), vec!["getCallHuntings", "delCallHunting"]);
        assert_eq!(transport.last_request().get("callhunting"), Some("77"));
        assert_eq!(response.get("call_hunting"), Some(&json!("Support line")));
    }

    #[test]
    fn update_reports_effective_name() {
        let transport = FakeTransport::new();
        transport.respond_json(call_hunting_record());
        transport.respond_json(json!({ "status": "success" }));

        let update = CallHuntingUpdate {
            press: Some("1;0".to_owned()),
            ..Default::default()
        };
        let response = make_client(&transport)
            .call_hunting()
            .update_call_hunting("77", &update)
            .unwrap();

        assert_eq!(response.get("name"), Some(&json!("Support line")));
        let submitted = transport.last_request();
        assert_eq!(submitted.get("callhunting"), Some("77"));
        assert_eq!(submitted.get("press"), Some("1;0"));
        assert_eq!(submitted.get("ring_time"), Some("25;25"));
    }

    #[test]
    fn update_of_missing_call_hunting_is_not_found() {
        let transport = FakeTransport::new();
        transport.respond_json(json!({ "status": "no_callhunting" }));

        let err = make_client(&transport)
            .call_hunting()
            .update_call_hunting("1", &CallHuntingUpdate::default())
            .unwrap_err();
        assert!(matches!(err, VoipMsError::NotFound { entity: "call hunting", .. }));
    }
}
