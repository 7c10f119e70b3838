use serde_json::{Map, Value};

use super::{
    encode_filter_params, main_account_target, params_from_record, require,
    with_main_account_default,
};
use crate::domain::{CallHuntingUpdate, NewCallHunting, Params, ValidationError, one_zero};

pub const DELETE_METHOD: &str = "delCallHunting";
pub const GET_METHOD: &str = "getCallHuntings";
pub const SET_METHOD: &str = "setCallHunting";

pub const COLLECTION: &str = "call_hunting";
pub const ID_FIELD: &str = "callhunting";
/// Call huntings are named through their description.
pub const NAME_FIELD: &str = "description";

pub fn encode_create_call_hunting_params(
    request: &NewCallHunting,
    primary_account: Option<&str>,
) -> Result<Params, ValidationError> {
    let members = with_main_account_default(
        "members",
        request.members.as_deref(),
        primary_account,
        main_account_target,
    )?;
    let mut params = Params::new()
        .with(NAME_FIELD, require("name", &request.name)?)
        .with("order", request.order)
        .with("members", members)
        .with("ring_time", request.ring_time)
        .with("press", one_zero(request.press_one));
    params.insert_opt("music", Some(request.music.as_str()));
    params.insert_opt("recording", Some(request.recording.as_str()));
    params.insert_opt("language", Some(request.language.as_str()));
    Ok(params)
}

pub fn encode_get_call_huntings_params(call_hunting: Option<&str>) -> Params {
    encode_filter_params(ID_FIELD, call_hunting)
}

pub fn encode_delete_call_hunting_params(call_hunting: &str) -> Result<Params, ValidationError> {
    Ok(Params::new().with(ID_FIELD, require(ID_FIELD, call_hunting)?))
}

pub fn merge_call_hunting_update(
    current: &Map<String, Value>,
    update: &CallHuntingUpdate,
) -> Params {
    let mut params = params_from_record(current);
    params.insert_opt(NAME_FIELD, update.name.as_deref());
    params.insert_opt("music", update.music.as_deref());
    params.insert_opt("recording", update.recording.as_deref());
    params.insert_opt("language", update.language.as_deref());
    params.insert_opt("order", update.order);
    params.insert_opt("members", update.members.as_deref());
    params.insert_opt("ring_time", update.ring_time.as_deref());
    params.insert_opt("press", update.press.as_deref());
    params
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::HuntingOrder;

    #[test]
    fn create_defaults() {
        let params =
            encode_create_call_hunting_params(&NewCallHunting::new("Sales"), Some("100000"))
                .unwrap();
        assert_eq!(params.get("description"), Some("Sales"));
        assert_eq!(params.get("music"), Some("default"));
        assert_eq!(params.get("recording"), Some("none:"));
        assert_eq!(params.get("language"), Some("en"));
        assert_eq!(params.get("order"), Some("follow"));
        assert_eq!(params.get("members"), Some("account:100000"));
        assert_eq!(params.get("ring_time"), Some("25"));
        assert_eq!(params.get("press"), Some("0"));
        assert!(!params.contains_key("name"));
    }

    #[test]
    fn create_overrides() {
        let request = NewCallHunting {
            order: HuntingOrder::Random,
            press_one: true,
            ring_time: 30,
            members: Some("account:100001;fwd:16006".to_owned()),
            ..NewCallHunting::new("Support")
        };
        let params = encode_create_call_hunting_params(&request, None).unwrap();
        assert_eq!(params.get("order"), Some("random"));
        assert_eq!(params.get("press"), Some("1"));
        assert_eq!(params.get("ring_time"), Some("30"));
    }

    #[test]
    fn create_requires_name() {
        assert_eq!(
            encode_create_call_hunting_params(&NewCallHunting::new(" "), Some("100000"))
                .unwrap_err(),
            ValidationError::Empty { field: "name" }
        );
    }

    #[test]
    fn merge_accepts_per_member_lists() {
        let record = json!({
            "callhunting": "77",
            "description": "Sales",
            "members": "account:100000;fwd:1",
            "ring_time": "25;25",
            "press": "0;0"
        });
        let update = CallHuntingUpdate {
            name: Some("Sales East".to_owned()),
            ring_time: Some("20;30".to_owned()),
            ..Default::default()
        };
        let params = merge_call_hunting_update(record.as_object().unwrap(), &update);
        assert_eq!(params.get("callhunting"), Some("77"));
        assert_eq!(params.get("description"), Some("Sales East"));
        assert_eq!(params.get("ring_time"), Some("20;30"));
        assert_eq!(params.get("press"), Some("0;0"));
    }
}
