use serde_json::{Map, Value};

use super::{
    encode_filter_params, main_account_target, params_from_record, require,
    with_main_account_default,
};
use crate::domain::{IvrTimeout, IvrUpdate, NewIvr, Params, ValidationError};

pub const DELETE_METHOD: &str = "delIVR";
pub const GET_METHOD: &str = "getIVRs";
pub const SET_METHOD: &str = "setIVR";

pub const COLLECTION: &str = "ivrs";
pub const ID_FIELD: &str = "ivr";
pub const NAME_FIELD: &str = "name";

/// `choices` value routing option 1 to the main account.
pub fn default_choices(primary_account: &str) -> String {
    format!("1={}", main_account_target(primary_account))
}

pub fn encode_create_ivr_params(
    request: &NewIvr,
    primary_account: Option<&str>,
) -> Result<Params, ValidationError> {
    let choices = with_main_account_default(
        "choices",
        request.choices.as_deref(),
        primary_account,
        default_choices,
    )?;
    let mut params = Params::new()
        .with(NAME_FIELD, require(NAME_FIELD, &request.name)?)
        .with("recording", require("recording", &request.recording)?)
        .with(IvrTimeout::FIELD, request.timeout)
        .with("voicemailsetup", request.voicemail_setup)
        .with("choices", choices);
    params.insert_opt("language", Some(request.language.as_str()));
    Ok(params)
}

pub fn encode_get_ivrs_params(ivr: Option<&str>) -> Params {
    encode_filter_params(ID_FIELD, ivr)
}

pub fn encode_delete_ivr_params(ivr: &str) -> Result<Params, ValidationError> {
    Ok(Params::new().with(ID_FIELD, require(ID_FIELD, ivr)?))
}

pub fn merge_ivr_update(current: &Map<String, Value>, update: &IvrUpdate) -> Params {
    let mut params = params_from_record(current);
    params.insert_opt(NAME_FIELD, update.name.as_deref());
    params.insert_opt("recording", update.recording.as_deref());
    params.insert_opt(IvrTimeout::FIELD, update.timeout);
    params.insert_opt("language", update.language.as_deref());
    params.insert_opt("voicemailsetup", update.voicemail_setup);
    params.insert_opt("choices", update.choices.as_deref());
    params
}
