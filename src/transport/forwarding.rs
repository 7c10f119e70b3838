use serde_json::{Map, Value};

use super::{encode_filter_params, params_from_record, require};
use crate::domain::{ForwardingUpdate, NewForwarding, Params, ValidationError};

pub const DELETE_METHOD: &str = "delForwarding";
pub const GET_METHOD: &str = "getForwardings";
/// Creates when no `forwarding` id is sent, updates otherwise.
pub const SET_METHOD: &str = "setForwarding";

pub const COLLECTION: &str = "forwardings";
pub const ID_FIELD: &str = "forwarding";
pub const NAME_FIELD: &str = "phone_number";

pub fn encode_create_forwarding_params(request: &NewForwarding) -> Result<Params, ValidationError> {
    let mut params = Params::new().with(
        NAME_FIELD,
        require(NAME_FIELD, &request.phone_number)?,
    );
    params.insert_opt("callerid_override", request.callerid_override.as_deref());
    params.insert_opt("description", request.description.as_deref());
    params.insert_opt("dtmf_digits", request.dtmf_digits.as_deref());
    params.insert_opt("pause", request.pause);
    Ok(params)
}

pub fn encode_get_forwardings_params(forwarding: Option<&str>) -> Params {
    encode_filter_params(ID_FIELD, forwarding)
}

pub fn encode_delete_forwarding_params(forwarding: &str) -> Result<Params, ValidationError> {
    Ok(Params::new().with(ID_FIELD, require(ID_FIELD, forwarding)?))
}

pub fn merge_forwarding_update(current: &Map<String, Value>, update: &ForwardingUpdate) -> Params {
    let mut params = params_from_record(current);
    params.insert_opt(NAME_FIELD, update.phone_number.as_deref());
    params.insert_opt("callerid_override", update.callerid_override.as_deref());
    params.insert_opt("description", update.description.as_deref());
    params.insert_opt("dtmf_digits", update.dtmf_digits.as_deref());
    params.insert_opt("pause", update.pause);
    params
}
