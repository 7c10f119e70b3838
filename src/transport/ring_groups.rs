use serde_json::{Map, Value};

use super::{
    encode_filter_params, main_account_target, params_from_record, require,
    with_main_account_default,
};
use crate::domain::{NewRingGroup, Params, RingGroupUpdate, ValidationError};

pub const DELETE_METHOD: &str = "delRingGroup";
pub const GET_METHOD: &str = "getRingGroups";
pub const SET_METHOD: &str = "setRingGroup";

pub const COLLECTION: &str = "ring_groups";
/// Filter key of `getRingGroups`.
pub const FILTER_FIELD: &str = "ring_group";
/// Id key of `delRingGroup` (no underscore, unlike the filter).
pub const DELETE_FIELD: &str = "ringgroup";
pub const NAME_FIELD: &str = "name";

pub fn encode_create_ring_group_params(
    request: &NewRingGroup,
    primary_account: Option<&str>,
) -> Result<Params, ValidationError> {
    let members = with_main_account_default(
        "members",
        request.members.as_deref(),
        primary_account,
        main_account_target,
    )?;
    let mut params = Params::new()
        .with(NAME_FIELD, require(NAME_FIELD, &request.name)?)
        .with("voicemail", require("voicemail", &request.voicemail)?)
        .with("members", members);
    params.insert_opt(
        "caller_announcement",
        request.caller_announcement.as_deref(),
    );
    params.insert_opt("music_on_hold", request.music_on_hold.as_deref());
    params.insert_opt("language", request.language.as_deref());
    Ok(params)
}

pub fn encode_get_ring_groups_params(ring_group: Option<&str>) -> Params {
    encode_filter_params(FILTER_FIELD, ring_group)
}

pub fn encode_delete_ring_group_params(ring_group: &str) -> Result<Params, ValidationError> {
    Ok(Params::new().with(DELETE_FIELD, require(DELETE_FIELD, ring_group)?))
}

pub fn merge_ring_group_update(current: &Map<String, Value>, update: &RingGroupUpdate) -> Params {
    let mut params = params_from_record(current);
    params.insert_opt(NAME_FIELD, update.name.as_deref());
    params.insert_opt("voicemail", update.voicemail.as_deref());
    params.insert_opt("members", update.members.as_deref());
    params.insert_opt("caller_announcement", update.caller_announcement.as_deref());
    params.insert_opt("music_on_hold", update.music_on_hold.as_deref());
    params.insert_opt("language", update.language.as_deref());
    params
}
