use serde_json::{Map, Value};

use super::{encode_filter_params, params_from_record, require};
use crate::domain::{
    AuthType, NewSubaccount, Params, SubaccountUpdate, ValidationError, one_zero,
};

pub const CREATE_METHOD: &str = "createSubAccount";
pub const DELETE_METHOD: &str = "delSubAccount";
pub const GET_METHOD: &str = "getSubAccounts";
pub const SET_METHOD: &str = "setSubAccount";

/// Collection key of `getSubAccounts` responses.
pub const COLLECTION: &str = "accounts";

fn check_auth(
    auth_type: Option<AuthType>,
    password: Option<&str>,
    ip: Option<&str>,
) -> Result<(), ValidationError> {
    let missing = |value: Option<&str>| value.is_none_or(|it| it.trim().is_empty());
    match auth_type {
        Some(AuthType::Password) if missing(password) => Err(ValidationError::MissingAuthValue {
            field: "password",
            auth_type: AuthType::Password.label(),
        }),
        Some(AuthType::Ip) if missing(ip) => Err(ValidationError::MissingAuthValue {
            field: "ip",
            auth_type: AuthType::Ip.label(),
        }),
        _ => Ok(()),
    }
}

fn check_cnam(internal_cnam: Option<&str>, enabled: Option<bool>) -> Result<(), ValidationError> {
    let has_cnam = internal_cnam.is_some_and(|it| !it.is_empty());
    if has_cnam && enabled != Some(true) {
        return Err(ValidationError::CnamNotEnabled);
    }
    Ok(())
}

pub fn encode_create_subaccount_params(
    request: &NewSubaccount,
) -> Result<Params, ValidationError> {
    check_auth(
        Some(request.auth_type),
        request.password.as_deref(),
        request.ip.as_deref(),
    )?;
    check_cnam(
        request.internal_cnam.as_deref(),
        Some(request.enable_internal_cnam),
    )?;

    // Mandatory on the VoIP.ms side, fixed here.
    let mut params = Params::new()
        .with("username", request.username.as_str())
        .with("international_route", 1)
        .with("music_on_hold", "default")
        .with("dtmf_mode", "auto")
        .with("nat", "yes")
        .with(AuthType::FIELD, request.auth_type)
        .with("protocol", request.protocol)
        .with("device_type", request.device_type)
        .with("lock_international", request.lock_international);

    params.insert_opt("password", request.password.as_deref());
    params.insert_opt("ip", request.ip.as_deref());
    params.insert_opt("callerid_number", request.callerid_number.as_deref());
    params.insert_opt("internal_extension", request.internal_extension.as_deref());
    params.insert_opt("internal_voicemail", request.internal_voicemail.as_deref());
    params.insert_opt("internal_cnam", request.internal_cnam.as_deref());
    if request.enable_internal_cnam {
        params.insert("enable_internal_cnam", 1);
    }
    params.insert_opt("description", request.description.as_deref());
    params.insert_opt("allowed_codecs", Some(request.allowed_codecs.as_str()));
    Ok(params)
}

pub fn encode_get_subaccounts_params(account: Option<&str>) -> Params {
    encode_filter_params("account", account)
}

pub fn encode_delete_subaccount_params(id: &str) -> Result<Params, ValidationError> {
    Ok(Params::new().with("id", require("id", id)?))
}

pub fn validate_subaccount_update(update: &SubaccountUpdate) -> Result<(), ValidationError> {
    check_auth(
        update.auth_type,
        update.password.as_deref(),
        update.ip.as_deref(),
    )?;
    check_cnam(update.internal_cnam.as_deref(), update.enable_internal_cnam)
}

/// Overlay `update` on the current `getSubAccounts` record.
///
/// Switching between password and IP authentication drops the credential
/// of the old type, which VoIP.ms rejects otherwise.
pub fn merge_subaccount_update(current: &Map<String, Value>, update: &SubaccountUpdate) -> Params {
    let mut params = params_from_record(current);

    let current_auth = params.get(AuthType::FIELD).and_then(AuthType::from_code);
    match (current_auth, update.auth_type) {
        (Some(AuthType::Password), Some(AuthType::Ip)) => {
            params.remove("password");
        }
        (Some(AuthType::Ip), Some(AuthType::Password)) => {
            params.remove("ip");
        }
        _ => {}
    }

    params.insert_opt(AuthType::FIELD, update.auth_type);
    params.insert_opt("password", update.password.as_deref());
    params.insert_opt("ip", update.ip.as_deref());
    params.insert_opt("protocol", update.protocol);
    params.insert_opt("device_type", update.device_type);
    params.insert_opt("callerid_number", update.callerid_number.as_deref());
    params.insert_opt("description", update.description.as_deref());
    params.insert_opt("canada_routing", update.canada_routing);
    params.insert_opt("lock_international", update.lock_international);
    params.insert_opt("international_route", update.international_route);
    params.insert_opt("record_calls", update.record_calls.map(one_zero));
    params.insert_opt("music_on_hold", update.music_on_hold.as_deref());
    params.insert_opt("internal_extension", update.internal_extension.as_deref());
    params.insert_opt("internal_voicemail", update.internal_voicemail.as_deref());
    params.insert_opt("internal_cnam", update.internal_cnam.as_deref());
    params.insert_opt(
        "enable_internal_cnam",
        update.enable_internal_cnam.map(one_zero),
    );
    params.insert_opt("allowed_codecs", update.allowed_codecs.as_deref());
    params.insert_opt("dtmf_mode", update.dtmf_mode.as_deref());
    params
}
