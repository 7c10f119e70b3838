use super::{encode_filter_params, require};
use crate::domain::{DateRange, Params, ValidationError};

pub const BALANCE_METHOD: &str = "getBalance";
pub const CONFERENCE_METHOD: &str = "getConference";
pub const CONFERENCE_MEMBERS_METHOD: &str = "getConferenceMembers";
pub const CONFERENCE_RECORDINGS_METHOD: &str = "getConferenceRecordings";
pub const CONFERENCE_RECORDING_FILE_METHOD: &str = "getConferenceRecordingFile";
pub const SEQUENCES_METHOD: &str = "getSequences";
pub const COUNTRIES_METHOD: &str = "getCountries";
pub const IP_METHOD: &str = "getIP";
pub const LANGUAGES_METHOD: &str = "getLanguages";
pub const LOCALES_METHOD: &str = "getLocales";
pub const SERVERS_METHOD: &str = "getServersInfo";
pub const TRANSACTIONS_METHOD: &str = "getTransactionHistory";

/// Bound names shared by transaction and conference recording history.
pub const DATE_RANGE_FIELDS: (&str, &str) = ("date_from", "date_to");

pub fn encode_balance_params(advanced: bool) -> Params {
    let mut params = Params::new();
    if advanced {
        params.insert("advanced", true);
    }
    params
}

pub fn encode_conference_params(conference: Option<&str>) -> Params {
    encode_filter_params("conference", conference)
}

pub fn encode_conference_members_params(member: Option<&str>) -> Params {
    encode_filter_params("member", member)
}

fn insert_date_range(params: &mut Params, range: &DateRange) {
    params.insert(DATE_RANGE_FIELDS.0, range.from_param());
    params.insert(DATE_RANGE_FIELDS.1, range.to_param());
}

pub fn encode_conference_recordings_params(
    conference: &str,
    range: Option<&DateRange>,
) -> Result<Params, ValidationError> {
    let mut params = Params::new().with("conference", require("conference", conference)?);
    if let Some(range) = range {
        insert_date_range(&mut params, range);
    }
    Ok(params)
}

pub fn encode_conference_recording_file_params(
    conference: &str,
    recording: &str,
) -> Result<Params, ValidationError> {
    Ok(Params::new()
        .with("conference", require("conference", conference)?)
        .with("recording", require("recording", recording)?))
}

pub fn encode_sequences_params(sequence: Option<&str>, client: Option<&str>) -> Params {
    let mut params = encode_filter_params("sequence", sequence);
    params.insert_opt("client", client);
    params
}

pub fn encode_countries_params(country: Option<&str>) -> Params {
    encode_filter_params("country", country)
}

pub fn encode_languages_params(language: Option<&str>) -> Params {
    encode_filter_params("language", language)
}

pub fn encode_locales_params(locale: Option<&str>) -> Params {
    encode_filter_params("locale", locale)
}

pub fn encode_servers_params(server_pop: Option<&str>) -> Params {
    encode_filter_params("server_pop", server_pop)
}

pub fn encode_transactions_params(range: &DateRange) -> Params {
    let mut params = Params::new();
    insert_date_range(&mut params, range);
    params
}
