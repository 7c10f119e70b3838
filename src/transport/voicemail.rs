use serde_json::{Map, Value};

use super::{params_from_record, require};
use crate::domain::{
    MailboxId, NewVoicemail, Params, ValidationError, VoicemailFilter, VoicemailUpdate, yes_no,
};

pub const CREATE_METHOD: &str = "createVoicemail";
pub const DELETE_METHOD: &str = "delVoicemail";
pub const GET_METHOD: &str = "getVoicemails";
pub const SET_METHOD: &str = "setVoicemail";

pub const COLLECTION: &str = "voicemails";

pub fn encode_create_voicemail_params(request: &NewVoicemail) -> Result<Params, ValidationError> {
    let mut params = Params::new()
        .with("digits", request.mailbox.as_str())
        .with("name", require("name", &request.name)?)
        .with("password", request.password.as_str())
        .with("say_time", "yes")
        .with("say_callerid", "yes")
        .with("play_instructions", "u")
        .with("skip_password", yes_no(request.skip_password))
        .with("attach_message", yes_no(request.attach_message))
        .with("delete_message", yes_no(request.delete_message));
    params.insert_opt("email", request.email.as_deref());
    params.insert_opt("timezone", Some(request.timezone.as_str()));
    params.insert_opt("language", Some(request.language.as_str()));
    params.insert_opt("client", request.client.as_deref());
    Ok(params)
}

pub fn encode_get_voicemails_params(filter: &VoicemailFilter) -> Params {
    let mut params = Params::new();
    params.insert_opt(MailboxId::FIELD, filter.mailbox.as_ref());
    params.insert_opt("client", filter.client.as_deref());
    params
}

pub fn encode_delete_voicemail_params(mailbox: &MailboxId) -> Params {
    Params::new().with(MailboxId::FIELD, mailbox)
}

/// `getVoicemails` reports `transcription` as `Y`/`N`, which `setVoicemail` rejects.
fn coerce_transcription(params: &mut Params) {
    let coerced = match params.get("transcription") {
        Some("N") => "",
        Some("Y") => "yes",
        _ => return,
    };
    params.insert("transcription", coerced);
}

pub fn merge_voicemail_update(current: &Map<String, Value>, update: &VoicemailUpdate) -> Params {
    let mut params = params_from_record(current);
    coerce_transcription(&mut params);

    params.insert_opt("name", update.name.as_deref());
    params.insert_opt("password", update.password.as_ref().map(|it| it.as_str()));
    params.insert_opt("skip_password", update.skip_password.map(yes_no));
    params.insert_opt("email", update.email.as_deref());
    params.insert_opt("attach_message", update.attach_message.map(yes_no));
    params.insert_opt("delete_message", update.delete_message.map(yes_no));
    params.insert_opt("timezone", update.timezone.as_deref());
    params.insert_opt("language", update.language.as_deref());
    params.insert_opt("client", update.client.as_deref());
    params
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::MailboxPassword;

    fn new_voicemail() -> NewVoicemail {
        NewVoicemail::new(
            MailboxId::new("101").unwrap(),
            "Front desk",
            MailboxPassword::new("1234").unwrap(),
        )
    }

    #[test]
    fn create_params_include_fixed_and_default_fields() {
        let params = encode_create_voicemail_params(&new_voicemail()).unwrap();
        assert_eq!(params.get("digits"), Some("101"));
        assert_eq!(params.get("name"), Some("Front desk"));
        assert_eq!(params.get("password"), Some("1234"));
        assert_eq!(params.get("say_time"), Some("yes"));
        assert_eq!(params.get("say_callerid"), Some("yes"));
        assert_eq!(params.get("play_instructions"), Some("u"));
        assert_eq!(params.get("skip_password"), Some("no"));
        assert_eq!(params.get("attach_message"), Some("yes"));
        assert_eq!(params.get("delete_message"), Some("no"));
        assert_eq!(params.get("timezone"), Some("US/Eastern"));
        assert_eq!(params.get("language"), Some("en"));
        assert!(!params.contains_key("email"));
        assert!(!params.contains_key("client"));
    }

    #[test]
    fn create_requires_name() {
        let request = NewVoicemail {
            name: String::new(),
            ..new_voicemail()
        };
        assert_eq!(
            encode_create_voicemail_params(&request).unwrap_err(),
            ValidationError::Empty { field: "name" }
        );
    }

    #[test]
    fn get_params_use_mailbox_key() {
        let filter = VoicemailFilter {
            mailbox: Some(MailboxId::from(1001)),
            client: Some("561115".to_owned()),
        };
        let params = encode_get_voicemails_params(&filter);
        assert_eq!(params.get("mailbox"), Some("1001"));
        assert_eq!(params.get("client"), Some("561115"));
        assert!(encode_get_voicemails_params(&VoicemailFilter::default()).is_empty());
    }

    #[test]
    fn merge_coerces_transcription_flags() {
        let record = json!({ "mailbox": "101", "name": "Desk", "transcription": "N" });
        let params = merge_voicemail_update(record.as_object().unwrap(), &VoicemailUpdate::default());
        assert_eq!(params.get("transcription"), Some(""));

        let record = json!({ "mailbox": "101", "name": "Desk", "transcription": "Y" });
        let params = merge_voicemail_update(record.as_object().unwrap(), &VoicemailUpdate::default());
        assert_eq!(params.get("transcription"), Some("yes"));

        let record = json!({ "mailbox": "101", "name": "Desk" });
        let params = merge_voicemail_update(record.as_object().unwrap(), &VoicemailUpdate::default());
        assert!(!params.contains_key("transcription"));
    }

    #[test]
    fn merge_overlays_changes() {
        let record = json!({
            "mailbox": "101",
            "name": "Desk",
            "password": "1234",
            "attach_message": "yes",
            "transcription": "N"
        });
        let update = VoicemailUpdate {
            password: Some(MailboxPassword::new("98765").unwrap()),
            attach_message: Some(false),
            ..Default::default()
        };
        let params = merge_voicemail_update(record.as_object().unwrap(), &update);
        assert_eq!(params.get("mailbox"), Some("101"));
        assert_eq!(params.get("name"), Some("Desk"));
        assert_eq!(params.get("password"), Some("98765"));
        assert_eq!(params.get("attach_message"), Some("no"));
    }
}
