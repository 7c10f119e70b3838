use crate::domain::{MessageText, Params, SendSms, SmsFilter, UtcOffset};

pub const GET_METHOD: &str = "getSMS";
pub const SEND_METHOD: &str = "sendSMS";

pub fn encode_get_sms_params(filter: &SmsFilter) -> Params {
    let mut params = Params::new();
    params.insert_opt("sms", filter.sms.as_deref());
    if let Some(range) = &filter.date_range {
        params.insert("from", range.from_param());
        params.insert("to", range.to_param());
    }
    params.insert_opt("type", filter.direction);
    params.insert_opt("did", filter.did.as_deref());
    params.insert_opt("contact", filter.contact.as_deref());
    params.insert_opt("limit", filter.limit);
    params.insert_opt(UtcOffset::FIELD, filter.timezone);
    params
}

pub fn encode_send_sms_params(request: &SendSms) -> Params {
    Params::new()
        .with("did", request.did())
        .with("dst", request.dst())
        .with(MessageText::FIELD, request.message().as_str())
}
