use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use crate::domain::validation::ValidationError;
use crate::domain::value::{
    AuthType, DateRange, DtmfPause, HuntingOrder, IvrTimeout, MailboxId, MailboxPassword,
    MessageText, SmsDirection, SubaccountUsername, UtcOffset,
};

/// Flat key-value parameter set sent as the query string of one API call.
///
/// Values are stringified at insertion, so anything implementing [`fmt::Display`]
/// (strings, integers, typed values) can be passed where the API accepts
/// "string or integer".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Params::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl fmt::Display) {
        self.0.insert(key.into(), value.to_string());
    }

    /// Insert a parameter only when it is present and renders non-empty.
    pub fn insert_opt<V: fmt::Display>(&mut self, key: impl Into<String>, value: Option<V>) {
        if let Some(value) = value {
            let value = value.to_string();
            if !value.is_empty() {
                self.0.insert(key.into(), value);
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    pub fn extend(&mut self, other: Params) {
        self.0.extend(other.0);
    }
}

impl<K: Into<String>, V: fmt::Display> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl IntoIterator for Params {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Renders a flag the way VoIP.ms yes/no fields expect it.
pub(crate) fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Renders a flag as `1` / `0`.
pub(crate) fn one_zero(value: bool) -> u8 {
    u8::from(value)
}

// ── Sub accounts ─────────────────────────────────────────────────────

#[derive(Debug, Clone)]
/// Input for `createSubAccount`.
pub struct NewSubaccount {
    pub username: SubaccountUsername,
    pub auth_type: AuthType,
    /// Required with [`AuthType::Password`].
    pub password: Option<String>,
    /// IP address or FQDN. Required with [`AuthType::Ip`].
    pub ip: Option<String>,
    /// `1` SIP, `3` IAX2 (values from `getProtocols`).
    pub protocol: u8,
    /// `1` DID number routing, `2` ATA/IP phone/softphone (values from `getDeviceTypes`).
    pub device_type: u8,
    pub callerid_number: Option<String>,
    pub internal_extension: Option<String>,
    pub internal_voicemail: Option<String>,
    /// Only accepted together with `enable_internal_cnam = true`.
    pub internal_cnam: Option<String>,
    pub enable_internal_cnam: bool,
    pub description: Option<String>,
    /// `1` blocks international calls.
    pub lock_international: u8,
    pub allowed_codecs: String,
}

impl NewSubaccount {
    pub const DEFAULT_CODECS: &'static str = "g722";

    /// Sub account with the package defaults and user/password authentication.
    pub fn new(username: SubaccountUsername) -> Self {
        Self {
            username,
            auth_type: AuthType::Password,
            password: None,
            ip: None,
            protocol: 1,
            device_type: 2,
            callerid_number: None,
            internal_extension: None,
            internal_voicemail: None,
            internal_cnam: None,
            enable_internal_cnam: false,
            description: None,
            lock_international: 1,
            allowed_codecs: Self::DEFAULT_CODECS.to_owned(),
        }
    }

    pub fn with_password(username: SubaccountUsername, password: impl Into<String>) -> Self {
        Self {
            password: Some(password.into()),
            ..Self::new(username)
        }
    }

    pub fn with_ip(username: SubaccountUsername, ip: impl Into<String>) -> Self {
        Self {
            auth_type: AuthType::Ip,
            ip: Some(ip.into()),
            ..Self::new(username)
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Changes applied by `setSubAccount` on top of the current sub account record.
pub struct SubaccountUpdate {
    pub auth_type: Option<AuthType>,
    pub password: Option<String>,
    pub ip: Option<String>,
    pub protocol: Option<u8>,
    pub device_type: Option<u8>,
    pub callerid_number: Option<String>,
    pub description: Option<String>,
    pub canada_routing: Option<u8>,
    pub lock_international: Option<u8>,
    pub international_route: Option<u8>,
    pub record_calls: Option<bool>,
    pub music_on_hold: Option<String>,
    pub internal_extension: Option<String>,
    pub internal_voicemail: Option<String>,
    pub internal_cnam: Option<String>,
    pub enable_internal_cnam: Option<bool>,
    pub allowed_codecs: Option<String>,
    pub dtmf_mode: Option<String>,
}

// ── DIDs ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
/// Input for `cancelDID`.
pub struct CancelDid {
    pub did: String,
    pub comment: Option<String>,
    /// Set when the number was ported out.
    pub port_out: bool,
    /// Dry run.
    pub test: bool,
}

impl CancelDid {
    pub fn new(did: impl fmt::Display) -> Self {
        Self {
            did: did.to_string(),
            comment: None,
            port_out: false,
            test: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Filter for `getDIDsInfo`.
pub struct DidFilter {
    /// Reseller client id or sub account name.
    pub client: Option<String>,
    pub did: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BillingType {
    #[default]
    PerMinute,
    FlatRate,
}

impl BillingType {
    pub fn code(self) -> u8 {
        match self {
            Self::PerMinute => 1,
            Self::FlatRate => 2,
        }
    }
}

#[derive(Debug, Clone)]
/// Input for `orderDID` and `orderTollFree`.
pub struct OrderDid {
    pub did: String,
    /// Routing target such as `account:100000_office` or `sys:hangup`.
    pub routing: String,
    /// POP server id (values from `getServersInfo`).
    pub pop: u16,
    /// Ring time in seconds.
    pub dial_time: u16,
    pub cnam: bool,
    /// Ignored by `orderTollFree`.
    pub billing_type: BillingType,
}

impl OrderDid {
    pub const DEFAULT_ROUTING: &'static str = "sys:hangup";
    pub const DEFAULT_POP: u16 = 22;
    pub const DEFAULT_DIAL_TIME: u16 = 60;

    pub fn new(did: impl fmt::Display) -> Self {
        Self {
            did: did.to_string(),
            routing: Self::DEFAULT_ROUTING.to_owned(),
            pop: Self::DEFAULT_POP,
            dial_time: Self::DEFAULT_DIAL_TIME,
            cnam: false,
            billing_type: BillingType::PerMinute,
        }
    }
}

// ── Forwardings ──────────────────────────────────────────────────────

#[derive(Debug, Clone)]
/// Input for `setForwarding` without a forwarding id.
pub struct NewForwarding {
    pub phone_number: String,
    pub callerid_override: Option<String>,
    pub description: Option<String>,
    pub dtmf_digits: Option<String>,
    pub pause: Option<DtmfPause>,
}

impl NewForwarding {
    pub fn new(phone_number: impl fmt::Display) -> Self {
        Self {
            phone_number: phone_number.to_string(),
            callerid_override: None,
            description: None,
            dtmf_digits: None,
            pause: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForwardingUpdate {
    pub phone_number: Option<String>,
    pub callerid_override: Option<String>,
    pub description: Option<String>,
    pub dtmf_digits: Option<String>,
    pub pause: Option<DtmfPause>,
}

// ── IVRs ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Which voicemail an IVR falls back to (`voicemailsetup`).
pub enum VoicemailSetup {
    #[default]
    DefaultDid,
    Account,
}

impl VoicemailSetup {
    pub fn code(self) -> u8 {
        match self {
            Self::DefaultDid => 1,
            Self::Account => 2,
        }
    }
}

impl fmt::Display for VoicemailSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone)]
/// Input for `setIVR` without an IVR id.
pub struct NewIvr {
    pub name: String,
    /// Recording id (values from `getRecordings`).
    pub recording: String,
    pub timeout: IvrTimeout,
    pub language: String,
    pub voicemail_setup: VoicemailSetup,
    /// `1=account:100001;2=fwd:16006`. Defaults to option 1 routing to the main account.
    pub choices: Option<String>,
}

impl NewIvr {
    pub fn new(name: impl Into<String>, recording: impl fmt::Display) -> Self {
        Self {
            name: name.into(),
            recording: recording.to_string(),
            timeout: IvrTimeout::DEFAULT,
            language: "en".to_owned(),
            voicemail_setup: VoicemailSetup::DefaultDid,
            choices: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IvrUpdate {
    pub name: Option<String>,
    pub recording: Option<String>,
    pub timeout: Option<IvrTimeout>,
    pub language: Option<String>,
    pub voicemail_setup: Option<VoicemailSetup>,
    pub choices: Option<String>,
}

// ── Ring groups ──────────────────────────────────────────────────────

#[derive(Debug, Clone)]
/// Input for `setRingGroup` without a ring group id.
pub struct NewRingGroup {
    pub name: String,
    /// Voicemail id (values from `getVoicemails`).
    pub voicemail: String,
    /// `account:100001;fwd:16006`. Defaults to the main account as only member.
    pub members: Option<String>,
    pub caller_announcement: Option<String>,
    pub music_on_hold: Option<String>,
    pub language: Option<String>,
}

impl NewRingGroup {
    pub fn new(name: impl Into<String>, voicemail: impl fmt::Display) -> Self {
        Self {
            name: name.into(),
            voicemail: voicemail.to_string(),
            members: None,
            caller_announcement: None,
            music_on_hold: None,
            language: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RingGroupUpdate {
    pub name: Option<String>,
    pub voicemail: Option<String>,
    pub members: Option<String>,
    pub caller_announcement: Option<String>,
    pub music_on_hold: Option<String>,
    pub language: Option<String>,
}

// ── Call hunting ─────────────────────────────────────────────────────

#[derive(Debug, Clone)]
/// Input for `setCallHunting` without a call hunting id.
pub struct NewCallHunting {
    /// Sent as `description`.
    pub name: String,
    pub music: String,
    pub recording: String,
    pub language: String,
    pub order: HuntingOrder,
    /// `account:100001;fwd:16006`. Defaults to the main account as only member.
    pub members: Option<String>,
    /// Seconds each member rings, in 5 second steps.
    pub ring_time: u16,
    /// Member must press 1 to take the call.
    pub press_one: bool,
}

impl NewCallHunting {
    pub const DEFAULT_RING_TIME: u16 = 25;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            music: "default".to_owned(),
            recording: "none:".to_owned(),
            language: "en".to_owned(),
            order: HuntingOrder::Follow,
            members: None,
            ring_time: Self::DEFAULT_RING_TIME,
            press_one: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CallHuntingUpdate {
    pub name: Option<String>,
    pub music: Option<String>,
    pub recording: Option<String>,
    pub language: Option<String>,
    pub order: Option<HuntingOrder>,
    pub members: Option<String>,
    /// One value, or one per member separated by `;` (`20;20;20`).
    pub ring_time: Option<String>,
    /// One value, or one per member separated by `;` (`0;1;0`).
    pub press: Option<String>,
}

// ── Voicemail ────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
/// Input for `createVoicemail`.
pub struct NewVoicemail {
    pub mailbox: MailboxId,
    pub name: String,
    pub password: MailboxPassword,
    pub skip_password: bool,
    /// One or more addresses separated by commas.
    pub email: Option<String>,
    pub attach_message: bool,
    pub delete_message: bool,
    pub timezone: String,
    pub language: String,
    /// Reseller client id.
    pub client: Option<String>,
}

impl NewVoicemail {
    pub const DEFAULT_TIMEZONE: &'static str = "US/Eastern";

    pub fn new(mailbox: MailboxId, name: impl Into<String>, password: MailboxPassword) -> Self {
        Self {
            mailbox,
            name: name.into(),
            password,
            skip_password: false,
            email: None,
            attach_message: true,
            delete_message: false,
            timezone: Self::DEFAULT_TIMEZONE.to_owned(),
            language: "en".to_owned(),
            client: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Filter for `getVoicemails`.
pub struct VoicemailFilter {
    pub mailbox: Option<MailboxId>,
    pub client: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct VoicemailUpdate {
    pub name: Option<String>,
    pub password: Option<MailboxPassword>,
    pub skip_password: Option<bool>,
    pub email: Option<String>,
    pub attach_message: Option<bool>,
    pub delete_message: Option<bool>,
    pub timezone: Option<String>,
    pub language: Option<String>,
    pub client: Option<String>,
}

// ── SMS ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
/// Filter for `getSMS`.
pub struct SmsFilter {
    pub sms: Option<String>,
    pub date_range: Option<DateRange>,
    pub direction: Option<SmsDirection>,
    pub did: Option<String>,
    pub contact: Option<String>,
    /// Number of records, 50 when unset.
    pub limit: Option<u32>,
    pub timezone: Option<UtcOffset>,
}

#[derive(Debug, Clone)]
/// Input for `sendSMS`.
pub struct SendSms {
    did: String,
    dst: String,
    message: MessageText,
}

impl SendSms {
    pub fn new(
        did: impl fmt::Display,
        dst: impl fmt::Display,
        message: MessageText,
    ) -> Result<Self, ValidationError> {
        let did = did.to_string();
        if did.trim().is_empty() {
            return Err(ValidationError::Empty { field: "did" });
        }
        let dst = dst.to_string();
        if dst.trim().is_empty() {
            return Err(ValidationError::Empty { field: "dst" });
        }
        Ok(Self { did, dst, message })
    }

    pub fn did(&self) -> &str {
        &self.did
    }

    pub fn dst(&self) -> &str {
        &self.dst
    }

    pub fn message(&self) -> &MessageText {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_opt_skips_missing_and_empty() {
        let mut params = Params::new();
        params.insert_opt("a", None::<&str>);
        params.insert_opt("b", Some(""));
        params.insert_opt("c", Some(0));
        params.insert_opt("d", Some("x"));
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("c"), Some("0"));
        assert_eq!(params.get("d"), Some("x"));
    }

    #[test]
    fn params_stringify_values() {
        let params = Params::new().with("did", 5_551_234_567_u64).with("name", "x");
        assert_eq!(params.get("did"), Some("5551234567"));
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["did", "name"]);
    }

    #[test]
    fn send_sms_requires_did_and_destination() {
        let msg = MessageText::new("hi").unwrap();
        assert!(SendSms::new("", "4042550000", msg.clone()).is_err());
        assert!(SendSms::new("2052550000", " ", msg.clone()).is_err());
        assert!(SendSms::new(2_052_550_000_u64, 4_042_550_000_u64, msg).is_ok());
    }
}
