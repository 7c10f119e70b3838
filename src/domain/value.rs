use std::fmt;

use chrono::NaiveDate;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Username for a new sub account (`username`).
///
/// Invariant: non-empty after trimming and at most [`SubaccountUsername::MAX_LEN`] characters.
/// VoIP.ms prefixes it with the main account number, so the full name
/// becomes `100000_<username>`.
pub struct SubaccountUsername(String);

impl SubaccountUsername {
    /// Query field name used by VoIP.ms (`username`).
    pub const FIELD: &'static str = "username";
    /// Longest username VoIP.ms accepts.
    pub const MAX_LEN: usize = 12;

    /// Create a validated [`SubaccountUsername`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        let actual = trimmed.chars().count();
        if actual > Self::MAX_LEN {
            return Err(ValidationError::TooLong {
                field: Self::FIELD,
                max: Self::MAX_LEN,
                actual,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Full sub account name as returned by `getSubAccounts` (`account`), e.g. `100000_office`.
///
/// Invariant: contains the `_` separating the main account number from the username.
pub struct SubaccountName(String);

impl SubaccountName {
    /// Query field name used by VoIP.ms (`account`).
    pub const FIELD: &'static str = "account";

    /// Create a validated [`SubaccountName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if !trimmed.contains('_') {
            return Err(ValidationError::NotFullSubaccountName {
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Main account number (the part before the first `_`).
    pub fn main_account(&self) -> &str {
        self.0.split('_').next().unwrap_or_default()
    }

    /// Borrow the full name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubaccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Sub account authentication type (`auth_type`).
pub enum AuthType {
    /// User/password authentication (`1`). Requires a password.
    #[default]
    Password,
    /// Static IP authentication (`2`). Requires an IP address or FQDN.
    Ip,
}

impl AuthType {
    /// Query field name used by VoIP.ms (`auth_type`).
    pub const FIELD: &'static str = "auth_type";

    /// Wire value of the authentication type.
    pub fn code(self) -> u8 {
        match self {
            Self::Password => 1,
            Self::Ip => 2,
        }
    }

    /// Parse the wire value returned in sub account records.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "1" => Some(Self::Password),
            "2" => Some(Self::Ip),
            _ => None,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Password => "User/Password",
            Self::Ip => "IP",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Inclusive calendar date range used by history lookups.
///
/// Invariant: `from <= to`.
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    const FORMAT: &'static str = "%Y-%m-%d";

    /// Create a validated [`DateRange`] from two dates.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, ValidationError> {
        if to < from {
            return Err(ValidationError::DateRangeReversed {
                from: from.format(Self::FORMAT).to_string(),
                to: to.format(Self::FORMAT).to_string(),
            });
        }
        Ok(Self { from, to })
    }

    /// Parse both bounds as `YYYY-MM-DD`.
    pub fn parse(from: &str, to: &str) -> Result<Self, ValidationError> {
        Self::new(parse_date(from)?, parse_date(to)?)
    }

    /// Build an optional range from optional bounds.
    ///
    /// Both absent yields `None`; only one present is an error.
    pub fn from_bounds(
        from: Option<&str>,
        to: Option<&str>,
        fields: (&'static str, &'static str),
    ) -> Result<Option<Self>, ValidationError> {
        match (from, to) {
            (None, None) => Ok(None),
            (Some(from), Some(to)) => Self::parse(from, to).map(Some),
            _ => Err(ValidationError::IncompleteDateRange {
                from: fields.0,
                to: fields.1,
            }),
        }
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    pub(crate) fn from_param(&self) -> String {
        self.from.format(Self::FORMAT).to_string()
    }

    pub(crate) fn to_param(&self) -> String {
        self.to.format(Self::FORMAT).to_string()
    }
}

fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input.trim(), DateRange::FORMAT).map_err(|_| {
        ValidationError::InvalidDate {
            input: input.to_owned(),
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Pause before DTMF digits are sent on a forwarded call (`pause`).
///
/// Invariant: 0 to 10 seconds in 0.5 second increments.
pub struct DtmfPause(u8);

impl DtmfPause {
    /// Query field name used by VoIP.ms (`pause`).
    pub const FIELD: &'static str = "pause";
    const MAX_HALF_SECONDS: u8 = 20;

    /// Create a pause from a number of seconds.
    pub fn from_seconds(seconds: f32) -> Result<Self, ValidationError> {
        let halves = seconds * 2.0;
        let in_range = (0.0..=f32::from(Self::MAX_HALF_SECONDS)).contains(&halves);
        if !in_range || halves.fract() != 0.0 {
            return Err(ValidationError::OutOfRange {
                field: Self::FIELD,
                expected: "0 to 10 in 0.5 increments",
                actual: seconds.to_string(),
            });
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(Self(halves as u8))
    }

    pub fn half_seconds(self) -> u8 {
        self.0
    }
}

impl fmt::Display for DtmfPause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 2, (self.0 % 2) * 5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Seconds an IVR waits for a choice after the recording (`timeout`).
///
/// Invariant: 1..=10.
pub struct IvrTimeout(u8);

impl IvrTimeout {
    /// Query field name used by VoIP.ms (`timeout`).
    pub const FIELD: &'static str = "timeout";
    pub const DEFAULT: Self = Self(5);

    pub fn new(seconds: u8) -> Result<Self, ValidationError> {
        if !(1..=10).contains(&seconds) {
            return Err(ValidationError::OutOfRange {
                field: Self::FIELD,
                expected: "1..=10",
                actual: seconds.to_string(),
            });
        }
        Ok(Self(seconds))
    }

    pub fn seconds(self) -> u8 {
        self.0
    }
}

impl Default for IvrTimeout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for IvrTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Ring order of a call hunting (`order`).
pub enum HuntingOrder {
    /// Ring members in the order they are listed.
    #[default]
    Follow,
    /// Ring members in random order.
    Random,
}

impl HuntingOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Follow => "follow",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for HuntingOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Voicemail mailbox number (`digits` on create, `mailbox` elsewhere).
///
/// Invariant: 1 to 10 ASCII digits.
pub struct MailboxId(String);

impl MailboxId {
    /// Query field name used by VoIP.ms (`mailbox`).
    pub const FIELD: &'static str = "mailbox";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::NotNumeric {
                field: Self::FIELD,
                input: trimmed.to_owned(),
            });
        }
        if trimmed.len() > 10 {
            return Err(ValidationError::TooLong {
                field: Self::FIELD,
                max: 10,
                actual: trimmed.len(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u32> for MailboxId {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for MailboxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Voicemail access PIN (`password`).
///
/// Invariant: non-empty, ASCII digits only.
pub struct MailboxPassword(String);

impl MailboxPassword {
    /// Query field name used by VoIP.ms (`password`).
    pub const FIELD: &'static str = "password";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::NotNumeric {
                field: Self::FIELD,
                input: "<redacted>".to_owned(),
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for MailboxPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MailboxPassword(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message body (`message`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Query field name used by VoIP.ms (`message`).
    pub const FIELD: &'static str = "message";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Direction filter for SMS history (`type`).
pub enum SmsDirection {
    Sent,
    Received,
}

impl SmsDirection {
    pub fn code(self) -> u8 {
        match self {
            Self::Sent => 0,
            Self::Received => 1,
        }
    }
}

impl fmt::Display for SmsDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Hour offset applied to SMS timestamps (`timezone`).
///
/// Invariant: -12..=13.
pub struct UtcOffset(i8);

impl UtcOffset {
    /// Query field name used by VoIP.ms (`timezone`).
    pub const FIELD: &'static str = "timezone";

    pub fn new(hours: i8) -> Result<Self, ValidationError> {
        if !(-12..=13).contains(&hours) {
            return Err(ValidationError::OutOfRange {
                field: Self::FIELD,
                expected: "-12..=13",
                actual: hours.to_string(),
            });
        }
        Ok(Self(hours))
    }

    pub fn hours(self) -> i8 {
        self.0
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
