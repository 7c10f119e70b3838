//! Blocking Rust client for the VoIP.ms REST API.
//!
//! The crate is split in three layers: a domain layer of validated request
//! types, a transport layer for wire-format quirks (query keys, defaults,
//! record merging), and a client layer that issues the HTTP calls through one
//! facade per resource.
//!
//! ```rust,no_run
//! use voipms::{Credentials, MessageText, SendSms, VoipMsClient};
//!
//! fn main() -> Result<(), voipms::VoipMsError> {
//!     let client = VoipMsClient::new(Credentials::new("me@example.com", "api-password")?);
//!     let sms = SendSms::new("2052550000", "4042550000", MessageText::new("hello")?)?;
//!     let response = client.sms().send_sms(&sms)?;
//!     println!("{:?}", response.status());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    Accounts, CallHunting, Credentials, Dids, Forwarding, General, Ivr, Lnp, PASSWORD_ENV,
    RingGroups, Sms, USERNAME_ENV, Voicemail, VoipMsClient, VoipMsClientBuilder, VoipMsError,
};
pub use domain::{
    ApiResponse, AuthType, BillingType, CallHuntingUpdate, CancelDid, DateRange, DidFilter,
    DtmfPause, ForwardingUpdate, HuntingOrder, IvrTimeout, IvrUpdate, MailboxId, MailboxPassword,
    MessageText, NewCallHunting, NewForwarding, NewIvr, NewRingGroup, NewSubaccount, NewVoicemail,
    OrderDid, Params, RingGroupUpdate, STATUS_SUCCESS, SendSms, SmsDirection, SmsFilter,
    SubaccountName, SubaccountUpdate, SubaccountUsername, UtcOffset, ValidationError,
    VoicemailFilter, VoicemailSetup, VoicemailUpdate,
};
