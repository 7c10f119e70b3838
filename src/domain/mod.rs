//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub(crate) use request::{one_zero, yes_no};
pub use request::{
    BillingType, CallHuntingUpdate, CancelDid, DidFilter, ForwardingUpdate, IvrUpdate,
    NewCallHunting, NewForwarding, NewIvr, NewRingGroup, NewSubaccount, NewVoicemail, OrderDid,
    Params, RingGroupUpdate, SendSms, SmsFilter, SubaccountUpdate, VoicemailFilter,
    VoicemailSetup, VoicemailUpdate,
};
pub use response::{ApiResponse, STATUS_SUCCESS};
pub use validation::ValidationError;
pub use value::{
    AuthType, DateRange, DtmfPause, HuntingOrder, IvrTimeout, MailboxId, MailboxPassword,
    MessageText, SmsDirection, SubaccountName, SubaccountUsername, UtcOffset,
};
