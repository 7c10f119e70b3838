#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} is too long: {actual} characters (max {max})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("{field} is out of range: {actual} (expected {expected})")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
        actual: String,
    },

    #[error("{field} must contain only digits: {input}")]
    NotNumeric { field: &'static str, input: String },

    #[error("both username and password must be provided together")]
    IncompleteCredentials,

    #[error("{field} is required for {auth_type} authentication")]
    MissingAuthValue {
        field: &'static str,
        auth_type: &'static str,
    },

    #[error("internal_cnam cannot be set unless enable_internal_cnam is set to true")]
    CnamNotEnabled,

    #[error("expected a full sub account name like 100000_name: {input}")]
    NotFullSubaccountName { input: String },

    #[error("both {from} and {to} must be provided together")]
    IncompleteDateRange {
        from: &'static str,
        to: &'static str,
    },

    #[error("invalid date (expected YYYY-MM-DD): {input}")]
    InvalidDate { input: String },

    #[error("end date {to} is before start date {from}")]
    DateRangeReversed { from: String, to: String },
}
