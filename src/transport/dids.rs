use super::require;
use crate::domain::{CancelDid, DidFilter, OrderDid, Params, ValidationError, one_zero};

pub const CANCEL_METHOD: &str = "cancelDID";
pub const GET_INFO_METHOD: &str = "getDIDsInfo";
pub const ORDER_METHOD: &str = "orderDID";
pub const ORDER_TOLL_FREE_METHOD: &str = "orderTollFree";
pub const PORTABILITY_METHOD: &str = "getPortability";

pub fn encode_cancel_did_params(request: &CancelDid) -> Result<Params, ValidationError> {
    let mut params = Params::new().with("did", require("did", &request.did)?);
    params.insert_opt("comment", request.comment.as_deref());
    if request.port_out {
        params.insert("portout", true);
    }
    if request.test {
        params.insert("test", true);
    }
    Ok(params)
}

pub fn encode_get_dids_info_params(filter: &DidFilter) -> Params {
    let mut params = Params::new();
    params.insert_opt("client", filter.client.as_deref());
    params.insert_opt("did", filter.did.as_deref());
    params
}

/// Parameters for `orderDID`, or `orderTollFree` when `toll_free` is set
/// (toll-free numbers have no billing type).
pub fn encode_order_did_params(
    request: &OrderDid,
    toll_free: bool,
) -> Result<Params, ValidationError> {
    let mut params = Params::new()
        .with("did", require("did", &request.did)?)
        .with("routing", require("routing", &request.routing)?)
        .with("pop", request.pop)
        .with("dialtime", request.dial_time)
        .with("cnam", one_zero(request.cnam));
    if !toll_free {
        params.insert("billing_type", request.billing_type.code());
    }
    Ok(params)
}

pub fn encode_portability_params(did: &str) -> Result<Params, ValidationError> {
    Ok(Params::new().with("did", require("did", did)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BillingType;

    #[test]
    fn cancel_params_include_only_set_flags() {
        let params = encode_cancel_did_params(&CancelDid::new("5551234567")).unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("did"), Some("5551234567"));

        let request = CancelDid {
            comment: Some("moving".to_owned()),
            port_out: true,
            test: true,
            ..CancelDid::new(5_551_234_567_u64)
        };
        let params = encode_cancel_did_params(&request).unwrap();
        assert_eq!(params.get("comment"), Some("moving"));
        assert_eq!(params.get("portout"), Some("true"));
        assert_eq!(params.get("test"), Some("true"));
    }

    #[test]
    fn cancel_requires_did() {
        assert_eq!(
            encode_cancel_did_params(&CancelDid::new("")).unwrap_err(),
            ValidationError::Empty { field: "did" }
        );
    }

    #[test]
    fn order_params_use_defaults() {
        let params = encode_order_did_params(&OrderDid::new("5551234567"), false).unwrap();
        assert_eq!(params.get("routing"), Some("sys:hangup"));
        assert_eq!(params.get("pop"), Some("22"));
        assert_eq!(params.get("dialtime"), Some("60"));
        assert_eq!(params.get("cnam"), Some("0"));
        assert_eq!(params.get("billing_type"), Some("1"));
    }

    #[test]
    fn toll_free_order_omits_billing_type() {
        let request = OrderDid {
            billing_type: BillingType::FlatRate,
            cnam: true,
            ..OrderDid::new("8771234567")
        };
        let params = encode_order_did_params(&request, true).unwrap();
        assert!(!params.contains_key("billing_type"));
        assert_eq!(params.get("cnam"), Some("1"));

        let params = encode_order_did_params(&request, false).unwrap();
        assert_eq!(params.get("billing_type"), Some("2"));
    }

    #[test]
    fn dids_info_filter_is_optional() {
        assert!(encode_get_dids_info_params(&DidFilter::default()).is_empty());
        let filter = DidFilter {
            client: Some("100000_office".to_owned()),
            did: None,
        };
        let params = encode_get_dids_info_params(&filter);
        assert_eq!(params.get("client"), Some("100000_office"));
        assert!(!params.contains_key("did"));
    }
}
