mod response_extractor;
mod validation;

pub use response_extractor::{
    extract_capture_id,
    extract_gid,
    extract_payment_link,
    extract_status,
    MerchantResponse,
    ResponseError,
};
pub use validation::{validate_payload, ConditionalRule, OperationTypeRule, ValidationError, ValidationRules};

use serde_json::Value;

/// Follow a dotted path (`paymentData.totalAmount`) through nested JSON objects.
pub fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| current.as_object()?.get(key))
}
