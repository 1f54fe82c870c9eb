use serde_json::Value;
use thiserror::Error;

use crate::models::FIELDS;

pub const VALID_MESSAGE: &str = "record is valid";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidRecord {
    #[error("invalid record format: expected a mapping of field names to values")]
    Format,

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid data type for '{0}': expected a number")]
    NotNumeric(&'static str),
}

/// Checks a candidate record against the statement schema. Rules are applied
/// in order and the first failure is returned.
pub fn validate(record: &Value) -> Result<(), InvalidRecord> {
    let map = record.as_object().ok_or(InvalidRecord::Format)?;

    if let Some(field) = FIELDS.iter().find(|f| !map.contains_key(f.name)) {
        return Err(InvalidRecord::MissingField(field.name));
    }

    for name in ["Amount", "Fee"] {
        if !map[name].is_number() {
            return Err(InvalidRecord::NotNumeric(name));
        }
    }
    Ok(())
}

/// `validate` flattened into a (valid, message) pair.
pub fn verdict(record: &Value) -> (bool, String) {
    match validate(record) {
        Ok(()) => (true, VALID_MESSAGE.to_string()),
        Err(e) => (false, e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_record() -> Value {
        json!({
            "Type": "Transfer",
            "Product": "",
            "Started_Date": "2023-05-01",
            "Completed_Date": "2023-05-02",
            "Description": "Rent",
            "Amount": 1000.0,
            "Fee": 0,
            "Currency": "USD",
            "State": "COMPLETED",
            "Balance": 500.0,
        })
    }

    #[test]
    fn test_valid_record() {
        assert_eq!(validate(&valid_record()), Ok(()));
        assert_eq!(verdict(&valid_record()), (true, "record is valid".to_string()));
    }

    #[test]
    fn test_integer_and_float_amounts_accepted() {
        let mut r = valid_record();
        r["Amount"] = json!(12);
        r["Fee"] = json!(0.25);
        assert!(validate(&r).is_ok());
    }

    #[test]
    fn test_non_mapping_rejected() {
        for input in [json!([1, 2, 3]), json!("Transfer"), json!(null), json!(42)] {
            assert_eq!(validate(&input), Err(InvalidRecord::Format));
        }
        let (ok, msg) = verdict(&json!([]));
        assert!(!ok);
        assert!(msg.starts_with("invalid record format"), "{msg}");
    }

    #[test]
    fn test_each_missing_field_is_named() {
        for field in FIELDS.iter() {
            let mut r = valid_record();
            r.as_object_mut().unwrap().remove(field.name);
            let (ok, msg) = verdict(&r);
            assert!(!ok);
            assert_eq!(msg, format!("missing field: {}", field.name));
        }
    }

    #[test]
    fn test_first_missing_field_wins() {
        let mut r = valid_record();
        let map = r.as_object_mut().unwrap();
        map.remove("Balance");
        map.remove("Product");
        assert_eq!(validate(&r), Err(InvalidRecord::MissingField("Product")));
    }

    #[test]
    fn test_missing_field_checked_before_types() {
        let mut r = valid_record();
        r["Amount"] = json!("abc");
        r.as_object_mut().unwrap().remove("State");
        assert_eq!(validate(&r), Err(InvalidRecord::MissingField("State")));
    }

    #[test]
    fn test_non_numeric_amount() {
        let mut r = valid_record();
        r["Amount"] = json!("abc");
        r["Fee"] = json!("also bad");
        assert_eq!(validate(&r), Err(InvalidRecord::NotNumeric("Amount")));
        assert_eq!(
            verdict(&r).1,
            "invalid data type for 'Amount': expected a number"
        );
    }

    #[test]
    fn test_non_numeric_fee() {
        let mut r = valid_record();
        r["Fee"] = json!(null);
        assert_eq!(validate(&r), Err(InvalidRecord::NotNumeric("Fee")));
    }

    #[test]
    fn test_balance_type_not_checked() {
        let mut r = valid_record();
        r["Balance"] = json!("n/a");
        assert!(validate(&r).is_ok());
    }
}
