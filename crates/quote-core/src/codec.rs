//! # Draft Codec
//!
//! Encodes a [`Quote`] into the persisted draft blob and decodes it back.
//!
//! ## Wire Format
//! ```text
//! Quote     = { clientName: string, clientAddress: string, reference: string,
//!               items: [QuoteItem], taxInclusive: boolean, currencyCode: string }
//! QuoteItem = { name: string, qty: number, rate: number, discount: number,
//!               taxPct: number }
//! ```
//!
//! ## Decode Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Missing or null field  ──►  default                                    │
//! │     strings → ""   items → []   taxInclusive → false                    │
//! │     currencyCode → "INR"   qty → 1   other numbers → 0                  │
//! │                                                                         │
//! │  Not JSON               ──►  DecodeError::Malformed                     │
//! │  Top level not object   ──►  DecodeError::NotAnObject                   │
//! │  items not an array     ──►  DecodeError::ItemsNotASequence             │
//! │  Wrong JSON type        ──►  DecodeError::InvalidField { field }        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unknown keys are ignored. Decoding does not enforce the non-empty item
//! list; the session manager repairs that after a restore.

use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult, DecodeError};
use crate::types::Quote;

const STRING_FIELDS: &[&str] = &["clientName", "clientAddress", "reference", "currencyCode"];
const ITEM_NUMBER_FIELDS: &[&str] = &["qty", "rate", "discount", "taxPct"];

/// Serializes a quote into its draft blob.
///
/// NaN and infinity have no JSON form; any item holding one is an
/// [`CoreError::Encode`].
pub fn encode(quote: &Quote) -> CoreResult<String> {
    check_finite(quote)?;
    serde_json::to_string(quote).map_err(|e| CoreError::Encode(e.to_string()))
}

fn check_finite(quote: &Quote) -> CoreResult<()> {
    for (i, item) in quote.items.iter().enumerate() {
        let fields = [
            ("qty", item.quantity),
            ("rate", item.rate),
            ("discount", item.discount_per_unit),
            ("taxPct", item.tax_percent),
        ];
        if let Some((field, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(CoreError::Encode(format!(
                "items[{}].{} is {}, which JSON cannot represent",
                i, field, value
            )));
        }
    }
    Ok(())
}

/// Parses a draft blob, filling defaults for missing fields.
pub fn decode(blob: &str) -> Result<Quote, DecodeError> {
    let value: Value =
        serde_json::from_str(blob).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    check_shape(&value)?;

    serde_json::from_value(value).map_err(|e| DecodeError::Malformed(e.to_string()))
}

/// Walks the JSON tree so shape problems get a precise error before serde
/// does the conversion.
fn check_shape(value: &Value) -> Result<(), DecodeError> {
    let root = value.as_object().ok_or(DecodeError::NotAnObject)?;

    for field in STRING_FIELDS {
        expect_type(root, field, field, Value::is_string)?;
    }
    expect_type(root, "taxInclusive", "taxInclusive", Value::is_boolean)?;

    match root.get("items") {
        None | Some(Value::Null) => Ok(()),
        Some(Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                check_item(i, item)?;
            }
            Ok(())
        }
        Some(_) => Err(DecodeError::ItemsNotASequence),
    }
}

fn check_item(index: usize, item: &Value) -> Result<(), DecodeError> {
    let item = item.as_object().ok_or_else(|| DecodeError::InvalidField {
        field: format!("items[{}]", index),
    })?;

    expect_type(item, "name", &format!("items[{}].name", index), Value::is_string)?;
    for field in ITEM_NUMBER_FIELDS {
        expect_type(item, field, &format!("items[{}].{}", index, field), Value::is_number)?;
    }
    Ok(())
}

fn expect_type(
    object: &Map<String, Value>,
    key: &str,
    path: &str,
    is_valid: fn(&Value) -> bool,
) -> Result<(), DecodeError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(()),
        Some(v) if is_valid(v) => Ok(()),
        Some(_) => Err(DecodeError::InvalidField {
            field: path.to_string(),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QuoteItem;

    fn sample_quote() -> Quote {
        Quote {
            client_name: "Acme Traders".to_string(),
            client_address: "12 Mill Road\nPune".to_string(),
            reference: "Q-2024-007".to_string(),
            items: vec![
                QuoteItem::new("Widget", 2.0, 100.0, 10.0, 18.0),
                QuoteItem::new("Bolt \"M8\"", 0.333, -1.25, 0.1, 5.5),
            ],
            tax_inclusive: true,
            currency_code: "USD".to_string(),
        }
    }

    #[test]
    fn test_wire_field_names() {
        let blob = encode(&sample_quote()).unwrap();
        let value: Value = serde_json::from_str(&blob).unwrap();

        assert_eq!(value["clientName"], "Acme Traders");
        assert_eq!(value["taxInclusive"], true);
        assert_eq!(value["currencyCode"], "USD");
        assert_eq!(value["items"][0]["qty"], 2.0);
        assert_eq!(value["items"][0]["discount"], 10.0);
        assert_eq!(value["items"][0]["taxPct"], 18.0);
    }

    #[test]
    fn test_round_trip_is_field_wise_equal() {
        let quote = sample_quote();
        let decoded = decode(&encode(&quote).unwrap()).unwrap();
        assert_eq!(decoded, quote);

        let default = Quote::default();
        assert_eq!(decode(&encode(&default).unwrap()).unwrap(), default);
    }

    #[test]
    fn test_non_finite_numbers_are_refused() {
        let mut quote = sample_quote();
        quote.items[1].rate = f64::INFINITY;

        let err = encode(&quote).unwrap_err();
        assert_eq!(
            err,
            CoreError::Encode("items[1].rate is inf, which JSON cannot represent".to_string())
        );

        quote.items[1].rate = 1.0;
        quote.items[0].quantity = f64::NAN;
        assert!(matches!(encode(&quote), Err(CoreError::Encode(msg)) if msg.contains("items[0].qty")));
    }

    #[test]
    fn test_empty_object_takes_defaults() {
        let quote = decode("{}").unwrap();
        assert_eq!(quote.client_name, "");
        assert_eq!(quote.client_address, "");
        assert_eq!(quote.reference, "");
        assert!(quote.items.is_empty());
        assert!(!quote.tax_inclusive);
        assert_eq!(quote.currency_code, "INR");
    }

    #[test]
    fn test_item_defaults() {
        let quote = decode(r#"{"items":[{}]}"#).unwrap();
        let item = &quote.items[0];
        assert_eq!(item.name, "");
        assert_eq!(item.quantity, 1.0);
        assert_eq!(item.rate, 0.0);
        assert_eq!(item.discount_per_unit, 0.0);
        assert_eq!(item.tax_percent, 0.0);
    }

    #[test]
    fn test_nulls_behave_like_missing_fields() {
        let quote = decode(
            r#"{"clientName":null,"items":[{"qty":null,"rate":4}],"currencyCode":null,"taxInclusive":null}"#,
        )
        .unwrap();
        assert_eq!(quote.client_name, "");
        assert_eq!(quote.currency_code, "INR");
        assert_eq!(quote.items[0].quantity, 1.0);
        assert_eq!(quote.items[0].rate, 4.0);

        assert!(decode(r#"{"items":null}"#).unwrap().items.is_empty());
    }

    #[test]
    fn test_integer_numbers_are_accepted() {
        let quote = decode(r#"{"items":[{"name":"a","qty":3,"rate":7,"discount":1,"taxPct":12}]}"#)
            .unwrap();
        assert_eq!(quote.items[0], QuoteItem::new("a", 3.0, 7.0, 1.0, 12.0));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let quote = decode(r#"{"status":"sent","items":[{"sku":"X"}]}"#).unwrap();
        assert_eq!(quote.items.len(), 1);
    }

    #[test]
    fn test_structural_errors() {
        assert!(matches!(decode("not json"), Err(DecodeError::Malformed(_))));
        assert_eq!(decode("[1,2]"), Err(DecodeError::NotAnObject));
        assert_eq!(decode("\"quote\""), Err(DecodeError::NotAnObject));
        assert_eq!(decode(r#"{"items":{"0":{}}}"#), Err(DecodeError::ItemsNotASequence));
        assert_eq!(decode(r#"{"items":"none"}"#), Err(DecodeError::ItemsNotASequence));
    }

    #[test]
    fn test_wrong_field_types_name_the_field() {
        assert_eq!(
            decode(r#"{"clientName":5}"#),
            Err(DecodeError::InvalidField {
                field: "clientName".to_string()
            })
        );
        assert_eq!(
            decode(r#"{"items":[{},{"qty":"two"}]}"#),
            Err(DecodeError::InvalidField {
                field: "items[1].qty".to_string()
            })
        );
        assert_eq!(
            decode(r#"{"items":[3]}"#),
            Err(DecodeError::InvalidField {
                field: "items[0]".to_string()
            })
        );
    }
}
