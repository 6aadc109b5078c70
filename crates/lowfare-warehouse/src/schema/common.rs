use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

/// Coerce a JSON price into a number, e.g.,
///
/// ```text
/// 49.99               -> Some(49.99)
/// "49.99"             -> Some(49.99)
/// {"amount": 49.99}   -> Some(49.99)
/// "N/A"               -> None
/// null                -> None
/// ```
///
/// Whether the number is an acceptable price (finite, non-negative) is decided later, when
/// fares are validated.
pub fn price(value: &Value) -> Option<f64> {
    match value {
        Value::Number(num) => num.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Object(map) => map
            .get("amount")
            .or_else(|| map.get("value"))
            .and_then(price),
        _ => None,
    }
}

/// Trimmed, non-empty text.
pub fn text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Deserialize each raw item into `T`, keeping the raw item alongside it.
///
/// Items that do not fit `T` are skipped, so one odd record cannot void the rest of a response.
pub fn items<T: DeserializeOwned>(values: Vec<Value>) -> impl Iterator<Item = (T, Value)> {
    values
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<T>(raw.clone()) {
            Ok(item) => Some((item, raw)),
            Err(e) => {
                trace!("skipping malformed item: {e}");
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn prices() {
        assert_eq!(price(&json!(49.99)), Some(49.99));
        assert_eq!(price(&json!(12)), Some(12.0));
        assert_eq!(price(&json!(" 7.5 ")), Some(7.5));
        assert_eq!(price(&json!({"amount": 20, "currencyCode": "EUR"})), Some(20.0));
        assert_eq!(price(&json!({"value": "3.1"})), Some(3.1));
        assert_eq!(price(&json!("N/A")), None);
        assert_eq!(price(&json!(null)), None);
        assert_eq!(price(&json!([1])), None);
    }

    #[test]
    fn blank_text_is_absent() {
        assert_eq!(text(Some("  LHR ".to_string())), Some("LHR".to_string()));
        assert_eq!(text(Some("   ".to_string())), None);
        assert_eq!(text(None), None);
    }

    #[test]
    fn malformed_items_are_skipped() {
        #[derive(Deserialize)]
        struct Item {
            code: String,
        }

        let values = vec![json!({"code": "LHR"}), json!({"code": 5}), json!("x")];
        let parsed: Vec<(Item, Value)> = items(values).collect();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].0.code, "LHR");
        assert_eq!(parsed[0].1, json!({"code": "LHR"}));
    }
}
