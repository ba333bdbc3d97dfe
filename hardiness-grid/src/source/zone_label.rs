//! conversions from the attribute value types of each zone dataset format into
//! zone label strings. a `None` label means the attribute was null for that row.
use shapefile::dbase::FieldValue;

/// reads a zone label from a dBase attribute value.
///
/// # Returns
///
/// * Ok(Some(label)) for a populated value, Ok(None) for a null value, or the
///   field type name as the error when the type cannot act as a zone label.
pub fn from_dbase(value: &FieldValue) -> Result<Option<String>, String> {
    match value {
        FieldValue::Character(s) => Ok(s.as_ref().map(|s| s.trim().to_string())),
        FieldValue::Memo(s) => Ok(Some(s.trim().to_string())),
        FieldValue::Numeric(n) => Ok(n.map(format_numeric)),
        FieldValue::Float(n) => Ok(n.map(|f| format_float(f as f64))),
        FieldValue::Double(n) => Ok(Some(format_float(*n))),
        FieldValue::Currency(n) => Ok(Some(format_float(*n))),
        FieldValue::Integer(i) => Ok(Some(i.to_string())),
        FieldValue::Logical(b) => Ok(b.map(|b| b.to_string())),
        other => Err(other.field_type().to_string()),
    }
}

/// reads a zone label from a GeoJSON feature property.
pub fn from_json(value: &serde_json::Value) -> Result<Option<String>, String> {
    use serde_json::Value;
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => Ok(Some(format_float(f))),
            _ => Ok(Some(n.to_string())),
        },
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) => Err(String::from("array")),
        Value::Object(_) => Err(String::from("object")),
    }
}

/// reads a zone label from a CSV cell, where an empty cell is null.
pub fn from_csv(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// dBase numeric columns usually hold integer codes, so whole values print
/// without a fractional part: 5.0 becomes the label "5".
fn format_numeric(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format_float(value)
    }
}

/// floating point attributes keep their fractional part: 5.0 becomes "5.0".
fn format_float(value: f64) -> String {
    format!("{value:?}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dbase_labels() {
        assert_eq!(
            from_dbase(&FieldValue::Character(Some(String::from("7a ")))),
            Ok(Some(String::from("7a")))
        );
        assert_eq!(from_dbase(&FieldValue::Character(None)), Ok(None));
        assert_eq!(
            from_dbase(&FieldValue::Numeric(Some(5.0))),
            Ok(Some(String::from("5")))
        );
        assert_eq!(
            from_dbase(&FieldValue::Numeric(Some(5.5))),
            Ok(Some(String::from("5.5")))
        );
        assert_eq!(
            from_dbase(&FieldValue::Integer(12)),
            Ok(Some(String::from("12")))
        );
    }

    #[test]
    fn test_float_labels_keep_fraction() {
        assert_eq!(
            from_dbase(&FieldValue::Double(5.0)),
            Ok(Some(String::from("5.0")))
        );
        assert_eq!(
            from_dbase(&FieldValue::Float(Some(6.5))),
            Ok(Some(String::from("6.5")))
        );
        assert_eq!(from_dbase(&FieldValue::Float(None)), Ok(None));
        assert_eq!(from_json(&json!(9.0)), Ok(Some(String::from("9.0"))));
        assert_eq!(from_json(&json!(0.1)), Ok(Some(String::from("0.1"))));
    }

    #[test]
    fn test_json_labels() {
        assert_eq!(from_json(&json!("6b")), Ok(Some(String::from("6b"))));
        assert_eq!(from_json(&json!(9)), Ok(Some(String::from("9"))));
        assert_eq!(from_json(&json!(null)), Ok(None));
        assert!(from_json(&json!(["7a"])).is_err());
    }

    #[test]
    fn test_csv_labels() {
        assert_eq!(from_csv(" 8a"), Some(String::from("8a")));
        assert_eq!(from_csv("  "), None);
    }
}
