use serde_json::Value;

use homework_common::error::TrackerError;
use homework_common::types::Homework;

/// Extract the homework records from an API response body.
///
/// The body must be an object with a `homeworks` array of objects. An empty
/// array is a valid "nothing new" answer.
pub fn check_response(body: &Value) -> Result<Vec<Homework>, TrackerError> {
    let object = body
        .as_object()
        .ok_or_else(|| TrackerError::Shape("response is not a JSON object".to_string()))?;

    let homeworks = object
        .get("homeworks")
        .ok_or_else(|| TrackerError::Shape("response has no `homeworks` key".to_string()))?
        .as_array()
        .ok_or_else(|| TrackerError::Shape("`homeworks` is not a list".to_string()))?;

    homeworks
        .iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item.clone())
                .map_err(|e| TrackerError::Shape(format!("homework #{i} is malformed: {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_extracts_records_in_order() {
        let body = json!({
            "homeworks": [
                {"homework_name": "hw2", "status": "reviewing"},
                {"homework_name": "hw1", "status": "approved"}
            ],
            "current_date": 1700000000
        });
        let homeworks = check_response(&body).unwrap();
        assert_eq!(homeworks.len(), 2);
        assert_eq!(homeworks[0].homework_name.as_deref(), Some("hw2"));
        assert_eq!(homeworks[1].status.as_deref(), Some("approved"));
    }

    #[test]
    fn test_empty_list_is_valid() {
        let homeworks = check_response(&json!({"homeworks": []})).unwrap();
        assert!(homeworks.is_empty());
    }

    #[test]
    fn test_not_an_object() {
        let err = check_response(&json!([{"homework_name": "hw1"}])).unwrap_err();
        assert!(matches!(err, TrackerError::Shape(_)));
    }

    #[test]
    fn test_missing_key() {
        let err = check_response(&json!({"current_date": 0})).unwrap_err();
        assert!(matches!(err, TrackerError::Shape(msg) if msg.contains("homeworks")));
    }

    #[test]
    fn test_homeworks_not_a_list() {
        let err = check_response(&json!({"homeworks": {"homework_name": "hw1"}})).unwrap_err();
        assert!(matches!(err, TrackerError::Shape(_)));
    }

    #[test]
    fn test_element_not_an_object() {
        let err = check_response(&json!({"homeworks": ["hw1"]})).unwrap_err();
        assert!(matches!(err, TrackerError::Shape(msg) if msg.starts_with("homework #0")));
    }
}
