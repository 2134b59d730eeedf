use serde_json::Value;

use crate::error::PollError;
use crate::model::HomeworkStatus;

pub const NAME_FIELD: &str = "homework_name";
pub const STATUS_FIELD: &str = "status";

/// Build the chat message for one homework record.
///
/// Status codes outside the verdict table are rejected with
/// [`PollError::UnknownStatus`].
pub fn translate(item: &Value) -> Result<String, PollError> {
    let name = non_empty_str(item, NAME_FIELD).ok_or(PollError::MissingField(NAME_FIELD))?;
    let code = non_empty_str(item, STATUS_FIELD).ok_or(PollError::MissingField(STATUS_FIELD))?;
    let status =
        HomeworkStatus::parse(code).ok_or_else(|| PollError::UnknownStatus(code.to_string()))?;
    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name,
        status.verdict()
    ))
}

fn non_empty_str<'a>(item: &'a Value, field: &str) -> Option<&'a str> {
    item.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn approved_message_has_name_and_verdict() {
        let msg = translate(&json!({"homework_name": "proj1", "status": "approved"})).unwrap();
        assert!(msg.contains("proj1"));
        assert!(msg.contains(HomeworkStatus::Approved.verdict()));
        assert_eq!(
            msg,
            "Изменился статус проверки работы \"proj1\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn missing_name() {
        let err = translate(&json!({"status": "approved"})).unwrap_err();
        assert!(matches!(err, PollError::MissingField("homework_name")));

        let err = translate(&json!({"homework_name": "", "status": "approved"})).unwrap_err();
        assert!(matches!(err, PollError::MissingField("homework_name")));
    }

    #[test]
    fn missing_status() {
        let err = translate(&json!({"homework_name": "proj1"})).unwrap_err();
        assert!(matches!(err, PollError::MissingField("status")));

        let err = translate(&json!({"homework_name": "proj1", "status": null})).unwrap_err();
        assert!(matches!(err, PollError::MissingField("status")));
    }

    #[test]
    fn non_string_name_is_not_usable() {
        let err = translate(&json!({"homework_name": 5, "status": "approved"})).unwrap_err();
        assert!(matches!(err, PollError::MissingField("homework_name")));
        assert_eq!(
            err.to_string(),
            "homework record has no usable `homework_name` field"
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = translate(&json!({"homework_name": "proj1", "status": "archived"})).unwrap_err();
        match err {
            PollError::UnknownStatus(code) => assert_eq!(code, "archived"),
            other => panic!("wrong error: {other:?}"),
        }
    }

    #[test]
    fn name_is_checked_before_status() {
        let err = translate(&json!({})).unwrap_err();
        assert!(matches!(err, PollError::MissingField("homework_name")));
    }
}
