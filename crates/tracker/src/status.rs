use homework_common::error::TrackerError;
use homework_common::types::{Homework, HomeworkStatus};

/// Render the chat message announcing a submission's current status.
pub fn parse_status(homework: &Homework) -> Result<String, TrackerError> {
    let name = homework
        .homework_name
        .as_deref()
        .ok_or(TrackerError::MissingField("homework_name"))?;
    let status: HomeworkStatus = homework
        .status
        .as_deref()
        .ok_or(TrackerError::MissingField("status"))?
        .parse()?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name,
        status.verdict()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn homework(name: Option<&str>, status: Option<&str>) -> Homework {
        Homework {
            homework_name: name.map(str::to_string),
            status: status.map(str::to_string),
        }
    }

    #[test]
    fn test_approved_message() {
        let message = parse_status(&homework(Some("hw1"), Some("approved"))).unwrap();
        assert!(message.contains("hw1"));
        assert!(message.ends_with(HomeworkStatus::Approved.verdict()));
        assert_eq!(
            message,
            "Изменился статус проверки работы \"hw1\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn test_same_status_same_text() {
        let hw = homework(Some("hw1"), Some("rejected"));
        assert_eq!(parse_status(&hw).unwrap(), parse_status(&hw.clone()).unwrap());
    }

    #[test]
    fn test_reviewing_message() {
        let message = parse_status(&homework(Some("final"), Some("reviewing"))).unwrap();
        assert!(message.ends_with("Работа взята на проверку ревьюером."));
    }

    #[test]
    fn test_unknown_status() {
        let err = parse_status(&homework(Some("hw1"), Some("on_hold"))).unwrap_err();
        assert!(matches!(err, TrackerError::UnknownStatus(s) if s == "on_hold"));
    }

    #[test]
    fn test_missing_name() {
        let err = parse_status(&homework(None, Some("approved"))).unwrap_err();
        assert!(matches!(err, TrackerError::MissingField("homework_name")));
    }

    #[test]
    fn test_missing_status() {
        let err = parse_status(&homework(Some("hw1"), None)).unwrap_err();
        assert!(matches!(err, TrackerError::MissingField("status")));
    }
}
