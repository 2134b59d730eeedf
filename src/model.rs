/// Review state of a homework submission as reported by the status API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Returns `None` for codes outside the verdict table.
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(HomeworkStatus::Approved),
            "reviewing" => Some(HomeworkStatus::Reviewing),
            "rejected" => Some(HomeworkStatus::Rejected),
            _ => None,
        }
    }

    /// Human-readable verdict sent to the chat.
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_codes() {
        assert_eq!(HomeworkStatus::parse("approved"), Some(HomeworkStatus::Approved));
        assert_eq!(HomeworkStatus::parse("reviewing"), Some(HomeworkStatus::Reviewing));
        assert_eq!(HomeworkStatus::parse("rejected"), Some(HomeworkStatus::Rejected));
    }

    #[test]
    fn parse_is_exact() {
        assert_eq!(HomeworkStatus::parse("archived"), None);
        assert_eq!(HomeworkStatus::parse("Approved"), None);
        assert_eq!(HomeworkStatus::parse(" approved"), None);
    }
}
