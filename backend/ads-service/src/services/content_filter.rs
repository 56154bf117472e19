use crate::error::AppError;

/// Terms that may not appear in user-submitted listing text
///
/// The list is a constructor argument, not a hardcoded lookup, so deployments
/// can swap it without touching the matching logic.
pub const DEFAULT_BLOCKED_TERMS: [&str; 9] = [
    "Полиция",
    "Обман",
    "Наркотики",
    "Казино",
    "Оружие",
    "Криптовалюта",
    "Радар",
    "Крипта",
    "Бесплатно",
];

/// Which user-submitted field is being screened
///
/// Only affects the rejection message; matching is field-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeratedField {
    Title,
    Description,
    Content,
}

impl ModeratedField {
    fn violation_message(&self, token: &str) -> String {
        match self {
            ModeratedField::Title => format!("Title contains a blocked word: {}", token),
            ModeratedField::Description => {
                format!("Description contains a blocked word: {}", token)
            }
            ModeratedField::Content => {
                format!("Review content contains a blocked word: {}", token)
            }
        }
    }
}

/// Blocked-term screen for advertisement and review text
///
/// Matching is case-insensitive over whitespace-delimited tokens. A token
/// trips the filter when it contains a blocked term or is itself contained
/// in one, so both "крипто" (a prefix of "криптовалюта") and "супер-казино"
/// (which embeds "казино") are rejected.
#[derive(Debug, Clone)]
pub struct ContentFilter {
    terms: Vec<String>,
}

impl ContentFilter {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ContentFilter {
            terms: terms
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn with_default_terms() -> Self {
        Self::new(DEFAULT_BLOCKED_TERMS)
    }

    /// Find the first offending token in `text`, scanning tokens in order
    fn find_blocked_token(&self, text: &str) -> Option<String> {
        let lowered = text.to_lowercase();
        for token in lowered.split_whitespace() {
            for term in &self.terms {
                if term.contains(token) || token.contains(term.as_str()) {
                    return Some(token.to_string());
                }
            }
        }
        None
    }

    /// Screen one field, rejecting with a field-scoped policy error
    pub fn validate(&self, field: ModeratedField, value: &str) -> Result<(), AppError> {
        match self.find_blocked_token(value) {
            Some(token) => Err(AppError::ContentPolicy(field.violation_message(&token))),
            None => Ok(()),
        }
    }

    /// Screen an advertisement's text fields, title first
    pub fn validate_advertisement(&self, title: &str, description: &str) -> Result<(), AppError> {
        self.validate(ModeratedField::Title, title)?;
        self.validate(ModeratedField::Description, description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy_message(result: Result<(), AppError>) -> String {
        match result {
            Err(AppError::ContentPolicy(msg)) => msg,
            other => panic!("expected content policy rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_exact_blocked_term_rejected() {
        let filter = ContentFilter::with_default_terms();
        let msg = policy_message(filter.validate(ModeratedField::Title, "Полиция"));
        assert_eq!(msg, "Title contains a blocked word: полиция");
    }

    #[test]
    fn test_case_insensitive() {
        let filter = ContentFilter::with_default_terms();
        assert!(filter.validate(ModeratedField::Title, "КАЗИНО").is_err());
        assert!(filter.validate(ModeratedField::Title, "кАзИнО").is_err());
    }

    #[test]
    fn test_token_inside_blocked_term_rejected() {
        // "крипто" is a substring of "криптовалюта"
        let filter = ContentFilter::with_default_terms();
        let msg = policy_message(
            filter.validate(ModeratedField::Description, "выгодное крипто предложение"),
        );
        assert_eq!(msg, "Description contains a blocked word: крипто");
    }

    #[test]
    fn test_blocked_term_inside_token_rejected() {
        // "супер-казино" embeds "казино"
        let filter = ContentFilter::with_default_terms();
        let msg = policy_message(filter.validate(ModeratedField::Title, "супер-казино открылось"));
        assert_eq!(msg, "Title contains a blocked word: супер-казино");
    }

    #[test]
    fn test_clean_text_accepted() {
        let filter = ContentFilter::with_default_terms();
        assert!(filter
            .validate(ModeratedField::Title, "Продам велосипед недорого")
            .is_ok());
        assert!(filter
            .validate_advertisement("Детская коляска", "Отличное состояние")
            .is_ok());
    }

    #[test]
    fn test_first_offending_token_wins() {
        let filter = ContentFilter::with_default_terms();
        let msg = policy_message(filter.validate(ModeratedField::Title, "обман и казино"));
        assert_eq!(msg, "Title contains a blocked word: обман");
    }

    #[test]
    fn test_title_checked_before_description() {
        let filter = ContentFilter::with_default_terms();
        let msg = policy_message(filter.validate_advertisement("казино", "оружие"));
        assert_eq!(msg, "Title contains a blocked word: казино");
    }

    #[test]
    fn test_review_content_message() {
        let filter = ContentFilter::with_default_terms();
        let msg = policy_message(filter.validate(ModeratedField::Content, "продают наркотики"));
        assert_eq!(msg, "Review content contains a blocked word: наркотики");
    }

    #[test]
    fn test_custom_term_list() {
        let filter = ContentFilter::new(["spam"]);
        assert!(filter.validate(ModeratedField::Title, "buy spam here").is_err());
        // default list no longer applies
        assert!(filter.validate(ModeratedField::Title, "казино").is_ok());
    }

    #[test]
    fn test_validation_is_idempotent() {
        let filter = ContentFilter::with_default_terms();
        let first = policy_message(filter.validate(ModeratedField::Title, "Радар детектор"));
        let second = policy_message(filter.validate(ModeratedField::Title, "Радар детектор"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_text_accepted() {
        let filter = ContentFilter::with_default_terms();
        assert!(filter.validate(ModeratedField::Title, "").is_ok());
        assert!(filter.validate(ModeratedField::Title, "   ").is_ok());
    }
}
