use cards_sdk::username::normalize_username;
use cards_sdk::{ArrayField, CardDraft};

use super::error::DomainError;
use super::fields::CardFields;

/// Route segments a public username must never shadow.
pub const RESERVED_USERNAMES: &[&str] = &[
    "dashboard", "login", "logout", "signup", "about", "api", "static", "storage", "health",
    "cards",
];

#[must_use]
pub fn is_reserved(username: &str) -> bool {
    RESERVED_USERNAMES.contains(&username)
}

/// Size limits applied to every saved field set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLimits {
    pub max_field_length: usize,
    pub max_array_len: usize,
}

impl Default for FormLimits {
    fn default() -> Self {
        Self {
            max_field_length: 2048,
            max_array_len: 32,
        }
    }
}

impl FormLimits {
    fn check_length(&self, field: &str, value: &str) -> Result<(), DomainError> {
        if value.chars().count() > self.max_field_length {
            return Err(DomainError::validation(
                field,
                format!("exceeds maximum length of {}", self.max_field_length),
            ));
        }
        Ok(())
    }

    fn check_list(&self, field: ArrayField, values: &[String]) -> Result<(), DomainError> {
        if values.len() > self.max_array_len {
            return Err(DomainError::validation(
                field.as_str(),
                format!("accepts at most {} entries", self.max_array_len),
            ));
        }
        values
            .iter()
            .try_for_each(|v| self.check_length(field.as_str(), v))
    }
}

/// Validates a draft in place: trims the name, normalizes the username and
/// enforces the limits.
pub fn validate_draft(mut draft: CardDraft, limits: &FormLimits) -> Result<CardDraft, DomainError> {
    draft.name = draft.name.trim().to_owned();
    if draft.name.is_empty() {
        return Err(DomainError::validation(CardFields::NAME, "Name is required"));
    }
    draft.username = normalize_username(&draft.username);
    if draft.username.is_empty() {
        return Err(DomainError::validation(
            CardFields::USERNAME,
            "Username is required",
        ));
    }
    if is_reserved(&draft.username) {
        return Err(DomainError::validation(
            CardFields::USERNAME,
            format!("'{}' is reserved", draft.username),
        ));
    }

    limits.check_length(CardFields::NAME, &draft.name)?;
    limits.check_length(CardFields::USERNAME, &draft.username)?;
    limits.check_length(CardFields::BACKGROUND_VALUE, draft.background.value())?;

    for (field, value) in [
        (CardFields::PROFILE_PICTURE_URL, &draft.profile_picture_url),
        (CardFields::WHATSAPP, &draft.whatsapp),
        (CardFields::INSTAGRAM, &draft.instagram),
        (CardFields::LOCATION, &draft.location),
    ] {
        if let Some(value) = value {
            limits.check_length(field, value)?;
        }
    }

    limits.check_list(ArrayField::Emails, &draft.emails)?;
    limits.check_list(ArrayField::PhoneNumbers, &draft.phone_numbers)?;
    limits.check_list(ArrayField::Images, &draft.images)?;
    limits.check_list(ArrayField::Position, &draft.position)?;

    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, username: &str) -> CardDraft {
        CardDraft::seeded(name, username)
    }

    #[test]
    fn normalizes_username_and_trims_name() {
        let d = validate_draft(draft("  Ada  ", "Ada.L"), &FormLimits::default()).unwrap();
        assert_eq!(d.name, "Ada");
        assert_eq!(d.username, "adal");
    }

    #[test]
    fn rejects_blank_name() {
        let err = validate_draft(draft("   ", "ada"), &FormLimits::default()).unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "name"));
    }

    #[test]
    fn rejects_username_that_normalizes_to_empty() {
        let err = validate_draft(draft("Ada", "!!!"), &FormLimits::default()).unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "username"));
    }

    #[test]
    fn rejects_reserved_route_segments() {
        let err = validate_draft(draft("Ada", "Dashboard"), &FormLimits::default()).unwrap_err();
        assert!(err.to_string().contains("reserved"));
    }

    #[test]
    fn enforces_array_and_field_limits() {
        let limits = FormLimits {
            max_field_length: 8,
            max_array_len: 1,
        };
        let mut d = draft("Ada", "ada");
        d.emails = vec!["a@b.c".to_owned(), "d@e.f".to_owned()];
        assert!(validate_draft(d, &limits).is_err());

        let mut d = draft("Ada", "ada");
        d.location = Some("somewhere far".to_owned());
        assert!(validate_draft(d, &limits).is_err());
    }
}
