//! Public models for the cards module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the cards module and its consumers.

use std::fmt;

use time::OffsetDateTime;
use uuid::Uuid;

use crate::background::Background;

/// Persisted profile card. One per account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub username: String,
    pub profile_picture_url: Option<String>,
    pub position: Vec<String>,
    pub background: Background,
    pub dark_mode: bool,
    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub images: Vec<String>,
    pub whatsapp: Option<String>,
    pub instagram: Option<String>,
    pub location: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Validated field set written by one save. Identity and timestamps are
/// assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardDraft {
    pub name: String,
    pub username: String,
    pub profile_picture_url: Option<String>,
    pub position: Vec<String>,
    pub background: Background,
    pub dark_mode: bool,
    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub images: Vec<String>,
    pub whatsapp: Option<String>,
    pub instagram: Option<String>,
    pub location: Option<String>,
}

impl CardDraft {
    /// Seed used when an account opens the dashboard without a card.
    #[must_use]
    pub fn seeded(name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            ..Self::default()
        }
    }
}

impl From<Card> for CardDraft {
    fn from(card: Card) -> Self {
        Self {
            name: card.name,
            username: card.username,
            profile_picture_url: card.profile_picture_url,
            position: card.position,
            background: card.background,
            dark_mode: card.dark_mode,
            emails: card.emails,
            phone_numbers: card.phone_numbers,
            images: card.images,
            whatsapp: card.whatsapp,
            instagram: card.instagram,
            location: card.location,
        }
    }
}

/// Ordered list fields of a card that the form edits entry by entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayField {
    Emails,
    PhoneNumbers,
    Images,
    Position,
}

impl ArrayField {
    pub const ALL: [Self; 4] = [Self::Emails, Self::PhoneNumbers, Self::Images, Self::Position];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Emails => "emails",
            Self::PhoneNumbers => "phone_numbers",
            Self::Images => "images",
            Self::Position => "position",
        }
    }
}

impl fmt::Display for ArrayField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a save: which branch of the upsert ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

impl SaveOutcome {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Created => "Card created successfully!",
            Self::Updated => "Card updated successfully!",
        }
    }
}

/// A card resolved for anonymous viewing, with its document metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicCard {
    pub card: Card,
    pub title: String,
    pub description: String,
}

impl PublicCard {
    #[must_use]
    pub fn new(card: Card) -> Self {
        let title = format!("{} - SterlingCards", card.name);
        let description = format!("View {}'s digital card on SterlingCards", card.name);
        Self {
            card,
            title,
            description,
        }
    }
}

/// Answer of the best-effort username pre-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsernameAvailability {
    Available,
    Taken,
    Reserved,
    Invalid,
}

impl UsernameAvailability {
    #[must_use]
    pub fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Taken => "taken",
            Self::Reserved => "reserved",
            Self::Invalid => "invalid",
        }
    }
}
