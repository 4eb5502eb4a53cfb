//! Draft card state edited on the dashboard.

use cards_sdk::username::normalize_username;
use cards_sdk::{AccountContext, ArrayField, Background, Card, CardDraft};
use time::OffsetDateTime;
use uuid::Uuid;

use super::error::DomainError;
use super::validation::{FormLimits, validate_draft};

/// Editable copy of every card field. Nothing here is persisted until the
/// form is validated and saved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardForm {
    pub name: String,
    pub username: String,
    pub profile_picture_url: String,
    pub position: Vec<String>,
    pub background: Background,
    pub dark_mode: bool,
    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub images: Vec<String>,
    pub whatsapp: String,
    pub instagram: String,
    pub location: String,
}

impl CardForm {
    #[must_use]
    pub fn from_card(card: &Card) -> Self {
        let mut form = Self::default();
        form.sync_from(card);
        form
    }

    /// Replace the draft with the persisted record.
    pub fn sync_from(&mut self, card: &Card) {
        self.name.clone_from(&card.name);
        self.username.clone_from(&card.username);
        self.profile_picture_url = card.profile_picture_url.clone().unwrap_or_default();
        self.position.clone_from(&card.position);
        self.background = card.background.clone();
        self.dark_mode = card.dark_mode;
        self.emails.clone_from(&card.emails);
        self.phone_numbers.clone_from(&card.phone_numbers);
        self.images.clone_from(&card.images);
        self.whatsapp = card.whatsapp.clone().unwrap_or_default();
        self.instagram = card.instagram.clone().unwrap_or_default();
        self.location = card.location.clone().unwrap_or_default();
    }

    fn list_mut(&mut self, field: ArrayField) -> &mut Vec<String> {
        match field {
            ArrayField::Emails => &mut self.emails,
            ArrayField::PhoneNumbers => &mut self.phone_numbers,
            ArrayField::Images => &mut self.images,
            ArrayField::Position => &mut self.position,
        }
    }

    #[must_use]
    pub fn list(&self, field: ArrayField) -> &[String] {
        match field {
            ArrayField::Emails => &self.emails,
            ArrayField::PhoneNumbers => &self.phone_numbers,
            ArrayField::Images => &self.images,
            ArrayField::Position => &self.position,
        }
    }

    /// Appends a trimmed entry; blank input is ignored.
    pub fn append(&mut self, field: ArrayField, value: &str) {
        let value = value.trim();
        if !value.is_empty() {
            self.list_mut(field).push(value.to_owned());
        }
    }

    /// Removes the entry at `index`; out of range is a no-op.
    pub fn remove_at(&mut self, field: ArrayField, index: usize) {
        let list = self.list_mut(field);
        if index < list.len() {
            list.remove(index);
        }
    }

    /// Edits one entry in place; out of range is a no-op.
    pub fn set_entry(&mut self, field: ArrayField, index: usize, value: &str) {
        if let Some(slot) = self.list_mut(field).get_mut(index) {
            value.trim().clone_into(slot);
        }
    }

    pub fn set_name(&mut self, value: &str) {
        value.clone_into(&mut self.name);
    }

    pub fn set_username(&mut self, value: &str) {
        self.username = normalize_username(value);
    }

    pub fn set_profile_picture(&mut self, url: &str) {
        url.trim().clone_into(&mut self.profile_picture_url);
    }

    pub fn set_whatsapp(&mut self, value: &str) {
        value.trim().clone_into(&mut self.whatsapp);
    }

    pub fn set_instagram(&mut self, value: &str) {
        self.instagram = value.trim().replace('@', "");
    }

    pub fn set_location(&mut self, value: &str) {
        value.trim().clone_into(&mut self.location);
    }

    pub fn set_background(&mut self, background: Background) {
        self.background = background;
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    fn to_draft(&self) -> CardDraft {
        CardDraft {
            name: self.name.clone(),
            username: self.username.clone(),
            profile_picture_url: non_empty(&self.profile_picture_url),
            position: self.position.clone(),
            background: self.background.clone(),
            dark_mode: self.dark_mode,
            emails: self.emails.clone(),
            phone_numbers: self.phone_numbers.clone(),
            images: self.images.clone(),
            whatsapp: non_empty(&self.whatsapp),
            instagram: non_empty(&self.instagram),
            location: non_empty(&self.location),
        }
    }

    pub fn validate(&self, limits: &FormLimits) -> Result<CardDraft, DomainError> {
        validate_draft(self.to_draft(), limits)
    }

    /// Card shown in the live preview. Absent until both name and username
    /// are filled in.
    #[must_use]
    pub fn preview(&self, ctx: &AccountContext, saved: Option<&Card>) -> Option<Card> {
        let name = self.name.trim();
        let username = normalize_username(&self.username);
        if name.is_empty() || username.is_empty() {
            return None;
        }
        let draft = self.to_draft();
        let now = OffsetDateTime::now_utc();
        Some(Card {
            id: saved.map_or_else(Uuid::nil, |c| c.id),
            user_id: ctx.account_id(),
            name: name.to_owned(),
            username,
            profile_picture_url: draft.profile_picture_url,
            position: draft.position,
            background: draft.background,
            dark_mode: draft.dark_mode,
            emails: draft.emails,
            phone_numbers: draft.phone_numbers,
            images: draft.images,
            whatsapp: draft.whatsapp,
            instagram: draft.instagram,
            location: draft.location,
            created_at: saved.map_or(now, |c| c.created_at),
            updated_at: now,
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
