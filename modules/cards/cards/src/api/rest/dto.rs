use cards_sdk::{ArrayField, Background, BackgroundType, Card, PublicCard, UsernameAvailability};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::form::CardForm;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct BackgroundDto {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl From<&Background> for BackgroundDto {
    fn from(bg: &Background) -> Self {
        Self {
            kind: bg.kind().as_str().to_owned(),
            value: bg.value().to_owned(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct CardDto {
    #[schema(value_type = String)]
    pub id: Uuid,
    #[schema(value_type = String)]
    pub user_id: Uuid,
    pub name: String,
    pub username: String,
    pub profile_picture_url: Option<String>,
    pub position: Vec<String>,
    pub background: BackgroundDto,
    pub dark_mode: bool,
    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub images: Vec<String>,
    pub whatsapp: Option<String>,
    pub instagram: Option<String>,
    pub location: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: OffsetDateTime,
}

impl From<Card> for CardDto {
    fn from(card: Card) -> Self {
        Self {
            id: card.id,
            user_id: card.user_id,
            background: BackgroundDto::from(&card.background),
            name: card.name,
            username: card.username,
            profile_picture_url: card.profile_picture_url,
            position: card.position,
            dark_mode: card.dark_mode,
            emails: card.emails,
            phone_numbers: card.phone_numbers,
            images: card.images,
            whatsapp: card.whatsapp,
            instagram: card.instagram,
            location: card.location,
            created_at: card.created_at,
            updated_at: card.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct SaveCardResponse {
    pub card: CardDto,
    pub message: String,
}

/// Full-form card submission.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct SaveCardRequest {
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub position: Vec<String>,
    #[serde(default)]
    pub background: Option<BackgroundDto>,
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub phone_numbers: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl SaveCardRequest {
    /// Applies the request to a fresh form, with the same input cleaning the
    /// dashboard performs.
    #[must_use]
    pub fn into_form(self) -> CardForm {
        let mut form = CardForm::default();
        form.set_name(&self.name);
        form.set_username(&self.username);
        form.set_profile_picture(self.profile_picture_url.as_deref().unwrap_or_default());
        for (field, values) in [
            (ArrayField::Position, &self.position),
            (ArrayField::Emails, &self.emails),
            (ArrayField::PhoneNumbers, &self.phone_numbers),
            (ArrayField::Images, &self.images),
        ] {
            for value in values {
                form.append(field, value);
            }
        }
        let background = self
            .background
            .and_then(|bg| {
                let kind = bg.kind.parse::<BackgroundType>().ok()?;
                Background::of_kind(kind, &bg.value)
            })
            .unwrap_or_default();
        form.set_background(background);
        form.dark_mode = self.dark_mode;
        form.set_whatsapp(self.whatsapp.as_deref().unwrap_or_default());
        form.set_instagram(self.instagram.as_deref().unwrap_or_default());
        form.set_location(self.location.as_deref().unwrap_or_default());
        form
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityDto {
    pub username: String,
    pub available: bool,
    pub status: String,
}

impl AvailabilityDto {
    #[must_use]
    pub fn new(username: String, availability: UsernameAvailability) -> Self {
        Self {
            username,
            available: availability.is_available(),
            status: availability.as_str().to_owned(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PublicCardDto {
    pub title: String,
    pub description: String,
    pub public_url: String,
    pub card: CardDto,
}

impl PublicCardDto {
    #[must_use]
    pub fn new(public: PublicCard, public_url: String) -> Self {
        Self {
            title: public.title,
            description: public.description,
            public_url,
            card: public.card.into(),
        }
    }
}
