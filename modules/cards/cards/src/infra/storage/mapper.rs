use cards_sdk::{Background, Card, CardDraft};
use sea_orm::ActiveValue::{NotSet, Set};
use time::OffsetDateTime;
use uuid::Uuid;

use super::entity::{ActiveModel, Model, StringList};

fn list(value: Option<StringList>) -> Vec<String> {
    value.map(|l| l.0).unwrap_or_default()
}

impl From<Model> for Card {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            name: m.name,
            username: m.username,
            profile_picture_url: m.profile_picture_url,
            position: list(m.position),
            background: Background::from_parts(
                m.background_type.as_deref(),
                m.background_value.as_deref(),
            ),
            dark_mode: m.dark_mode,
            emails: list(m.emails),
            phone_numbers: list(m.phone_numbers),
            images: list(m.images),
            whatsapp: m.whatsapp,
            instagram: m.instagram,
            location: m.location,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Active model carrying every editable column of `draft`. Identity and
/// `created_at` are left unset for the caller to fill in.
pub fn draft_to_active(draft: CardDraft, now: OffsetDateTime) -> ActiveModel {
    let (kind, value) = draft.background.into_parts();
    ActiveModel {
        id: NotSet,
        user_id: NotSet,
        name: Set(draft.name),
        username: Set(draft.username),
        profile_picture_url: Set(draft.profile_picture_url),
        position: Set(Some(StringList(draft.position))),
        background_type: Set(Some(kind.as_str().to_owned())),
        background_value: Set(Some(value)),
        dark_mode: Set(draft.dark_mode),
        emails: Set(Some(StringList(draft.emails))),
        phone_numbers: Set(Some(StringList(draft.phone_numbers))),
        images: Set(Some(StringList(draft.images))),
        whatsapp: Set(draft.whatsapp),
        instagram: Set(draft.instagram),
        location: Set(draft.location),
        created_at: NotSet,
        updated_at: Set(now),
    }
}

/// Active model for a brand new row.
pub fn new_card(user_id: Uuid, draft: CardDraft, now: OffsetDateTime) -> ActiveModel {
    let mut active = draft_to_active(draft, now);
    active.id = Set(Uuid::now_v7());
    active.user_id = Set(user_id);
    active.created_at = Set(now);
    active
}
