//! Display model derived from a [`Card`]; templates only see this.

use cards_sdk::{Background, Card};
use serde::Serialize;

use super::palette::Palette;
use crate::domain::publish::public_url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Email,
    Phone,
    Whatsapp,
    Instagram,
    Location,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactLink {
    pub kind: ContactKind,
    pub label: String,
    /// `None` for display-only entries.
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackgroundView {
    pub class: String,
    pub style: String,
    pub overlay: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub name: String,
    pub username: String,
    pub initial: String,
    pub profile_picture_url: Option<String>,
    pub positions: Vec<String>,
    pub background: BackgroundView,
    pub palette: Palette,
    pub dark_mode: bool,
    pub quick_contacts: Vec<ContactLink>,
    pub gallery: Vec<String>,
    pub details: Vec<ContactLink>,
    pub public_url: String,
}

impl CardView {
    #[must_use]
    pub fn new(card: &Card, base_url: &str) -> Self {
        let initial = card
            .name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default();

        let mut quick_contacts = Vec::new();
        if let Some(email) = card.emails.first() {
            quick_contacts.push(email_link(email));
        }
        if let Some(phone) = card.phone_numbers.first() {
            quick_contacts.push(phone_link(phone));
        }
        quick_contacts.extend(card.whatsapp.as_deref().and_then(whatsapp_link));
        quick_contacts.extend(card.instagram.as_deref().and_then(instagram_link));
        quick_contacts.extend(card.location.as_deref().and_then(location_line));

        let mut details: Vec<ContactLink> = card.emails.iter().map(|e| email_link(e)).collect();
        details.extend(card.phone_numbers.iter().map(|p| phone_link(p)));
        details.extend(card.whatsapp.as_deref().and_then(whatsapp_entry));
        details.extend(card.instagram.as_deref().and_then(instagram_link));
        details.extend(card.location.as_deref().and_then(location_line));

        Self {
            name: card.name.clone(),
            username: card.username.clone(),
            initial,
            profile_picture_url: card.profile_picture_url.clone(),
            positions: card.position.clone(),
            background: background_view(&card.background),
            palette: Palette::for_mode(card.dark_mode),
            dark_mode: card.dark_mode,
            quick_contacts,
            gallery: card.images.clone(),
            details,
            public_url: public_url(base_url, &card.username),
        }
    }
}

fn background_view(background: &Background) -> BackgroundView {
    match background {
        Background::Gradient(token) => BackgroundView {
            class: format!("bg-gradient-to-br {}", token.as_str()),
            style: String::new(),
            overlay: false,
        },
        Background::Color(color) => BackgroundView {
            class: String::new(),
            style: format!("background-color:{}", css_safe(color.as_str())),
            overlay: false,
        },
        Background::Image(url) => BackgroundView {
            class: "bg-cover bg-center".to_owned(),
            style: format!("background-image:url('{}')", url_in_css(url.as_str())),
            overlay: true,
        },
    }
}

/// Keeps only characters that can appear in a CSS color expression.
fn css_safe(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || "#(),.% -".contains(*c))
        .collect()
}

/// Percent-encodes characters that would end a quoted CSS `url()`.
fn url_in_css(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '\'' => out.push_str("%27"),
            '"' => out.push_str("%22"),
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            '\\' => out.push_str("%5C"),
            c if c.is_whitespace() || c.is_control() => out.push_str("%20"),
            c => out.push(c),
        }
    }
    out
}

fn email_link(email: &str) -> ContactLink {
    ContactLink {
        kind: ContactKind::Email,
        label: email.to_owned(),
        href: Some(format!("mailto:{email}")),
    }
}

fn phone_link(phone: &str) -> ContactLink {
    ContactLink {
        kind: ContactKind::Phone,
        label: phone.to_owned(),
        href: Some(format!("tel:{phone}")),
    }
}

fn whatsapp_link(number: &str) -> Option<ContactLink> {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    (!digits.is_empty()).then(|| ContactLink {
        kind: ContactKind::Whatsapp,
        label: number.to_owned(),
        href: Some(format!("https://wa.me/{digits}")),
    })
}

/// Details-panel entry: linked when dialable, plain text otherwise.
fn whatsapp_entry(number: &str) -> Option<ContactLink> {
    whatsapp_link(number).or_else(|| {
        let label = number.trim();
        (!label.is_empty()).then(|| ContactLink {
            kind: ContactKind::Whatsapp,
            label: label.to_owned(),
            href: None,
        })
    })
}

fn instagram_link(handle: &str) -> Option<ContactLink> {
    let handle = handle.trim().trim_start_matches('@');
    (!handle.is_empty()).then(|| ContactLink {
        kind: ContactKind::Instagram,
        label: format!("@{handle}"),
        href: Some(format!("https://instagram.com/{handle}")),
    })
}

fn location_line(location: &str) -> Option<ContactLink> {
    let location = location.trim();
    (!location.is_empty()).then(|| ContactLink {
        kind: ContactKind::Location,
        label: location.to_owned(),
        href: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn card() -> Card {
        Card {
            id: Uuid::now_v7(),
            user_id: Uuid::new_v4(),
            name: "ada lovelace".to_owned(),
            username: "ada".to_owned(),
            profile_picture_url: None,
            position: vec![],
            background: Background::default(),
            dark_mode: false,
            emails: vec!["ada@example.com".to_owned(), "ada@work.example".to_owned()],
            phone_numbers: vec![],
            images: vec![],
            whatsapp: Some("+44 (20) 7946-0000".to_owned()),
            instagram: Some("@ada".to_owned()),
            location: Some("London".to_owned()),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn quick_contacts_follow_fixed_order() {
        let view = CardView::new(&card(), "http://localhost:3000");
        let kinds: Vec<_> = view.quick_contacts.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            [
                ContactKind::Email,
                ContactKind::Whatsapp,
                ContactKind::Instagram,
                ContactKind::Location
            ]
        );
        assert_eq!(
            view.quick_contacts[0].href.as_deref(),
            Some("mailto:ada@example.com")
        );
        assert_eq!(
            view.quick_contacts[1].href.as_deref(),
            Some("https://wa.me/442079460000")
        );
        assert_eq!(
            view.quick_contacts[2].href.as_deref(),
            Some("https://instagram.com/ada")
        );
        assert_eq!(view.quick_contacts[3].href, None);
    }

    #[test]
    fn details_list_every_email() {
        let view = CardView::new(&card(), "http://localhost:3000");
        let emails = view
            .details
            .iter()
            .filter(|c| c.kind == ContactKind::Email)
            .count();
        assert_eq!(emails, 2);
    }

    #[test]
    fn undialable_whatsapp_stays_in_details_as_text() {
        let mut card = card();
        card.whatsapp = Some("ask me".to_owned());
        let view = CardView::new(&card, "http://localhost:3000");

        assert!(
            view.quick_contacts
                .iter()
                .all(|c| c.kind != ContactKind::Whatsapp)
        );
        let entry = view
            .details
            .iter()
            .find(|c| c.kind == ContactKind::Whatsapp)
            .unwrap();
        assert_eq!(entry.label, "ask me");
        assert_eq!(entry.href, None);
    }

    #[test]
    fn initial_is_uppercased() {
        assert_eq!(CardView::new(&card(), "http://x").initial, "A");
    }

    #[test]
    fn public_url_trims_base_slash() {
        let view = CardView::new(&card(), "https://cards.example/");
        assert_eq!(view.public_url, "https://cards.example/ada");
    }

    #[test]
    fn background_variants_map_to_fill() {
        let gradient = background_view(&Background::default());
        assert_eq!(gradient.class, "bg-gradient-to-br from-blue-500 to-purple-600");

        let color = background_view(&Background::color("#FFD700; color:red").unwrap());
        assert_eq!(color.style, "background-color:#FFD700 colorred");

        let image = background_view(&Background::image("https://x/a b'.png").unwrap());
        assert!(image.overlay);
        assert_eq!(image.style, "background-image:url('https://x/a%20b%27.png')");
    }

    #[test]
    fn dark_mode_swaps_palette() {
        let mut c = card();
        c.dark_mode = true;
        assert_eq!(CardView::new(&c, "http://x").palette, Palette::for_mode(true));
    }
}
