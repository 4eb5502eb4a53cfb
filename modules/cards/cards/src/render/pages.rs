//! HTML documents and fragments rendered through `minijinja`.

use std::sync::LazyLock;

use cards_sdk::{ArrayField, BackgroundType, Card, PublicCard};
use minijinja::{Environment, Value, context};
use serde::Serialize;
use tracing::error;

use super::palette::Palette;
use super::qr::{DEFAULT_SIZE_PX, QrEncoder, QrRequest};
use super::view::CardView;
use crate::domain::background::{COLOR_PRESETS, GRADIENT_PRESETS};
use crate::domain::form::CardForm;
use crate::domain::upload::Bucket;

const SITE: &str = "SterlingCards";

const SOURCES: [(&str, &str); 9] = [
    ("layout.html", include_str!("../../templates/layout.html")),
    ("card.html", include_str!("../../templates/card.html")),
    ("public.html", include_str!("../../templates/public.html")),
    ("not_found.html", include_str!("../../templates/not_found.html")),
    ("dashboard.html", include_str!("../../templates/dashboard.html")),
    ("home.html", include_str!("../../templates/home.html")),
    ("about.html", include_str!("../../templates/about.html")),
    ("login.html", include_str!("../../templates/login.html")),
    ("signup.html", include_str!("../../templates/signup.html")),
];

static TEMPLATES: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    for (name, source) in SOURCES {
        if let Err(e) = env.add_template(name, source) {
            error!(template = name, error = %e, "Failed to load template");
        }
    }
    env
});

#[derive(Debug, thiserror::Error)]
#[error("failed to render template: {0}")]
pub struct RenderError(#[from] minijinja::Error);

fn render(name: &str, ctx: Value) -> Result<String, RenderError> {
    Ok(TEMPLATES.get_template(name)?.render(ctx)?)
}

/// SVG markup of the card's QR code. Encoding failures are logged and yield
/// an empty placeholder so the rest of the card still renders.
#[must_use]
pub fn render_qr_block(url: &str, palette: &Palette) -> String {
    let request = QrRequest::new(url)
        .with_size(DEFAULT_SIZE_PX)
        .with_colors(palette.qr_foreground, palette.qr_background);
    match QrEncoder::encode(&request) {
        Ok(graphic) => graphic.svg,
        Err(e) => {
            error!(error = %e, url, "Failed to render QR code");
            format!(r#"<div class="qr-placeholder" style="width:{DEFAULT_SIZE_PX}px;height:{DEFAULT_SIZE_PX}px"></div>"#)
        }
    }
}

/// Card fragment: profile block, contacts, gallery, details panel and QR.
pub fn render_card(card: &Card, base_url: &str) -> Result<String, RenderError> {
    let view = CardView::new(card, base_url);
    let qr = render_qr_block(&view.public_url, &view.palette);
    render(
        "card.html",
        context! { card => view, qr => Value::from_safe_string(qr) },
    )
}

pub fn render_public_page(public: &PublicCard, base_url: &str) -> Result<String, RenderError> {
    let card_html = render_card(&public.card, base_url)?;
    render(
        "public.html",
        context! {
            title => &public.title,
            description => &public.description,
            card_html => Value::from_safe_string(card_html),
        },
    )
}

pub fn render_not_found_page() -> Result<String, RenderError> {
    render(
        "not_found.html",
        context! { title => format!("Profile Not Found - {SITE}") },
    )
}

pub fn render_home_page(base_url: &str, signed_in: bool) -> Result<String, RenderError> {
    render(
        "home.html",
        context! {
            title => format!("{SITE} - Digital Business Cards"),
            base_url => base_url.trim_end_matches('/'),
            signed_in,
        },
    )
}

pub fn render_about_page() -> Result<String, RenderError> {
    render("about.html", context! { title => format!("About - {SITE}") })
}

pub fn render_login_page(error: Option<&str>) -> Result<String, RenderError> {
    render(
        "login.html",
        context! { title => format!("Login - {SITE}"), error },
    )
}

pub fn render_signup_page(
    base_url: &str,
    username: &str,
    normalized: &str,
    availability: Option<&str>,
) -> Result<String, RenderError> {
    render(
        "signup.html",
        context! {
            title => format!("Sign Up - {SITE}"),
            base_url => base_url.trim_end_matches('/'),
            username,
            normalized,
            availability,
        },
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
        }
    }
}

/// Flattened form state for the dashboard inputs.
#[derive(Debug, Serialize)]
struct FormView<'a> {
    name: &'a str,
    username: &'a str,
    profile_picture_url: &'a str,
    position: String,
    emails: String,
    phone_numbers: String,
    images: String,
    whatsapp: &'a str,
    instagram: &'a str,
    location: &'a str,
    background_type: &'static str,
    gradient: &'a str,
    color: &'a str,
    image: &'a str,
    dark_mode: bool,
}

impl<'a> FormView<'a> {
    fn new(form: &'a CardForm, active_tab: BackgroundType) -> Self {
        let value = form.background.value();
        let of_kind = |kind| {
            if form.background.kind() == kind {
                value
            } else {
                ""
            }
        };
        Self {
            name: &form.name,
            username: &form.username,
            profile_picture_url: &form.profile_picture_url,
            position: form.list(ArrayField::Position).join("\n"),
            emails: form.list(ArrayField::Emails).join("\n"),
            phone_numbers: form.list(ArrayField::PhoneNumbers).join("\n"),
            images: form.list(ArrayField::Images).join("\n"),
            whatsapp: &form.whatsapp,
            instagram: &form.instagram,
            location: &form.location,
            background_type: active_tab.as_str(),
            gradient: of_kind(BackgroundType::Gradient),
            color: of_kind(BackgroundType::Color),
            image: of_kind(BackgroundType::Image),
            dark_mode: form.dark_mode,
        }
    }
}

#[derive(Debug, Serialize)]
struct UploadSlot {
    bucket: &'static str,
    label: &'static str,
}

/// Everything the dashboard shows for one request.
pub struct DashboardPage<'a> {
    pub account_name: &'a str,
    pub form: &'a CardForm,
    pub active_tab: BackgroundType,
    pub preview: Option<&'a Card>,
    pub saved_username: Option<&'a str>,
    pub banner: Option<Banner>,
    pub base_url: &'a str,
    pub max_upload_bytes: usize,
}

pub fn render_dashboard_page(page: &DashboardPage<'_>) -> Result<String, RenderError> {
    let preview_html = page
        .preview
        .map(|card| render_card(card, page.base_url))
        .transpose()?
        .map(Value::from_safe_string);
    let public_url = page
        .saved_username
        .map(|u| crate::domain::publish::public_url(page.base_url, u));
    let uploads = [
        UploadSlot {
            bucket: Bucket::ProfilePictures.as_str(),
            label: "Profile picture",
        },
        UploadSlot {
            bucket: Bucket::CardBackgrounds.as_str(),
            label: "Background image",
        },
    ];

    render(
        "dashboard.html",
        context! {
            title => format!("Dashboard - {SITE}"),
            account_name => page.account_name,
            form => FormView::new(page.form, page.active_tab),
            preview_html,
            public_url,
            banner => page.banner.clone(),
            gradient_presets => GRADIENT_PRESETS,
            color_presets => COLOR_PRESETS,
            uploads,
            upload_max_mb => page.max_upload_bytes / (1024 * 1024),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cards_sdk::Background;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn card() -> Card {
        Card {
            id: Uuid::now_v7(),
            user_id: Uuid::new_v4(),
            name: "Ada <script>".to_owned(),
            username: "ada".to_owned(),
            profile_picture_url: None,
            position: vec!["Analyst".to_owned(), "Writer".to_owned()],
            background: Background::default(),
            dark_mode: false,
            emails: vec!["ada@example.com".to_owned()],
            phone_numbers: vec!["+1 555 0100".to_owned()],
            images: vec!["https://x/1.png".to_owned(), "https://x/2.png".to_owned()],
            whatsapp: None,
            instagram: None,
            location: Some("London".to_owned()),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn card_fragment_escapes_text_and_embeds_qr() {
        let html = render_card(&card(), "http://localhost:3000").unwrap();
        assert!(html.contains("Ada &lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<svg"));
        assert!(html.contains("bg-gradient-to-br from-blue-500 to-purple-600"));
        assert!(html.contains("mailto:ada@example.com"));
        assert!(html.contains("tel:+1 555 0100"));
        assert!(html.contains("grid-cols-2"));
        assert!(html.contains("<details"));
    }

    #[test]
    fn initial_badge_without_picture() {
        let html = render_card(&card(), "http://x").unwrap();
        assert!(html.contains(">A</div>"));
    }

    #[test]
    fn gallery_is_omitted_when_empty() {
        let mut c = card();
        c.images.clear();
        let html = render_card(&c, "http://x").unwrap();
        assert!(!html.contains("Gallery image"));
    }

    #[test]
    fn public_page_sets_title_and_description() {
        let mut c = card();
        c.name = "Ada".to_owned();
        let html = render_public_page(&PublicCard::new(c), "http://x").unwrap();
        assert!(html.contains("<title>Ada - SterlingCards</title>"));
        assert!(html.contains("View Ada&#x27;s digital card on SterlingCards"));
    }

    #[test]
    fn not_found_page_links_home_and_signup() {
        let html = render_not_found_page().unwrap();
        assert!(html.contains("<title>Profile Not Found - SterlingCards</title>"));
        assert!(html.contains(r#"href="/""#));
        assert!(html.contains(r#"href="/signup""#));
    }

    #[test]
    fn dashboard_without_preview_prompts_for_fields() {
        let form = CardForm::default();
        let html = render_dashboard_page(&DashboardPage {
            account_name: "Ada",
            form: &form,
            active_tab: BackgroundType::Gradient,
            preview: None,
            saved_username: None,
            banner: Some(Banner::error("Name is required")),
            base_url: "http://x",
            max_upload_bytes: 5 * 1024 * 1024,
        })
        .unwrap();
        assert!(html.contains("Fill in your name and username to see the preview"));
        assert!(html.contains("banner-error"));
        assert!(html.contains("up to 5MB"));
    }

    #[test]
    fn failed_qr_renders_placeholder() {
        let html = render_qr_block(&"x".repeat(4000), &Palette::for_mode(false));
        assert!(html.contains("qr-placeholder"));
    }
}
