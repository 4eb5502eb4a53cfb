//! HTML pages: landing, auth entry points, the dashboard editor and public cards.

use std::sync::Arc;

use axum::extract::{Extension, Form, Multipart, Path, Query};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use cards_sdk::{AccountContext, Background, BackgroundType, Card, CardDraft};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::domain::background::BackgroundSelector;
use crate::domain::error::DomainError;
use crate::domain::form::CardForm;
use crate::domain::ports::SessionStore;
use crate::domain::service::Service;
use crate::domain::upload::{Bucket, UploadCandidate};
use crate::render::{
    Banner, DashboardPage, RenderError, render_about_page, render_dashboard_page,
    render_home_page, render_login_page, render_not_found_page, render_public_page,
    render_signup_page,
};

use super::handlers::read_file_field;
use super::session::{MaybeAccount, SessionToken, cleared_session_cookie, session_cookie};

fn html(status: StatusCode, page: Result<String, RenderError>) -> Response {
    match page {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render page");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

fn not_found() -> Response {
    html(StatusCode::NOT_FOUND, render_not_found_page())
}

#[allow(clippy::unused_async)]
pub async fn home(
    MaybeAccount(ctx): MaybeAccount,
    Extension(svc): Extension<Arc<Service>>,
) -> Response {
    html(StatusCode::OK, render_home_page(svc.base_url(), ctx.is_some()))
}

#[allow(clippy::unused_async)]
pub async fn about() -> Response {
    html(StatusCode::OK, render_about_page())
}

#[allow(clippy::unused_async)]
pub async fn login_page(MaybeAccount(ctx): MaybeAccount) -> Response {
    if ctx.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    html(StatusCode::OK, render_login_page(None))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub token: String,
}

pub async fn login(
    Extension(sessions): Extension<Arc<dyn SessionStore>>,
    Form(form): Form<LoginForm>,
) -> Response {
    let token = form.token.trim();
    if token.is_empty() {
        return html(
            StatusCode::UNPROCESSABLE_ENTITY,
            render_login_page(Some("Please enter your session token.")),
        );
    }
    match sessions.sign_in(token).await {
        Ok(Some(ctx)) => {
            info!(user_id = %ctx.account_id(), "Signed in");
            (
                [(header::SET_COOKIE, session_cookie(token))],
                Redirect::to("/dashboard"),
            )
                .into_response()
        }
        Ok(None) => html(
            StatusCode::UNAUTHORIZED,
            render_login_page(Some("Invalid session token.")),
        ),
        Err(e) => {
            error!(error = %e, "Session lookup failed");
            html(
                StatusCode::INTERNAL_SERVER_ERROR,
                render_login_page(Some("Something went wrong. Please try again.")),
            )
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SignupQuery {
    pub username: Option<String>,
}

pub async fn signup_page(
    MaybeAccount(ctx): MaybeAccount,
    Extension(svc): Extension<Arc<Service>>,
    Query(query): Query<SignupQuery>,
) -> Response {
    if ctx.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    let username = query.username.unwrap_or_default();
    let normalized = cards_sdk::normalize_username(&username);
    let availability = if username.trim().is_empty() {
        None
    } else {
        match svc.check_username_available(None, &username).await {
            Ok(status) => Some(status.as_str()),
            Err(e) => {
                warn!(error = %e, "Username availability check failed");
                None
            }
        }
    };
    html(
        StatusCode::OK,
        render_signup_page(svc.base_url(), &username, &normalized, availability),
    )
}

pub async fn logout(
    Extension(sessions): Extension<Arc<dyn SessionStore>>,
    token: Option<Extension<SessionToken>>,
) -> Response {
    if let Some(Extension(SessionToken(token))) = token
        && let Err(e) = sessions.sign_out(&token).await
    {
        warn!(error = %e, "Sign-out failed");
    }
    (
        [(header::SET_COOKIE, cleared_session_cookie())],
        Redirect::to("/"),
    )
        .into_response()
}

struct DashboardState<'a> {
    ctx: &'a AccountContext,
    form: &'a CardForm,
    active_tab: BackgroundType,
    saved: Option<&'a Card>,
    banner: Option<Banner>,
}

fn dashboard(svc: &Service, state: DashboardState<'_>) -> Response {
    let preview = state.form.preview(state.ctx, state.saved);
    let page = DashboardPage {
        account_name: state.ctx.profile().display_name(),
        form: state.form,
        active_tab: state.active_tab,
        preview: preview.as_ref(),
        saved_username: state.saved.map(|c| c.username.as_str()),
        banner: state.banner,
        base_url: svc.base_url(),
        max_upload_bytes: svc.upload_policy().max_bytes,
    };
    html(StatusCode::OK, render_dashboard_page(&page))
}

fn dashboard_failure(svc: &Service, ctx: &AccountContext, e: &DomainError) -> Response {
    error!(error = %e, "Failed to load card for dashboard");
    let form = CardForm::default();
    dashboard(
        svc,
        DashboardState {
            ctx,
            form: &form,
            active_tab: BackgroundType::Gradient,
            saved: None,
            banner: Some(Banner::error(e.user_message())),
        },
    )
}

pub async fn dashboard_page(
    MaybeAccount(ctx): MaybeAccount,
    Extension(svc): Extension<Arc<Service>>,
) -> Response {
    let Some(ctx) = ctx else {
        return Redirect::to("/login").into_response();
    };
    let card = match svc.ensure_card(&ctx).await {
        Ok(card) => card,
        Err(e) => return dashboard_failure(&svc, &ctx, &e),
    };
    let form = CardForm::from_card(&card);
    dashboard(
        &svc,
        DashboardState {
            ctx: &ctx,
            form: &form,
            active_tab: card.background.kind(),
            saved: Some(&card),
            banner: None,
        },
    )
}

/// Dashboard form body. List fields carry one entry per line.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DashboardForm {
    pub name: String,
    pub username: String,
    pub profile_picture_url: String,
    pub position: String,
    pub emails: String,
    pub phone_numbers: String,
    pub images: String,
    pub whatsapp: String,
    pub instagram: String,
    pub location: String,
    pub background_type: String,
    pub gradient: String,
    pub color: String,
    pub image: String,
    pub dark_mode: Option<String>,
}

impl DashboardForm {
    /// Builds the draft form on top of the stored background; returns the
    /// editor tab to show next.
    #[must_use]
    pub fn into_form(self, stored: Background) -> (CardForm, BackgroundType) {
        let mut form = CardForm::default();
        form.set_name(&self.name);
        form.set_username(&self.username);
        form.set_profile_picture(&self.profile_picture_url);
        for (field, text) in [
            (cards_sdk::ArrayField::Position, &self.position),
            (cards_sdk::ArrayField::Emails, &self.emails),
            (cards_sdk::ArrayField::PhoneNumbers, &self.phone_numbers),
            (cards_sdk::ArrayField::Images, &self.images),
        ] {
            for line in text.lines() {
                form.append(field, line);
            }
        }
        form.set_whatsapp(&self.whatsapp);
        form.set_instagram(&self.instagram);
        form.set_location(&self.location);

        let mut selector = BackgroundSelector::new(stored, self.dark_mode.is_some());
        let tab = self
            .background_type
            .parse::<BackgroundType>()
            .unwrap_or(selector.active_tab());
        selector.switch_tab(tab);
        match tab {
            BackgroundType::Gradient => selector.choose_gradient(&self.gradient),
            BackgroundType::Color => selector.choose_color(&self.color),
            BackgroundType::Image => {}
        }
        let active_tab = selector.active_tab();
        form.dark_mode = selector.dark_mode();
        let background = match Background::image(&self.image) {
            Some(image) if tab == BackgroundType::Image => image,
            _ => selector.into_background(),
        };
        form.set_background(background);
        (form, active_tab)
    }
}

pub async fn dashboard_save(
    MaybeAccount(ctx): MaybeAccount,
    Extension(svc): Extension<Arc<Service>>,
    Form(body): Form<DashboardForm>,
) -> Response {
    let Some(ctx) = ctx else {
        return Redirect::to("/login").into_response();
    };
    let saved = match svc.get_card(&ctx).await {
        Ok(card) => card,
        Err(e) => return dashboard_failure(&svc, &ctx, &e),
    };
    let stored = saved
        .as_ref()
        .map(|c| c.background.clone())
        .unwrap_or_default();
    let (mut form, active_tab) = body.into_form(stored);

    let result = match form.validate(svc.limits()) {
        Ok(draft) => svc.save_card(&ctx, draft).await,
        Err(e) => Err(e),
    };
    match result {
        Ok((card, outcome)) => {
            form.sync_from(&card);
            dashboard(
                &svc,
                DashboardState {
                    ctx: &ctx,
                    form: &form,
                    active_tab,
                    saved: Some(&card),
                    banner: Some(Banner::success(outcome.message())),
                },
            )
        }
        Err(e) => dashboard(
            &svc,
            DashboardState {
                ctx: &ctx,
                form: &form,
                active_tab,
                saved: saved.as_ref(),
                banner: Some(Banner::error(e.user_message())),
            },
        ),
    }
}

/// Upload from the dashboard. A successful upload is stored on the card
/// right away and the replaced image is removed afterwards. A rejected or
/// failed background upload reverts the editor to the default gradient
/// without saving.
pub async fn dashboard_upload(
    MaybeAccount(ctx): MaybeAccount,
    Extension(svc): Extension<Arc<Service>>,
    Path(bucket): Path<String>,
    multipart: Multipart,
) -> Response {
    let Some(ctx) = ctx else {
        return Redirect::to("/login").into_response();
    };
    let Some(bucket) = Bucket::parse(&bucket) else {
        return not_found();
    };
    let card = match svc.ensure_card(&ctx).await {
        Ok(card) => card,
        Err(e) => return dashboard_failure(&svc, &ctx, &e),
    };
    let mut form = CardForm::from_card(&card);
    let outcome = match read_file_field(multipart).await {
        Ok(candidate) => match bucket {
            Bucket::ProfilePictures => upload_profile_picture(&svc, &ctx, &card, candidate).await,
            Bucket::CardBackgrounds => {
                upload_background(&svc, &ctx, &card, &mut form, candidate).await
            }
        },
        Err(problem) => UploadOutcome::Failed(problem.detail),
    };

    let (saved, banner) = match outcome {
        UploadOutcome::Saved(updated, message) => {
            form.sync_from(&updated);
            (updated, Banner::success(message))
        }
        UploadOutcome::Failed(message) => (card, Banner::error(message)),
    };
    dashboard(
        &svc,
        DashboardState {
            ctx: &ctx,
            form: &form,
            active_tab: form.background.kind(),
            saved: Some(&saved),
            banner: Some(banner),
        },
    )
}

enum UploadOutcome {
    Saved(Card, &'static str),
    Failed(String),
}

async fn store_update(svc: &Service, ctx: &AccountContext, draft: CardDraft) -> Result<Card, String> {
    svc.save_card(ctx, draft)
        .await
        .map(|(card, _)| card)
        .map_err(|e| e.user_message())
}

async fn upload_profile_picture(
    svc: &Service,
    ctx: &AccountContext,
    card: &Card,
    candidate: UploadCandidate,
) -> UploadOutcome {
    let bucket = Bucket::ProfilePictures;
    let url = match svc.upload_image(ctx, bucket, candidate).await {
        Ok(url) => url,
        Err(e) => return UploadOutcome::Failed(e.user_message()),
    };
    let mut draft = CardDraft::from(card.clone());
    draft.profile_picture_url = Some(url.clone());
    match store_update(svc, ctx, draft).await {
        Ok(updated) => {
            svc.discard_replaced(ctx, bucket, card.profile_picture_url.as_deref(), &url)
                .await;
            UploadOutcome::Saved(updated, "Profile picture uploaded successfully!")
        }
        Err(message) => {
            svc.discard_image(ctx, bucket, &url).await;
            UploadOutcome::Failed(message)
        }
    }
}

async fn upload_background(
    svc: &Service,
    ctx: &AccountContext,
    card: &Card,
    form: &mut CardForm,
    candidate: UploadCandidate,
) -> UploadOutcome {
    let bucket = Bucket::CardBackgrounds;
    let mut selector = BackgroundSelector::new(card.background.clone(), card.dark_mode);
    let ticket = match selector.begin_upload(&candidate, svc.upload_policy()) {
        Ok(ticket) => ticket,
        Err(rejection) => {
            form.set_background(selector.into_background());
            return UploadOutcome::Failed(rejection.background_message());
        }
    };
    let uploaded = svc
        .upload_image(ctx, bucket, candidate)
        .await
        .map_err(|e| match e {
            DomainError::Upload(rejection) => rejection.background_message(),
            other => other.user_message(),
        });
    if let Err(reason) = selector.finish_upload(ticket, uploaded) {
        form.set_background(selector.into_background());
        return UploadOutcome::Failed(format!("Failed to upload background image: {reason}"));
    }
    let url = selector.current().value().to_owned();

    let previous = match &card.background {
        Background::Image(_) => Some(card.background.value()),
        Background::Gradient(_) | Background::Color(_) => None,
    };
    let mut draft = CardDraft::from(card.clone());
    draft.background = selector.into_background();
    match store_update(svc, ctx, draft).await {
        Ok(updated) => {
            svc.discard_replaced(ctx, bucket, previous, &url).await;
            UploadOutcome::Saved(updated, "Background image uploaded successfully!")
        }
        Err(message) => {
            svc.discard_image(ctx, bucket, &url).await;
            UploadOutcome::Failed(message)
        }
    }
}

pub async fn public_card(
    Extension(svc): Extension<Arc<Service>>,
    Path(username): Path<String>,
) -> Response {
    match svc.resolve_public(&username).await {
        Ok(Some(public)) => html(StatusCode::OK, render_public_page(&public, svc.base_url())),
        Ok(None) => not_found(),
        Err(e) => {
            error!(error = %e, username, "Failed to resolve public card");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
