use std::sync::Arc;

use axum::extract::{Extension, Multipart, Path, Query};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::Json;
use cards_sdk::SaveOutcome;
use serde::Deserialize;
use tracing::error;

use crate::domain::publish::public_url;
use crate::domain::service::Service;
use crate::domain::upload::{Bucket, UploadCandidate};
use crate::render::{QrEncoder, QrError, QrRequest};

use super::dto::{
    AvailabilityDto, CardDto, PublicCardDto, SaveCardRequest, SaveCardResponse, UploadResponse,
};
use super::problem::{ErrorCode, Problem};
use super::session::{MaybeAccount, RequireAccount};

pub type ApiResult<T> = Result<T, Problem>;

pub async fn get_card(
    RequireAccount(ctx): RequireAccount,
    Extension(svc): Extension<Arc<Service>>,
) -> ApiResult<Json<CardDto>> {
    let card = svc.ensure_card(&ctx).await?;
    Ok(Json(card.into()))
}

pub async fn put_card(
    RequireAccount(ctx): RequireAccount,
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<SaveCardRequest>,
) -> ApiResult<impl IntoResponse> {
    let draft = req.into_form().validate(svc.limits())?;
    let (card, outcome) = svc.save_card(&ctx, draft).await?;
    let status = match outcome {
        SaveOutcome::Created => StatusCode::CREATED,
        SaveOutcome::Updated => StatusCode::OK,
    };
    let body = SaveCardResponse {
        card: card.into(),
        message: outcome.message().to_owned(),
    };
    Ok((status, Json(body)))
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    /// URL of the image being replaced; removed after a successful upload
    /// when it belongs to the caller.
    pub previous: Option<String>,
}

pub async fn upload_image(
    RequireAccount(ctx): RequireAccount,
    Extension(svc): Extension<Arc<Service>>,
    Path(bucket): Path<String>,
    Query(query): Query<UploadQuery>,
    multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let bucket = parse_bucket(&bucket)?;
    let candidate = read_file_field(multipart).await?;
    let url = svc.upload_image(&ctx, bucket, candidate).await?;
    svc.discard_replaced(&ctx, bucket, query.previous.as_deref(), &url)
        .await;
    Ok(Json(UploadResponse { url }))
}

pub fn parse_bucket(value: &str) -> ApiResult<Bucket> {
    Bucket::parse(value).ok_or_else(|| {
        ErrorCode::NOT_FOUND.with_context(format!("Unknown bucket '{value}'"), "/")
    })
}

/// Reads the first file part of a multipart body.
pub async fn read_file_field(mut multipart: Multipart) -> ApiResult<UploadCandidate> {
    let bad_request = |detail: String| ErrorCode::BAD_REQUEST.with_context(detail, "/");
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(e.body_text()))?
    {
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let content_type = field.content_type().unwrap_or_default().to_owned();
        let bytes = field.bytes().await.map_err(|e| bad_request(e.body_text()))?;
        return Ok(UploadCandidate::new(file_name, content_type, bytes));
    }
    Err(bad_request("No file was provided".to_owned()))
}

pub async fn username_availability(
    MaybeAccount(ctx): MaybeAccount,
    Extension(svc): Extension<Arc<Service>>,
    Path(username): Path<String>,
) -> ApiResult<Json<AvailabilityDto>> {
    let availability = svc.check_username_available(ctx.as_ref(), &username).await?;
    Ok(Json(AvailabilityDto::new(
        cards_sdk::normalize_username(&username),
        availability,
    )))
}

pub async fn get_public_card(
    Extension(svc): Extension<Arc<Service>>,
    Path(username): Path<String>,
) -> ApiResult<Json<PublicCardDto>> {
    let public = svc
        .resolve_public(&username)
        .await?
        .ok_or_else(|| card_not_found(&username))?;
    let url = public_url(svc.base_url(), &public.card.username);
    Ok(Json(PublicCardDto::new(public, url)))
}

#[derive(Debug, Deserialize)]
pub struct QrQuery {
    pub size: Option<u32>,
}

pub async fn get_public_qr(
    Extension(svc): Extension<Arc<Service>>,
    Path(username): Path<String>,
    Query(query): Query<QrQuery>,
) -> ApiResult<impl IntoResponse> {
    let public = svc
        .resolve_public(&username)
        .await?
        .ok_or_else(|| card_not_found(&username))?;
    let mut request = QrRequest::new(public_url(svc.base_url(), &public.card.username));
    if let Some(size) = query.size {
        request = request.with_size(size);
    }
    let graphic = QrEncoder::encode(&request).map_err(|e| match e {
        QrError::InvalidSize(_) => ErrorCode::BAD_REQUEST.with_context(e.to_string(), "/"),
        other => {
            error!(error = %other, "Failed to render QR code");
            ErrorCode::INTERNAL.with_context("Failed to render QR code", "/")
        }
    })?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], graphic.svg))
}

fn card_not_found(username: &str) -> Problem {
    ErrorCode::NOT_FOUND.with_context(format!("No card for username '{username}'"), "/")
}

#[allow(clippy::unused_async)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
