#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use cards_sdk::{AccountContext, Background, Card, CardDraft, SaveOutcome, UsernameAvailability};
use time::OffsetDateTime;
use tracing_test::traced_test;
use uuid::Uuid;

use super::error::DomainError;
use super::ports::{AccountDirectory, BlobStore};
use super::repo::{CardsRepository, UniqueKey, UniqueViolation};
use super::service::{Service, ServiceConfig};
use super::upload::{Bucket, UploadCandidate, UploadRejection};

// In-memory repository enforcing the same uniqueness as the real store.
#[derive(Default)]
struct MockRepository {
    cards: Mutex<Vec<Card>>,
}

impl MockRepository {
    fn with(cards: Vec<Card>) -> Self {
        Self {
            cards: Mutex::new(cards),
        }
    }

    fn materialize(id: Uuid, user_id: Uuid, draft: CardDraft, created_at: OffsetDateTime) -> Card {
        Card {
            id,
            user_id,
            name: draft.name,
            username: draft.username,
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
            created_at,
            updated_at: OffsetDateTime::now_utc(),
        }
    }
}

#[async_trait]
impl CardsRepository for MockRepository {
    async fn find_by_user(&self, user_id: Uuid) -> anyhow::Result<Option<Card>> {
        let cards = self.cards.lock().unwrap();
        Ok(cards.iter().find(|c| c.user_id == user_id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<Card>> {
        let cards = self.cards.lock().unwrap();
        Ok(cards.iter().find(|c| c.username == username).cloned())
    }

    async fn insert(&self, user_id: Uuid, draft: CardDraft) -> anyhow::Result<Card> {
        let mut cards = self.cards.lock().unwrap();
        if cards.iter().any(|c| c.user_id == user_id) {
            return Err(UniqueViolation { key: UniqueKey::UserId }.into());
        }
        if cards.iter().any(|c| c.username == draft.username) {
            return Err(UniqueViolation { key: UniqueKey::Username }.into());
        }
        let card = Self::materialize(Uuid::now_v7(), user_id, draft, OffsetDateTime::now_utc());
        cards.push(card.clone());
        Ok(card)
    }

    async fn upsert(&self, user_id: Uuid, draft: CardDraft) -> anyhow::Result<(Card, SaveOutcome)> {
        let mut cards = self.cards.lock().unwrap();
        if cards
            .iter()
            .any(|c| c.username == draft.username && c.user_id != user_id)
        {
            return Err(UniqueViolation { key: UniqueKey::Username }.into());
        }
        if let Some(existing) = cards.iter_mut().find(|c| c.user_id == user_id) {
            *existing = Self::materialize(existing.id, user_id, draft, existing.created_at);
            return Ok((existing.clone(), SaveOutcome::Updated));
        }
        let card = Self::materialize(Uuid::now_v7(), user_id, draft, OffsetDateTime::now_utc());
        cards.push(card.clone());
        Ok((card, SaveOutcome::Created))
    }
}

struct FailingRepository;

#[async_trait]
impl CardsRepository for FailingRepository {
    async fn find_by_user(&self, _user_id: Uuid) -> anyhow::Result<Option<Card>> {
        anyhow::bail!("database is locked")
    }

    async fn find_by_username(&self, _username: &str) -> anyhow::Result<Option<Card>> {
        anyhow::bail!("database is locked")
    }

    async fn insert(&self, _user_id: Uuid, _draft: CardDraft) -> anyhow::Result<Card> {
        anyhow::bail!("database is locked")
    }

    async fn upsert(&self, _user_id: Uuid, _draft: CardDraft) -> anyhow::Result<(Card, SaveOutcome)> {
        anyhow::bail!("database is locked")
    }
}

#[derive(Default)]
struct MockDirectory {
    profiles: Vec<(String, Uuid)>,
}

#[async_trait]
impl AccountDirectory for MockDirectory {
    async fn profile_owner(&self, username: &str) -> anyhow::Result<Option<Uuid>> {
        Ok(self
            .profiles
            .iter()
            .find(|(name, _)| name == username)
            .map(|(_, id)| *id))
    }
}

#[derive(Default)]
struct MockBlobStore {
    uploads: Mutex<Vec<String>>,
    removals: Mutex<Vec<String>>,
    fail_upload: bool,
    fail_remove: bool,
}

#[async_trait]
impl BlobStore for MockBlobStore {
    async fn upload(
        &self,
        bucket: Bucket,
        path: &str,
        _bytes: Bytes,
        _content_type: &str,
    ) -> anyhow::Result<()> {
        if self.fail_upload {
            anyhow::bail!("bucket offline");
        }
        self.uploads.lock().unwrap().push(format!("{bucket}/{path}"));
        Ok(())
    }

    fn public_url_of(&self, bucket: Bucket, path: &str) -> String {
        format!("https://blobs.test/{bucket}/{path}")
    }

    async fn remove(&self, bucket: Bucket, path: &str) -> anyhow::Result<()> {
        if self.fail_remove {
            anyhow::bail!("permission denied");
        }
        self.removals.lock().unwrap().push(format!("{bucket}/{path}"));
        Ok(())
    }
}

fn service_with(
    repo: Arc<dyn CardsRepository>,
    directory: MockDirectory,
    blobs: Arc<MockBlobStore>,
) -> Service {
    Service::new(repo, Arc::new(directory), blobs, ServiceConfig::default())
}

fn service(repo: Arc<dyn CardsRepository>) -> Service {
    service_with(repo, MockDirectory::default(), Arc::new(MockBlobStore::default()))
}

fn ctx(username: &str, full_name: Option<&str>) -> AccountContext {
    let builder = AccountContext::builder()
        .account_id(Uuid::new_v4())
        .username(username);
    match full_name {
        Some(name) => builder.full_name(name).build(),
        None => builder.build(),
    }
}

#[tokio::test]
async fn ensure_card_seeds_from_profile() {
    let svc = service(Arc::new(MockRepository::default()));
    let ctx = ctx("Ada.L", Some("Ada Lovelace"));

    let card = svc.ensure_card(&ctx).await.unwrap();

    assert_eq!(card.name, "Ada Lovelace");
    assert_eq!(card.username, "adal");
    assert_eq!(card.background, Background::default());
    assert!(card.emails.is_empty());
    assert!(!card.dark_mode);
}

#[tokio::test]
async fn ensure_card_falls_back_to_username_for_name() {
    let svc = service(Arc::new(MockRepository::default()));
    let card = svc.ensure_card(&ctx("grace", None)).await.unwrap();
    assert_eq!(card.name, "grace");
}

#[tokio::test]
async fn ensure_card_is_idempotent() {
    let svc = service(Arc::new(MockRepository::default()));
    let ctx = ctx("ada", None);
    let first = svc.ensure_card(&ctx).await.unwrap();
    let second = svc.ensure_card(&ctx).await.unwrap();
    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn ensure_card_suffixes_taken_seed_username() {
    let svc = service(Arc::new(MockRepository::default()));
    svc.ensure_card(&ctx("ada", None)).await.unwrap();

    let other = ctx("ada", None);
    let card = svc.ensure_card(&other).await.unwrap();
    assert!(card.username.starts_with("ada_"));
    assert_ne!(card.username, "ada");
}

#[tokio::test]
async fn save_card_creates_then_updates() {
    let svc = service(Arc::new(MockRepository::default()));
    let ctx = ctx("ada", None);

    let (created, outcome) = svc
        .save_card(&ctx, CardDraft::seeded("Ada", "ada"))
        .await
        .unwrap();
    assert_eq!(outcome, SaveOutcome::Created);
    assert_eq!(outcome.message(), "Card created successfully!");

    let mut draft = CardDraft::from(created.clone());
    draft.location = Some("London".to_owned());
    let (updated, outcome) = svc.save_card(&ctx, draft).await.unwrap();
    assert_eq!(outcome, SaveOutcome::Updated);
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.location.as_deref(), Some("London"));
}

#[tokio::test]
async fn save_card_normalizes_username() {
    let svc = service(Arc::new(MockRepository::default()));
    let (card, _) = svc
        .save_card(&ctx("ada", None), CardDraft::seeded("Ada", "Ada Lovelace!"))
        .await
        .unwrap();
    assert_eq!(card.username, "adalovelace");
}

#[tokio::test]
async fn save_card_rejects_blank_name_before_store() {
    let svc = service(Arc::new(FailingRepository));
    let err = svc
        .save_card(&ctx("ada", None), CardDraft::seeded("  ", "ada"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn save_card_maps_username_conflict() {
    let svc = service(Arc::new(MockRepository::default()));
    svc.save_card(&ctx("ada", None), CardDraft::seeded("Ada", "ada"))
        .await
        .unwrap();

    let err = svc
        .save_card(&ctx("eve", None), CardDraft::seeded("Eve", "ada"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::UsernameTaken { ref username } if username == "ada"));
}

#[tokio::test]
async fn save_card_rejects_another_accounts_profile_username() {
    let directory = MockDirectory {
        profiles: vec![("grace".to_owned(), Uuid::new_v4())],
    };
    let svc = service_with(
        Arc::new(MockRepository::default()),
        directory,
        Arc::new(MockBlobStore::default()),
    );
    let err = svc
        .save_card(&ctx("ada", None), CardDraft::seeded("Ada", "grace"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::UsernameTaken { .. }));
}

#[tokio::test]
async fn store_failure_surfaces_as_database_error() {
    let svc = service(Arc::new(FailingRepository));
    let err = svc.get_card(&ctx("ada", None)).await.unwrap_err();
    assert!(matches!(err, DomainError::Database(_)));
}

#[tokio::test]
async fn username_availability_covers_every_answer() {
    let owner = ctx("ada", None);
    let svc = service(Arc::new(MockRepository::default()));
    svc.save_card(&owner, CardDraft::seeded("Ada", "ada"))
        .await
        .unwrap();

    let check = |c: Option<AccountContext>, name: &'static str| {
        let svc = &svc;
        async move { svc.check_username_available(c.as_ref(), name).await.unwrap() }
    };

    assert_eq!(check(None, "ADA").await, UsernameAvailability::Taken);
    assert_eq!(check(Some(owner.clone()), "ada").await, UsernameAvailability::Available);
    assert_eq!(check(None, "login").await, UsernameAvailability::Reserved);
    assert_eq!(check(None, "***").await, UsernameAvailability::Invalid);
    assert_eq!(check(None, "grace").await, UsernameAvailability::Available);
}

#[tokio::test]
async fn resolve_public_uses_exact_username() {
    let svc = service(Arc::new(MockRepository::default()));
    svc.save_card(&ctx("ada", None), CardDraft::seeded("Ada", "ada"))
        .await
        .unwrap();

    let public = svc.resolve_public("ada").await.unwrap().unwrap();
    assert_eq!(public.title, "Ada - SterlingCards");
    assert!(svc.resolve_public("ADA").await.unwrap().is_none());
    assert!(svc.resolve_public("nobody").await.unwrap().is_none());
}

fn upload_service(blobs: Arc<MockBlobStore>) -> Service {
    service_with(
        Arc::new(MockRepository::default()),
        MockDirectory::default(),
        blobs,
    )
}

#[tokio::test]
async fn upload_image_stores_under_account_folder() {
    let blobs = Arc::new(MockBlobStore::default());
    let svc = upload_service(blobs.clone());
    let ctx = ctx("ada", None);
    let candidate = UploadCandidate::new("me.png", "image/png", vec![1u8; 16]);

    let url = svc
        .upload_image(&ctx, Bucket::ProfilePictures, candidate)
        .await
        .unwrap();

    let account = ctx.account_id().to_string();
    assert!(url.starts_with(&format!("https://blobs.test/profile-pictures/{account}/")));
    assert!(url.ends_with(".png"));
    assert_eq!(blobs.uploads.lock().unwrap().len(), 1);
    assert!(blobs.removals.lock().unwrap().is_empty());
}

#[tokio::test]
async fn discard_replaced_removes_own_previous_image() {
    let blobs = Arc::new(MockBlobStore::default());
    let svc = upload_service(blobs.clone());
    let ctx = ctx("ada", None);
    let previous = format!("https://blobs.test/profile-pictures/{}/one.png", ctx.account_id());
    let url = svc
        .upload_image(
            &ctx,
            Bucket::ProfilePictures,
            UploadCandidate::new("me.png", "image/png", vec![1u8; 16]),
        )
        .await
        .unwrap();

    svc.discard_replaced(&ctx, Bucket::ProfilePictures, Some(&previous), &url)
        .await;
    svc.discard_replaced(&ctx, Bucket::ProfilePictures, Some(&url), &url)
        .await;

    assert_eq!(
        *blobs.removals.lock().unwrap(),
        vec![format!("profile-pictures/{}/one.png", ctx.account_id())]
    );
}

#[tokio::test]
#[traced_test]
async fn discard_skips_images_of_other_accounts() {
    let blobs = Arc::new(MockBlobStore::default());
    let svc = upload_service(blobs.clone());
    let ada = ctx("ada", None);
    let bob = ctx("bob", None);
    let adas = format!("https://blobs.test/profile-pictures/{}/face.png", ada.account_id());
    let escaping = format!(
        "https://blobs.test/profile-pictures/{}/../{}/face.png",
        bob.account_id(),
        ada.account_id()
    );

    svc.discard_image(&bob, Bucket::ProfilePictures, &adas).await;
    svc.discard_image(&bob, Bucket::ProfilePictures, &escaping)
        .await;
    svc.discard_image(
        &bob,
        Bucket::ProfilePictures,
        "https://blobs.test/profile-pictures/old.png",
    )
    .await;

    assert!(blobs.removals.lock().unwrap().is_empty());
    assert!(logs_contain("Skipping removal of image not owned by caller"));
}

#[tokio::test]
async fn upload_image_rejects_before_contacting_store() {
    let blobs = Arc::new(MockBlobStore::default());
    let svc = upload_service(blobs.clone());
    let candidate = UploadCandidate::new("cv.pdf", "application/pdf", vec![1u8; 16]);

    let err = svc
        .upload_image(&ctx("ada", None), Bucket::ProfilePictures, candidate)
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Upload(UploadRejection::WrongType)));
    assert!(blobs.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn oversized_image_is_rejected_before_contacting_store() {
    let blobs = Arc::new(MockBlobStore::default());
    let svc = upload_service(blobs.clone());
    let candidate = UploadCandidate::new("me.png", "image/png", vec![1u8; 6 * 1024 * 1024]);

    let err = svc
        .upload_image(&ctx("ada", None), Bucket::ProfilePictures, candidate)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::Upload(UploadRejection::TooLarge { max_bytes }) if max_bytes == 5 * 1024 * 1024
    ));
    assert!(blobs.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn upload_image_reports_store_failure() {
    let blobs = Arc::new(MockBlobStore {
        fail_upload: true,
        ..MockBlobStore::default()
    });
    let svc = upload_service(blobs);
    let candidate = UploadCandidate::new("bg.jpg", "image/jpeg", vec![1u8; 16]);
    let err = svc
        .upload_image(&ctx("ada", None), Bucket::CardBackgrounds, candidate)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Storage(_)));
}

#[tokio::test]
#[traced_test]
async fn failed_cleanup_only_warns() {
    let blobs = Arc::new(MockBlobStore {
        fail_remove: true,
        ..MockBlobStore::default()
    });
    let svc = upload_service(blobs);
    let ctx = ctx("ada", None);
    let old = format!("https://blobs.test/card-backgrounds/{}/old.jpg", ctx.account_id());

    svc.discard_image(&ctx, Bucket::CardBackgrounds, &old).await;

    assert!(logs_contain("Failed to delete previous image"));
}
