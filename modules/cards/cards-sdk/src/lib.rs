//! Cards SDK
//!
//! Transport-agnostic contract of the cards module: the `Card` model and its
//! tagged `Background`, the request-scoped `AccountContext`, the `CardsApi`
//! trait consumed by other modules, and the public `CardsError`.

pub mod api;
pub mod background;
pub mod context;
pub mod errors;
pub mod models;
pub mod username;

pub use api::CardsApi;
pub use background::{Background, BackgroundType, DEFAULT_GRADIENT};
pub use context::{AccountContext, AccountContextBuilder, AccountProfile};
pub use errors::CardsError;
pub use models::{ArrayField, Card, CardDraft, PublicCard, SaveOutcome, UsernameAvailability};
pub use username::normalize_username;
