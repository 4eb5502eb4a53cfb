//! Cards Module Implementation
//!
//! The public API is defined in `cards-sdk` and re-exported here.

pub use cards_sdk::{
    AccountContext, AccountProfile, Background, BackgroundType, Card, CardDraft, CardsApi,
    CardsError, PublicCard, SaveOutcome, UsernameAvailability,
};

pub mod config;
pub mod module;
pub use module::CardsModule;

pub mod local_client;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
pub mod render;
