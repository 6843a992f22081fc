//! Core data types for the PixaGen generation gateway.
//!
//! This crate owns the canonical [`GenerationRequest`] and everything needed to
//! produce one from a loosely-typed request body: the alias table, the
//! normalizer, data-URI handling and credential resolution.

mod activity;
mod credentials;
mod data_uri;
mod kind;
mod normalize;
mod observability;
mod prompt;
mod request;
mod result;
mod scene;

pub use activity::{ActivityEntry, ActivityLog, DEFAULT_ACTIVITY_CAPACITY};
pub use credentials::{Credential, CredentialResolver, GEMINI_KEY_HEADER, VEO_KEY_HEADER};
pub use data_uri::{DEFAULT_MIME_TYPE, DataUri};
pub use kind::GenerationKind;
pub use normalize::{ALIAS_TABLE_VERSION, AliasTable, Normalizer};
pub use observability::init_tracing;
pub use prompt::PromptOrScript;
pub use request::{GenerationRequest, GenerationRequestBuilder, GenerationRequestBuilderError};
pub use result::{NO_VIDEO_NOTE, ProviderResult};
pub use scene::{Overlay, SceneMeta, SceneScript, Shot};
