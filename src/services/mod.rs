pub mod clip_mutation_service;
pub mod clip_retrieval_service;
pub mod clip_validator;
pub mod clip_view;
pub mod error;
pub mod policy;
pub mod profile_service;
pub mod tag_resolver;

pub use clip_mutation_service::ClipMutationService;
pub use clip_retrieval_service::ClipRetrievalService;
pub use error::ClipError;
pub use profile_service::{ProfileError, ProfileService};
