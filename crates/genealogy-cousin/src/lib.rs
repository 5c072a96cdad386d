//! Cousin-degree classification, matrix/listing construction, and result
//! caching, built on top of [`genealogy_relationship::RelationshipSummary`].
//!
//! # Modules
//!
//! - [`types`] -- [`types::CousinDegree`], [`types::CousinMatrixEntry`],
//!   [`types::CousinListing`], [`types::CousinComputationSettings`].
//! - [`classify`] -- [`classify::infer_cousin_degree`] and
//!   [`classify::infer_all_cousin_degrees`].
//! - [`matrix`] -- [`matrix::build_cousin_matrix`].
//! - [`listings`] -- [`listings::build_cousin_listings`] and the
//!   [`listings::SpouseLookup`]/[`listings::TemporalLookup`] traits.
//! - [`cache`] -- [`cache::CousinMatrixCache`] and
//!   [`cache::clear_cousin_degree_cache`].
//! - [`config`] -- [`config::load_cousin_settings`].
//! - [`error`] -- [`error::CousinError`].

pub mod cache;
pub mod classify;
pub mod config;
pub mod error;
pub mod listings;
pub mod matrix;
pub mod types;

pub use cache::{clear_cousin_degree_cache, CousinMatrixCache};
pub use classify::{infer_all_cousin_degrees, infer_cousin_degree};
pub use config::load_cousin_settings;
pub use error::CousinError;
pub use listings::{build_cousin_listings, SpouseLookup, TemporalLookup};
pub use matrix::build_cousin_matrix;
pub use types::{
    BucketedMatrix, CousinComputationSettings, CousinDegree, CousinListing, CousinMatrixEntry, DatePrecision,
    PersonTemporalData, RelationshipKind,
};
