//! Pairwise relationship coefficient computation and ancestor-branch
//! reconstruction.
//!
//! # Modules
//!
//! - [`info`] -- [`info::RelationshipInfo`], the ranked-queue ancestor
//!   sweep, plus [`info::prepare`] to ensure consanguinity is current
//!   before running it.
//! - [`state`] -- per-node [`state::RelationshipState`] and
//!   [`state::BranchRecord`] bookkeeping used internally by the sweep.
//! - [`error`] -- [`error::RelationshipError`].

pub mod error;
pub mod info;
pub mod state;

pub use error::RelationshipError;
pub use info::{prepare, BranchPath, RelationshipInfo, RelationshipResult, RelationshipSummary};
pub use state::{AncestorStatus, BranchRecord, RelationshipState};
