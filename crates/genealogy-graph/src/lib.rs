//! Pedigree graph storage and ancestry ordering.
//!
//! # Modules
//!
//! - [`pedigree`] -- [`pedigree::Pedigree`], the persons/unions graph and
//!   parent lookup.
//! - [`topo`] -- topological ordering and ancestor-rank computation over a
//!   [`pedigree::Pedigree`].
//! - [`error`] -- [`error::PedigreeError`].

pub mod error;
pub mod pedigree;
pub mod topo;

pub use error::PedigreeError;
pub use pedigree::Pedigree;
pub use topo::{ancestor_rank, topological_order};
