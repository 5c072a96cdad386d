//! Facade wiring pedigree storage, kinship, relationship, Sosa-Stradonitz
//! numbering, and cousin classification behind one [`Engine`] value.
//!
//! # Modules
//!
//! - [`facade`] -- [`facade::Engine`], the inherent-method wrapper over
//!   every query the component crates expose.
//! - [`labels`] -- [`labels::RelationshipLabelResolver`] and the no-op
//!   [`labels::NoSpouseLookup`]/[`labels::NoTemporalLookup`] lookups.
//!
//! Each component crate keeps its own error type
//! (`genealogy_graph::PedigreeError`, `genealogy_kinship::ConsanguinityError`,
//! `genealogy_relationship::RelationshipError`, `genealogy_sosa::SosaError`,
//! `genealogy_cousin::CousinError`); `Engine` does not wrap them in a
//! combined error enum, so callers match on whichever crate raised it,
//! matching this workspace's convention of one error enum per crate rather
//! than a global one.

pub mod facade;
pub mod labels;

pub use facade::Engine;
pub use labels::{DebugLabelResolver, NoSpouseLookup, NoTemporalLookup, RelationshipLabelResolver};
