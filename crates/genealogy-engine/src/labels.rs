//! Injected presentation helpers: turning a [`PersonId`] into a display
//! label, and the no-op spouse/temporal lookups a caller can hand to C7
//! when no richer data source is available.
//!
//! [`RelationshipLabelResolver`] is never consulted by the algorithmic
//! core -- every C1-C7 computation is expressed purely over [`PersonId`].
//! It exists only so a caller wiring up output (a CLI report, a web
//! response) has one place to plug in a name lookup instead of writing
//! its own closure type each time.

use genealogy_cousin::{PersonTemporalData, SpouseLookup, TemporalLookup};
use genealogy_types::PersonId;

/// Resolves a display label for a person.
///
/// Mirrors `emergence_core::decision::DecisionSource`: an injected-
/// behavior trait with a blanket closure impl, so callers can pass a
/// name-lookup function directly without implementing the trait by hand.
pub trait RelationshipLabelResolver {
    /// Return the label to display for `person_id`.
    fn label(&self, person_id: PersonId) -> String;
}

impl<F: Fn(PersonId) -> String> RelationshipLabelResolver for F {
    fn label(&self, person_id: PersonId) -> String {
        self(person_id)
    }
}

/// A label resolver with no real name source: labels every person by
/// their bare identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugLabelResolver;

impl RelationshipLabelResolver for DebugLabelResolver {
    fn label(&self, person_id: PersonId) -> String {
        format!("{person_id}")
    }
}

/// A [`SpouseLookup`] that never reports any spouses, for callers that
/// want cousin listings without spouse enrichment.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpouseLookup;

impl SpouseLookup for NoSpouseLookup {
    fn spouses_of(&self, _person_id: PersonId) -> Vec<PersonId> {
        Vec::new()
    }
}

/// A [`TemporalLookup`] that never reports birth/death data, for callers
/// that want cousin listings without temporal-range enrichment.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTemporalLookup;

impl TemporalLookup for NoTemporalLookup {
    fn temporal_data_of(&self, _person_id: PersonId) -> Option<PersonTemporalData> {
        None
    }
}
