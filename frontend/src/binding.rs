//! Which element IDs a flow needs before it can be bound.

use crate::config::{CoachElementIds, SymptomElementIds};

/// Answers whether the page carries an element with a given ID.
pub trait ElementLookup {
    fn has_element(&self, id: &str) -> bool;
}

impl SymptomElementIds {
    /// IDs the symptom flow cannot run without. The query input and the
    /// doctor-search pair are optional.
    pub fn required(&self) -> [&str; 8] {
        [
            self.trigger.as_str(),
            self.input.as_str(),
            self.result.as_str(),
            self.badge.as_str(),
            self.specialty.as_str(),
            self.advice.as_str(),
            self.lifestyle.as_str(),
            self.disclaimer.as_str(),
        ]
    }
}

impl CoachElementIds {
    pub fn required(&self) -> [&str; 3] {
        [
            self.trigger.as_str(),
            self.goals.as_str(),
            self.output.as_str(),
        ]
    }
}

pub fn first_missing<'a, L>(lookup: &L, required: &[&'a str]) -> Option<&'a str>
where
    L: ElementLookup + ?Sized,
{
    required.iter().copied().find(|id| !lookup.has_element(id))
}

/// A missing required element disables the symptom flow; that is logged at
/// `warn` since the page clearly meant to host it.
pub fn symptom_flow_enabled<L>(lookup: &L, ids: &SymptomElementIds) -> bool
where
    L: ElementLookup + ?Sized,
{
    match first_missing(lookup, &ids.required()) {
        Some(id) => {
            tracing::warn!(flow = "symptom", id, "required element missing, flow disabled");
            false
        }
        None => true,
    }
}

/// The coach flow is optional, so its absence is only worth a debug line.
pub fn coach_flow_enabled<L>(lookup: &L, ids: &CoachElementIds) -> bool
where
    L: ElementLookup + ?Sized,
{
    match first_missing(lookup, &ids.required()) {
        Some(id) => {
            tracing::debug!(flow = "coach", id, "coach element missing, flow skipped");
            false
        }
        None => true,
    }
}

pub fn doctor_search_present<L>(lookup: &L, ids: &SymptomElementIds) -> bool
where
    L: ElementLookup + ?Sized,
{
    lookup.has_element(&ids.doctor_search) && lookup.has_element(&ids.doctor_link)
}
