use shared::model::{ExerciseWithSets, Set};

use super::ids::{ExerciseId, LocalIdGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseStatus {
    /// Added in the editor and never stored
    New,
    /// Stored and reopened for changes
    Editing,
    /// A create or update is in flight
    Saving,
    /// Stored and read only
    Closed,
    /// A remote delete is in flight
    Deleting,
}

impl ExerciseStatus {
    pub fn is_editable(&self) -> bool {
        matches!(self, ExerciseStatus::New | ExerciseStatus::Editing)
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, ExerciseStatus::Saving | ExerciseStatus::Deleting)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetField {
    Reps,
    Weight,
}

/// A set as typed into the form, both fields are free text until saved
#[derive(Debug, Clone, PartialEq)]
pub struct DraftSet {
    pub id: u64,
    pub reps: String,
    pub weight: String,
}

impl DraftSet {
    pub fn blank(id: u64) -> Self {
        Self {
            id,
            reps: String::new(),
            weight: String::new(),
        }
    }

    /// A draft showing a stored set, zero values show as blank fields
    pub fn from_set(id: u64, set: &Set) -> Self {
        Self {
            id,
            reps: if set.reps == 0 {
                String::new()
            } else {
                set.reps.to_string()
            },
            weight: if set.weight == 0.0 {
                String::new()
            } else {
                set.weight.to_string()
            },
        }
    }

    pub fn field_mut(&mut self, field: SetField) -> &mut String {
        match field {
            SetField::Reps => &mut self.reps,
            SetField::Weight => &mut self.weight,
        }
    }

    /// The set if both fields hold a strictly positive number, reps must also
    /// be whole. "5.0" and "1e1" are whole numbers, "2.5" isn't
    pub fn parse(&self) -> Option<Set> {
        let reps = positive_number(&self.reps)
            .filter(|r| r.fract() == 0.0 && *r <= f64::from(u32::MAX))? as u32;
        let weight = positive_number(&self.weight)?;
        Some(Set::new(reps, weight))
    }

    /// Reps times weight of the set that would be saved, zero if it wouldn't be
    pub fn volume(&self) -> f64 {
        self.parse().map_or(0.0, |set| set.volume())
    }
}

fn positive_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// In flight request bookkeeping, the status to go back to if it fails
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Pending {
    pub seq: u64,
    pub previous: ExerciseStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorExercise {
    pub id: ExerciseId,
    pub name: String,
    pub sets: Vec<DraftSet>,
    pub status: ExerciseStatus,
    pub(crate) pending: Option<Pending>,
}

impl EditorExercise {
    /// A fresh exercise with a single blank set
    pub(crate) fn new(name: String, ids: &mut LocalIdGenerator) -> Self {
        Self {
            id: ExerciseId::Local(ids.next_id()),
            name,
            sets: vec![DraftSet::blank(ids.next_id())],
            status: ExerciseStatus::New,
            pending: None,
        }
    }

    /// An exercise as loaded from the server
    pub(crate) fn stored(exercise: &ExerciseWithSets, ids: &mut LocalIdGenerator) -> Self {
        Self {
            id: ExerciseId::Persisted(exercise.exercise.id),
            name: exercise.exercise.name.clone(),
            sets: exercise
                .sets
                .iter()
                .map(|set| DraftSet::from_set(ids.next_id(), set))
                .collect(),
            status: ExerciseStatus::Closed,
            pending: None,
        }
    }

    /// The drafts that would be saved, in order
    pub fn valid_sets(&self) -> Vec<Set> {
        self.sets.iter().filter_map(DraftSet::parse).collect()
    }

    pub fn volume(&self) -> f64 {
        // `sum` starts from -0.0, which would show as "-0"
        self.sets.iter().map(DraftSet::volume).fold(0.0, |acc, v| acc + v)
    }

    pub fn set_mut(&mut self, set_id: u64) -> Option<&mut DraftSet> {
        self.sets.iter_mut().find(|s| s.id == set_id)
    }

    pub fn is_closed(&self) -> bool {
        self.status == ExerciseStatus::Closed
    }
}
