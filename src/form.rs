use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::models::{Day, Exercise, ExerciseField, Schedule};

/// Every edit the form can make to a [`Schedule`].
///
/// The UI never touches the tree directly: widgets emit actions while the
/// frame is drawn and the app applies them once drawing is done.
#[derive(Clone, Debug, PartialEq)]
pub enum FormAction {
    SetTitle(String),
    SetStartDate(NaiveDate),
    AddDay,
    RemoveDay {
        day: usize,
    },
    AddExercise {
        day: usize,
    },
    RemoveExercise {
        day: usize,
        index: usize,
    },
    UpdateExercise {
        day: usize,
        index: usize,
        field: ExerciseField,
        value: String,
    },
}

impl Schedule {
    /// Applies one action. Returns `false` when the action addressed a day or
    /// exercise that does not exist, in which case nothing changes.
    pub fn apply(&mut self, action: FormAction) -> bool {
        match action {
            FormAction::SetTitle(title) => {
                self.title = title;
                true
            }
            FormAction::SetStartDate(date) => {
                self.start_date = date;
                true
            }
            FormAction::AddDay => {
                let day = Day::numbered(self.days.len() + 1);
                debug!(name = %day.name, "adding day");
                self.days.push(day);
                true
            }
            FormAction::RemoveDay { day } => {
                if day >= self.days.len() {
                    warn!(day, days = self.days.len(), "remove day out of range");
                    return false;
                }
                self.days.remove(day);
                true
            }
            FormAction::AddExercise { day } => {
                let Some(target) = self.days.get_mut(day) else {
                    warn!(day, "add exercise to missing day");
                    return false;
                };
                let last_filled = target
                    .exercises
                    .last()
                    .map_or(true, |exercise| !exercise.name.is_empty());
                if last_filled {
                    target.exercises.push(Exercise::blank());
                } else {
                    debug!(day, "last exercise has no name, not adding a row");
                }
                true
            }
            FormAction::RemoveExercise { day, index } => {
                let Some(target) = self.days.get_mut(day) else {
                    warn!(day, "remove exercise from missing day");
                    return false;
                };
                if index >= target.exercises.len() {
                    warn!(day, index, "remove exercise out of range");
                    return false;
                }
                target.exercises.remove(index);
                true
            }
            FormAction::UpdateExercise {
                day,
                index,
                field,
                value,
            } => match self
                .days
                .get_mut(day)
                .and_then(|d| d.exercises.get_mut(index))
            {
                Some(exercise) => {
                    *exercise.field_mut(field) = value;
                    true
                }
                None => {
                    warn!(day, index, ?field, "update of missing exercise");
                    false
                }
            },
        }
    }
}
