use crate::models::Workout;

pub const EMPTY_MESSAGE: &str = "No workouts logged yet. Add one to get started!";
pub const CARDIO_LABEL: &str = "Cardio Session";

#[derive(Clone, Debug, PartialEq)]
pub enum RowDetail {
    Cardio,
    Strength {
        weight: String,
        sets_reps: String,
        volume: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct WorkoutRow {
    pub id: i64,
    pub exercise_name: String,
    pub muscle_group: String,
    pub logged_on: String,
    pub detail: RowDetail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowAction {
    Edit(i64),
    Delete(i64),
}

impl WorkoutRow {
    pub fn from_record(record: &Workout) -> Self {
        let detail = if record.is_cardio {
            RowDetail::Cardio
        } else {
            RowDetail::Strength {
                weight: format!("{} kg", record.weight_kg),
                sets_reps: format!("{} x {}", record.sets, record.reps),
                volume: format!("{:.1} kg", record.total_volume),
            }
        };

        Self {
            id: record.id,
            exercise_name: record.exercise_name.clone(),
            muscle_group: record.muscle_group.to_string(),
            logged_on: record.created_at.format("%Y-%m-%d %H:%M").to_string(),
            detail,
        }
    }
}

/// Rows in server order; nothing is re-sorted here.
pub fn rows(records: &[Workout]) -> Vec<WorkoutRow> {
    records.iter().map(WorkoutRow::from_record).collect()
}
