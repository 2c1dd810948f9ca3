use crate::models::{MuscleGroup, Workout, WorkoutPayload};

/// The open create/edit draft. Numeric inputs stay as typed text until
/// submit so a half-typed value never fights the user.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkoutForm {
    pub editing: Option<i64>,
    pub exercise_name: String,
    pub muscle_group: MuscleGroup,
    pub is_cardio: bool,
    pub weight_kg: String,
    pub sets: String,
    pub reps: String,
}

impl WorkoutForm {
    pub fn blank() -> Self {
        Self {
            editing: None,
            exercise_name: String::new(),
            muscle_group: MuscleGroup::default(),
            is_cardio: false,
            weight_kg: String::new(),
            sets: String::new(),
            reps: String::new(),
        }
    }

    pub fn edit(record: &Workout) -> Self {
        Self {
            editing: Some(record.id),
            exercise_name: record.exercise_name.clone(),
            muscle_group: record.muscle_group,
            is_cardio: record.is_cardio,
            weight_kg: record.weight_kg.to_string(),
            sets: record.sets.to_string(),
            reps: record.reps.to_string(),
        }
    }

    /// Strength inputs are disabled, and not required, for cardio.
    pub fn strength_inputs_enabled(&self) -> bool {
        !self.is_cardio
    }

    /// Required-field check. Content of the numeric fields is never judged;
    /// whatever is there gets coerced on submit.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.exercise_name.trim().is_empty() {
            missing.push("exercise name");
        }
        if !self.is_cardio {
            if self.weight_kg.trim().is_empty() {
                missing.push("weight");
            }
            if self.sets.trim().is_empty() {
                missing.push("sets");
            }
            if self.reps.trim().is_empty() {
                missing.push("reps");
            }
        }
        missing
    }

    pub fn can_submit(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// Disabled fields keep their last text and are sent anyway.
    pub fn to_payload(&self) -> WorkoutPayload {
        WorkoutPayload {
            exercise_name: self.exercise_name.trim().to_string(),
            muscle_group: self.muscle_group,
            is_cardio: self.is_cardio,
            weight_kg: parse_weight(&self.weight_kg),
            sets: parse_count(&self.sets),
            reps: parse_count(&self.reps),
        }
    }
}

fn parse_weight(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => 0.0,
    }
}

fn parse_count(input: &str) -> u32 {
    let input = input.trim();
    if let Ok(value) = input.parse::<u32>() {
        return value;
    }
    // "3.7" counts as 3
    match input.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 && value <= u32::MAX as f64 => {
            value.trunc() as u32
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::worker::fake::workout;

    #[test]
    fn blank_form_defaults_to_first_muscle_group() {
        let form = WorkoutForm::blank();
        assert_eq!(form.muscle_group, MuscleGroup::ALL[0]);
        assert_eq!(form.editing, None);
        assert!(!form.is_cardio);
    }

    #[test]
    fn edit_form_is_prefilled_from_the_record() {
        let form = WorkoutForm::edit(&workout(3, false));
        assert_eq!(form.editing, Some(3));
        assert_eq!(form.exercise_name, "Bench Press");
        assert_eq!(form.weight_kg, "50");
        assert_eq!(form.sets, "3");
        assert_eq!(form.reps, "10");
    }

    #[test]
    fn empty_cardio_fields_submit_as_zero() {
        let form = WorkoutForm {
            exercise_name: "Rowing".to_string(),
            muscle_group: MuscleGroup::Cardio,
            is_cardio: true,
            ..WorkoutForm::blank()
        };
        assert!(form.can_submit());

        let payload = form.to_payload();
        assert_eq!(payload.weight_kg, 0.0);
        assert_eq!(payload.sets, 0);
        assert_eq!(payload.reps, 0);
    }

    #[test]
    fn toggling_cardio_keeps_typed_numbers_in_the_payload() {
        let mut form = WorkoutForm {
            exercise_name: "Sled Push".to_string(),
            weight_kg: "80".to_string(),
            sets: "4".to_string(),
            reps: "12".to_string(),
            ..WorkoutForm::blank()
        };
        form.is_cardio = true;
        assert!(!form.strength_inputs_enabled());

        let payload = form.to_payload();
        assert!(payload.is_cardio);
        assert_eq!((payload.weight_kg, payload.sets, payload.reps), (80.0, 4, 12));
    }

    #[test]
    fn strength_entry_requires_numbers_present() {
        let form = WorkoutForm {
            exercise_name: "Squat".to_string(),
            weight_kg: "100".to_string(),
            ..WorkoutForm::blank()
        };
        assert_eq!(form.missing_required(), vec!["sets", "reps"]);
        assert!(!form.can_submit());
    }

    #[test]
    fn exercise_name_is_always_required() {
        let form = WorkoutForm {
            exercise_name: "   ".to_string(),
            is_cardio: true,
            ..WorkoutForm::blank()
        };
        assert_eq!(form.missing_required(), vec!["exercise name"]);
    }

    #[rstest]
    #[case("42.5", 42.5)]
    #[case(" 60 ", 60.0)]
    #[case("", 0.0)]
    #[case("heavy", 0.0)]
    #[case("-5", 0.0)]
    #[case("NaN", 0.0)]
    #[case("inf", 0.0)]
    fn weight_is_coerced(#[case] input: &str, #[case] expected: f64) {
        assert_eq!(parse_weight(input), expected);
    }

    #[rstest]
    #[case("8", 8)]
    #[case("3.7", 3)]
    #[case("", 0)]
    #[case("ten", 0)]
    #[case("-2", 0)]
    #[case("1e12", 0)]
    fn counts_are_coerced(#[case] input: &str, #[case] expected: u32) {
        assert_eq!(parse_count(input), expected);
    }
}
