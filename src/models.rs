//models.rs
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
    Cardio,
}

impl MuscleGroup {
    /// Display order for pickers. The first entry is the form default.
    pub const ALL: [MuscleGroup; 7] = [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Legs,
        MuscleGroup::Shoulders,
        MuscleGroup::Arms,
        MuscleGroup::Core,
        MuscleGroup::Cardio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Arms => "Arms",
            MuscleGroup::Core => "Core",
            MuscleGroup::Cardio => "Cardio",
        }
    }
}

impl Default for MuscleGroup {
    fn default() -> Self {
        MuscleGroup::ALL[0]
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logged workout as the server returns it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    pub exercise_name: String,
    pub muscle_group: MuscleGroup,
    pub is_cardio: bool,
    pub weight_kg: f64,
    pub sets: u32,
    pub reps: u32,
    pub total_volume: f64,
    pub created_at: NaiveDateTime,
}

/// Body of a create or update. The server owns id, volume and timestamp.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorkoutPayload {
    pub exercise_name: String,
    pub muscle_group: MuscleGroup,
    pub is_cardio: bool,
    pub weight_kg: f64,
    pub sets: u32,
    pub reps: u32,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct WorkoutPage {
    pub workouts: Vec<Workout>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_prev: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkoutQuery {
    pub page: u32,
    pub per_page: u32,
    pub muscle_group: Option<MuscleGroup>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ServerStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}
