use serde::{Deserialize, Serialize};
use shared::model::Set;

use super::exercise::EditorExercise;

/// A workout's exercises without ids or state, what gets copied between
/// workouts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    #[serde(rename = "ejercicios")]
    pub exercises: Vec<RoutineExercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineExercise {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "series", default)]
    pub sets: Vec<Set>,
}

impl Routine {
    /// Only sets that would survive a save are copied
    pub fn from_exercises(exercises: &[EditorExercise]) -> Self {
        Self {
            exercises: exercises
                .iter()
                .map(|e| RoutineExercise {
                    name: e.name.clone(),
                    sets: e.valid_sets(),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use shared::model::Set;

    use super::{Routine, RoutineExercise};

    #[test]
    fn test_routine_json_shape() {
        let routine = Routine {
            exercises: vec![RoutineExercise {
                name: "Squat".to_string(),
                sets: vec![Set::new(5, 60.0)],
            }],
        };
        let value: serde_json::Value = serde_json::from_str(&routine.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({ "ejercicios": [{ "nombre": "Squat", "series": [{ "repeticiones": 5, "peso": 60.0 }] }] })
        );
    }

    #[test]
    fn test_routine_is_pretty_printed() {
        let routine = Routine { exercises: vec![] };
        assert!(routine.to_json().unwrap().contains('\n'));
    }

    #[test]
    fn test_malformed_routine_is_an_error() {
        assert!(Routine::from_json("{\"ejercicios\": 3}").is_err());
        assert!(Routine::from_json("not json").is_err());
    }
}
