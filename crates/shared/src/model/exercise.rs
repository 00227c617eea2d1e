use serde::{Deserialize, Serialize};

use super::{check_name, set::check_sets, Set, ValidateModel};
use crate::api::error::ValidationError;

#[cfg(feature = "backend")]
use {
    super::ExerciseSet,
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Expr, Order, Query, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

/// A named movement within a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", enum_def)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercise"))]
pub struct Exercise {
    #[serde(rename = "ejercicioid")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "entrenamientoid")]
    pub workout_id: i64,
}

/// An exercise together with its sets, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseWithSets {
    #[serde(flatten)]
    pub exercise: Exercise,
    #[serde(rename = "series", default)]
    pub sets: Vec<Set>,
}

/// Body of the exercise create request, the workout comes from the path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExercise {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "series", default)]
    pub sets: Vec<Set>,
}

impl NewExercise {
    pub fn new<N: Into<String>>(name: N, sets: Vec<Set>) -> Self {
        Self {
            name: name.into(),
            sets,
        }
    }
}

impl ValidateModel for NewExercise {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = vec![];
        check_name("Exercise", &self.name, &mut errors);
        check_sets(&self.sets, &mut errors);
        ValidationError::check(errors)
    }
}

/// Body of the exercise update request, the sets replace the stored ones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateExercise {
    #[serde(rename = "series", default)]
    pub sets: Vec<Set>,
}

impl UpdateExercise {
    pub fn new(sets: Vec<Set>) -> Self {
        Self { sets }
    }
}

impl ValidateModel for UpdateExercise {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = vec![];
        check_sets(&self.sets, &mut errors);
        ValidationError::check(errors)
    }
}

#[cfg(feature = "backend")]
#[derive(Debug, Clone, PartialEq, Model)]
#[table("exercise")]
struct NewExerciseRow {
    name: String,
    workout_id: i64,
}

#[cfg(feature = "backend")]
impl Exercise {
    fn select_star() -> sea_query::SelectStatement {
        Query::select()
            .columns([ExerciseIden::Id, ExerciseIden::Name, ExerciseIden::WorkoutId])
            .from(ExerciseIden::Table)
            .to_owned()
    }

    pub fn fetch_by_id(conn: &Connection, id: i64) -> Result<Option<Exercise>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .and_where(Expr::col(ExerciseIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let exercise = stmt
            .query_row(&*values.as_params(), Exercise::from_row)
            .optional()?;
        Ok(exercise)
    }

    pub fn fetch_by_workout(conn: &Connection, workout_id: i64) -> Result<Vec<Exercise>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .and_where(Expr::col(ExerciseIden::WorkoutId).eq(workout_id))
            .order_by(ExerciseIden::Id, Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let exercises = stmt
            .query_map(&*values.as_params(), Exercise::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(exercises)
    }

    /// Replaces every stored set of the exercise with `sets`
    ///
    /// Returns `None` if the exercise doesn't exist, in which case nothing is
    /// written
    pub fn replace_sets(conn: &mut Connection, id: i64, sets: &[Set]) -> Result<Option<Exercise>, rusqlite::Error> {
        let tx = conn.transaction()?;
        let exercise = match Exercise::fetch_by_id(&tx, id)? {
            None => return Ok(None),
            Some(exercise) => exercise,
        };
        ExerciseSet::delete_by_exercise(&tx, id)?;
        ExerciseSet::insert_all(&tx, id, sets)?;
        tx.commit()?;

        Ok(Some(exercise))
    }

    /// Deletes the sets and then the exercise row in one transaction
    ///
    /// Returns whether the exercise existed. Deleting an exercise that is
    /// already gone succeeds so an interrupted delete can be repeated
    pub fn delete_with_sets(conn: &mut Connection, id: i64) -> Result<bool, rusqlite::Error> {
        let tx = conn.transaction()?;
        ExerciseSet::delete_by_exercise(&tx, id)?;

        let (sql, values) = Query::delete()
            .from_table(ExerciseIden::Table)
            .and_where(Expr::col(ExerciseIden::Id).eq(id))
            .build_rusqlite(SqliteQueryBuilder);
        let deleted = {
            let mut stmt = tx.prepare_cached(&sql)?;
            stmt.execute(&*values.as_params())?
        };
        tx.commit()?;

        Ok(deleted > 0)
    }
}

#[cfg(feature = "backend")]
impl ExerciseWithSets {
    pub fn fetch_by_workout(conn: &Connection, workout_id: i64) -> Result<Vec<ExerciseWithSets>, rusqlite::Error> {
        Exercise::fetch_by_workout(conn, workout_id)?
            .into_iter()
            .map(|exercise| {
                let sets = ExerciseSet::fetch_by_exercise(conn, exercise.id)?
                    .iter()
                    .map(Set::from)
                    .collect();
                Ok::<_, rusqlite::Error>(ExerciseWithSets { exercise, sets })
            })
            .collect()
    }
}

#[cfg(feature = "backend")]
impl NewExercise {
    /// Inserts the exercise and its sets in one transaction
    pub fn create(self, conn: &mut Connection, workout_id: i64) -> Result<Exercise, rusqlite::Error> {
        let tx = conn.transaction()?;
        let exercise = {
            NewExerciseRow {
                name: self.name,
                workout_id,
            }
            .insert(&tx)?;
            let id = tx.last_insert_rowid();
            ExerciseSet::insert_all(&tx, id, &self.sets)?;
            Exercise::fetch_by_id(&tx, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?
        };
        tx.commit()?;

        Ok(exercise)
    }
}

#[cfg(test)]
mod test {
    use super::{Exercise, ExerciseWithSets, NewExercise, UpdateExercise};
    use crate::model::{Set, ValidateModel};

    #[test]
    fn test_exercise_with_sets_is_flattened() {
        let exercise = ExerciseWithSets {
            exercise: Exercise {
                id: 9,
                name: "Squat".to_string(),
                workout_id: 4,
            },
            sets: vec![Set::new(5, 60.0)],
        };
        let json = serde_json::to_value(&exercise).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "ejercicioid": 9,
                "nombre": "Squat",
                "entrenamientoid": 4,
                "series": [{ "repeticiones": 5, "peso": 60.0 }],
            })
        );
    }

    #[test]
    fn test_new_exercise_validation() {
        assert!(NewExercise::new("Squat", vec![Set::new(5, 60.0)]).validate().is_ok());
        assert!(NewExercise::new("Squat", vec![]).validate().is_ok());
        assert!(NewExercise::new(" ", vec![]).validate().is_err());
        assert!(NewExercise::new("Squat", vec![Set::new(5, 0.0)]).validate().is_err());
    }

    #[test]
    fn test_update_exercise_validation() {
        assert!(UpdateExercise::new(vec![Set::new(1, 1.0)]).validate().is_ok());
        assert!(UpdateExercise::new(vec![Set::new(0, 1.0)]).validate().is_err());
    }

    #[test]
    fn test_update_exercise_defaults_to_no_sets() {
        let update: UpdateExercise = serde_json::from_str("{}").unwrap();
        assert!(update.sets.is_empty());
    }
}
