use serde::{Deserialize, Serialize};

#[cfg(feature = "backend")]
use {
    exemplar::Model,
    rusqlite::Connection,
    sea_query::{enum_def, Expr, Order, Query, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

/// One repetition/weight pair as it travels over the wire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Set {
    #[serde(rename = "repeticiones")]
    pub reps: u32,
    #[serde(rename = "peso")]
    pub weight: f64,
}

impl Set {
    pub fn new(reps: u32, weight: f64) -> Self {
        Self { reps, weight }
    }

    pub fn is_valid(&self) -> bool {
        self.reps > 0 && self.weight.is_finite() && self.weight > 0.0
    }

    pub fn volume(&self) -> f64 {
        f64::from(self.reps) * self.weight
    }
}

/// Pushes one error message per set that isn't strictly positive
pub(crate) fn check_sets(sets: &[Set], errors: &mut Vec<String>) {
    for (i, set) in sets.iter().enumerate() {
        if !set.is_valid() {
            errors.push(format!(
                "Set {} needs positive reps and weight (got {} x {})",
                i + 1,
                set.reps,
                set.weight
            ));
        }
    }
}

/// Stored row of a set, ordered within its exercise by `position`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "backend", enum_def)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercise_set"))]
pub struct ExerciseSet {
    pub id: i64,
    pub exercise_id: i64,
    pub position: u32,
    pub reps: u32,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercise_set"))]
pub struct NewExerciseSet {
    pub exercise_id: i64,
    pub position: u32,
    pub reps: u32,
    pub weight: f64,
}

impl From<&ExerciseSet> for Set {
    fn from(value: &ExerciseSet) -> Self {
        Set::new(value.reps, value.weight)
    }
}

#[cfg(feature = "backend")]
impl ExerciseSet {
    pub fn fetch_by_exercise(conn: &Connection, exercise_id: i64) -> Result<Vec<ExerciseSet>, rusqlite::Error> {
        let (sql, values) = Query::select()
            .columns([
                ExerciseSetIden::Id,
                ExerciseSetIden::ExerciseId,
                ExerciseSetIden::Position,
                ExerciseSetIden::Reps,
                ExerciseSetIden::Weight,
            ])
            .from(ExerciseSetIden::Table)
            .and_where(Expr::col(ExerciseSetIden::ExerciseId).eq(exercise_id))
            .order_by(ExerciseSetIden::Position, Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let sets = stmt
            .query_map(&*values.as_params(), ExerciseSet::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(sets)
    }

    /// Inserts `sets` in order after the exercise's existing sets have been removed
    ///
    /// Callers are expected to run this inside the same transaction as the
    /// delete so the exercise never ends up half replaced
    pub fn insert_all(conn: &Connection, exercise_id: i64, sets: &[Set]) -> Result<(), rusqlite::Error> {
        for (position, set) in sets.iter().enumerate() {
            NewExerciseSet {
                exercise_id,
                position: position as u32,
                reps: set.reps,
                weight: set.weight,
            }
            .insert(conn)?;
        }
        Ok(())
    }

    pub fn delete_by_exercise(conn: &Connection, exercise_id: i64) -> Result<usize, rusqlite::Error> {
        let (sql, values) = Query::delete()
            .from_table(ExerciseSetIden::Table)
            .and_where(Expr::col(ExerciseSetIden::ExerciseId).eq(exercise_id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let deleted = stmt.execute(&*values.as_params())?;
        Ok(deleted)
    }
}

#[cfg(test)]
mod test {
    use super::{check_sets, Set};

    #[test]
    fn test_set_wire_names() {
        let json = serde_json::to_value(Set::new(5, 60.0)).unwrap();
        assert_eq!(json, serde_json::json!({ "repeticiones": 5, "peso": 60.0 }));
    }

    #[test]
    fn test_set_validity() {
        assert!(Set::new(4, 10.0).is_valid());
        assert!(!Set::new(0, 10.0).is_valid());
        assert!(!Set::new(4, 0.0).is_valid());
        assert!(!Set::new(4, -2.5).is_valid());
        assert!(!Set::new(4, f64::NAN).is_valid());
    }

    #[test]
    fn test_check_sets_reports_each_bad_set() {
        let mut errors = vec![];
        check_sets(&[Set::new(5, 0.0), Set::new(4, 10.0), Set::new(0, 1.0)], &mut errors);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("Set 1"));
        assert!(errors[1].starts_with("Set 3"));
    }

    #[test]
    fn test_volume() {
        assert_eq!(Set::new(3, 10.0).volume(), 30.0);
    }
}
