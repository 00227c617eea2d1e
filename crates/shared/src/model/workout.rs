use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ValidateModel;
use crate::api::error::ValidationError;

#[cfg(feature = "backend")]
use {
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Expr, Order, Query, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

/// A dated session inside a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", enum_def)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("workout"))]
pub struct Workout {
    #[serde(rename = "entrenamientoid")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "categoriaid")]
    pub category_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("workout"))]
pub struct NewWorkout {
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "categoriaid")]
    pub category_id: i64,
}

impl NewWorkout {
    pub fn new<N: Into<String>>(name: N, date: NaiveDate, category_id: i64) -> Self {
        Self {
            name: name.into(),
            date,
            category_id,
        }
    }
}

// Workouts are allowed an empty name, the date is what tells them apart
impl ValidateModel for NewWorkout {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

#[cfg(feature = "backend")]
impl Workout {
    fn select_star() -> sea_query::SelectStatement {
        Query::select()
            .columns([
                WorkoutIden::Id,
                WorkoutIden::Name,
                WorkoutIden::Date,
                WorkoutIden::CategoryId,
            ])
            .from(WorkoutIden::Table)
            .to_owned()
    }

    pub fn fetch_by_id(conn: &Connection, id: i64) -> Result<Option<Workout>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .and_where(Expr::col(WorkoutIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let workout = stmt
            .query_row(&*values.as_params(), Workout::from_row)
            .optional()?;
        Ok(workout)
    }

    pub fn fetch_by_category(conn: &Connection, category_id: i64) -> Result<Vec<Workout>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .and_where(Expr::col(WorkoutIden::CategoryId).eq(category_id))
            .order_by(WorkoutIden::Date, Order::Asc)
            .order_by(WorkoutIden::Id, Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let workouts = stmt
            .query_map(&*values.as_params(), Workout::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(workouts)
    }

    /// Deletes the workout, its exercises and their sets go with it through
    /// the foreign key cascade
    pub fn delete(conn: &Connection, id: i64) -> Result<usize, rusqlite::Error> {
        let (sql, values) = Query::delete()
            .from_table(WorkoutIden::Table)
            .and_where(Expr::col(WorkoutIden::Id).eq(id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let deleted = stmt.execute(&*values.as_params())?;
        Ok(deleted)
    }
}

#[cfg(feature = "backend")]
impl NewWorkout {
    pub fn create(self, conn: &mut Connection) -> Result<Workout, rusqlite::Error> {
        let tx = conn.transaction()?;
        let workout = {
            self.insert(&tx)?;
            Workout::fetch_by_id(&tx, tx.last_insert_rowid())?
                .ok_or(rusqlite::Error::QueryReturnedNoRows)?
        };
        tx.commit()?;

        Ok(workout)
    }
}
