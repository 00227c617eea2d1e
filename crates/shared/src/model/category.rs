use serde::{Deserialize, Serialize};

use super::{check_name, ValidateModel};
use crate::api::error::ValidationError;

#[cfg(feature = "backend")]
use {
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Expr, Order, Query, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

/// A user defined grouping of workouts, e.g. "Push Day"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", enum_def)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("category"))]
pub struct Category {
    #[serde(rename = "categoriaid")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "userid")]
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("category"))]
pub struct NewCategory {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "userid")]
    pub user_id: String,
}

impl NewCategory {
    pub fn new<N: Into<String>, U: Into<String>>(name: N, user_id: U) -> Self {
        Self {
            name: name.into(),
            user_id: user_id.into(),
        }
    }
}

impl ValidateModel for NewCategory {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = vec![];
        check_name("Category", &self.name, &mut errors);
        if self.user_id.trim().is_empty() {
            errors.push("Category needs a user id".to_string());
        }
        ValidationError::check(errors)
    }
}

#[cfg(feature = "backend")]
impl Category {
    fn select_star() -> sea_query::SelectStatement {
        Query::select()
            .columns([CategoryIden::Id, CategoryIden::Name, CategoryIden::UserId])
            .from(CategoryIden::Table)
            .to_owned()
    }

    pub fn fetch_by_id(conn: &Connection, id: i64) -> Result<Option<Category>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .and_where(Expr::col(CategoryIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let category = stmt
            .query_row(&*values.as_params(), Category::from_row)
            .optional()?;
        Ok(category)
    }

    pub fn fetch_by_user(conn: &Connection, user_id: &str) -> Result<Vec<Category>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .and_where(Expr::col(CategoryIden::UserId).eq(user_id))
            .order_by(CategoryIden::Id, Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let categories = stmt
            .query_map(&*values.as_params(), Category::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(categories)
    }

    /// Deletes the category, its workouts go with it through the foreign key cascade
    pub fn delete(conn: &Connection, id: i64) -> Result<usize, rusqlite::Error> {
        let (sql, values) = Query::delete()
            .from_table(CategoryIden::Table)
            .and_where(Expr::col(CategoryIden::Id).eq(id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let deleted = stmt.execute(&*values.as_params())?;
        Ok(deleted)
    }
}

#[cfg(feature = "backend")]
impl NewCategory {
    pub fn create(self, conn: &mut Connection) -> Result<Category, rusqlite::Error> {
        let tx = conn.transaction()?;
        let category = {
            self.insert(&tx)?;
            Category::fetch_by_id(&tx, tx.last_insert_rowid())?
                .ok_or(rusqlite::Error::QueryReturnedNoRows)?
        };
        tx.commit()?;

        Ok(category)
    }
}
