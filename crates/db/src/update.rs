//! Incremental column updates.
//!
//! Collects `(column, value)` pairs for the fields a caller actually
//! supplied and turns them into one parameterized `UPDATE` statement.

use sea_orm::sea_query::Expr;
use sea_orm::{EntityTrait, UpdateMany, Value};

/// Ordered set of column assignments for one entity.
#[derive(Debug)]
pub struct ColumnUpdates<E: EntityTrait> {
    pairs: Vec<(E::Column, Value)>,
}

impl<E: EntityTrait> Default for ColumnUpdates<E> {
    fn default() -> Self {
        Self { pairs: Vec::new() }
    }
}

impl<E: EntityTrait> ColumnUpdates<E> {
    /// Creates an empty update set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `value` to `column`.
    pub fn set<V: Into<Value>>(&mut self, column: E::Column, value: V) -> &mut Self {
        self.pairs.push((column, value.into()));
        self
    }

    /// Assigns `value` to `column` when present.
    pub fn set_if<V: Into<Value>>(&mut self, column: E::Column, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.set(column, value);
        }
        self
    }

    /// Returns true if no column was assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of assigned columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Assigned columns in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &E::Column> {
        self.pairs.iter().map(|(column, _)| column)
    }

    /// Builds the `UPDATE` statement. Callers add the row filter.
    ///
    /// Must not be called on an empty set.
    #[must_use]
    pub fn into_update(self) -> UpdateMany<E> {
        debug_assert!(!self.pairs.is_empty(), "empty column update");
        self.pairs
            .into_iter()
            .fold(E::update_many(), |update, (column, value)| {
                update.col_expr(column, Expr::value(value))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{employees, passports};
    use sea_orm::{ColumnTrait, DbBackend, IdenStatic, QueryFilter, QueryTrait};

    #[test]
    fn test_skips_absent_fields() {
        let mut updates = ColumnUpdates::<employees::Entity>::new();
        updates
            .set_if(employees::Column::Name, None::<&str>)
            .set_if(employees::Column::Phone, Some("555-9"))
            .set_if(employees::Column::CompanyId, None::<i32>);

        assert_eq!(updates.len(), 1);
        let columns: Vec<&str> = updates.columns().map(IdenStatic::as_str).collect();
        assert_eq!(columns, vec!["phone"]);
    }

    #[test]
    fn test_empty_set() {
        let updates = ColumnUpdates::<passports::Entity>::new();
        assert!(updates.is_empty());
        assert_eq!(updates.len(), 0);
    }

    #[test]
    fn test_builds_single_parameterized_statement() {
        let mut updates = ColumnUpdates::<employees::Entity>::new();
        updates
            .set(employees::Column::Name, "Robert'); DROP TABLE employees;--")
            .set(employees::Column::CompanyId, 2);

        let statement = updates
            .into_update()
            .filter(employees::Column::Id.eq(7))
            .build(DbBackend::Postgres);

        assert_eq!(
            statement.sql,
            r#"UPDATE "employees" SET "name" = $1, "company_id" = $2 WHERE "employees"."id" = $3"#
        );
        assert_eq!(statement.values.map(|v| v.0.len()), Some(3));
    }

    #[test]
    fn test_passport_type_column_is_quoted() {
        let mut updates = ColumnUpdates::<passports::Entity>::new();
        updates.set(passports::Column::PassportType, "D");

        let statement = updates
            .into_update()
            .filter(passports::Column::Id.eq(1))
            .build(DbBackend::Postgres);

        assert_eq!(
            statement.sql,
            r#"UPDATE "passports" SET "type" = $1 WHERE "passports"."id" = $2"#
        );
    }
}
