//! Employee store for database operations.
//!
//! Reads join employees, passports and departments and fold the
//! one-row-per-department result in memory. Writes run inside a single
//! transaction that is committed once on success and rolled back once on
//! any failure.

use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    Select, Set, TransactionError, TransactionTrait,
};
use tracing::{debug, warn};

use crate::entities::{departments, employee_departments, employees, passports};
use crate::update::ColumnUpdates;
use employees_core::employee::{
    CreateEmployeeInput, Employee, EmployeeError, EmployeeRepository, EmployeeRow,
    PatchEmployeeInput, fold_rows, fold_single,
};

/// Flat row of the employee/passport/department join.
#[derive(Debug, FromQueryResult)]
struct JoinedRow {
    employee_id: i32,
    name: String,
    surname: String,
    phone: String,
    company_id: i32,
    passport_type: Option<String>,
    passport_number: Option<String>,
    department_id: Option<i32>,
    department_name: Option<String>,
    department_phone: Option<String>,
}

impl From<JoinedRow> for EmployeeRow {
    fn from(row: JoinedRow) -> Self {
        Self {
            employee_id: row.employee_id,
            name: row.name,
            surname: row.surname,
            phone: row.phone,
            company_id: row.company_id,
            passport_type: row.passport_type,
            passport_number: row.passport_number,
            department_id: row.department_id,
            department_name: row.department_name,
            department_phone: row.department_phone,
        }
    }
}

/// Employee store backed by the connection pool.
///
/// Each call checks a connection out of the pool for its own duration.
#[derive(Debug, Clone)]
pub struct EmployeeStore {
    db: DatabaseConnection,
}

impl EmployeeStore {
    /// Creates a new employee store.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Base query: employees with passport and departments, one row per department.
    fn joined() -> Select<employees::Entity> {
        employees::Entity::find()
            .select_only()
            .column_as(employees::Column::Id, "employee_id")
            .column(employees::Column::Name)
            .column(employees::Column::Surname)
            .column(employees::Column::Phone)
            .column(employees::Column::CompanyId)
            .column_as(passports::Column::PassportType, "passport_type")
            .column_as(passports::Column::Number, "passport_number")
            .column_as(departments::Column::Id, "department_id")
            .column_as(departments::Column::Name, "department_name")
            .column_as(departments::Column::Phone, "department_phone")
            .join(JoinType::LeftJoin, employees::Relation::Passports.def())
            .join(
                JoinType::LeftJoin,
                employees::Relation::EmployeeDepartments.def(),
            )
            .join(
                JoinType::LeftJoin,
                employee_departments::Relation::Departments.def(),
            )
            .order_by_asc(employees::Column::Id)
            .order_by_asc(departments::Column::Id)
    }

    async fn load_rows(&self, query: Select<employees::Entity>) -> Result<Vec<EmployeeRow>, DbErr> {
        let rows = query.into_model::<JoinedRow>().all(&self.db).await?;
        Ok(rows.into_iter().map(EmployeeRow::from).collect())
    }
}

/// Looks up the passport ID owned by an employee.
async fn passport_id_of<C: ConnectionTrait>(
    conn: &C,
    employee_id: i32,
) -> Result<Option<i32>, DbErr> {
    employees::Entity::find_by_id(employee_id)
        .select_only()
        .column(employees::Column::PassportId)
        .into_tuple::<i32>()
        .one(conn)
        .await
}

/// Inserts one join row per department.
async fn link_departments<C: ConnectionTrait>(
    conn: &C,
    employee_id: i32,
    department_ids: &[i32],
) -> Result<(), DbErr> {
    if department_ids.is_empty() {
        return Ok(());
    }

    let links = department_ids
        .iter()
        .map(|&department_id| employee_departments::ActiveModel {
            employee_id: Set(employee_id),
            department_id: Set(department_id),
        });

    employee_departments::Entity::insert_many(links)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

/// Removes every join row of an employee.
async fn unlink_departments<C: ConnectionTrait>(conn: &C, employee_id: i32) -> Result<u64, DbErr> {
    let result = employee_departments::Entity::delete_many()
        .filter(employee_departments::Column::EmployeeId.eq(employee_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

fn repo_err(e: DbErr) -> EmployeeError {
    EmployeeError::repository(e.to_string())
}

impl EmployeeRepository for EmployeeStore {
    async fn fetch_by_id(&self, employee_id: i32) -> Result<Option<Employee>, EmployeeError> {
        let rows = self
            .load_rows(Self::joined().filter(employees::Column::Id.eq(employee_id)))
            .await
            .map_err(repo_err)?;

        Ok(fold_single(rows))
    }

    async fn fetch_by_company(&self, company_id: i32) -> Result<Vec<Employee>, EmployeeError> {
        let rows = self
            .load_rows(Self::joined().filter(employees::Column::CompanyId.eq(company_id)))
            .await
            .map_err(repo_err)?;

        Ok(fold_rows(rows))
    }

    async fn fetch_by_department(
        &self,
        department_id: i32,
    ) -> Result<Vec<Employee>, EmployeeError> {
        let members = Query::select()
            .column(employee_departments::Column::EmployeeId)
            .from(employee_departments::Entity)
            .and_where(employee_departments::Column::DepartmentId.eq(department_id))
            .to_owned();

        let rows = self
            .load_rows(Self::joined().filter(employees::Column::Id.in_subquery(members)))
            .await
            .map_err(repo_err)?;

        Ok(fold_rows(rows))
    }

    async fn create(&self, input: CreateEmployeeInput) -> Result<Option<i32>, EmployeeError> {
        let result = self
            .db
            .transaction::<_, i32, DbErr>(|txn| {
                Box::pin(async move {
                    let passport = passports::ActiveModel {
                        passport_type: Set(input.passport.passport_type),
                        number: Set(input.passport.number),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    let employee = employees::ActiveModel {
                        name: Set(input.name),
                        surname: Set(input.surname),
                        phone: Set(input.phone),
                        company_id: Set(input.company_id),
                        passport_id: Set(passport.id),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    link_departments(txn, employee.id, &input.department_ids).await?;

                    Ok(employee.id)
                })
            })
            .await;

        match result {
            Ok(employee_id) => {
                debug!(employee_id, "Employee rows inserted");
                Ok(Some(employee_id))
            }
            Err(TransactionError::Transaction(e)) => {
                warn!(error = %e, "Employee create rolled back");
                Ok(None)
            }
            Err(TransactionError::Connection(e)) => Err(repo_err(e)),
        }
    }

    async fn patch(
        &self,
        employee_id: i32,
        input: PatchEmployeeInput,
    ) -> Result<bool, EmployeeError> {
        let result = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    let Some(passport_id) = passport_id_of(txn, employee_id).await? else {
                        return Ok(false);
                    };

                    let mut employee_updates = ColumnUpdates::<employees::Entity>::new();
                    employee_updates
                        .set_if(employees::Column::Name, input.name())
                        .set_if(employees::Column::Surname, input.surname())
                        .set_if(employees::Column::Phone, input.phone())
                        .set_if(employees::Column::CompanyId, input.company_id());

                    if !employee_updates.is_empty() {
                        employee_updates
                            .into_update()
                            .filter(employees::Column::Id.eq(employee_id))
                            .exec(txn)
                            .await?;
                    }

                    if let Some(passport) = input.passport() {
                        let mut passport_updates = ColumnUpdates::<passports::Entity>::new();
                        passport_updates
                            .set_if(passports::Column::PassportType, passport.passport_type())
                            .set_if(passports::Column::Number, passport.number());

                        if !passport_updates.is_empty() {
                            passport_updates
                                .into_update()
                                .filter(passports::Column::Id.eq(passport_id))
                                .exec(txn)
                                .await?;
                        }
                    }

                    if let Some(department_ids) = input.department_ids() {
                        unlink_departments(txn, employee_id).await?;
                        link_departments(txn, employee_id, department_ids).await?;
                    }

                    Ok(true)
                })
            })
            .await;

        match result {
            Ok(updated) => Ok(updated),
            Err(TransactionError::Transaction(e)) => {
                warn!(employee_id, error = %e, "Employee patch rolled back");
                Ok(false)
            }
            Err(TransactionError::Connection(e)) => Err(repo_err(e)),
        }
    }

    async fn delete(&self, employee_id: i32) -> Result<bool, EmployeeError> {
        let result = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    let Some(passport_id) = passport_id_of(txn, employee_id).await? else {
                        return Ok(false);
                    };

                    // Join rows go first regardless of any ON DELETE CASCADE.
                    unlink_departments(txn, employee_id).await?;
                    employees::Entity::delete_by_id(employee_id)
                        .exec(txn)
                        .await?;
                    passports::Entity::delete_by_id(passport_id)
                        .exec(txn)
                        .await?;

                    Ok(true)
                })
            })
            .await;

        match result {
            Ok(deleted) => Ok(deleted),
            Err(TransactionError::Transaction(e)) => {
                warn!(employee_id, error = %e, "Employee delete rolled back");
                Ok(false)
            }
            Err(TransactionError::Connection(e)) => Err(repo_err(e)),
        }
    }

    async fn employee_exists(&self, employee_id: i32) -> Result<bool, EmployeeError> {
        let count = employees::Entity::find_by_id(employee_id)
            .count(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(count > 0)
    }

    async fn company_exists(&self, company_id: i32) -> Result<bool, EmployeeError> {
        let count = crate::entities::companies::Entity::find_by_id(company_id)
            .count(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(count > 0)
    }

    async fn department_exists(&self, department_id: i32) -> Result<bool, EmployeeError> {
        let count = departments::Entity::find_by_id(department_id)
            .count(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(count > 0)
    }

    async fn employee_has_passport(&self, employee_id: i32) -> Result<bool, EmployeeError> {
        let count = employees::Entity::find_by_id(employee_id)
            .inner_join(passports::Entity)
            .count(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(count > 0)
    }
}

#[cfg(test)]
#[path = "employee_tests.rs"]
mod tests;
