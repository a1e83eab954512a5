//! Storage contract for employees.

use std::future::Future;

use super::error::EmployeeError;
use super::types::{CreateEmployeeInput, Employee, PatchEmployeeInput};

/// Repository trait for employee persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
/// Write operations are atomic: `create` returns `None` and `patch`/`delete`
/// return `false` when their transaction was rolled back. `Err` is reserved
/// for failures outside a transaction (connection loss, failed reads).
pub trait EmployeeRepository: Send + Sync {
    /// Load one employee with passport and departments.
    fn fetch_by_id(
        &self,
        employee_id: i32,
    ) -> impl Future<Output = Result<Option<Employee>, EmployeeError>> + Send;

    /// Load every employee of a company.
    fn fetch_by_company(
        &self,
        company_id: i32,
    ) -> impl Future<Output = Result<Vec<Employee>, EmployeeError>> + Send;

    /// Load every employee that belongs to a department.
    fn fetch_by_department(
        &self,
        department_id: i32,
    ) -> impl Future<Output = Result<Vec<Employee>, EmployeeError>> + Send;

    /// Insert passport, employee and department links. Returns the new employee ID.
    fn create(
        &self,
        input: CreateEmployeeInput,
    ) -> impl Future<Output = Result<Option<i32>, EmployeeError>> + Send;

    /// Apply the supplied fields and relations only.
    fn patch(
        &self,
        employee_id: i32,
        input: PatchEmployeeInput,
    ) -> impl Future<Output = Result<bool, EmployeeError>> + Send;

    /// Remove the employee, its passport and its department links.
    fn delete(&self, employee_id: i32)
    -> impl Future<Output = Result<bool, EmployeeError>> + Send;

    /// Check if an employee exists.
    fn employee_exists(
        &self,
        employee_id: i32,
    ) -> impl Future<Output = Result<bool, EmployeeError>> + Send;

    /// Check if a company exists.
    fn company_exists(
        &self,
        company_id: i32,
    ) -> impl Future<Output = Result<bool, EmployeeError>> + Send;

    /// Check if a department exists.
    fn department_exists(
        &self,
        department_id: i32,
    ) -> impl Future<Output = Result<bool, EmployeeError>> + Send;

    /// Check if an employee references a passport row.
    fn employee_has_passport(
        &self,
        employee_id: i32,
    ) -> impl Future<Output = Result<bool, EmployeeError>> + Send;
}
