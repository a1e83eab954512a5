//! Employee service: referential checks in front of the repository.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{error, info};

use super::error::{EmployeeError, ServiceResult};
use super::repository::EmployeeRepository;
use super::types::{CreateEmployeeInput, Employee, PatchEmployeeInput};

/// Employee service for managing employees.
///
/// Every operation checks that the referenced employee, company and
/// departments exist before the repository is asked to read or write.
/// Storage faults are logged and returned as generic failures.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: Arc<R>,
}

impl<R: EmployeeRepository> Clone for EmployeeService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Create a new employee service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create an employee with its passport and department links.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Company ID is not positive or the company does not exist
    /// - Department list is empty, repeats an ID, or references a missing department
    /// - The repository rolled back or faulted
    pub async fn add_employee(&self, input: CreateEmployeeInput) -> ServiceResult<i32> {
        self.check_company(input.company_id)
            .await
            .map_err(fault("add_employee", EmployeeError::CreateFailed))?;

        if input.department_ids.is_empty() {
            return Err(EmployeeError::MissingDepartments);
        }
        self.check_departments(&input.department_ids)
            .await
            .map_err(fault("add_employee", EmployeeError::CreateFailed))?;

        let employee_id = self
            .repo
            .create(input)
            .await
            .map_err(fault("add_employee", EmployeeError::CreateFailed))?
            .ok_or(EmployeeError::CreateFailed)?;

        info!(employee_id, "Employee created");
        Ok(employee_id)
    }

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Employee ID is not positive or the employee does not exist
    /// - A supplied company or department does not exist
    /// - Passport fields are supplied but the employee has no passport
    /// - The repository rolled back or faulted
    pub async fn patch_employee(
        &self,
        employee_id: i32,
        input: PatchEmployeeInput,
    ) -> ServiceResult<bool> {
        if employee_id <= 0 {
            return Err(EmployeeError::InvalidEmployeeId(employee_id));
        }

        self.check_employee(employee_id)
            .await
            .map_err(fault("patch_employee", EmployeeError::UpdateFailed))?;

        if let Some(company_id) = input.company_id() {
            self.check_company(company_id)
                .await
                .map_err(fault("patch_employee", EmployeeError::UpdateFailed))?;
        }

        if let Some(department_ids) = input.department_ids() {
            self.check_departments(department_ids)
                .await
                .map_err(fault("patch_employee", EmployeeError::UpdateFailed))?;
        }

        if input.passport().is_some() {
            let has_passport = self
                .repo
                .employee_has_passport(employee_id)
                .await
                .map_err(fault("patch_employee", EmployeeError::UpdateFailed))?;
            if !has_passport {
                return Err(EmployeeError::MissingPassport(employee_id));
            }
        }

        let updated = self
            .repo
            .patch(employee_id, input)
            .await
            .map_err(fault("patch_employee", EmployeeError::UpdateFailed))?;

        if !updated {
            return Err(EmployeeError::UpdateFailed);
        }

        info!(employee_id, "Employee updated");
        Ok(true)
    }

    /// Get an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is not positive, the employee does not
    /// exist, or it cannot be read back.
    pub async fn get_employee(&self, employee_id: i32) -> ServiceResult<Employee> {
        if employee_id <= 0 {
            return Err(EmployeeError::InvalidEmployeeId(employee_id));
        }

        self.check_employee(employee_id)
            .await
            .map_err(fault("get_employee", internal("Failed to load employee")))?;

        self.repo
            .fetch_by_id(employee_id)
            .await
            .map_err(fault("get_employee", EmployeeError::FetchFailed))?
            .ok_or(EmployeeError::FetchFailed)
    }

    /// Delete an employee together with its passport and department links.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee does not exist or the repository
    /// rolled back or faulted.
    pub async fn delete_employee(&self, employee_id: i32) -> ServiceResult<bool> {
        if !self
            .employee_exists(employee_id)
            .await
            .map_err(fault("delete_employee", EmployeeError::DeleteFailed))?
        {
            return Err(EmployeeError::EmployeeNotFound(employee_id));
        }

        let deleted = self
            .repo
            .delete(employee_id)
            .await
            .map_err(fault("delete_employee", EmployeeError::DeleteFailed))?;

        if !deleted {
            return Err(EmployeeError::DeleteFailed);
        }

        info!(employee_id, "Employee deleted");
        Ok(true)
    }

    /// Check if an employee exists. Non-positive IDs never exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository faulted.
    pub async fn employee_exists(&self, employee_id: i32) -> ServiceResult<bool> {
        if employee_id <= 0 {
            return Ok(false);
        }
        self.repo.employee_exists(employee_id).await
    }

    /// List the employees of a company.
    ///
    /// An empty result is reported as `NoEmployeesForCompany`.
    ///
    /// # Errors
    ///
    /// Returns an error if the company ID is not positive, the company does
    /// not exist, or no employee belongs to it.
    pub async fn get_by_company(&self, company_id: i32) -> ServiceResult<Vec<Employee>> {
        let load_failed = || internal("Failed to load employees");

        self.check_company(company_id)
            .await
            .map_err(fault("get_by_company", load_failed()))?;

        let employees = self
            .repo
            .fetch_by_company(company_id)
            .await
            .map_err(fault("get_by_company", load_failed()))?;

        if employees.is_empty() {
            return Err(EmployeeError::NoEmployeesForCompany(company_id));
        }
        Ok(employees)
    }

    /// List the employees of a department.
    ///
    /// An empty result is reported as `NoEmployeesForDepartment`.
    ///
    /// # Errors
    ///
    /// Returns an error if the department ID is not positive, the department
    /// does not exist, or no employee belongs to it.
    pub async fn get_by_department(&self, department_id: i32) -> ServiceResult<Vec<Employee>> {
        let load_failed = || internal("Failed to load employees");

        self.check_department(department_id)
            .await
            .map_err(fault("get_by_department", load_failed()))?;

        let employees = self
            .repo
            .fetch_by_department(department_id)
            .await
            .map_err(fault("get_by_department", load_failed()))?;

        if employees.is_empty() {
            return Err(EmployeeError::NoEmployeesForDepartment(department_id));
        }
        Ok(employees)
    }

    // ========================================================================
    // Existence checks
    // ========================================================================

    async fn check_employee(&self, employee_id: i32) -> ServiceResult<()> {
        if self.repo.employee_exists(employee_id).await? {
            Ok(())
        } else {
            Err(EmployeeError::EmployeeNotFound(employee_id))
        }
    }

    async fn check_company(&self, company_id: i32) -> ServiceResult<()> {
        if company_id <= 0 {
            return Err(EmployeeError::InvalidCompanyId(company_id));
        }
        if self.repo.company_exists(company_id).await? {
            Ok(())
        } else {
            Err(EmployeeError::CompanyNotFound(company_id))
        }
    }

    async fn check_department(&self, department_id: i32) -> ServiceResult<()> {
        if department_id <= 0 {
            return Err(EmployeeError::InvalidDepartmentId(department_id));
        }
        if self.repo.department_exists(department_id).await? {
            Ok(())
        } else {
            Err(EmployeeError::DepartmentNotFound(department_id))
        }
    }

    async fn check_departments(&self, department_ids: &[i32]) -> ServiceResult<()> {
        let mut seen = HashSet::with_capacity(department_ids.len());
        for &department_id in department_ids {
            if !seen.insert(department_id) {
                return Err(EmployeeError::DuplicateDepartmentId(department_id));
            }
        }
        for &department_id in department_ids {
            self.check_department(department_id).await?;
        }
        Ok(())
    }
}

fn internal(message: &str) -> EmployeeError {
    EmployeeError::Internal(message.to_string())
}

/// Logs a storage fault and replaces it with `fallback`.
///
/// Expected failures pass through unchanged.
fn fault(
    operation: &'static str,
    fallback: EmployeeError,
) -> impl FnOnce(EmployeeError) -> EmployeeError {
    move |err| {
        if err.is_internal() {
            error!(operation, error = %err, "Employee repository fault");
            fallback
        } else {
            err
        }
    }
}
