//! Employee error types.

use thiserror::Error;

/// Employee operation errors.
///
/// Every expected failure of the employee service is one of these variants;
/// `Repository` is only produced by storage implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmployeeError {
    /// Employee ID is not positive.
    #[error("Employee ID cannot be {0}")]
    InvalidEmployeeId(i32),

    /// Employee does not exist.
    #[error("No employee found with ID {0}")]
    EmployeeNotFound(i32),

    /// Company ID is not positive.
    #[error("Invalid company ID {0}")]
    InvalidCompanyId(i32),

    /// Company does not exist.
    #[error("No company found with ID {0}")]
    CompanyNotFound(i32),

    /// Create request without departments.
    #[error("At least one department ID is required")]
    MissingDepartments,

    /// Department ID is not positive.
    #[error("Invalid department ID {0}")]
    InvalidDepartmentId(i32),

    /// Department does not exist.
    #[error("Department with ID {0} does not exist")]
    DepartmentNotFound(i32),

    /// Department ID supplied more than once.
    #[error("Department ID {0} is listed more than once")]
    DuplicateDepartmentId(i32),

    /// Passport update requested for an employee without a passport.
    #[error("Employee {0} has no passport to update")]
    MissingPassport(i32),

    /// Company lookup matched nobody.
    #[error("No employees found for company with ID {0}")]
    NoEmployeesForCompany(i32),

    /// Department lookup matched nobody.
    #[error("No employees found for department with ID {0}")]
    NoEmployeesForDepartment(i32),

    /// Create rolled back or faulted.
    #[error("Failed to add employee")]
    CreateFailed,

    /// Patch rolled back or faulted.
    #[error("Failed to update employee")]
    UpdateFailed,

    /// Delete rolled back or faulted.
    #[error("Failed to delete employee")]
    DeleteFailed,

    /// Employee existed but could not be read back.
    #[error("Error retrieving employee data")]
    FetchFailed,

    /// Storage layer failure.
    #[error("repository error: {0}")]
    Repository(String),

    /// Unexpected failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EmployeeError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(message: impl Into<String>) -> Self {
        Self::Repository(message.into())
    }

    /// Returns a stable error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidEmployeeId(_) => "invalid_employee_id",
            Self::EmployeeNotFound(_) => "employee_not_found",
            Self::InvalidCompanyId(_) => "invalid_company_id",
            Self::CompanyNotFound(_) => "company_not_found",
            Self::MissingDepartments => "missing_departments",
            Self::InvalidDepartmentId(_) => "invalid_department_id",
            Self::DepartmentNotFound(_) => "department_not_found",
            Self::DuplicateDepartmentId(_) => "duplicate_department_id",
            Self::MissingPassport(_) => "missing_passport",
            Self::NoEmployeesForCompany(_) | Self::NoEmployeesForDepartment(_) => {
                "no_employees_found"
            }
            Self::CreateFailed => "create_failed",
            Self::UpdateFailed => "update_failed",
            Self::DeleteFailed => "delete_failed",
            Self::FetchFailed => "fetch_failed",
            Self::Repository(_) | Self::Internal(_) => "internal_error",
        }
    }

    /// Returns true for failures the caller cannot fix by changing input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Repository(_) | Self::Internal(_))
    }
}

/// Outcome of an employee service operation.
pub type ServiceResult<T> = Result<T, EmployeeError>;
