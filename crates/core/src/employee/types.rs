//! Employee domain types.

use serde::{Deserialize, Serialize};

/// Passport owned by an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passport {
    /// Short passport type code.
    #[serde(rename = "type")]
    pub passport_type: String,
    /// Passport number.
    pub number: String,
}

/// Department an employee belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Department name.
    pub name: String,
    /// Department phone.
    pub phone: String,
}

/// Employee read model with its passport and departments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Employee ID.
    pub id: i32,
    /// First name.
    pub name: String,
    /// Last name.
    pub surname: String,
    /// Phone number.
    pub phone: String,
    /// Owning company ID.
    pub company_id: i32,
    /// Passport, absent only if the passport row is missing.
    pub passport: Option<Passport>,
    /// Departments in join order.
    pub departments: Vec<Department>,
}

/// Passport data supplied on create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassportInput {
    /// Short passport type code.
    pub passport_type: String,
    /// Passport number.
    pub number: String,
}

/// Input for creating an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEmployeeInput {
    /// First name.
    pub name: String,
    /// Last name.
    pub surname: String,
    /// Phone number.
    pub phone: String,
    /// Owning company ID.
    pub company_id: i32,
    /// Passport data.
    pub passport: PassportInput,
    /// Departments to join.
    pub department_ids: Vec<i32>,
}

/// Partial passport update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassportPatch {
    /// New passport type, if any.
    pub passport_type: Option<String>,
    /// New passport number, if any.
    pub number: Option<String>,
}

impl PassportPatch {
    /// Passport type to write, skipping empty strings.
    #[must_use]
    pub fn passport_type(&self) -> Option<&str> {
        non_empty(self.passport_type.as_deref())
    }

    /// Passport number to write, skipping empty strings.
    #[must_use]
    pub fn number(&self) -> Option<&str> {
        non_empty(self.number.as_deref())
    }

    /// Returns true if no passport column would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.passport_type().is_none() && self.number().is_none()
    }
}

/// Input for partially updating an employee.
///
/// `None`, empty strings, a non-positive company ID and an empty department
/// list all mean "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchEmployeeInput {
    /// New first name.
    pub name: Option<String>,
    /// New last name.
    pub surname: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New company ID.
    pub company_id: Option<i32>,
    /// Passport changes.
    pub passport: Option<PassportPatch>,
    /// Replacement department set.
    pub department_ids: Option<Vec<i32>>,
}

impl PatchEmployeeInput {
    /// Name to write, if supplied and non-empty.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }

    /// Surname to write, if supplied and non-empty.
    #[must_use]
    pub fn surname(&self) -> Option<&str> {
        non_empty(self.surname.as_deref())
    }

    /// Phone to write, if supplied and non-empty.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        non_empty(self.phone.as_deref())
    }

    /// Company ID to write, if supplied and positive.
    #[must_use]
    pub fn company_id(&self) -> Option<i32> {
        self.company_id.filter(|id| *id > 0)
    }

    /// Passport changes, if at least one passport column is supplied.
    #[must_use]
    pub fn passport(&self) -> Option<&PassportPatch> {
        self.passport.as_ref().filter(|p| !p.is_empty())
    }

    /// Replacement department set, if supplied and non-empty.
    #[must_use]
    pub fn department_ids(&self) -> Option<&[i32]> {
        self.department_ids
            .as_deref()
            .filter(|ids| !ids.is_empty())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// One row of the employee/passport/department join.
///
/// A left join yields `None` department columns for employees with no
/// department rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRow {
    /// Employee ID.
    pub employee_id: i32,
    /// First name.
    pub name: String,
    /// Last name.
    pub surname: String,
    /// Phone number.
    pub phone: String,
    /// Owning company ID.
    pub company_id: i32,
    /// Passport type.
    pub passport_type: Option<String>,
    /// Passport number.
    pub passport_number: Option<String>,
    /// Department ID.
    pub department_id: Option<i32>,
    /// Department name.
    pub department_name: Option<String>,
    /// Department phone.
    pub department_phone: Option<String>,
}
