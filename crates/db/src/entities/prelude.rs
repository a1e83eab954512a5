//! `SeaORM` entity prelude.

pub use super::companies::Entity as Companies;
pub use super::departments::Entity as Departments;
pub use super::employee_departments::Entity as EmployeeDepartments;
pub use super::employees::Entity as Employees;
pub use super::passports::Entity as Passports;
