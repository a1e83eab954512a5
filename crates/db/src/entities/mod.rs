//! `SeaORM` entity definitions.

pub mod prelude;

pub mod companies;
pub mod departments;
pub mod employee_departments;
pub mod employees;
pub mod passports;
