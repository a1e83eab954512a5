//! Repository implementations for data access.
//!
//! Repositories hide the `SeaORM` details behind the storage traits
//! declared in `employees-core`.

pub mod employee;

pub use employee::EmployeeStore;
