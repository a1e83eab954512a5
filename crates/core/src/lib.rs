//! Core business logic for the employees service.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Domain types, referential checks and row folding live here; the db crate
//! supplies the `EmployeeRepository` implementation.
//!
//! # Modules
//!
//! - `employee` - Employees, passports and department membership

pub mod employee;
