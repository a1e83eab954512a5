//! Employee records with passports and department membership.

pub mod error;
pub mod fold;
pub mod repository;
pub mod service;
pub mod types;


pub use error::{EmployeeError, ServiceResult};
pub use fold::{fold_rows, fold_single};
pub use repository::EmployeeRepository;
pub use service::EmployeeService;
pub use types::{
    CreateEmployeeInput, Department, Employee, EmployeeRow, Passport, PassportInput,
    PassportPatch, PatchEmployeeInput,
};
