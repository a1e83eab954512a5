//! Folding of joined employee rows into employee read models.
//!
//! The join returns one row per (employee, department) pair. Rows are folded
//! in arrival order keyed by employee ID: the first row of an employee sets
//! its scalar and passport fields, and each row adds at most one department.

use std::collections::{HashMap, HashSet};

use super::types::{Department, Employee, EmployeeRow, Passport};

/// Folds joined rows into one employee per distinct employee ID.
///
/// Employees keep the order in which they first appear. A department is
/// appended only when the row carries a department ID and a non-empty name,
/// and only once per employee.
pub fn fold_rows<I>(rows: I) -> Vec<Employee>
where
    I: IntoIterator<Item = EmployeeRow>,
{
    let mut slots: HashMap<i32, usize> = HashMap::new();
    let mut seen_departments: HashSet<(i32, i32)> = HashSet::new();
    let mut employees: Vec<Employee> = Vec::new();

    for row in rows {
        let EmployeeRow {
            employee_id,
            name,
            surname,
            phone,
            company_id,
            passport_type,
            passport_number,
            department_id,
            department_name,
            department_phone,
        } = row;

        let slot = *slots.entry(employee_id).or_insert_with(|| {
            employees.push(Employee {
                id: employee_id,
                name,
                surname,
                phone,
                company_id,
                passport: passport_type
                    .zip(passport_number)
                    .map(|(passport_type, number)| Passport {
                        passport_type,
                        number,
                    }),
                departments: Vec::new(),
            });
            employees.len() - 1
        });

        let Some(department_id) = department_id else {
            continue;
        };
        let Some(department_name) = department_name.filter(|n| !n.is_empty()) else {
            continue;
        };
        if !seen_departments.insert((employee_id, department_id)) {
            continue;
        }

        employees[slot].departments.push(Department {
            name: department_name,
            phone: department_phone.unwrap_or_default(),
        });
    }

    employees
}

/// Folds rows for a single-employee query.
///
/// Returns `None` when the result set is empty.
pub fn fold_single<I>(rows: I) -> Option<Employee>
where
    I: IntoIterator<Item = EmployeeRow>,
{
    fold_rows(rows).into_iter().next()
}
