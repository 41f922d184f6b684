//! Company hierarchy arena
//!
//! Employees are numbered 1..=N and every manager carries a smaller id
//! than its reports, so the whole tree is built in one forward pass.
//! Managers are referenced by id, never by pointer: the arena owns every
//! employee.

mod employee;
mod shape;

pub use employee::{Employee, EmployeeId};
pub use shape::{classify, EngineKind, ShapeReport};

use crate::OrgError;
use bitvec::prelude::*;
use tracing::debug;

/// Id of the unique root employee
pub const ROOT: EmployeeId = 1;

/// Rooted tree of employees, immutable once built
#[derive(Debug, Clone)]
pub struct Company {
    /// Employee `id` lives at index `id - 1`
    employees: Vec<Employee>,
}

impl Company {
    /// Build a company from its parent list.
    ///
    /// `parent_ids[i]` is the manager of employee `i + 2`; employee 1 is the
    /// root. Fails if the list length disagrees with `num_employees` or a
    /// manager id is not constructed yet.
    pub fn build(num_employees: usize, parent_ids: &[EmployeeId]) -> Result<Self, OrgError> {
        if num_employees == 0 {
            return Err(OrgError::EmptyCompany);
        }
        if parent_ids.len() + 1 != num_employees {
            return Err(OrgError::NodeCountMismatch {
                declared: num_employees,
                actual: parent_ids.len() + 1,
            });
        }

        let mut employees = Vec::with_capacity(num_employees);
        employees.push(Employee::root());

        for (index, &manager) in parent_ids.iter().enumerate() {
            let id = index + 2;
            if manager == 0 || manager >= id {
                return Err(OrgError::ParentOutOfRange {
                    employee: id,
                    manager,
                });
            }

            let depth = employees[manager - 1].depth() + 1;
            employees[manager - 1].add_report(id);
            employees.push(Employee::new(id, manager, depth));
        }

        debug!(num_employees, "company built");
        Ok(Self { employees })
    }

    /// Number of employees
    #[inline]
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Always false: a company holds at least its root
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Check that `id` names an employee
    #[inline]
    pub fn contains(&self, id: EmployeeId) -> bool {
        (ROOT..=self.len()).contains(&id)
    }

    /// Look up an employee, if present
    pub fn get(&self, id: EmployeeId) -> Option<&Employee> {
        if self.contains(id) {
            Some(&self.employees[id - 1])
        } else {
            None
        }
    }

    /// Look up an employee whose id has already been validated
    #[inline]
    pub(crate) fn employee(&self, id: EmployeeId) -> &Employee {
        &self.employees[id - 1]
    }

    /// The root employee
    pub fn root(&self) -> &Employee {
        &self.employees[0]
    }

    /// Iterate employees in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &Employee> {
        self.employees.iter()
    }

    /// Length of the longest management line
    pub fn max_depth(&self) -> usize {
        self.employees.iter().map(Employee::depth).max().unwrap_or(0)
    }

    /// One bit per employee (`id - 1`), set for employees without reports
    pub fn leaf_markers(&self) -> BitVec {
        let mut leaves = bitvec![1; self.len()];
        for employee in &self.employees {
            if let Some(manager) = employee.manager() {
                leaves.set(manager - 1, false);
            }
        }
        leaves
    }
}
