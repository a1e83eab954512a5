//! `SeaORM` Entity for departments table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub phone: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::employee_departments::Entity")]
    EmployeeDepartments,
}

impl Related<super::employee_departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmployeeDepartments.def()
    }
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        super::employee_departments::Relation::Employees.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::employee_departments::Relation::Departments.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
