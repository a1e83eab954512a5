//! `SeaORM` Entity for employees table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub company_id: i32,
    pub passport_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::CompanyId",
        to = "super::companies::Column::Id"
    )]
    Companies,
    #[sea_orm(
        belongs_to = "super::passports::Entity",
        from = "Column::PassportId",
        to = "super::passports::Column::Id"
    )]
    Passports,
    #[sea_orm(has_many = "super::employee_departments::Entity")]
    EmployeeDepartments,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Companies.def()
    }
}

impl Related<super::passports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Passports.def()
    }
}

impl Related<super::employee_departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmployeeDepartments.def()
    }
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        super::employee_departments::Relation::Departments.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::employee_departments::Relation::Employees.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
