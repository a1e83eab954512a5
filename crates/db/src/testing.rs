//! In-memory database fixtures for tests.
//!
//! Builds the schema straight from the entity definitions on a single
//! `SQLite` connection, so every fixture starts empty and isolated.

use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr,
    EntityTrait, Schema, Set,
};

use crate::entities::{companies, departments, employee_departments, employees, passports};

/// Opens a fresh in-memory database with every table created.
///
/// # Errors
///
/// Returns an error if the connection or a `CREATE TABLE` fails.
pub async fn memory_db() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await?;

    db.execute_unprepared("PRAGMA foreign_keys = ON").await?;

    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    create_table(&db, &schema, companies::Entity).await?;
    create_table(&db, &schema, departments::Entity).await?;
    create_table(&db, &schema, passports::Entity).await?;
    create_table(&db, &schema, employees::Entity).await?;
    create_table(&db, &schema, employee_departments::Entity).await?;

    Ok(db)
}

async fn create_table<E: EntityTrait>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    let statement = db
        .get_database_backend()
        .build(&schema.create_table_from_entity(entity));
    db.execute(statement).await?;
    Ok(())
}

/// Inserts a company and returns its ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub async fn seed_company(db: &DatabaseConnection, name: &str) -> Result<i32, DbErr> {
    let company = companies::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(company.id)
}

/// Inserts a department and returns its ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub async fn seed_department(
    db: &DatabaseConnection,
    name: &str,
    phone: &str,
) -> Result<i32, DbErr> {
    let department = departments::ActiveModel {
        name: Set(name.to_string()),
        phone: Set(phone.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(department.id)
}

/// Seeded reference data: two companies and three departments.
#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    /// First company.
    pub acme: i32,
    /// Second company.
    pub globex: i32,
    /// Department "Sales".
    pub sales: i32,
    /// Department "Support".
    pub support: i32,
    /// Department "Legal".
    pub legal: i32,
}

/// Seeds the reference rows every employee test needs.
///
/// # Errors
///
/// Returns an error if an insert fails.
pub async fn seed_reference_data(db: &DatabaseConnection) -> Result<Fixture, DbErr> {
    Ok(Fixture {
        acme: seed_company(db, "Acme").await?,
        globex: seed_company(db, "Globex").await?,
        sales: seed_department(db, "Sales", "101").await?,
        support: seed_department(db, "Support", "102").await?,
        legal: seed_department(db, "Legal", "103").await?,
    })
}
