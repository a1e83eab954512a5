//! Employee routes.

use std::collections::HashSet;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use validator::{Validate, ValidationError};

use crate::AppState;
use employees_core::employee::{
    CreateEmployeeInput, EmployeeError, PassportInput, PassportPatch, PatchEmployeeInput,
};
use employees_shared::AppError;

/// Creates the employees router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/employees", post(create_employee))
        .route(
            "/employees/{employee_id}",
            get(get_employee)
                .patch(patch_employee)
                .delete(delete_employee),
        )
        .route("/employees/by-company/{company_id}", get(list_by_company))
        .route(
            "/employees/by-department/{department_id}",
            get(list_by_department),
        )
}

// ============================================================================
// Request bodies
// ============================================================================

/// Passport section of a create request.
#[derive(Debug, Deserialize, Validate)]
pub struct PassportRequest {
    /// Document type.
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 10))]
    pub passport_type: String,
    /// Document number.
    #[validate(length(min = 1, max = 20))]
    pub number: String,
}

/// Body of `POST /employees`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    /// Given name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Family name.
    #[validate(length(min = 1, max = 100))]
    pub surname: String,
    /// Contact phone.
    #[validate(length(min = 1, max = 15))]
    pub phone: String,
    /// Owning company.
    #[validate(range(min = 1))]
    pub company_id: i32,
    /// Passport to create alongside the employee.
    #[validate(nested)]
    pub passport: PassportRequest,
    /// Departments to join.
    #[serde(default)]
    #[validate(custom(function = "positive_distinct"))]
    pub department_ids: Vec<i32>,
}

impl From<CreateEmployeeRequest> for CreateEmployeeInput {
    fn from(req: CreateEmployeeRequest) -> Self {
        Self {
            name: req.name,
            surname: req.surname,
            phone: req.phone,
            company_id: req.company_id,
            passport: PassportInput {
                passport_type: req.passport.passport_type,
                number: req.passport.number,
            },
            department_ids: req.department_ids,
        }
    }
}

/// Passport section of a patch request. Empty strings leave a field unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PassportPatchRequest {
    /// Document type.
    #[serde(rename = "type")]
    #[validate(length(max = 10))]
    pub passport_type: Option<String>,
    /// Document number.
    #[validate(length(max = 20))]
    pub number: Option<String>,
}

/// Body of `PATCH /employees/{id}`.
///
/// Absent fields, empty strings, a non-positive company ID and an empty
/// department list all leave the stored value unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PatchEmployeeRequest {
    /// Given name.
    #[validate(length(max = 100))]
    pub name: Option<String>,
    /// Family name.
    #[validate(length(max = 100))]
    pub surname: Option<String>,
    /// Contact phone.
    #[validate(length(max = 15))]
    pub phone: Option<String>,
    /// New owning company.
    pub company_id: Option<i32>,
    /// Passport fields to change.
    #[validate(nested)]
    pub passport: Option<PassportPatchRequest>,
    /// Replacement department list.
    #[validate(custom(function = "positive_distinct"))]
    pub department_ids: Option<Vec<i32>>,
}

impl From<PatchEmployeeRequest> for PatchEmployeeInput {
    fn from(req: PatchEmployeeRequest) -> Self {
        Self {
            name: req.name,
            surname: req.surname,
            phone: req.phone,
            company_id: req.company_id,
            passport: req.passport.map(|p| PassportPatch {
                passport_type: p.passport_type,
                number: p.number,
            }),
            department_ids: req.department_ids,
        }
    }
}

fn positive_distinct(ids: &[i32]) -> Result<(), ValidationError> {
    if ids.iter().any(|id| *id <= 0) {
        return Err(ValidationError::new("positive")
            .with_message("Department IDs must be positive".into()));
    }
    let mut seen = HashSet::with_capacity(ids.len());
    if !ids.iter().all(|id| seen.insert(*id)) {
        return Err(ValidationError::new("distinct")
            .with_message("Department IDs must not repeat".into()));
    }
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /employees - Create an employee.
async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> Response {
    let payload = match accept(payload) {
        Ok(p) => p,
        Err(response) => return response,
    };

    match state.employees.add_employee(payload.into()).await {
        Ok(employee_id) => {
            info!(employee_id, "Employee added via API");
            (StatusCode::OK, Json(json!({ "id": employee_id }))).into_response()
        }
        Err(e) => failure(e, AppError::Validation),
    }
}

/// GET /employees/{employee_id} - Get one employee.
async fn get_employee(State(state): State<AppState>, Path(employee_id): Path<i32>) -> Response {
    match state.employees.get_employee(employee_id).await {
        Ok(employee) => Json(employee).into_response(),
        Err(e) => failure(e, AppError::NotFound),
    }
}

/// PATCH /employees/{employee_id} - Apply a partial update.
async fn patch_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<i32>,
    payload: Result<Json<PatchEmployeeRequest>, JsonRejection>,
) -> Response {
    let payload = match accept(payload) {
        Ok(p) => p,
        Err(response) => return response,
    };

    match state
        .employees
        .patch_employee(employee_id, payload.into())
        .await
    {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => failure(e, AppError::Validation),
    }
}

/// DELETE /employees/{employee_id} - Remove an employee.
async fn delete_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<i32>,
) -> Response {
    match state.employees.delete_employee(employee_id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => failure(e, AppError::NotFound),
    }
}

/// GET /employees/by-company/{company_id} - List a company's employees.
async fn list_by_company(
    State(state): State<AppState>,
    Path(company_id): Path<i32>,
) -> Response {
    match state.employees.get_by_company(company_id).await {
        Ok(employees) => Json(employees).into_response(),
        Err(e) => failure(e, AppError::NotFound),
    }
}

/// GET /employees/by-department/{department_id} - List a department's employees.
async fn list_by_department(
    State(state): State<AppState>,
    Path(department_id): Path<i32>,
) -> Response {
    match state.employees.get_by_department(department_id).await {
        Ok(employees) => Json(employees).into_response(),
        Err(e) => failure(e, AppError::NotFound),
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Unwraps and validates a JSON body, or builds the 400 response.
#[allow(clippy::result_large_err)]
fn accept<T: Validate>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    let Json(body) = payload.map_err(|rejection| {
        error_body(
            &AppError::Validation(rejection.body_text()),
            "validation_error",
        )
    })?;

    if let Err(errors) = body.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "validation_error",
                "message": "Request body failed validation",
                "details": errors
            })),
        )
            .into_response());
    }

    Ok(body)
}

/// Maps a service failure to its response.
///
/// Expected failures use the route's status; storage faults become 500.
fn failure(err: EmployeeError, expected: fn(String) -> AppError) -> Response {
    let app_error = if err.is_internal() {
        error!(error = %err, "Employee request failed");
        AppError::Internal("An internal error occurred".to_string())
    } else {
        expected(err.to_string())
    };

    error_body(&app_error, err.error_code())
}

fn error_body(app_error: &AppError, code: &str) -> Response {
    let status =
        StatusCode::from_u16(app_error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        Json(json!({
            "error": code,
            "message": app_error.message()
        })),
    )
        .into_response()
}

#[cfg(test)]
#[path = "employees_tests.rs"]
mod tests;
