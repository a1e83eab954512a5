use super::*;
use axum::{
    body::Body,
    http::{Method, Request},
};
use employees_db::testing::{Fixture, memory_db, seed_reference_data};
use fake::{
    Fake,
    faker::name::en::{FirstName, LastName},
};
use http_body_util::BodyExt;
use rstest::rstest;
use serde_json::Value;
use tower::ServiceExt;

// ========================================================================
// Helpers
// ========================================================================

async fn test_app() -> (Router, Fixture) {
    let db = memory_db().await.expect("Failed to open test database");
    let fixture = seed_reference_data(&db)
        .await
        .expect("Failed to seed reference data");
    (crate::create_router(AppState::new(db)), fixture)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("Content-Type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn create_body(company_id: i32, department_ids: &[i32]) -> Value {
    let name: String = FirstName().fake();
    let surname: String = LastName().fake();
    json!({
        "name": name,
        "surname": surname,
        "phone": "555-0100",
        "companyId": company_id,
        "passport": { "type": "RF", "number": "4510 123456" },
        "departmentIds": department_ids
    })
}

async fn create(app: &Router, company_id: i32, department_ids: &[i32]) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/employees",
        Some(create_body(company_id, department_ids)),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");
    body["id"].as_i64().unwrap()
}

// ========================================================================
// Request validation
// ========================================================================

fn valid_create() -> CreateEmployeeRequest {
    CreateEmployeeRequest {
        name: "Anna".to_string(),
        surname: "Smirnova".to_string(),
        phone: "555-0101".to_string(),
        company_id: 1,
        passport: PassportRequest {
            passport_type: "RF".to_string(),
            number: "1234".to_string(),
        },
        department_ids: vec![1, 2],
    }
}

#[test]
fn test_create_request_accepts_valid_body() {
    assert!(valid_create().validate().is_ok());
}

#[rstest]
#[case::empty_name(|r: &mut CreateEmployeeRequest| r.name.clear())]
#[case::long_surname(|r: &mut CreateEmployeeRequest| r.surname = "x".repeat(101))]
#[case::long_phone(|r: &mut CreateEmployeeRequest| r.phone = "1".repeat(16))]
#[case::zero_company(|r: &mut CreateEmployeeRequest| r.company_id = 0)]
#[case::long_passport_type(|r: &mut CreateEmployeeRequest| r.passport.passport_type = "x".repeat(11))]
#[case::empty_passport_number(|r: &mut CreateEmployeeRequest| r.passport.number.clear())]
#[case::negative_department(|r: &mut CreateEmployeeRequest| r.department_ids = vec![1, -3])]
#[case::repeated_department(|r: &mut CreateEmployeeRequest| r.department_ids = vec![2, 2])]
fn test_create_request_rejects(#[case] mutate: fn(&mut CreateEmployeeRequest)) {
    let mut request = valid_create();
    mutate(&mut request);
    assert!(request.validate().is_err());
}

#[test]
fn test_patch_request_allows_unchanged_sentinels() {
    let request = PatchEmployeeRequest {
        name: Some(String::new()),
        company_id: Some(0),
        passport: Some(PassportPatchRequest {
            passport_type: Some(String::new()),
            number: None,
        }),
        department_ids: Some(Vec::new()),
        ..Default::default()
    };
    assert!(request.validate().is_ok());
}

#[rstest]
#[case::long_name(PatchEmployeeRequest { name: Some("x".repeat(101)), ..Default::default() })]
#[case::long_phone(PatchEmployeeRequest { phone: Some("1".repeat(16)), ..Default::default() })]
#[case::long_number(PatchEmployeeRequest {
    passport: Some(PassportPatchRequest { passport_type: None, number: Some("9".repeat(21)) }),
    ..Default::default()
})]
#[case::repeated_department(PatchEmployeeRequest { department_ids: Some(vec![3, 3]), ..Default::default() })]
#[case::zero_department(PatchEmployeeRequest { department_ids: Some(vec![0]), ..Default::default() })]
fn test_patch_request_rejects(#[case] request: PatchEmployeeRequest) {
    assert!(request.validate().is_err());
}

// ========================================================================
// Endpoints
// ========================================================================

#[tokio::test]
async fn test_create_and_get() {
    let (app, fx) = test_app().await;
    let id = create(&app, fx.acme, &[fx.support, fx.sales]).await;

    let (status, body) = send(&app, Method::GET, &format!("/api/employees/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(id));
    assert_eq!(body["companyId"], json!(fx.acme));
    assert_eq!(body["passport"], json!({ "type": "RF", "number": "4510 123456" }));
    assert_eq!(
        body["departments"],
        json!([
            { "name": "Sales", "phone": "101" },
            { "name": "Support", "phone": "102" }
        ])
    );
}

#[tokio::test]
async fn test_create_rejects_invalid_body() {
    let (app, fx) = test_app().await;
    let mut body = create_body(fx.acme, &[fx.sales]);
    body["phone"] = json!("");

    let (status, body) = send(&app, Method::POST, "/api/employees", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"]["phone"].is_array());
}

#[tokio::test]
async fn test_create_rejects_malformed_json() {
    let (app, _fx) = test_app().await;

    let (status, body) = send(&app, Method::POST, "/api/employees", Some(json!({ "name": 1 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[rstest]
#[case::unknown_company(99, None, "company_not_found")]
#[case::unknown_department(1, Some(vec![1, 404]), "department_not_found")]
#[case::no_departments(1, Some(vec![]), "missing_departments")]
#[tokio::test]
async fn test_create_reference_failures(
    #[case] company_id: i32,
    #[case] department_ids: Option<Vec<i32>>,
    #[case] code: &str,
) {
    let (app, fx) = test_app().await;
    let department_ids = department_ids.unwrap_or_else(|| vec![fx.sales]);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/employees",
        Some(create_body(company_id, &department_ids)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], code);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_get_unknown_is_not_found() {
    let (app, _fx) = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/employees/4242", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "employee_not_found");
    assert_eq!(body["message"], "No employee found with ID 4242");
}

#[tokio::test]
async fn test_patch_phone_only() {
    let (app, fx) = test_app().await;
    let id = create(&app, fx.acme, &[fx.sales]).await;
    let uri = format!("/api/employees/{id}");
    let (_, before) = send(&app, Method::GET, &uri, None).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({ "phone": "555-0199", "name": "", "companyId": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, mut after) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(after["phone"], "555-0199");
    after["phone"] = before["phone"].clone();
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_patch_replaces_departments() {
    let (app, fx) = test_app().await;
    let id = create(&app, fx.acme, &[fx.sales, fx.support]).await;
    let uri = format!("/api/employees/{id}");

    let (status, _) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({ "departmentIds": [fx.legal], "passport": { "number": "7777" } })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(body["departments"], json!([{ "name": "Legal", "phone": "103" }]));
    assert_eq!(body["passport"], json!({ "type": "RF", "number": "7777" }));
}

#[rstest]
#[case::unknown_employee("/api/employees/999", json!({ "phone": "1" }), "employee_not_found")]
#[case::zero_id("/api/employees/0", json!({ "phone": "1" }), "invalid_employee_id")]
#[tokio::test]
async fn test_patch_failures_are_bad_request(
    #[case] uri: &str,
    #[case] patch: Value,
    #[case] code: &str,
) {
    let (app, _fx) = test_app().await;

    let (status, body) = send(&app, Method::PATCH, uri, Some(patch)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], code);
}

#[tokio::test]
async fn test_patch_unknown_company() {
    let (app, fx) = test_app().await;
    let id = create(&app, fx.acme, &[fx.sales]).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/employees/{id}"),
        Some(json!({ "companyId": 77 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "company_not_found");
}

#[tokio::test]
async fn test_delete_then_get() {
    let (app, fx) = test_app().await;
    let id = create(&app, fx.acme, &[fx.sales]).await;
    let uri = format!("/api/employees/{id}");

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "employee_not_found");
}

#[tokio::test]
async fn test_list_by_company() {
    let (app, fx) = test_app().await;
    let first = create(&app, fx.acme, &[fx.sales]).await;
    let second = create(&app, fx.acme, &[fx.support, fx.legal]).await;
    create(&app, fx.globex, &[fx.sales]).await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/employees/by-company/{}", fx.acme),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![first, second]);
}

#[tokio::test]
async fn test_list_by_department() {
    let (app, fx) = test_app().await;
    let member = create(&app, fx.acme, &[fx.sales, fx.legal]).await;
    create(&app, fx.acme, &[fx.support]).await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/employees/by-department/{}", fx.legal),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], json!(member));
    assert_eq!(list[0]["departments"].as_array().unwrap().len(), 2);
}

#[rstest]
#[case::empty_company("/api/employees/by-company/2", "no_employees_found")]
#[case::unknown_company("/api/employees/by-company/50", "company_not_found")]
#[case::empty_department("/api/employees/by-department/3", "no_employees_found")]
#[case::zero_department("/api/employees/by-department/0", "invalid_department_id")]
#[tokio::test]
async fn test_list_failures_are_not_found(#[case] uri: &str, #[case] code: &str) {
    let (app, _fx) = test_app().await;

    let (status, body) = send(&app, Method::GET, uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], code);
}

#[tokio::test]
async fn test_health() {
    let (app, _fx) = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
