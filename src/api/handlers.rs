//! HTTP request handlers for the Warfot Presensi API.
//!
//! This module contains the handler functions for all API endpoints.

use std::str::FromStr;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::PresensiResult;
use crate::models::{HoursStrategy, YearMonth};
use crate::service;

use super::request::{
    ClockRequest, CreateEmployeeRequest, CurrentPayrollQuery, FinalHoursRequest, MonthQuery,
    RoleQuery, StrategyQuery, TodayQuery, UpdateEmployeeRequest,
};
use super::response::ApiErrorResponse;
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance/clock-in", post(clock_in_handler))
        .route("/attendance/clock-out", post(clock_out_handler))
        .route("/attendance/:record_id/final-hours", put(final_hours_handler))
        .route(
            "/employees",
            get(list_employees_handler).post(create_employee_handler),
        )
        .route("/employees/:employee_id", put(update_employee_handler))
        .route("/employees/:employee_id/attendance", get(attendance_recap_handler))
        .route(
            "/employees/:employee_id/attendance/today",
            get(today_attendance_handler),
        )
        .route(
            "/employees/:employee_id/payroll/:year_month",
            get(employee_payroll_handler),
        )
        .route("/payroll/current", get(current_payroll_handler))
        .route("/payroll/:year_month", get(month_payroll_handler))
        .with_state(state)
}

/// Turns a service result into a JSON response, logging the outcome under
/// the request's correlation ID.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    operation: &'static str,
    success: StatusCode,
    result: PresensiResult<T>,
) -> Response {
    match result {
        Ok(body) => {
            info!(correlation_id = %correlation_id, operation, status = success.as_u16(), "Request completed");
            (
                success,
                [(header::CONTENT_TYPE, "application/json")],
                Json(body),
            )
                .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, operation, error = %err, "Request failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Logs and converts an extractor rejection.
fn reject(correlation_id: Uuid, operation: &'static str, error: ApiErrorResponse) -> Response {
    warn!(
        correlation_id = %correlation_id,
        operation,
        code = %error.error.code,
        error = %error.error.message,
        "Rejected request"
    );
    error.into_response()
}

/// Handler for POST /attendance/clock-in.
async fn clock_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return reject(correlation_id, "clock_in", rejection.into()),
    };
    info!(correlation_id = %correlation_id, employee_id = %request.employee_id, "Processing clock-in");

    let at = request.at.unwrap_or_else(|| state.settings().local_now());
    let result = service::clock_in(
        state.attendance(),
        state.roster(),
        &request.employee_id,
        at,
        request.location(),
    );
    respond(correlation_id, "clock_in", StatusCode::CREATED, result)
}

/// Handler for POST /attendance/clock-out.
async fn clock_out_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return reject(correlation_id, "clock_out", rejection.into()),
    };
    info!(correlation_id = %correlation_id, employee_id = %request.employee_id, "Processing clock-out");

    let at = request.at.unwrap_or_else(|| state.settings().local_now());
    let result = service::clock_out(
        state.attendance(),
        &request.employee_id,
        at,
        request.location(),
    );
    respond(correlation_id, "clock_out", StatusCode::OK, result)
}

/// Handler for PUT /attendance/:record_id/final-hours.
async fn final_hours_handler(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
    payload: Result<Json<FinalHoursRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return reject(correlation_id, "final_hours", rejection.into()),
    };

    let result = service::override_final_hours(state.attendance(), &record_id, request.final_hours);
    respond(correlation_id, "final_hours", StatusCode::OK, result)
}

/// Handler for GET /employees.
async fn list_employees_handler(
    State(state): State<AppState>,
    query: Result<Query<RoleQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => return reject(correlation_id, "list_employees", rejection.into()),
    };

    let result = service::list_employees(state.roster(), query.role);
    respond(correlation_id, "list_employees", StatusCode::OK, result)
}

/// Handler for POST /employees.
async fn create_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return reject(correlation_id, "create_employee", rejection.into()),
    };
    info!(correlation_id = %correlation_id, employee_id = %request.id, "Processing new employee");

    let result = service::create_employee(state.roster(), request.into());
    respond(correlation_id, "create_employee", StatusCode::CREATED, result)
}

/// Handler for PUT /employees/:employee_id.
async fn update_employee_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    payload: Result<Json<UpdateEmployeeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return reject(correlation_id, "update_employee", rejection.into()),
    };

    let result = service::update_employee(state.roster(), request.into_employee(employee_id));
    respond(correlation_id, "update_employee", StatusCode::OK, result)
}

/// Handler for GET /employees/:employee_id/attendance.
async fn attendance_recap_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => return reject(correlation_id, "attendance_recap", rejection.into()),
    };

    let month = query
        .month
        .unwrap_or_else(|| YearMonth::of(state.settings().local_now().date()));
    let result = service::monthly_recap(state.attendance(), &employee_id, month);
    respond(correlation_id, "attendance_recap", StatusCode::OK, result)
}

/// Handler for GET /employees/:employee_id/attendance/today.
///
/// Responds with the day's record, or `null` before the employee clocks in.
async fn today_attendance_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<TodayQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => return reject(correlation_id, "today_attendance", rejection.into()),
    };

    let now = query.at.unwrap_or_else(|| state.settings().local_now());
    let result = service::today_record(state.attendance(), state.roster(), &employee_id, now);
    respond(correlation_id, "today_attendance", StatusCode::OK, result)
}

/// Handler for GET /employees/:employee_id/payroll/:year_month.
///
/// Defaults to raw elapsed hours.
async fn employee_payroll_handler(
    State(state): State<AppState>,
    Path((employee_id, year_month)): Path<(String, String)>,
    query: Result<Query<StrategyQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => return reject(correlation_id, "employee_payroll", rejection.into()),
    };

    let strategy = query.strategy.unwrap_or(HoursStrategy::RawElapsed);
    let result = YearMonth::from_str(&year_month).and_then(|ym| {
        service::employee_payroll(
            state.attendance(),
            state.roster(),
            &employee_id,
            ym,
            strategy,
        )
    });
    respond(correlation_id, "employee_payroll", StatusCode::OK, result)
}

/// Handler for GET /payroll/current.
///
/// Resolves the period from the configured cutoff day and defaults to
/// policy-normalized hours.
async fn current_payroll_handler(
    State(state): State<AppState>,
    query: Result<Query<CurrentPayrollQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => return reject(correlation_id, "current_payroll", rejection.into()),
    };

    let settings = state.settings();
    let now = query.at.unwrap_or_else(|| settings.local_now());
    let result = service::current_report(
        state.attendance(),
        state.roster(),
        now,
        settings.cutoff_day,
        query.strategy.unwrap_or(HoursStrategy::PolicyNormalized),
    );
    respond(correlation_id, "current_payroll", StatusCode::OK, result)
}

/// Handler for GET /payroll/:year_month.
async fn month_payroll_handler(
    State(state): State<AppState>,
    Path(year_month): Path<String>,
    query: Result<Query<StrategyQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => return reject(correlation_id, "month_payroll", rejection.into()),
    };

    let strategy = query.strategy.unwrap_or(HoursStrategy::PolicyNormalized);
    let result = YearMonth::from_str(&year_month)
        .and_then(|ym| service::month_report(state.attendance(), state.roster(), ym, strategy));
    respond(correlation_id, "month_payroll", StatusCode::OK, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::response::ApiError;
    use crate::config::ConfigLoader;
    use crate::models::{Employee, PayrollReport, ShiftRecord};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/warfot").expect("Failed to load config");
        AppState::in_memory(&config)
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_clock_in_returns_201() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(json_request(
                "POST",
                "/attendance/clock-in",
                r#"{"employee_id":"emp_001","latitude":-6.9,"longitude":107.6,"at":"2025-12-03T10:55:00"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let record: ShiftRecord = read_json(response).await;
        assert_eq!(record.id, "emp_001_2025-12-03");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(json_request("POST", "/attendance/clock-in", "{invalid json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(json_request(
                "POST",
                "/attendance/clock-out",
                r#"{"latitude":-6.9,"longitude":107.6}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("employee_id"));
    }

    #[tokio::test]
    async fn test_clock_out_without_clock_in_returns_409() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(json_request(
                "POST",
                "/attendance/clock-out",
                r#"{"employee_id":"emp_001","latitude":-6.9,"longitude":107.6,"at":"2025-12-03T21:00:00"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "NOT_CLOCKED_IN");
    }

    #[tokio::test]
    async fn test_list_employees_defaults_to_staff() {
        let router = create_router(create_test_state());
        let response = router.oneshot(get_request("/employees")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let employees: Vec<Employee> = read_json(response).await;
        assert_eq!(employees.len(), 3);
        assert!(employees.iter().all(|e| !e.is_admin()));
    }

    #[tokio::test]
    async fn test_create_employee_returns_201_then_409() {
        let router = create_router(create_test_state());
        let body = r#"{"id":"emp_004","name":"Dewi Sartika","email":"dewi@warfot.id","hourly_rate":"26000"}"#;

        let response = router
            .clone()
            .oneshot(json_request("POST", "/employees", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let employee: Employee = read_json(response).await;
        assert_eq!(employee.id, "emp_004");
        assert!(!employee.is_admin());

        let response = router
            .oneshot(json_request("POST", "/employees", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "EMPLOYEE_EXISTS");
    }

    #[tokio::test]
    async fn test_today_attendance_is_null_before_clock_in() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(get_request(
                "/employees/emp_001/attendance/today?at=2025-12-03T08:00:00",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let record: Option<ShiftRecord> = read_json(response).await;
        assert!(record.is_none());
    }

    #[tokio::test]
    async fn test_invalid_year_month_returns_400() {
        let router = create_router(create_test_state());
        let response = router.oneshot(get_request("/payroll/2025-13")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "INVALID_YEAR_MONTH");
    }

    #[tokio::test]
    async fn test_unknown_strategy_returns_400() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(get_request("/payroll/2025-12?strategy=hourly"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_empty_month_report() {
        let router = create_router(create_test_state());
        let response = router.oneshot(get_request("/payroll/2025-12")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let report: PayrollReport = read_json(response).await;
        assert_eq!(report.strategy, HoursStrategy::PolicyNormalized);
        assert!(report.lines.is_empty());
        assert_eq!(report.period.to_string(), "2025-11-21..2025-12-20");
    }
}
