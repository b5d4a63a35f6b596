//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::store::PayrollStore;

use super::request::ProcessPayrollRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router<S>(state: AppState<S>) -> Router
where
    S: PayrollStore + 'static,
{
    Router::new()
        .route("/payroll-runs", post(process_payroll_handler::<S>))
        .with_state(state)
}

/// Handler for POST /payroll-runs.
///
/// Processes one payroll period and returns the completed run with its payslips.
async fn process_payroll_handler<S>(
    State(state): State<AppState<S>>,
    payload: Result<Json<ProcessPayrollRequest>, JsonRejection>,
) -> Response
where
    S: PayrollStore + 'static,
{
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll run request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    let processor = state.processor().clone();
    let outcome = tokio::task::spawn_blocking(move || {
        processor.process_payroll(
            request.tenant_id,
            request.pay_schedule_id,
            request.period_end,
            request.payment_date,
            request.initiated_by,
        )
    })
    .await;

    match outcome {
        Ok(Ok(processed)) => {
            info!(
                correlation_id = %correlation_id,
                payroll_run_id = %processed.payroll_run.id,
                payslips = processed.payslips.len(),
                "Payroll run request completed"
            );
            json_response(StatusCode::CREATED, processed)
        }
        Ok(Err(err)) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Payroll run request failed"
            );
            let api_error: ApiErrorResponse = err.into();
            json_response(api_error.status, api_error.error)
        }
        Err(join_error) => {
            warn!(
                correlation_id = %correlation_id,
                error = %join_error,
                "Payroll worker did not finish"
            );
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", "Payroll processing was interrupted"),
            )
        }
    }
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatutoryConfig;
    use crate::models::{Frequency, PaySchedule, Tenant};
    use crate::processor::{PayrollProcessor, ProcessedPayroll};
    use crate::store::InMemoryStore;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn create_test_state() -> (AppState<InMemoryStore>, Uuid, Uuid) {
        let store = InMemoryStore::new();
        let tenant_id = Uuid::new_v4();
        let schedule_id = Uuid::new_v4();
        store.insert_tenant(Tenant {
            id: tenant_id,
            name: "Atlas Textiles".to_string(),
        });
        store.insert_pay_schedule(PaySchedule {
            id: schedule_id,
            tenant_id,
            name: "Monthly staff".to_string(),
            frequency: Frequency::Monthly,
        });
        let processor = PayrollProcessor::new(store, StatutoryConfig::standard());
        (AppState::new(processor), tenant_id, schedule_id)
    }

    fn post_json(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/payroll-runs")
            .header("Content-Type", "application/json")
            .body(body.into())
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_request_returns_201() {
        let (state, tenant_id, schedule_id) = create_test_state();
        let router = create_router(state);

        let body = serde_json::json!({
            "tenant_id": tenant_id,
            "pay_schedule_id": schedule_id,
            "period_end": "2025-01-31",
            "payment_date": "2025-02-01"
        })
        .to_string();

        let response = router.oneshot(post_json(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let processed: ProcessedPayroll = serde_json::from_slice(&body).unwrap();
        assert_eq!(processed.payroll_run.tenant_id, tenant_id);
        assert!(processed.payslips.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let (state, _, _) = create_test_state();
        let router = create_router(state);

        let response = router.oneshot(post_json("{invalid json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let (state, tenant_id, _) = create_test_state();
        let router = create_router(state);

        let body = serde_json::json!({
            "tenant_id": tenant_id,
            "period_end": "2025-01-31",
            "payment_date": "2025-02-01"
        })
        .to_string();

        let response = router.oneshot(post_json(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(
            error.message.contains("pay_schedule_id"),
            "Expected error message to name the missing field, got: {}",
            error.message
        );
    }

    #[tokio::test]
    async fn test_unknown_schedule_returns_404() {
        let (state, tenant_id, _) = create_test_state();
        let router = create_router(state);

        let body = serde_json::json!({
            "tenant_id": tenant_id,
            "pay_schedule_id": Uuid::new_v4(),
            "period_end": "2025-01-31",
            "payment_date": "2025-02-01"
        })
        .to_string();

        let response = router.oneshot(post_json(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "PAY_SCHEDULE_NOT_FOUND");
    }
}
