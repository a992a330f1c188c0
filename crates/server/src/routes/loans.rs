use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use tracing::{debug, info};

use common::{constants, types::ResponseDto};
use service::loans::domain::{Loan, UpdateLoanInput};

use crate::{errors::JsonApiError, metrics, state::ServerState, validation::validate_mobile_number_param};

/// Header carrying the caller's correlation id on fetch.
pub const CORRELATION_ID_HEADER: &str = "loans-correlation-id";

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MobileNumberQuery {
    /// Empty or exactly 10 digits.
    #[serde(alias = "phoneNumber")]
    pub mobile_number: String,
}

/// Unwrap the query and apply the boundary pattern check.
fn mobile_number_from(path: &str, query: Result<Query<MobileNumberQuery>, QueryRejection>) -> Result<String, JsonApiError> {
    let Query(q) = query.map_err(|r| JsonApiError::new(r.status(), path, "BAD_REQUEST", r.body_text()))?;
    validate_mobile_number_param(&q.mobile_number).map_err(|m| JsonApiError::bad_request(path, m))?;
    Ok(q.mobile_number)
}

#[utoipa::path(
    post, path = "/api/create", tag = "loans",
    params(MobileNumberQuery),
    responses(
        (status = 201, description = "Loan created", body = crate::openapi::ResponseDtoDoc),
        (status = 400, description = "Validation Error or loan already exists", body = crate::openapi::ErrorResponseDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    query: Result<Query<MobileNumberQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<ResponseDto>), JsonApiError> {
    const PATH: &str = "/api/create";
    let mobile_number = mobile_number_from(PATH, query)?;
    match state.loans.create(&mobile_number).await {
        Ok(loan) => {
            metrics::record("create", "ok");
            info!(loan_number = %loan.loan_number, "created loan");
            Ok((StatusCode::CREATED, Json(ResponseDto::new(constants::STATUS_201, constants::MESSAGE_201))))
        }
        Err(e) => {
            metrics::record("create", e.code());
            Err(JsonApiError::from_service(PATH, e))
        }
    }
}

#[utoipa::path(
    get, path = "/api/fetch", tag = "loans",
    params(
        MobileNumberQuery,
        ("loans-correlation-id" = Option<String>, Header, description = "Caller correlation id, logged only")
    ),
    responses(
        (status = 200, description = "Loan details", body = crate::openapi::LoanDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn fetch(
    State(state): State<ServerState>,
    headers: HeaderMap,
    query: Result<Query<MobileNumberQuery>, QueryRejection>,
) -> Result<Json<Loan>, JsonApiError> {
    const PATH: &str = "/api/fetch";
    if let Some(id) = headers.get(CORRELATION_ID_HEADER).and_then(|v| v.to_str().ok()) {
        debug!(correlation_id = %id, "loans-correlation-id found");
    }
    let mobile_number = mobile_number_from(PATH, query)?;
    match state.loans.fetch(&mobile_number).await {
        Ok(loan) => {
            metrics::record("fetch", "ok");
            Ok(Json(loan))
        }
        Err(e) => {
            metrics::record("fetch", e.code());
            Err(JsonApiError::from_service(PATH, e))
        }
    }
}

#[utoipa::path(
    put, path = "/api/update", tag = "loans",
    request_body = crate::openapi::UpdateLoanRequestDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ResponseDtoDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponseDoc),
        (status = 417, description = "No loan with that loan number", body = crate::openapi::ResponseDtoDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    payload: Result<Json<UpdateLoanInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ResponseDto>), JsonApiError> {
    const PATH: &str = "/api/update";
    let Json(input) = payload.map_err(|r| JsonApiError::new(r.status(), PATH, "BAD_REQUEST", r.body_text()))?;
    if let Some(m) = input.mobile_number.as_deref() {
        validate_mobile_number_param(m).map_err(|msg| JsonApiError::bad_request(PATH, msg))?;
    }
    match state.loans.update(input).await {
        Ok(true) => {
            metrics::record("update", "ok");
            Ok((StatusCode::OK, Json(ResponseDto::new(constants::STATUS_200, constants::MESSAGE_200))))
        }
        Ok(false) => {
            metrics::record("update", "not_updated");
            Ok((
                StatusCode::EXPECTATION_FAILED,
                Json(ResponseDto::new(constants::STATUS_417, constants::MESSAGE_417_UPDATE)),
            ))
        }
        Err(e) => {
            metrics::record("update", e.code());
            Err(JsonApiError::from_service(PATH, e))
        }
    }
}

#[utoipa::path(
    delete, path = "/api/delete", tag = "loans",
    params(MobileNumberQuery),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::ResponseDtoDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponseDoc),
        (status = 417, description = "No loan for that mobile number", body = crate::openapi::ResponseDtoDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    query: Result<Query<MobileNumberQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<ResponseDto>), JsonApiError> {
    const PATH: &str = "/api/delete";
    let mobile_number = mobile_number_from(PATH, query)?;
    match state.loans.delete(&mobile_number).await {
        Ok(true) => {
            metrics::record("delete", "ok");
            Ok((StatusCode::OK, Json(ResponseDto::new(constants::STATUS_200, constants::MESSAGE_200))))
        }
        Ok(false) => {
            metrics::record("delete", "not_deleted");
            Ok((
                StatusCode::EXPECTATION_FAILED,
                Json(ResponseDto::new(constants::STATUS_417, constants::MESSAGE_417_DELETE)),
            ))
        }
        Err(e) => {
            metrics::record("delete", e.code());
            Err(JsonApiError::from_service(PATH, e))
        }
    }
}
