//! # 문서 버전 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/document-versions | `list_versions` | 조직 전체 버전 (`status` 필터) |
//! | POST | /api/v1/document-versions | `create_version` | 새 버전 등록 (draft) |
//! | GET | /api/v1/document-versions/document/{document_id} | `list_document_versions` | 문서의 버전 목록 |
//! | GET | /api/v1/document-versions/current/{document_id} | `get_current_version` | 문서의 현재 버전 |
//! | GET | /api/v1/document-versions/{id} | `get_version` | 단일 버전 |
//! | PATCH | /api/v1/document-versions/{id}/submit | `submit_version` | 검토 제출 |
//! | PATCH | /api/v1/document-versions/{id}/approve | `approve_version` | 승인 |
//! | PATCH | /api/v1/document-versions/{id}/reject | `reject_version` | 반려 |
//!
//! 조회는 `?organization_id=`, 변경은 본문의 `organization_id`가 필수입니다.
//! 값이 없거나 형식이 틀리면 DB를 조회하기 전에 400으로 응답합니다.
//!
//! 성공 응답: `{ "success": true, "data": ..., "message"?: ... }`

use crate::{
    error::AppError,
    models::*,
    services::{lifecycle, query, validation},
};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::AppState;

/// `GET /document-versions?organization_id=&status=`
pub async fn list_versions(
    State(state): State<AppState>,
    Query(params): Query<VersionQuery>,
) -> Result<Json<Value>, AppError> {
    let org = OrganizationId::from_input(params.organization_id.as_deref())?;
    let status = validation::status_filter(params.status)?;

    let versions = query::list_by_status(&state.pool, &org, status).await?;
    Ok(Json(json!({ "success": true, "data": versions })))
}

/// `GET /document-versions/document/{document_id}?organization_id=`
pub async fn list_document_versions(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
    Query(params): Query<VersionQuery>,
) -> Result<Json<Value>, AppError> {
    let org = OrganizationId::from_input(params.organization_id.as_deref())?;
    let document_id = parse_id("document_id", &document_id)?;

    let versions = query::list_versions(&state.pool, &org, &document_id).await?;
    Ok(Json(json!({ "success": true, "data": versions })))
}

/// `GET /document-versions/current/{document_id}?organization_id=`
pub async fn get_current_version(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
    Query(params): Query<VersionQuery>,
) -> Result<Json<Value>, AppError> {
    let org = OrganizationId::from_input(params.organization_id.as_deref())?;
    let document_id = parse_id("document_id", &document_id)?;

    let current = query::get_current(&state.pool, &org, &document_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No current version for this document".to_string()))?;
    Ok(Json(json!({ "success": true, "data": current })))
}

/// `GET /document-versions/{id}?organization_id=`
pub async fn get_version(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<VersionQuery>,
) -> Result<Json<Value>, AppError> {
    let org = OrganizationId::from_input(params.organization_id.as_deref())?;
    let id = parse_id("id", &id)?;

    let version = query::get_by_id(&state.pool, &org, &id)
        .await?
        .ok_or_else(AppError::version_not_found)?;
    Ok(Json(json!({ "success": true, "data": version })))
}

/// `POST /document-versions` — 업로드가 끝난 파일의 새 버전을 등록합니다.
///
/// `Result<Json<T>, JsonRejection>`로 받으면 잘못된 JSON도
/// Axum 기본 응답 대신 공통 봉투 형식의 400으로 돌려줄 수 있습니다.
pub async fn create_version(
    State(state): State<AppState>,
    payload: Result<Json<CreateVersionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(req) = payload?;
    let (org, new) = validation::new_version(req)?;

    let version = lifecycle::create(&state.pool, &org, &new).await?;
    let version = query::view(&state.pool, version).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": version,
            "message": "Document version created"
        })),
    ))
}

/// `PATCH /document-versions/{id}/submit`
pub async fn submit_version(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SubmitVersionRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(req) = payload?;
    let org = OrganizationId::from_input(req.organization_id.as_deref())?;
    let id = parse_id("id", &id)?;
    let submitted_by = validation::actor("submitted_by", req.submitted_by)?;

    let version = lifecycle::submit(&state.pool, &org, &id, &submitted_by).await?;
    let version = query::view(&state.pool, version).await?;
    Ok(Json(json!({
        "success": true,
        "data": version,
        "message": "Document version submitted for review"
    })))
}

/// `PATCH /document-versions/{id}/approve` — 승인하고 현재 버전으로 지정합니다.
pub async fn approve_version(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ApproveVersionRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(req) = payload?;
    let org = OrganizationId::from_input(req.organization_id.as_deref())?;
    let id = parse_id("id", &id)?;
    let approved_by = validation::actor("approved_by", req.approved_by)?;
    let comment = validation::comment(req.comment);

    let version =
        lifecycle::approve(&state.pool, &org, &id, &approved_by, comment.as_deref()).await?;
    let version = query::view(&state.pool, version).await?;
    Ok(Json(json!({
        "success": true,
        "data": version,
        "message": "Document version approved"
    })))
}

/// `PATCH /document-versions/{id}/reject`
pub async fn reject_version(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RejectVersionRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(req) = payload?;
    let org = OrganizationId::from_input(req.organization_id.as_deref())?;
    let id = parse_id("id", &id)?;
    let rejected_by = validation::actor("rejected_by", req.rejected_by)?;
    let reason = validation::reason(req.reason)?;

    let version = lifecycle::reject(&state.pool, &org, &id, &rejected_by, &reason).await?;
    let version = query::view(&state.pool, version).await?;
    Ok(Json(json!({
        "success": true,
        "data": version,
        "message": "Document version rejected"
    })))
}
