//! # 버전 라이프사이클 서비스
//!
//! 버전 생성과 상태 전이(제출/승인/반려)를 처리합니다.
//!
//! ## 현재 버전 불변식
//! 문서당 `is_current_version = true`인 버전은 최대 1개입니다.
//! 승인은 다음 세 단계를 **하나의 트랜잭션**으로 실행합니다.
//! 1. 대상 버전을 `approved`로 갱신 (허용되지 않는 상태면 0행)
//! 2. 같은 문서의 다른 버전들의 현재 버전 플래그 해제
//! 3. 대상 버전을 현재 버전으로 설정
//!
//! 중간에 실패하면 트랜잭션 전체가 롤백되어 어떤 변경도 남지 않습니다.
//! 첫 문장이 쓰기(UPDATE)이므로 트랜잭션 시작과 함께 쓰기 잠금을 잡고,
//! 같은 문서에 대한 동시 승인은 DB에서 직렬화됩니다.
//! 그래도 두 번째 현재 버전이 생기려 하면 부분 유니크 인덱스가 거부합니다.

use sqlx::SqlitePool;

use crate::db;
use crate::error::AppError;
use crate::models::{DocumentVersion, NewVersion, OrganizationId, VersionStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Submit,
    Approve,
    Reject,
}

impl Transition {
    fn verb(&self) -> &'static str {
        match self {
            Transition::Submit => "submit",
            Transition::Approve => "approve",
            Transition::Reject => "reject",
        }
    }

    fn allowed_from(&self, status: VersionStatus) -> bool {
        match self {
            Transition::Submit => status.can_submit(),
            Transition::Approve => status.can_approve(),
            Transition::Reject => status.can_reject(),
        }
    }
}

/// 새 버전을 `draft`로 등록합니다. 현재 버전은 승인 전까지 바뀌지 않습니다.
pub async fn create(
    pool: &SqlitePool,
    org: &OrganizationId,
    new: &NewVersion,
) -> Result<DocumentVersion, AppError> {
    let version = db::versions::insert_version(pool, org, new).await?;
    tracing::info!(
        "Created version {} ({}) for document {}",
        version.version_number,
        version.id,
        version.document_id
    );
    Ok(version)
}

/// `draft` 버전을 검토 상태로 제출합니다.
pub async fn submit(
    pool: &SqlitePool,
    org: &OrganizationId,
    id: &str,
    submitted_by: &str,
) -> Result<DocumentVersion, AppError> {
    match db::versions::mark_submitted(pool, org, id, submitted_by).await? {
        Some(version) => {
            tracing::info!("Version {} submitted for review by {}", id, submitted_by);
            Ok(version)
        }
        None => Err(refusal(pool, org, id, Transition::Submit).await),
    }
}

/// 버전을 승인하고 문서의 현재 버전으로 만듭니다.
///
/// 이미 승인된 버전을 다시 승인하면 `approved_by`/`approved_at`만 갱신되고
/// 현재 버전 불변식은 그대로 유지됩니다.
pub async fn approve(
    pool: &SqlitePool,
    org: &OrganizationId,
    id: &str,
    approved_by: &str,
    comment: Option<&str>,
) -> Result<DocumentVersion, AppError> {
    let mut tx = pool.begin().await?;

    let Some(approved) =
        db::versions::mark_approved(&mut *tx, org, id, approved_by, comment).await?
    else {
        // 풀 연결을 돌려준 뒤에 원인을 조회합니다.
        tx.rollback().await?;
        return Err(refusal(pool, org, id, Transition::Approve).await);
    };

    let cleared =
        db::versions::clear_current(&mut *tx, org, &approved.document_id, &approved.id).await?;
    // 같은 트랜잭션 안에서 갱신된 행을 받아 커밋 후 재조회 없이 반환합니다.
    let Some(current) = db::versions::set_current(&mut *tx, org, &approved.id).await? else {
        tx.rollback().await?;
        return Err(AppError::Internal("Approved version disappeared".to_string()));
    };
    tx.commit().await?;

    tracing::info!(
        "Version {} ({}) approved by {} and is now current for document {} ({} superseded)",
        approved.version_number,
        approved.id,
        approved_by,
        approved.document_id,
        cleared
    );

    Ok(current)
}

/// 버전을 반려합니다. 사유는 비어 있을 수 없습니다.
pub async fn reject(
    pool: &SqlitePool,
    org: &OrganizationId,
    id: &str,
    rejected_by: &str,
    reason: &str,
) -> Result<DocumentVersion, AppError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(AppError::Validation("reason is required".to_string()));
    }

    match db::versions::mark_rejected(pool, org, id, rejected_by, reason).await? {
        Some(version) => {
            tracing::info!("Version {} rejected by {}: {}", id, rejected_by, reason);
            Ok(version)
        }
        None => Err(refusal(pool, org, id, Transition::Reject).await),
    }
}

/// 전이 UPDATE가 0행이었을 때 원인을 에러로 만듭니다.
async fn refusal(
    pool: &SqlitePool,
    org: &OrganizationId,
    id: &str,
    transition: Transition,
) -> AppError {
    match db::versions::find_by_id(pool, org, id).await {
        Ok(None) => AppError::version_not_found(),
        Ok(Some(version)) if !transition.allowed_from(version.status) => {
            tracing::warn!(
                "Refused to {} version {} in {} status",
                transition.verb(),
                id,
                version.status
            );
            AppError::Conflict(format!(
                "Cannot {} a version in {} status",
                transition.verb(),
                version.status
            ))
        }
        Ok(Some(_)) => AppError::Conflict(format!(
            "Version changed while trying to {} it, retry the request",
            transition.verb()
        )),
        Err(e) => e,
    }
}
