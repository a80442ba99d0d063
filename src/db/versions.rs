//! # 문서 버전 저장소
//!
//! `document_versions` 테이블에 대한 쿼리 함수들입니다.
//!
//! - 조회 함수는 `&SqlitePool`을 받고, 항상 `OrganizationId`로 범위를 제한합니다.
//! - 상태를 바꾸는 함수는 `SqliteExecutor`를 받습니다. 풀(`&SqlitePool`)로 바로 실행할 수도 있고,
//!   트랜잭션 안에서(`&mut *tx`) 다른 쿼리와 묶어 실행할 수도 있습니다.
//! - 상태 전이 UPDATE는 `WHERE status IN (...)` 조건을 포함하고 `RETURNING`으로 갱신된 행을 돌려줍니다.
//!   `None`이면 버전이 없거나 전이가 허용되지 않은 것입니다.

use crate::db::now_timestamp;
use crate::error::AppError;
use crate::models::{DocumentVersion, NewVersion, OrganizationId, VersionStatus};
use sqlx::{SqliteExecutor, SqlitePool};

const VERSION_COLUMNS: &str = r#"
    id, document_id, version_number, title, description,
    file_path, file_name, file_size, mime_type, checksum,
    status, submitted_by, submitted_at, approved_by, approved_at, approval_comment,
    rejected_by, rejected_at, rejection_reason, changes_description,
    is_current_version, organization_id, created_by, created_at, updated_at
"#;

/// `'draft', 'review'` 형태의 SQL 리터럴 목록을 만듭니다.
/// 값은 모두 `VersionStatus`의 고정 문자열이므로 바인딩 없이 넣어도 안전합니다.
fn status_in(statuses: &[VersionStatus]) -> String {
    statuses
        .iter()
        .map(|s| format!("'{}'", s.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// 새 버전을 `draft` 상태로 저장하고 저장된 행을 반환합니다.
///
/// 문서는 처음 버전을 등록한 조직에 속합니다. 같은 `document_id`에 다른 조직의 버전이
/// 이미 있으면 저장하지 않고 `AppError::NotFound`를 돌려줍니다. 다른 조직의 데이터가
/// 있다는 사실이 드러나지 않도록 조회 실패와 같은 응답을 씁니다.
/// 소유 조직 확인과 INSERT는 한 문장(`INSERT ... SELECT ... WHERE NOT EXISTS`)이라
/// 두 조직이 동시에 첫 버전을 등록해도 한쪽만 성공합니다.
///
/// `(document_id, version_number)` 유니크 인덱스 위반은 `AppError::Conflict`로 바뀝니다.
pub async fn insert_version(
    pool: &SqlitePool,
    org: &OrganizationId,
    new: &NewVersion,
) -> Result<DocumentVersion, AppError> {
    let id = uuid::Uuid::now_v7().to_string();
    let now = now_timestamp();

    let result = sqlx::query(
        r#"
        INSERT INTO document_versions (
            id, document_id, version_number, title, description,
            file_path, file_name, file_size, mime_type, checksum,
            status, changes_description, is_current_version,
            organization_id, created_by, created_at, updated_at
        )
        SELECT ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?, ?, ?
        WHERE NOT EXISTS (
            SELECT 1 FROM document_versions
            WHERE document_id = ? AND organization_id <> ?
        )
        "#,
    )
    .bind(&id)
    .bind(&new.document_id)
    .bind(&new.version_number)
    .bind(&new.title)
    .bind(&new.description)
    .bind(&new.file_path)
    .bind(&new.file_name)
    .bind(new.file_size)
    .bind(&new.mime_type)
    .bind(&new.checksum)
    .bind(VersionStatus::Draft)
    .bind(&new.changes_description)
    .bind(org.as_str())
    .bind(&new.created_by)
    .bind(&now)
    .bind(&now)
    .bind(&new.document_id)
    .bind(org.as_str())
    .execute(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict(format!(
                "Version {} already exists for document {}",
                new.version_number, new.document_id
            ))
        }
        other => AppError::Database(other),
    })?;

    // 다른 조직 소유 문서
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Document not found".to_string()));
    }

    find_by_id(pool, org, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created version".to_string()))
}

pub async fn find_by_id(
    pool: &SqlitePool,
    org: &OrganizationId,
    id: &str,
) -> Result<Option<DocumentVersion>, AppError> {
    let version = sqlx::query_as::<_, DocumentVersion>(&format!(
        "SELECT {VERSION_COLUMNS} FROM document_versions WHERE id = ? AND organization_id = ?"
    ))
    .bind(id)
    .bind(org.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(version)
}

/// 문서의 모든 버전을 최근 생성순으로 조회합니다.
///
/// `version_number`는 표시용 라벨이라 정렬에 쓰지 않습니다 ("10.0" < "2.0" 문제).
/// 같은 밀리초에 생성된 행은 삽입 순서(rowid)로 정렬합니다.
pub async fn find_by_document(
    pool: &SqlitePool,
    org: &OrganizationId,
    document_id: &str,
) -> Result<Vec<DocumentVersion>, AppError> {
    let versions = sqlx::query_as::<_, DocumentVersion>(&format!(
        r#"
        SELECT {VERSION_COLUMNS}
        FROM document_versions
        WHERE document_id = ? AND organization_id = ?
        ORDER BY created_at DESC, rowid DESC
        "#
    ))
    .bind(document_id)
    .bind(org.as_str())
    .fetch_all(pool)
    .await?;

    Ok(versions)
}

pub async fn find_current(
    pool: &SqlitePool,
    org: &OrganizationId,
    document_id: &str,
) -> Result<Option<DocumentVersion>, AppError> {
    let version = sqlx::query_as::<_, DocumentVersion>(&format!(
        r#"
        SELECT {VERSION_COLUMNS}
        FROM document_versions
        WHERE document_id = ? AND organization_id = ? AND is_current_version = 1
        "#
    ))
    .bind(document_id)
    .bind(org.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(version)
}

/// 조직 전체의 버전을 조회합니다. `status`가 주어지면 해당 상태만.
pub async fn find_by_status(
    pool: &SqlitePool,
    org: &OrganizationId,
    status: Option<VersionStatus>,
) -> Result<Vec<DocumentVersion>, AppError> {
    let versions = sqlx::query_as::<_, DocumentVersion>(&format!(
        r#"
        SELECT {VERSION_COLUMNS}
        FROM document_versions
        WHERE organization_id = ? AND (? IS NULL OR status = ?)
        ORDER BY created_at DESC, rowid DESC
        "#
    ))
    .bind(org.as_str())
    .bind(status)
    .bind(status)
    .fetch_all(pool)
    .await?;

    Ok(versions)
}

/// 버전을 `approved`로 표시합니다. 현재 버전 플래그는 건드리지 않습니다.
///
/// `comment`가 있으면 `changes_description`을 덮어쓰고 `approval_comment`에도 남깁니다.
/// 갱신된 행을 반환하고, 버전이 없거나 승인할 수 없는 상태면 `None`입니다.
pub async fn mark_approved<'c, E>(
    executor: E,
    org: &OrganizationId,
    id: &str,
    approved_by: &str,
    comment: Option<&str>,
) -> Result<Option<DocumentVersion>, AppError>
where
    E: SqliteExecutor<'c>,
{
    let now = now_timestamp();
    let version = sqlx::query_as::<_, DocumentVersion>(&format!(
        r#"
        UPDATE document_versions
        SET status = 'approved',
            approved_by = ?,
            approved_at = ?,
            changes_description = COALESCE(?, changes_description),
            approval_comment = COALESCE(?, approval_comment),
            updated_at = ?
        WHERE id = ? AND organization_id = ? AND status IN ({})
        RETURNING {VERSION_COLUMNS}
        "#,
        status_in(VersionStatus::approvable())
    ))
    .bind(approved_by)
    .bind(&now)
    .bind(comment)
    .bind(comment)
    .bind(&now)
    .bind(id)
    .bind(org.as_str())
    .fetch_optional(executor)
    .await?;

    Ok(version)
}

/// 같은 문서에서 `keep_id`를 제외한 모든 버전의 현재 버전 플래그를 내립니다.
pub async fn clear_current<'c, E>(
    executor: E,
    org: &OrganizationId,
    document_id: &str,
    keep_id: &str,
) -> Result<u64, AppError>
where
    E: SqliteExecutor<'c>,
{
    let result = sqlx::query(
        r#"
        UPDATE document_versions
        SET is_current_version = 0, updated_at = ?
        WHERE document_id = ? AND organization_id = ? AND is_current_version = 1 AND id <> ?
        "#,
    )
    .bind(now_timestamp())
    .bind(document_id)
    .bind(org.as_str())
    .bind(keep_id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

/// 버전을 현재 버전으로 표시하고 갱신된 행을 반환합니다.
///
/// 같은 문서에 다른 현재 버전이 남아 있으면 부분 유니크 인덱스
/// (`idx_document_versions_single_current`) 위반으로 실패합니다.
pub async fn set_current<'c, E>(
    executor: E,
    org: &OrganizationId,
    id: &str,
) -> Result<Option<DocumentVersion>, AppError>
where
    E: SqliteExecutor<'c>,
{
    let version = sqlx::query_as::<_, DocumentVersion>(&format!(
        r#"
        UPDATE document_versions
        SET is_current_version = 1, updated_at = ?
        WHERE id = ? AND organization_id = ?
        RETURNING {VERSION_COLUMNS}
        "#
    ))
    .bind(now_timestamp())
    .bind(id)
    .bind(org.as_str())
    .fetch_optional(executor)
    .await?;

    Ok(version)
}

/// 버전을 `rejected`로 표시하고 현재 버전 플래그도 명시적으로 내립니다.
pub async fn mark_rejected<'c, E>(
    executor: E,
    org: &OrganizationId,
    id: &str,
    rejected_by: &str,
    reason: &str,
) -> Result<Option<DocumentVersion>, AppError>
where
    E: SqliteExecutor<'c>,
{
    let now = now_timestamp();
    let version = sqlx::query_as::<_, DocumentVersion>(&format!(
        r#"
        UPDATE document_versions
        SET status = 'rejected',
            rejected_by = ?,
            rejected_at = ?,
            rejection_reason = ?,
            is_current_version = 0,
            updated_at = ?
        WHERE id = ? AND organization_id = ? AND status IN ({})
        RETURNING {VERSION_COLUMNS}
        "#,
        status_in(VersionStatus::rejectable())
    ))
    .bind(rejected_by)
    .bind(&now)
    .bind(reason)
    .bind(&now)
    .bind(id)
    .bind(org.as_str())
    .fetch_optional(executor)
    .await?;

    Ok(version)
}

/// `draft` 버전을 검토(`review`) 상태로 올립니다.
pub async fn mark_submitted<'c, E>(
    executor: E,
    org: &OrganizationId,
    id: &str,
    submitted_by: &str,
) -> Result<Option<DocumentVersion>, AppError>
where
    E: SqliteExecutor<'c>,
{
    let now = now_timestamp();
    let version = sqlx::query_as::<_, DocumentVersion>(&format!(
        r#"
        UPDATE document_versions
        SET status = 'review', submitted_by = ?, submitted_at = ?, updated_at = ?
        WHERE id = ? AND organization_id = ? AND status = 'draft'
        RETURNING {VERSION_COLUMNS}
        "#
    ))
    .bind(submitted_by)
    .bind(&now)
    .bind(&now)
    .bind(id)
    .bind(org.as_str())
    .fetch_optional(executor)
    .await?;

    Ok(version)
}
