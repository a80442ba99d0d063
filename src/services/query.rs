//! # 버전 조회 서비스
//!
//! 읽기 전용 조회와, 응답에 쓰는 사용자 정보 펼치기(expansion)를 담당합니다.
//! 현재 버전이 하나뿐이라는 점은 라이프사이클 쪽 불변식에 맡기고 여기서 다시 검사하지 않습니다.

use std::collections::{BTreeSet, HashMap};

use sqlx::SqlitePool;

use crate::db;
use crate::error::AppError;
use crate::models::{DocumentVersion, OrganizationId, UserSummary, VersionStatus, VersionView};

pub async fn list_versions(
    pool: &SqlitePool,
    org: &OrganizationId,
    document_id: &str,
) -> Result<Vec<VersionView>, AppError> {
    let versions = db::versions::find_by_document(pool, org, document_id).await?;
    expand(pool, versions).await
}

pub async fn get_current(
    pool: &SqlitePool,
    org: &OrganizationId,
    document_id: &str,
) -> Result<Option<VersionView>, AppError> {
    match db::versions::find_current(pool, org, document_id).await? {
        Some(version) => Ok(Some(view(pool, version).await?)),
        None => Ok(None),
    }
}

pub async fn get_by_id(
    pool: &SqlitePool,
    org: &OrganizationId,
    id: &str,
) -> Result<Option<VersionView>, AppError> {
    match db::versions::find_by_id(pool, org, id).await? {
        Some(version) => Ok(Some(view(pool, version).await?)),
        None => Ok(None),
    }
}

pub async fn list_by_status(
    pool: &SqlitePool,
    org: &OrganizationId,
    status: Option<VersionStatus>,
) -> Result<Vec<VersionView>, AppError> {
    let versions = db::versions::find_by_status(pool, org, status).await?;
    expand(pool, versions).await
}

/// 버전 하나를 응답용 뷰로 변환합니다.
pub async fn view(pool: &SqlitePool, version: DocumentVersion) -> Result<VersionView, AppError> {
    let mut views = expand(pool, vec![version]).await?;
    views
        .pop()
        .ok_or(AppError::Internal("Failed to build version view".to_string()))
}

/// 버전 목록에 등장하는 모든 사용자 ID를 한 번에 조회해서 뷰에 채웁니다.
async fn expand(
    pool: &SqlitePool,
    versions: Vec<DocumentVersion>,
) -> Result<Vec<VersionView>, AppError> {
    let ids: BTreeSet<&str> = versions.iter().flat_map(user_refs).collect();
    let ids: Vec<&str> = ids.into_iter().collect();
    let users = db::users::find_summaries(pool, &ids).await?;

    Ok(versions
        .into_iter()
        .map(|version| attach(version, &users))
        .collect())
}

fn user_refs(version: &DocumentVersion) -> impl Iterator<Item = &str> {
    std::iter::once(version.created_by.as_str()).chain(
        [
            version.submitted_by.as_deref(),
            version.approved_by.as_deref(),
            version.rejected_by.as_deref(),
        ]
        .into_iter()
        .flatten(),
    )
}

fn attach(version: DocumentVersion, users: &HashMap<String, UserSummary>) -> VersionView {
    let lookup = |id: Option<&str>| id.and_then(|id| users.get(id)).cloned();

    VersionView {
        created_by_user: lookup(Some(version.created_by.as_str())),
        submitted_by_user: lookup(version.submitted_by.as_deref()),
        approved_by_user: lookup(version.approved_by.as_deref()),
        rejected_by_user: lookup(version.rejected_by.as_deref()),
        version,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::lifecycle;
    use crate::test_support::{self, new_version, org, APPROVER, AUTHOR, DOC_A, REJECTER};

    #[tokio::test]
    async fn views_expand_known_users() {
        let pool = test_support::pool().await;
        test_support::seed_users(&pool).await;
        let org = org();

        let v1 = lifecycle::create(&pool, &org, &new_version(DOC_A, "1.0"))
            .await
            .unwrap();
        lifecycle::approve(&pool, &org, &v1.id, APPROVER, None)
            .await
            .unwrap();

        let current = get_current(&pool, &org, DOC_A).await.unwrap().unwrap();
        assert_eq!(current.version.id, v1.id);
        assert_eq!(current.created_by_user.unwrap().id, AUTHOR);
        assert_eq!(current.approved_by_user.unwrap().name, "Paulo Approver");
        assert!(current.rejected_by_user.is_none());
    }

    #[tokio::test]
    async fn unknown_users_expand_to_none() {
        let pool = test_support::pool().await;
        let org = org();

        let v1 = lifecycle::create(&pool, &org, &new_version(DOC_A, "1.0"))
            .await
            .unwrap();
        lifecycle::reject(&pool, &org, &v1.id, REJECTER, "incomplete")
            .await
            .unwrap();

        let view = get_by_id(&pool, &org, &v1.id).await.unwrap().unwrap();
        assert_eq!(view.version.rejected_by.as_deref(), Some(REJECTER));
        assert!(view.rejected_by_user.is_none());
        assert!(view.created_by_user.is_none());
    }

    #[tokio::test]
    async fn current_is_none_for_unapproved_documents() {
        let pool = test_support::pool().await;
        let org = org();

        lifecycle::create(&pool, &org, &new_version(DOC_A, "1.0"))
            .await
            .unwrap();
        assert!(get_current(&pool, &org, DOC_A).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn serialized_view_is_flat() {
        let pool = test_support::pool().await;
        test_support::seed_users(&pool).await;
        let org = org();

        lifecycle::create(&pool, &org, &new_version(DOC_A, "1.0"))
            .await
            .unwrap();
        let views = list_versions(&pool, &org, DOC_A).await.unwrap();
        let json = serde_json::to_value(&views[0]).unwrap();

        assert_eq!(json["version_number"], "1.0");
        assert_eq!(json["status"], "draft");
        assert_eq!(json["is_current_version"], false);
        assert_eq!(json["created_by_user"]["email"], "ana@example.com");
        assert!(json["approved_by_user"].is_null());
    }
}
