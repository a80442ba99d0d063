//! 테스트 공용 헬퍼: 마이그레이션이 적용된 인메모리 DB와 고정 픽스처.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tempfile::TempDir;

use crate::models::{NewVersion, OrganizationId};

pub const ORG: &str = "0195a0c2-1000-7000-8000-000000000001";
pub const OTHER_ORG: &str = "0195a0c2-1000-7000-8000-000000000002";
pub const DOC_A: &str = "0195a0c2-2000-7000-8000-00000000000a";
pub const DOC_B: &str = "0195a0c2-2000-7000-8000-00000000000b";
pub const AUTHOR: &str = "0195a0c2-3000-7000-8000-000000000001";
pub const APPROVER: &str = "0195a0c2-3000-7000-8000-000000000002";
pub const REJECTER: &str = "0195a0c2-3000-7000-8000-000000000003";

/// 인메모리 SQLite 풀.
///
/// `sqlite::memory:`는 연결마다 별도의 DB가 생기므로 연결을 1개로 고정하고,
/// 유휴 연결이 닫혀 DB가 사라지지 않도록 타임아웃을 끕니다.
pub async fn pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

/// 임시 디렉토리의 파일 DB 풀. 운영과 같은 `db::connect` 설정(WAL, busy_timeout)을 씁니다.
///
/// 연결마다 독립적으로 쓰기 잠금을 다투므로 동시성 테스트는 이 풀로 돌립니다.
/// 반환된 `TempDir`이 drop되면 DB 파일도 지워지므로 테스트 끝까지 들고 있어야 합니다.
pub async fn file_pool(max_connections: u32) -> (TempDir, SqlitePool) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let url = format!("sqlite://{}", dir.path().join("docver.db").display());
    let pool = crate::db::connect(&url, max_connections)
        .await
        .expect("failed to open file database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    (dir, pool)
}

pub fn org() -> OrganizationId {
    OrganizationId::from_input(Some(ORG)).unwrap()
}

pub fn other_org() -> OrganizationId {
    OrganizationId::from_input(Some(OTHER_ORG)).unwrap()
}

pub fn new_version(document_id: &str, version_number: &str) -> NewVersion {
    NewVersion {
        document_id: document_id.to_string(),
        version_number: version_number.to_string(),
        title: format!("Quality manual v{version_number}"),
        description: Some("ISO 9001 quality manual".to_string()),
        file_path: format!("documents/{document_id}/{version_number}.pdf"),
        file_name: "quality-manual.pdf".to_string(),
        file_size: 48_213,
        mime_type: "application/pdf".to_string(),
        checksum: None,
        changes_description: Some("Initial upload".to_string()),
        created_by: AUTHOR.to_string(),
    }
}

pub async fn seed_users(pool: &SqlitePool) {
    for (id, name, email) in [
        (AUTHOR, "Ana Author", "ana@example.com"),
        (APPROVER, "Paulo Approver", "paulo@example.com"),
        (REJECTER, "Rita Reviewer", "rita@example.com"),
    ] {
        sqlx::query("INSERT INTO users (id, name, email, organization_id) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(name)
            .bind(email)
            .bind(ORG)
            .execute(pool)
            .await
            .expect("failed to seed user");
    }
}

/// 문서의 현재 버전 수 (불변식 검사용)
pub async fn current_count(pool: &SqlitePool, document_id: &str) -> i64 {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM document_versions WHERE document_id = ? AND is_current_version = 1",
    )
    .bind(document_id)
    .fetch_one(pool)
    .await
    .expect("failed to count current versions")
}
