use std::collections::HashMap;

use crate::error::AppError;
use crate::models::UserSummary;
use sqlx::SqlitePool;

/// 여러 사용자 ID를 한 번에 조회합니다.
///
/// 버전 목록의 작성자/승인자 등을 펼칠 때 행마다 쿼리하지 않도록
/// `WHERE id IN (?, ?, ...)` 한 번으로 가져옵니다. 디렉토리에 없는 ID는 결과에서 빠집니다.
pub async fn find_summaries(
    pool: &SqlitePool,
    ids: &[&str],
) -> Result<HashMap<String, UserSummary>, AppError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!("SELECT id, name, email FROM users WHERE id IN ({placeholders})");

    let mut query = sqlx::query_as::<_, UserSummary>(&sql);
    for id in ids {
        query = query.bind(*id);
    }

    let users = query.fetch_all(pool).await?;
    Ok(users.into_iter().map(|u| (u.id.clone(), u)).collect())
}
