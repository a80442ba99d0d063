use serde::{Deserialize, Serialize};

/// 표시용 사용자 요약 정보
///
/// 사용자 데이터의 소유자는 외부 사용자 디렉토리이고, 이 서비스는 `users` 테이블을
/// 읽기만 합니다. 버전 응답의 `created_by_user`, `approved_by_user` 등에 들어갑니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
}
