//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 서비스 계층(services/)에서 이 모듈의 함수를 호출합니다.
//!
//! 각 하위 모듈:
//! - `users`: 사용자 디렉토리 조회 (표시용, 읽기 전용)
//! - `versions`: 문서 버전 저장/조회와 상태 전이 쿼리

pub mod users;
pub mod versions;

use chrono::{SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

/// SQLite 연결 풀을 만듭니다.
///
/// - create_if_missing: DB 파일이 없으면 생성
/// - WAL: 읽기와 쓰기가 서로를 막지 않도록
/// - busy_timeout: 다른 연결이 쓰기 잠금을 잡고 있으면 기다렸다가 재시도
pub async fn connect(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// DB에 저장하는 시간 문자열. `strftime('%Y-%m-%dT%H:%M:%fZ')`와 같은 형식입니다.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
