//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/v1/health` → `{ "success": true, "data": { "status": "ok" } }`
//!
//! DB 연결까지 확인합니다. `SELECT 1`이 실패하면 500 응답이 나가므로
//! 로드밸런서나 컨테이너 헬스체크가 비정상 인스턴스를 걸러낼 수 있습니다.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use super::AppState;
use crate::error::AppError;

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    sqlx::query("SELECT 1").execute(&state.pool).await?;

    Ok(Json(json!({
        "success": true,
        "data": { "status": "ok" }
    })))
}
