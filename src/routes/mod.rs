//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 API 라우터를 정의합니다.
//!
//! 각 하위 모듈:
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `versions`: 문서 버전 조회/등록/상태 전이

pub mod health;
pub mod versions;

pub use health::*;
pub use versions::*;

use axum::{
    routing::{get, patch},
    Router,
};
use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// SqlitePool은 내부적으로 Arc를 사용하므로 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

/// `/api/v1` 아래에 들어갈 API 라우터를 만듭니다.
///
/// Axum 0.8부터 경로 파라미터는 `{id}` 문법을 씁니다.
/// 정적 세그먼트(`document`, `current`)가 `{id}`보다 먼저 매칭됩니다.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/document-versions", get(list_versions).post(create_version))
        .route(
            "/document-versions/document/{document_id}",
            get(list_document_versions),
        )
        .route(
            "/document-versions/current/{document_id}",
            get(get_current_version),
        )
        .route("/document-versions/{id}", get(get_version))
        .route("/document-versions/{id}/submit", patch(submit_version))
        .route("/document-versions/{id}/approve", patch(approve_version))
        .route("/document-versions/{id}/reject", patch(reject_version))
        .route("/health", get(health_check))
        .with_state(state)
}

/// 미들웨어까지 포함한 전체 애플리케이션 라우터
pub fn app(state: AppState) -> Router {
    use tower_http::{
        cors::{Any, CorsLayer},
        trace::TraceLayer,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/v1", api_router(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
