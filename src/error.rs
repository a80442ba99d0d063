//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 공통 JSON 봉투(envelope) 응답으로 자동 변환
//!
//! 응답 형식: `{ "success": false, "error": "<code>", "message": "<설명>" }`

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// #[derive(Debug, Error)]
// - Debug: {:?} 출력 (로그, 테스트 실패 메시지)
// - Error (thiserror): std::error::Error 구현과 함께
//   각 variant의 #[error("...")]로 Display 메시지를 생성합니다.
/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    // {0}: 튜플 variant의 첫 번째 값(String)을 메시지에 끼워 넣습니다.
    /// 입력 누락/형식 오류 (HTTP 400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 중복 버전 번호, 허용되지 않는 상태 전이 (HTTP 409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    // #[from]: From<sqlx::Error> 구현을 생성합니다.
    // 그래서 db 함수에서 sqlx 호출 뒤에 `?`만 붙이면 AppError::Database로 바뀝니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn version_not_found() -> Self {
        AppError::NotFound("Document version not found".to_string())
    }

    /// 응답 본문의 `error` 코드
    ///
    /// &'static str: 프로그램 전체 수명 동안 유효한 문자열 리터럴이라 할당이 없습니다.
    pub fn code(&self) -> &'static str {
        // 튜플 안의 값은 쓰지 않으므로 `_`로 무시
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::NotFound(_) => "not_found",
            AppError::Conflict(_) => "conflict",
            AppError::Internal(_) => "internal_error",
            AppError::Database(_) => "database_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        // `|`: 여러 패턴을 한 갈래로 묶습니다.
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 잘못된 JSON 본문(문법 오류, 타입 불일치 등)도 같은 봉투 형식의 400으로 응답합니다.
///
/// 핸들러가 `Result<Json<T>, JsonRejection>`을 받은 뒤 `?`를 쓰면 이 From 구현이 호출됩니다.
/// 이 구현이 없으면 Axum 기본 응답(봉투 없는 일반 텍스트)이 나갑니다.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        // body_text(): serde가 만든 설명 (예: "missing field ...", 줄/열 위치)
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, Internal)는 실제 에러 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        // ref: 값을 이동(move)하지 않고 참조만 빌립니다.
        // 아래에서 self.code(), self.status()를 다시 호출해야 하므로 self를 소비하면 안 됩니다.
        let message = match self {
            AppError::Validation(ref msg)
            | AppError::NotFound(ref msg)
            | AppError::Conflict(ref msg) => msg.clone(),
            AppError::Internal(ref msg) => {
                // 원인은 서버 로그에만 남기고 클라이언트에는 일반 메시지
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                "A database error occurred".to_string()
            }
        };

        // json!: Rust 코드 안에서 JSON 리터럴을 그대로 작성하는 매크로
        let body = Json(json!({
            "success": false,
            "error": self.code(),
            "message": message
        }));

        // Axum은 (StatusCode, 본문) 튜플을 HTTP 응답으로 변환합니다.
        (self.status(), body).into_response()
    }
}
