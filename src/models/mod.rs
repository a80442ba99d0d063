//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `scope`: 조직(테넌트) ID 타입과 식별자 검증
//! - `user`: 표시용 사용자 요약
//! - `version`: 문서 버전, 상태, 요청 본문 구조체
//!
//! `pub use X::*;`로 재공개하여 `crate::models::DocumentVersion`처럼 짧게 접근합니다.

pub mod scope;
pub mod user;
pub mod version;

pub use scope::*;
pub use user::*;
pub use version::*;
