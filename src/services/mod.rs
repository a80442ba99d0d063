//! # 서비스 계층
//!
//! 라우트 핸들러와 DB 접근 계층 사이의 비즈니스 로직입니다.
//! - `lifecycle`: 버전 생성과 상태 전이 (제출/승인/반려)
//! - `query`: 읽기 전용 조회와 사용자 정보 펼치기
//! - `validation`: 요청 본문 검증 (순수 함수)

pub mod lifecycle;
pub mod query;
pub mod validation;
