//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호
//! - `DB_MAX_CONNECTIONS`: 연결 풀 최대 크기

// std::env: 표준 라이브러리의 환경변수 모듈
use std::env;

// #[derive(...)]: 컴파일러가 트레이트 구현을 자동으로 생성합니다.
// - Debug: {:?}로 출력 가능 (시작 로그, 테스트 실패 메시지)
// - Clone: .clone()으로 복제 가능
/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어옵니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 경로 (예: "sqlite:data/docver.db?mode=rwc")
    pub database_url: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    /// u16: 0~65535 범위의 부호 없는 정수. 범위를 벗어난 값은 파싱 단계에서 걸러집니다.
    pub port: u16,
    /// 연결 풀 최대 연결 수 (기본값: 5)
    /// SQLite는 쓰기 잠금이 DB 파일 하나에 걸리므로 크게 잡을 필요가 없습니다.
    pub max_connections: u32,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`은 필수이며, 없으면 에러가 발생합니다.
    /// 나머지 설정은 기본값이 있어 환경변수가 없어도 동작합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        // Self는 impl 블록의 대상 타입(Config)을 가리킵니다.
        Ok(Self {
            // env::var는 Result<String, VarError>를 반환합니다.
            // `?`: 변수가 없으면 즉시 Err를 반환 (필수 항목)
            database_url: env::var("DATABASE_URL")?,

            // unwrap_or_else(|_| ...): Err일 때만 클로저를 실행해 기본값을 만듭니다.
            // |_|: 에러 값은 쓰지 않으므로 `_`로 무시
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            // 숫자 항목은 문자열 → 숫자 변환이 필요합니다.
            // 타입은 필드 타입(u16, u32)에서 추론됩니다.
            port: parse_or("PORT", 3000),
            max_connections: parse_or("DB_MAX_CONNECTIONS", 5),
        })
    }
}

/// 환경변수를 숫자로 파싱합니다. 없거나 파싱에 실패하면 기본값을 씁니다.
///
/// `T: FromStr`: `.parse()`로 만들 수 있는 타입이면 무엇이든 받습니다 (제네릭).
fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        // .ok(): Result → Option 변환 (에러 내용은 버림)
        .ok()
        // and_then: Some일 때만 파싱하고, 파싱 실패도 None으로 합칩니다.
        .and_then(|value| value.parse().ok())
        // "PORT=abc"처럼 잘못된 값도 서버를 멈추지 않고 기본값으로 시작
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 환경변수는 프로세스 전역이라 다른 테스트와 겹치지 않는 키만 씁니다.
    #[test]
    fn unparsable_numbers_fall_back_to_the_default() {
        env::set_var("DOCVER_TEST_PORT_GARBAGE", "not-a-port");
        assert_eq!(parse_or::<u16>("DOCVER_TEST_PORT_GARBAGE", 3000), 3000);

        env::set_var("DOCVER_TEST_PORT_OVERFLOW", "70000");
        assert_eq!(parse_or::<u16>("DOCVER_TEST_PORT_OVERFLOW", 3000), 3000);

        env::set_var("DOCVER_TEST_PORT_VALID", "8080");
        assert_eq!(parse_or::<u16>("DOCVER_TEST_PORT_VALID", 3000), 8080);

        assert_eq!(parse_or::<u32>("DOCVER_TEST_UNSET_KEY", 5), 5);
    }
}
