//! # 조직(테넌트) 범위
//!
//! 모든 조회/변경은 조직 ID로 필터링됩니다. 문자열을 그대로 넘기지 않고
//! `OrganizationId` 타입을 요구해서, 조직 범위 없이 저장소를 호출하는 코드는
//! 컴파일 단계에서 막힙니다.

use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;

/// 형식 검증(UUID)을 통과한 조직 ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OrganizationId(String);

impl OrganizationId {
    /// 요청에서 받은 값으로 조직 ID를 만듭니다.
    /// 값이 없거나 UUID 형식이 아니면 검증 에러입니다.
    pub fn from_input(value: Option<&str>) -> Result<Self, AppError> {
        let value = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Validation("organization_id is required".to_string()))?;

        let id = parse_id("organization_id", value)?;
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 식별자 형식을 검증하고 정규화된(소문자 하이픈) 문자열을 돌려줍니다.
///
/// `field`는 에러 메시지에 들어갈 필드 이름입니다.
pub fn parse_id(field: &str, value: &str) -> Result<String, AppError> {
    Uuid::parse_str(value.trim())
        .map(|id| id.hyphenated().to_string())
        .map_err(|_| AppError::Validation(format!("{} is not a valid identifier", field)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_organization_is_rejected() {
        assert!(matches!(
            OrganizationId::from_input(None),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            OrganizationId::from_input(Some("  ")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn malformed_organization_is_rejected() {
        let err = OrganizationId::from_input(Some("acme")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: organization_id is not a valid identifier"
        );
    }

    #[test]
    fn identifiers_are_normalized() {
        let org = OrganizationId::from_input(Some("0195A0C2-7B1E-7C3D-9F00-1234567890AB")).unwrap();
        assert_eq!(org.as_str(), "0195a0c2-7b1e-7c3d-9f00-1234567890ab");
        assert_eq!(
            parse_id("id", " 0195a0c2-7b1e-7c3d-9f00-1234567890ab ").unwrap(),
            "0195a0c2-7b1e-7c3d-9f00-1234567890ab"
        );
    }
}
