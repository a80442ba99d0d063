//! # 문서 버전(DocumentVersion) 모델
//!
//! 업로드된 문서 리비전 한 건을 나타내는 구조체와, 버전 API의 요청 본문/쿼리 구조체를 정의합니다.
//!
//! ## 상태 전이
//! ```text
//! draft ──submit──▶ review ──approve──▶ approved ──(외부)──▶ obsolete
//!   │                  │
//!   └──approve─────────┤
//!   └──reject──────────┴──reject──▶ rejected (종료 상태)
//! ```

use serde::{Deserialize, Serialize};

use super::user::UserSummary;

/// 버전의 승인 상태
///
/// DB에는 소문자 TEXT(`'draft'`, `'approved'` 등)로 저장됩니다.
/// `#[sqlx(rename_all = "lowercase")]`와 `#[serde(rename_all = "lowercase")]`로
/// DB 값과 JSON 값을 같은 표기로 맞춥니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VersionStatus {
    Draft,
    Review,
    Approved,
    Rejected,
    Obsolete,
}

impl VersionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionStatus::Draft => "draft",
            VersionStatus::Review => "review",
            VersionStatus::Approved => "approved",
            VersionStatus::Rejected => "rejected",
            VersionStatus::Obsolete => "obsolete",
        }
    }

    /// 쿼리 문자열의 `status=` 값을 파싱합니다. 알 수 없는 값이면 `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(VersionStatus::Draft),
            "review" => Some(VersionStatus::Review),
            "approved" => Some(VersionStatus::Approved),
            "rejected" => Some(VersionStatus::Rejected),
            "obsolete" => Some(VersionStatus::Obsolete),
            _ => None,
        }
    }

    /// 승인 가능한 상태인지. 이미 승인된 버전의 재승인은 허용합니다.
    pub fn can_approve(&self) -> bool {
        matches!(
            self,
            VersionStatus::Draft | VersionStatus::Review | VersionStatus::Approved
        )
    }

    /// 반려 가능한 상태인지. 승인된 버전은 현재 버전일 수 있으므로 반려할 수 없습니다.
    pub fn can_reject(&self) -> bool {
        matches!(self, VersionStatus::Draft | VersionStatus::Review)
    }

    pub fn can_submit(&self) -> bool {
        matches!(self, VersionStatus::Draft)
    }

    /// `can_*` 판정에 쓰이는 상태 목록 (SQL `IN (...)` 조건용)
    pub fn approvable() -> &'static [VersionStatus] {
        &[
            VersionStatus::Draft,
            VersionStatus::Review,
            VersionStatus::Approved,
        ]
    }

    pub fn rejectable() -> &'static [VersionStatus] {
        &[VersionStatus::Draft, VersionStatus::Review]
    }
}

impl std::fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `document_versions` 테이블의 한 행
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DocumentVersion {
    pub id: String,
    pub document_id: String,
    pub version_number: String,
    pub title: String,
    pub description: Option<String>,
    pub file_path: String,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub checksum: Option<String>,
    pub status: VersionStatus,
    pub submitted_by: Option<String>,
    pub submitted_at: Option<String>,
    pub approved_by: Option<String>,
    pub approved_at: Option<String>,
    pub approval_comment: Option<String>,
    pub rejected_by: Option<String>,
    pub rejected_at: Option<String>,
    pub rejection_reason: Option<String>,
    pub changes_description: Option<String>,
    pub is_current_version: bool,
    pub organization_id: String,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

/// 응답용 버전 뷰. 작성자/승인자/반려자/제출자를 사용자 요약 정보로 펼쳐서 보여줍니다.
///
/// `#[serde(flatten)]`으로 버전 필드는 최상위에 그대로 두고,
/// `*_user` 필드만 추가됩니다.
#[derive(Debug, Clone, Serialize)]
pub struct VersionView {
    #[serde(flatten)]
    pub version: DocumentVersion,
    pub created_by_user: Option<UserSummary>,
    pub submitted_by_user: Option<UserSummary>,
    pub approved_by_user: Option<UserSummary>,
    pub rejected_by_user: Option<UserSummary>,
}

/// 검증을 통과한 새 버전 데이터. 저장소(db)는 이 구조체만 받습니다.
#[derive(Debug, Clone)]
pub struct NewVersion {
    pub document_id: String,
    pub version_number: String,
    pub title: String,
    pub description: Option<String>,
    pub file_path: String,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub checksum: Option<String>,
    pub changes_description: Option<String>,
    pub created_by: String,
}

/// `POST /document-versions` 요청 본문
///
/// 필수 필드도 모두 `Option`으로 받습니다. 누락된 필드를 한 번에 모아
/// 어떤 필드가 빠졌는지 알려주는 검증 에러를 만들기 위해서입니다.
#[derive(Debug, Default, Deserialize)]
pub struct CreateVersionRequest {
    pub document_id: Option<String>,
    pub version_number: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub file_path: Option<String>,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub checksum: Option<String>,
    pub changes_description: Option<String>,
    pub organization_id: Option<String>,
    pub created_by: Option<String>,
}

/// `PATCH /document-versions/{id}/approve` 요청 본문
#[derive(Debug, Default, Deserialize)]
pub struct ApproveVersionRequest {
    pub organization_id: Option<String>,
    pub approved_by: Option<String>,
    pub comment: Option<String>,
}

/// `PATCH /document-versions/{id}/reject` 요청 본문
#[derive(Debug, Default, Deserialize)]
pub struct RejectVersionRequest {
    pub organization_id: Option<String>,
    pub rejected_by: Option<String>,
    pub reason: Option<String>,
}

/// `PATCH /document-versions/{id}/submit` 요청 본문
#[derive(Debug, Default, Deserialize)]
pub struct SubmitVersionRequest {
    pub organization_id: Option<String>,
    pub submitted_by: Option<String>,
}

/// 조회 API 공통 쿼리 문자열 (`?organization_id=...&status=...`)
#[derive(Debug, Default, Deserialize)]
pub struct VersionQuery {
    pub organization_id: Option<String>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approve_is_allowed_until_terminal() {
        assert!(VersionStatus::Draft.can_approve());
        assert!(VersionStatus::Review.can_approve());
        assert!(VersionStatus::Approved.can_approve());
        assert!(!VersionStatus::Rejected.can_approve());
        assert!(!VersionStatus::Obsolete.can_approve());
    }

    #[test]
    fn reject_only_before_approval() {
        assert!(VersionStatus::Draft.can_reject());
        assert!(VersionStatus::Review.can_reject());
        assert!(!VersionStatus::Approved.can_reject());
        assert!(!VersionStatus::Rejected.can_reject());
    }

    #[test]
    fn submit_only_from_draft() {
        assert!(VersionStatus::Draft.can_submit());
        assert!(!VersionStatus::Review.can_submit());
        assert!(!VersionStatus::Approved.can_submit());
    }

    #[test]
    fn state_lists_agree_with_predicates() {
        for status in VersionStatus::approvable() {
            assert!(status.can_approve());
        }
        for status in VersionStatus::rejectable() {
            assert!(status.can_reject());
        }
    }

    #[test]
    fn parse_matches_serialized_form() {
        for status in [
            VersionStatus::Draft,
            VersionStatus::Review,
            VersionStatus::Approved,
            VersionStatus::Rejected,
            VersionStatus::Obsolete,
        ] {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, serde_json::json!(status.as_str()));
            assert_eq!(VersionStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(VersionStatus::parse("Approved"), None);
    }
}
