//! # 요청 검증
//!
//! 요청 본문/쿼리 값을 검증해서 저장소가 받는 타입으로 바꿉니다.
//! DB에 접근하지 않는 순수 함수들입니다. 검증 실패는 모두 `AppError::Validation`.

use crate::error::AppError;
use crate::models::{parse_id, CreateVersionRequest, NewVersion, OrganizationId, VersionStatus};

/// 앞뒤 공백을 제거하고, 비어 있으면 `None`
fn text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 버전 생성 요청을 검증합니다.
///
/// 누락된 필수 필드를 모두 모아 한 번에 알려줍니다.
/// 예: `Missing required fields: title, file_size`
pub fn new_version(req: CreateVersionRequest) -> Result<(OrganizationId, NewVersion), AppError> {
    let document_id = text(req.document_id);
    let version_number = text(req.version_number);
    let title = text(req.title);
    let file_path = text(req.file_path);
    let file_name = text(req.file_name);
    let mime_type = text(req.mime_type);
    let organization_id = text(req.organization_id);
    let created_by = text(req.created_by);

    let required = [
        ("document_id", document_id.is_some()),
        ("version_number", version_number.is_some()),
        ("title", title.is_some()),
        ("file_path", file_path.is_some()),
        ("file_name", file_name.is_some()),
        ("file_size", req.file_size.is_some()),
        ("mime_type", mime_type.is_some()),
        ("organization_id", organization_id.is_some()),
        ("created_by", created_by.is_some()),
    ];
    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, present)| !present)
        .map(|(field, _)| *field)
        .collect();
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    // 위에서 모두 Some임을 확인했습니다.
    let (
        Some(document_id),
        Some(version_number),
        Some(title),
        Some(file_path),
        Some(file_name),
        Some(file_size),
        Some(mime_type),
        Some(created_by),
    ) = (
        document_id,
        version_number,
        title,
        file_path,
        file_name,
        req.file_size,
        mime_type,
        created_by,
    )
    else {
        return Err(AppError::Internal("Required field check failed".to_string()));
    };

    if file_size < 0 {
        return Err(AppError::Validation(
            "file_size must not be negative".to_string(),
        ));
    }

    let org = OrganizationId::from_input(organization_id.as_deref())?;
    let new = NewVersion {
        document_id: parse_id("document_id", &document_id)?,
        version_number,
        title,
        description: text(req.description),
        file_path,
        file_name,
        file_size,
        mime_type,
        checksum: text(req.checksum),
        changes_description: text(req.changes_description),
        created_by: parse_id("created_by", &created_by)?,
    };

    Ok((org, new))
}

/// 필수 사용자 ID 필드(`approved_by`, `rejected_by`, `submitted_by`)
pub fn actor(field: &str, value: Option<String>) -> Result<String, AppError> {
    let value =
        text(value).ok_or_else(|| AppError::Validation(format!("{} is required", field)))?;
    parse_id(field, &value)
}

/// 반려 사유. 공백만 있는 값도 비어 있는 것으로 봅니다.
pub fn reason(value: Option<String>) -> Result<String, AppError> {
    text(value).ok_or_else(|| AppError::Validation("reason is required".to_string()))
}

/// 선택 코멘트. 빈 문자열은 코멘트 없음으로 처리합니다.
pub fn comment(value: Option<String>) -> Option<String> {
    text(value)
}

/// `?status=` 필터. 알 수 없는 상태 값은 검증 에러입니다.
pub fn status_filter(value: Option<String>) -> Result<Option<VersionStatus>, AppError> {
    match text(value) {
        None => Ok(None),
        Some(raw) => VersionStatus::parse(&raw)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("Unknown status: {}", raw))),
    }
}
