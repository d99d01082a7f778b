use crate::utils::error::{Result, SkillError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 技能識別碼格式：amzn1.ask.skill.<uuid> 或舊版 amzn1.echo-sdk-ams.app.<id>
pub fn validate_app_id(field_name: &str, app_id: &str) -> Result<()> {
    validate_non_empty_string(field_name, app_id)?;

    if !app_id.starts_with("amzn1.") {
        return Err(SkillError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: app_id.to_string(),
            reason: "Application id must start with 'amzn1.'".to_string(),
        });
    }

    if !app_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_')
    {
        return Err(SkillError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: app_id.to_string(),
            reason: "Application id can only contain letters, digits, dots, hyphens and underscores"
                .to_string(),
        });
    }

    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SkillError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SkillError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SkillError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_contains(field_name: &str, value: &str, needle: &str) -> Result<()> {
    if !value.contains(needle) {
        return Err(SkillError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must contain the '{}' placeholder", needle),
        });
    }
    Ok(())
}
