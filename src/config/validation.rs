use crate::error::AppError;
use std::path::Path;

use super::Config;

/// Validates the configuration settings
///
/// # Validation Rules
/// - An empty API domain is allowed and selects the file-backed source
/// - A non-empty API domain must be a valid URL or domain name
/// - HTTP timeout and cache capacity must be non-zero
/// - If log file path is provided, it cannot be empty
/// - Log file path parent directory must exist or be creatable
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    validate_api_domain(&config.api_domain)?;

    if config.http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be at least one second",
        ));
    }

    if config.cache.capacity == 0 {
        return Err(AppError::config_error("Cache capacity cannot be zero"));
    }

    if let Some(log_path) = &config.log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

fn validate_api_domain(api_domain: &str) -> Result<(), AppError> {
    if api_domain.is_empty()
        || api_domain.starts_with("http://")
        || api_domain.starts_with("https://")
    {
        return Ok(());
    }

    // Without a protocol it should at least look like a domain
    if !api_domain.contains('.') && !api_domain.starts_with("localhost") {
        return Err(AppError::config_error(
            "API domain must be a valid URL or domain name",
        ));
    }
    Ok(())
}
