//! Title and content validation.

use relay_core::config::NotificationConfig;
use relay_core::error::AppError;

const BYTES_PER_MB: usize = 1024 * 1024;

/// Limits applied to every authored or ingested notification.
#[derive(Debug, Clone)]
pub struct NotificationRules {
    max_title_chars: usize,
    max_content_bytes: usize,
    empty_content_sentinel: String,
}

impl NotificationRules {
    /// Build rules from configuration.
    pub fn new(config: &NotificationConfig) -> Self {
        Self {
            max_title_chars: config.max_title_chars,
            max_content_bytes: config.max_content_bytes,
            empty_content_sentinel: config.empty_content_sentinel.clone(),
        }
    }

    /// Validates a title and returns it trimmed.
    pub fn title(&self, title: &str) -> Result<String, AppError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::validation("Title is required"));
        }
        if title.chars().count() > self.max_title_chars {
            return Err(AppError::validation(format!(
                "Title must be {} characters or less",
                self.max_title_chars
            )));
        }
        Ok(title.to_string())
    }

    /// Validates content. The editor's empty-document marker counts as
    /// empty.
    pub fn content(&self, content: &str) -> Result<(), AppError> {
        if content.trim().is_empty() || content == self.empty_content_sentinel {
            return Err(AppError::validation("Content is required"));
        }
        if content.len() > self.max_content_bytes {
            return Err(AppError::validation(format!(
                "Content exceeds maximum size of {}MB",
                self.max_content_bytes / BYTES_PER_MB
            )));
        }
        Ok(())
    }
}

impl Default for NotificationRules {
    fn default() -> Self {
        Self::new(&NotificationConfig::default())
    }
}
