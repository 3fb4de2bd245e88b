//! User-facing notices (alerts / toasts).

use serde::{Deserialize, Serialize};

use crate::error::TableError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

impl NoticeLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Error,
        }
    }

    /// Notice shown when an export attempt ends in `err`.
    pub fn for_export_failure(err: &TableError) -> Self {
        match err {
            TableError::NoVisibleRows => Self::info(err.to_string()),
            other => Self::error(format!("An error occurred during the export: {other}")),
        }
    }
}

/// Displays notices to the user.
pub trait Notifier {
    fn notify(&self, notice: &Notice);
}
