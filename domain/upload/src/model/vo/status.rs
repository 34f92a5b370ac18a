use serde::{Deserialize, Serialize};

/// Processing status of a remote item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemStatus {
    /// Accepted, processing not started yet.
    Pending,
    /// Server-side processing is running.
    Processing,
    /// Processing finished, the item is usable.
    Completed,
    /// Processing failed with the server supplied message.
    Failed(String),
    /// A status the service reported that is not known here.
    Unrecognized(String),
}

impl ItemStatus {
    /// Map a raw status string from the service.
    pub fn parse(status: &str, message: Option<String>) -> Self {
        match status.trim().to_ascii_lowercase().as_str() {
            "pending" | "partial" => Self::Pending,
            "processing" => Self::Processing,
            "completed" => Self::Completed,
            "failed" => Self::Failed(message.unwrap_or_default()),
            _ => Self::Unrecognized(status.to_owned()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed(_))
    }
}

/// Readiness of an item while polling its status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReadinessState {
    #[default]
    Waiting,
    Ready,
    Failed(String),
}

impl ReadinessState {
    /// Apply one observed status.
    ///
    /// Terminal states absorb every later status.
    pub fn advance(self, status: &ItemStatus) -> Self {
        match self {
            Self::Waiting => match status {
                ItemStatus::Completed => Self::Ready,
                ItemStatus::Failed(message) => Self::Failed(message.to_owned()),
                ItemStatus::Pending | ItemStatus::Processing | ItemStatus::Unrecognized(_) => {
                    Self::Waiting
                }
            },
            terminal => terminal,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Waiting)
    }
}
