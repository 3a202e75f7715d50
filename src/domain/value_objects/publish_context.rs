//! Inbound publish notifications
//!
//! The publishing pipeline hands the dispatcher a [`PublishContext`]. Only a
//! context that carries a [`PublishPayload`] represents a completed publish;
//! anything else is ignored.

use std::fmt;

/// How the triggering publish was performed (informational only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublishMode {
    Full,
    #[default]
    Smart,
    Incremental,
    SingleItem,
}

impl fmt::Display for PublishMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PublishMode::Full => "full",
            PublishMode::Smart => "smart",
            PublishMode::Incremental => "incremental",
            PublishMode::SingleItem => "single-item",
        };
        f.write_str(name)
    }
}

/// Options of a completed publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishPayload {
    /// Resolved name of the database the publish wrote to
    pub target_database: String,
    pub source_database: Option<String>,
    pub mode: PublishMode,
    pub language: Option<String>,
}

impl PublishPayload {
    pub fn new(target_database: impl Into<String>) -> Self {
        Self {
            target_database: target_database.into(),
            source_database: None,
            mode: PublishMode::default(),
            language: None,
        }
    }

    pub fn with_source_database(mut self, database: impl Into<String>) -> Self {
        self.source_database = Some(database.into());
        self
    }

    pub fn with_mode(mut self, mode: PublishMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Notification raised when a publish operation ends
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PublishContext {
    publisher: Option<PublishPayload>,
}

impl PublishContext {
    /// A notification for a completed publish
    pub fn completed(payload: PublishPayload) -> Self {
        Self {
            publisher: Some(payload),
        }
    }

    /// A notification without publish payload
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn publisher(&self) -> Option<&PublishPayload> {
        self.publisher.as_ref()
    }

    /// Extract the per-run context, or `None` when this is not a publish
    pub fn run_context(&self) -> Option<RunContext> {
        self.publisher
            .as_ref()
            .map(|payload| RunContext::new(payload.target_database.clone()))
    }
}

/// Ephemeral per-dispatch record used for task filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub target_database: String,
}

impl RunContext {
    pub fn new(target_database: impl Into<String>) -> Self {
        Self {
            target_database: target_database.into(),
        }
    }
}
