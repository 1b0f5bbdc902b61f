//! Project and feature lifecycle enums.
//!
//! Stored as TEXT in Postgres; `TryFrom<String>` lets `atelier-db` convert
//! rows with sqlx's `try_from` field attribute. Each enum also carries the
//! display name used in rendered activity descriptions.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a client project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Concept,
    InDesign,
    WaitingForContent,
    Development,
    Staging,
    Live,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Concept => "CONCEPT",
            ProjectStatus::InDesign => "IN_DESIGN",
            ProjectStatus::WaitingForContent => "WAITING_FOR_CONTENT",
            ProjectStatus::Development => "DEVELOPMENT",
            ProjectStatus::Staging => "STAGING",
            ProjectStatus::Live => "LIVE",
        }
    }

    /// Human-readable name, used when baking activity descriptions.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectStatus::Concept => "Concept",
            ProjectStatus::InDesign => "In Design",
            ProjectStatus::WaitingForContent => "Waiting for Content",
            ProjectStatus::Development => "Development",
            ProjectStatus::Staging => "Staging",
            ProjectStatus::Live => "Live",
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONCEPT" => Ok(ProjectStatus::Concept),
            "IN_DESIGN" => Ok(ProjectStatus::InDesign),
            "WAITING_FOR_CONTENT" => Ok(ProjectStatus::WaitingForContent),
            "DEVELOPMENT" => Ok(ProjectStatus::Development),
            "STAGING" => Ok(ProjectStatus::Staging),
            "LIVE" => Ok(ProjectStatus::Live),
            other => Err(format!("unknown project status: {other}")),
        }
    }
}

impl TryFrom<String> for ProjectStatus {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Delivery state of a single feature within a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureStatus {
    Todo,
    InProgress,
    Completed,
}

impl FeatureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureStatus::Todo => "TODO",
            FeatureStatus::InProgress => "IN_PROGRESS",
            FeatureStatus::Completed => "COMPLETED",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FeatureStatus::Todo => "To Do",
            FeatureStatus::InProgress => "In Progress",
            FeatureStatus::Completed => "Completed",
        }
    }
}

impl std::str::FromStr for FeatureStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TODO" => Ok(FeatureStatus::Todo),
            "IN_PROGRESS" => Ok(FeatureStatus::InProgress),
            "COMPLETED" => Ok(FeatureStatus::Completed),
            other => Err(format!("unknown feature status: {other}")),
        }
    }
}

impl TryFrom<String> for FeatureStatus {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Planning priority of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeaturePriority {
    Low,
    Medium,
    High,
}

impl FeaturePriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeaturePriority::Low => "LOW",
            FeaturePriority::Medium => "MEDIUM",
            FeaturePriority::High => "HIGH",
        }
    }
}

impl std::str::FromStr for FeaturePriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(FeaturePriority::Low),
            "MEDIUM" => Ok(FeaturePriority::Medium),
            "HIGH" => Ok(FeaturePriority::High),
            other => Err(format!("unknown feature priority: {other}")),
        }
    }
}

impl TryFrom<String> for FeaturePriority {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Progress state of a task handed to the client (content delivery etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Open,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Open => "OPEN",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(TaskStatus::Open),
            "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "DONE" => Ok(TaskStatus::Done),
            other => Err(format!("unknown task status: {other}")),
        }
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
