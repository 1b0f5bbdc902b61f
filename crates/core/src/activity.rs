//! Activity-record kinds and their rendered form.
//!
//! Every state-changing action on a project appends one immutable activity
//! record. The human-readable `description` is baked at write time (it
//! embeds the actor's name and the old/new values as they were), while
//! `metadata` carries the same facts structurally for export consumers.
//!
//! [`ActivityKind`] is a tagged union with a per-variant payload instead of
//! a free string plus an ad-hoc key/value bag: the tag and metadata shape
//! for each kind are fixed at the type level.

use serde_json::json;

use crate::status::{FeaturePriority, FeatureStatus, ProjectStatus};
use crate::types::DbId;

/// Maximum number of characters of comment content quoted in a description.
const COMMENT_PREVIEW_CHARS: usize = 50;

/// One recordable action on a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityKind {
    ProjectCreated {
        title: String,
    },
    TitleChanged {
        old: String,
        new: String,
    },
    StatusChanged {
        old: ProjectStatus,
        new: ProjectStatus,
    },
    TimelineUpdated,
    FeatureAdded {
        feature_id: DbId,
        title: String,
        priority: FeaturePriority,
    },
    FeatureUpdated {
        feature_id: DbId,
        feature_title: String,
        old_status: FeatureStatus,
        new_status: FeatureStatus,
    },
    FeatureDeleted {
        feature_id: DbId,
        title: String,
    },
    Comment {
        comment_id: DbId,
        preview: String,
    },
}

impl ActivityKind {
    /// Stable storage/wire tag for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            ActivityKind::ProjectCreated { .. } => "PROJECT_CREATED",
            ActivityKind::TitleChanged { .. } => "TITLE_CHANGED",
            ActivityKind::StatusChanged { .. } => "STATUS_CHANGED",
            ActivityKind::TimelineUpdated => "TIMELINE_UPDATED",
            ActivityKind::FeatureAdded { .. } => "FEATURE_ADDED",
            ActivityKind::FeatureUpdated { .. } => "FEATURE_UPDATED",
            ActivityKind::FeatureDeleted { .. } => "FEATURE_DELETED",
            ActivityKind::Comment { .. } => "COMMENT",
        }
    }

    /// Render the human-readable description, embedding the actor's name.
    ///
    /// This is the final text: it is stored as-is and never re-rendered at
    /// read time.
    pub fn describe(&self, actor_name: &str) -> String {
        match self {
            ActivityKind::ProjectCreated { title } => {
                format!("{actor_name} created the project \"{title}\"")
            }
            ActivityKind::TitleChanged { old, new } => {
                format!("{actor_name} changed the title from \"{old}\" to \"{new}\"")
            }
            ActivityKind::StatusChanged { new, .. } => {
                format!(
                    "{actor_name} changed the status to \"{}\"",
                    new.display_name()
                )
            }
            ActivityKind::TimelineUpdated => {
                format!("{actor_name} updated the timeline")
            }
            ActivityKind::FeatureAdded { title, .. } => {
                format!("{actor_name} added feature \"{title}\"")
            }
            ActivityKind::FeatureUpdated {
                feature_title,
                new_status,
                ..
            } => {
                if *new_status == FeatureStatus::Completed {
                    format!("{actor_name} completed feature \"{feature_title}\"")
                } else {
                    format!(
                        "{actor_name} changed the status of feature \"{feature_title}\" to {}",
                        new_status.display_name()
                    )
                }
            }
            ActivityKind::FeatureDeleted { title, .. } => {
                format!("{actor_name} removed feature \"{title}\"")
            }
            ActivityKind::Comment { preview, .. } => {
                format!("{actor_name} left a comment: \"{preview}\"")
            }
        }
    }

    /// Structured payload stored alongside the description.
    ///
    /// Title and status changes carry `oldValue`/`newValue` so exports can
    /// reconstruct the transition without parsing the description.
    pub fn metadata(&self) -> serde_json::Value {
        match self {
            ActivityKind::ProjectCreated { .. } | ActivityKind::TimelineUpdated => json!({}),
            ActivityKind::TitleChanged { old, new } => json!({
                "oldValue": old,
                "newValue": new,
            }),
            ActivityKind::StatusChanged { old, new } => json!({
                "oldValue": old.as_str(),
                "newValue": new.as_str(),
            }),
            ActivityKind::FeatureAdded {
                feature_id,
                priority,
                ..
            } => json!({
                "featureId": feature_id,
                "priority": priority.as_str(),
            }),
            ActivityKind::FeatureUpdated {
                feature_id,
                old_status,
                new_status,
                ..
            } => json!({
                "featureId": feature_id,
                "oldStatus": old_status.as_str(),
                "newStatus": new_status.as_str(),
            }),
            ActivityKind::FeatureDeleted { feature_id, title } => json!({
                "featureId": feature_id,
                "title": title,
            }),
            ActivityKind::Comment { comment_id, .. } => json!({
                "commentId": comment_id,
            }),
        }
    }
}

/// Truncate comment content for the activity description.
pub fn comment_preview(content: &str) -> String {
    if content.chars().count() > COMMENT_PREVIEW_CHARS {
        let truncated: String = content.chars().take(COMMENT_PREVIEW_CHARS).collect();
        format!("{truncated}...")
    } else {
        content.to_string()
    }
}

/// Read-side tag form: clients display the lowercase tag.
pub fn display_tag(tag: &str) -> String {
    tag.to_lowercase()
}

/// Read-side description shaping for multi-project feeds.
///
/// Prefixes the stored description with `[<project title>]` so admins can
/// tell projects apart, except for PROJECT_CREATED entries whose
/// description already names the project.
pub fn feed_description(tag: &str, description: &str, project_title: Option<&str>) -> String {
    match project_title {
        Some(title) if tag != "PROJECT_CREATED" => format!("[{title}] {description}"),
        _ => description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_change_carries_old_and_new_values() {
        let kind = ActivityKind::TitleChanged {
            old: "Old Site".into(),
            new: "New Site".into(),
        };

        assert_eq!(kind.tag(), "TITLE_CHANGED");
        assert_eq!(
            kind.describe("Alice"),
            "Alice changed the title from \"Old Site\" to \"New Site\""
        );
        let meta = kind.metadata();
        assert_eq!(meta["oldValue"], "Old Site");
        assert_eq!(meta["newValue"], "New Site");
    }

    #[test]
    fn test_status_change_uses_display_name_and_raw_metadata() {
        let kind = ActivityKind::StatusChanged {
            old: ProjectStatus::Concept,
            new: ProjectStatus::InDesign,
        };

        assert_eq!(kind.describe("Alice"), "Alice changed the status to \"In Design\"");
        let meta = kind.metadata();
        assert_eq!(meta["oldValue"], "CONCEPT");
        assert_eq!(meta["newValue"], "IN_DESIGN");
    }

    #[test]
    fn test_completed_feature_gets_special_wording() {
        let kind = ActivityKind::FeatureUpdated {
            feature_id: 3,
            feature_title: "Contact form".into(),
            old_status: FeatureStatus::InProgress,
            new_status: FeatureStatus::Completed,
        };
        assert_eq!(kind.describe("Bob"), "Bob completed feature \"Contact form\"");

        let kind = ActivityKind::FeatureUpdated {
            feature_id: 3,
            feature_title: "Contact form".into(),
            old_status: FeatureStatus::Todo,
            new_status: FeatureStatus::InProgress,
        };
        assert_eq!(
            kind.describe("Bob"),
            "Bob changed the status of feature \"Contact form\" to In Progress"
        );
    }

    #[test]
    fn test_comment_preview_truncates_long_content() {
        let short = comment_preview("looks good");
        assert_eq!(short, "looks good");

        let long_input = "x".repeat(80);
        let long = comment_preview(&long_input);
        assert_eq!(long.chars().count(), 53);
        assert!(long.ends_with("..."));
    }

    #[test]
    fn test_feed_description_prefixes_except_project_created() {
        let prefixed = feed_description("COMMENT", "Alice left a comment", Some("Webshop"));
        assert_eq!(prefixed, "[Webshop] Alice left a comment");

        let created = feed_description(
            "PROJECT_CREATED",
            "Alice created the project \"Webshop\"",
            Some("Webshop"),
        );
        assert_eq!(created, "Alice created the project \"Webshop\"");

        // Single-project views pass no title and get the raw description.
        let raw = feed_description("COMMENT", "Alice left a comment", None);
        assert_eq!(raw, "Alice left a comment");
    }

    #[test]
    fn test_display_tag_is_lowercase() {
        assert_eq!(display_tag("FEATURE_ADDED"), "feature_added");
    }
}
