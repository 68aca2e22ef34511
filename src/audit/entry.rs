//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::diff::generate_diff;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Wallet,
    Spend,
    /// The day checkpoint written by a redistribution
    Checkpoint,
    Settings,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Wallet => write!(f, "Wallet"),
            EntityType::Spend => write!(f, "Spend"),
            EntityType::Checkpoint => write!(f, "Checkpoint"),
            EntityType::Settings => write!(f, "Settings"),
        }
    }
}

/// A single line of the audit log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    pub entity_id: String,

    /// Short human description, e.g. "3000.00 from 2025-01-01 to 2025-01-10"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// State before an update or delete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// State after a create or update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
            before: None,
            after: serde_json::to_value(entity).ok(),
            diff_summary: None,
        }
    }

    /// An update entry; the diff summary is derived from the two states
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Self {
        let before = serde_json::to_value(before).ok();
        let after = serde_json::to_value(after).ok();
        let diff_summary = match (&before, &after) {
            (Some(b), Some(a)) => generate_diff(b, a),
            _ => None,
        };

        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
            before,
            after,
            diff_summary,
        }
    }

    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
            before: serde_json::to_value(entity).ok(),
            after: None,
            diff_summary: None,
        }
    }

    /// Rendering used by `buckwheat config --audit`
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_names() {
        assert_eq!(Operation::Update.to_string(), "UPDATE");
        assert_eq!(EntityType::Checkpoint.to_string(), "Checkpoint");
        assert_eq!(
            serde_json::to_string(&EntityType::Spend).unwrap(),
            "\"spend\""
        );
    }

    #[test]
    fn test_create_and_delete_entries() {
        let spend = json!({"amount": "12.50", "recorded_at": "2025-01-02T09:00:00"});

        let created = AuditEntry::create(EntityType::Spend, "spd-1a2b3c4d", None, &spend);
        assert_eq!(created.operation, Operation::Create);
        assert!(created.before.is_none());
        assert_eq!(created.after, Some(spend.clone()));

        let deleted = AuditEntry::delete(EntityType::Spend, "spd-1a2b3c4d", None, &spend);
        assert_eq!(deleted.operation, Operation::Delete);
        assert_eq!(deleted.before, Some(spend));
        assert!(deleted.after.is_none());
    }

    #[test]
    fn test_update_derives_diff() {
        let before = json!({"redistribution_method": "ask", "locale": "en-us"});
        let after = json!({"redistribution_method": "rest", "locale": "en-us"});

        let entry = AuditEntry::update(EntityType::Settings, "settings", None, &before, &after);

        assert_eq!(
            entry.diff_summary.as_deref(),
            Some("redistribution_method: \"ask\" -> \"rest\"")
        );
        assert!(entry.format_human_readable().contains("Changes:"));
    }

    #[test]
    fn test_roundtrip_through_json() {
        let entry = AuditEntry::create(
            EntityType::Wallet,
            "wallet",
            Some("3000 over 10 days".into()),
            &json!({"total_budget": "3000"}),
        );

        let line = serde_json::to_string(&entry).unwrap();
        let back: AuditEntry = serde_json::from_str(&line).unwrap();

        assert_eq!(back.entity_type, EntityType::Wallet);
        assert_eq!(back.entity_name.as_deref(), Some("3000 over 10 days"));
    }
}
