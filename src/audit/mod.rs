//! Audit logging
//!
//! Every change to the wallet, the spend log, the day checkpoint or the
//! settings is appended to `audit.log` as one JSON object per line, with the
//! state before and after the change.
//!
//! ```rust,ignore
//! use buckwheat_cli::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(EntityType::Spend, spend.id.to_string(), None, &spend))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
