//! Storage layer for Buckwheat
//!
//! JSON files with atomic writes under the data directory, plus the audit
//! log every mutation goes through.

pub mod budget;
pub mod file_io;
pub mod init;
pub mod spends;

pub use budget::{BudgetData, BudgetRepository};
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use spends::SpendRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::BuckwheatPaths;
use crate::error::BuckwheatError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: BuckwheatPaths,
    pub budget: BudgetRepository,
    pub spends: SpendRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a Storage rooted at `paths`, creating directories as needed
    pub fn new(paths: BuckwheatPaths) -> Result<Self, BuckwheatError> {
        paths.ensure_directories()?;

        Ok(Self {
            budget: BudgetRepository::new(paths.budget_file()),
            spends: SpendRepository::new(paths.spends_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &BuckwheatPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_all(&mut self) -> Result<(), BuckwheatError> {
        self.budget.load()?;
        self.spends.load()?;
        Ok(())
    }

    pub fn save_all(&self) -> Result<(), BuckwheatError> {
        self.budget.save()?;
        self.spends.save()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), BuckwheatError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), BuckwheatError> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), BuckwheatError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}
