//! Shared types for the API layer.

use std::sync::Arc;

use rusqlite::Connection;
use uuid::Uuid;

use crate::config::Config;
use crate::db::{self, DatabaseError};
use crate::diagnosis::{ConditionTable, DiagnosisResolver, ReferenceError};
use crate::inference::InferenceApi;
use crate::models::Sex;

/// Shared context for all API routes and middleware: configuration,
/// the immutable condition table, the inference client, and the
/// resolver built over both.
#[derive(Clone)]
pub struct ApiContext {
    pub config: Arc<Config>,
    pub conditions: Arc<ConditionTable>,
    pub inference: Arc<dyn InferenceApi>,
    pub resolver: Arc<DiagnosisResolver>,
}

impl ApiContext {
    pub fn new(
        config: Arc<Config>,
        inference: Arc<dyn InferenceApi>,
    ) -> Result<Self, ReferenceError> {
        let conditions = Arc::new(ConditionTable::bundled()?);
        let resolver = Arc::new(DiagnosisResolver::new(
            Arc::clone(&inference),
            Arc::clone(&conditions),
        ));
        Ok(Self {
            config,
            conditions,
            inference,
            resolver,
        })
    }

    /// Open a database connection for this request.
    pub fn open_db(&self) -> Result<Connection, DatabaseError> {
        db::open_database(&self.config.db_path)
    }
}

/// Authenticated user identity, injected into request extensions by
/// the auth middleware after successful credential validation.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user_id: Uuid,
    pub name: String,
    pub age: i64,
    pub sex: Sex,
}
