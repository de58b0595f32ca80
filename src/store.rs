//! In-process document store for the two financial-model documents.
//!
//! A simple key-value-by-type lookup: one opaque JSON document per
//! [`ModelType`], seeded from a static JSON file (an array with the PPA
//! document first, then the UPFRONT document). The metrics engine only
//! reads; `upsert_model` exists for the seeding path and is idempotent.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::EngineError;
use crate::model::ModelType;

/// A stored document together with its model-type key.
#[derive(Debug, Clone)]
pub struct ModelRecord {
    pub model_type: ModelType,
    pub data: Value,
}

/// Document store holding at most one document per model type.
#[derive(Debug, Default, Clone)]
pub struct ModelStore {
    documents: BTreeMap<ModelType, Value>,
}

impl ModelStore {
    /// Creates an empty (unseeded) store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the seed file: a JSON array of `[ppa, upfront]` raw documents.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DataIntegrity`] if the file cannot be read, is
    /// not valid JSON, or does not contain at least two documents.
    pub fn from_seed_file(path: &Path) -> Result<Self, EngineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            EngineError::integrity(format!("seed file \"{}\": {e}", path.display()))
        })?;
        Self::from_seed_json(&content)
    }

    /// Parses seed data from a JSON string. See [`ModelStore::from_seed_file`].
    pub fn from_seed_json(content: &str) -> Result<Self, EngineError> {
        let documents: Vec<Value> = serde_json::from_str(content)
            .map_err(|e| EngineError::integrity(format!("seed data: {e}")))?;
        let [ppa, upfront, ..] = documents.as_slice() else {
            return Err(EngineError::integrity(
                "seed data: expected [PPA, UPFRONT] documents",
            ));
        };

        let mut store = Self::new();
        store.upsert_model(ModelType::Ppa, ppa.clone());
        store.upsert_model(ModelType::Upfront, upfront.clone());
        Ok(store)
    }

    /// Creates or replaces the document for `model_type`.
    pub fn upsert_model(&mut self, model_type: ModelType, data: Value) {
        self.documents.insert(model_type, data);
    }

    /// All stored documents, ordered by model type ascending (PPA first).
    pub fn find_all_models(&self) -> Vec<ModelRecord> {
        self.documents
            .iter()
            .map(|(&model_type, data)| ModelRecord {
                model_type,
                data: data.clone(),
            })
            .collect()
    }

    /// The document for `model_type`, if present.
    pub fn get(&self, model_type: ModelType) -> Option<&Value> {
        self.documents.get(&model_type)
    }

    /// Whether both model documents are present.
    pub fn is_seeded(&self) -> bool {
        self.documents.len() == 2
    }
}
