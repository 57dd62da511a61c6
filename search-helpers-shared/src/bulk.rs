//! Bulk request and response types.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The kind of write carried by one bulk action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Index (create or replace) a document.
    #[default]
    Index,
    /// Create a document, failing if it already exists.
    Create,
    /// Partially update an existing document.
    Update,
    /// Delete a document.
    Delete,
}

impl OperationKind {
    /// The action name used as the metadata key in a bulk body.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Index => "index",
            OperationKind::Create => "create",
            OperationKind::Update => "update",
            OperationKind::Delete => "delete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata line of one bulk operation.
///
/// The target index and type default to the ones the bulk request is sent
/// against; set them here to override per operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkAction {
    /// The operation kind.
    pub kind: OperationKind,
    /// The document identifier.
    pub id: String,
    /// Optional index override.
    pub index: Option<String>,
    /// Optional mapping type override.
    pub doc_type: Option<String>,
}

impl BulkAction {
    /// Create an action of the given kind for a document id.
    pub fn new(kind: OperationKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            index: None,
            doc_type: None,
        }
    }

    /// Create an `index` action.
    pub fn index(id: impl Into<String>) -> Self {
        Self::new(OperationKind::Index, id)
    }

    /// Create a `create` action.
    pub fn create(id: impl Into<String>) -> Self {
        Self::new(OperationKind::Create, id)
    }

    /// Create an `update` action.
    pub fn update(id: impl Into<String>) -> Self {
        Self::new(OperationKind::Update, id)
    }

    /// Create a `delete` action.
    pub fn delete(id: impl Into<String>) -> Self {
        Self::new(OperationKind::Delete, id)
    }

    /// Override the target index for this action.
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Override the target type for this action.
    pub fn with_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    /// Render the metadata line, e.g. `{"update": {"_id": "a", "_index": "ix"}}`.
    pub fn to_metadata(&self) -> Value {
        let mut meta = Map::new();
        meta.insert("_id".to_string(), Value::String(self.id.clone()));
        if let Some(ref index) = self.index {
            meta.insert("_index".to_string(), Value::String(index.clone()));
        }
        if let Some(ref doc_type) = self.doc_type {
            meta.insert("_type".to_string(), Value::String(doc_type.clone()));
        }

        let mut line = Map::new();
        line.insert(self.kind.as_str().to_string(), Value::Object(meta));
        Value::Object(line)
    }
}

/// A bulk request as handed to a cluster client.
///
/// `operations` alternates metadata and body entries; the pairing is
/// positional, so the order must be preserved on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkRequest {
    /// Default target index.
    pub index: String,
    /// Default target type.
    pub doc_type: Option<String>,
    /// Flat metadata/body sequence.
    pub operations: Vec<Value>,
}

impl BulkRequest {
    /// Create a request against the given index and type.
    pub fn new(index: impl Into<String>, doc_type: Option<String>, operations: Vec<Value>) -> Self {
        Self {
            index: index.into(),
            doc_type,
            operations,
        }
    }

    /// Number of logical operations (metadata/body pairs).
    pub fn item_count(&self) -> usize {
        self.operations.len() / 2
    }
}

/// Response of a bulk call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkResponse {
    /// Time taken in milliseconds.
    #[serde(default)]
    pub took: u64,
    /// Whether any item failed. Absent or `null` means no.
    #[serde(default)]
    pub errors: Option<bool>,
    /// Per-item results, one single-key object per operation.
    #[serde(default)]
    pub items: Vec<Value>,
}

impl BulkResponse {
    /// A response reporting no errors.
    pub fn ok(items: Vec<Value>) -> Self {
        Self {
            took: 0,
            errors: Some(false),
            items,
        }
    }

    /// Check whether the cluster reported at least one failed item.
    pub fn has_errors(&self) -> bool {
        self.errors.unwrap_or(false)
    }

    /// Collect the failed items.
    pub fn failures(&self) -> Vec<BulkItemFailure> {
        self.items.iter().filter_map(BulkItemFailure::from_item).collect()
    }
}

/// One failed item of a bulk response.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkItemFailure {
    /// Operation name (`index`, `update`, ...).
    pub operation: String,
    /// Index the item targeted.
    pub index: Option<String>,
    /// Document id.
    pub id: Option<String>,
    /// HTTP status reported for the item.
    pub status: Option<u16>,
    /// Raw error object.
    pub error: Value,
}

impl BulkItemFailure {
    /// Extract a failure from a response item, if the item carries an error.
    pub fn from_item(item: &Value) -> Option<Self> {
        let (operation, result) = item.as_object()?.iter().next()?;
        let error = result.get("error")?;
        if error.is_null() {
            return None;
        }

        Some(Self {
            operation: operation.clone(),
            index: result.get("_index").and_then(Value::as_str).map(str::to_string),
            id: result.get("_id").and_then(Value::as_str).map(str::to_string),
            status: result
                .get("status")
                .and_then(Value::as_u64)
                .and_then(|s| u16::try_from(s).ok()),
            error: error.clone(),
        })
    }

    /// Human readable reason.
    pub fn reason(&self) -> String {
        match self.error.get("reason").and_then(Value::as_str) {
            Some(reason) => reason.to_string(),
            None => self.error.to_string(),
        }
    }
}

impl fmt::Display for BulkItemFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.operation,
            self.id.as_deref().unwrap_or("<no id>"),
            self.reason()
        )
    }
}
