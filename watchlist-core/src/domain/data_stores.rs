use color_eyre::eyre::Report;
use serde_json::{Map, Value};
use thiserror::Error;

/// A schemaless record addressed by an opaque, store-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Map<String, Value>,
}

impl Document {
    pub fn get_str(&self, attribute: &str) -> Option<&str> {
        self.data.get(attribute).and_then(Value::as_str)
    }

    pub fn get_i64(&self, attribute: &str) -> Option<i64> {
        self.data.get(attribute).and_then(Value::as_i64)
    }
}

/// Id to create a document under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentId {
    /// Let the store pick a fresh id.
    Unique,
    /// Use exactly this id; creation fails if it is already taken.
    Custom(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Equal(String, Value),
    OrderAsc(String),
    OrderDesc(String),
    Limit(usize),
}

impl Query {
    pub fn equal(attribute: &str, value: impl Into<Value>) -> Self {
        Query::Equal(attribute.to_string(), value.into())
    }

    pub fn order_asc(attribute: &str) -> Self {
        Query::OrderAsc(attribute.to_string())
    }

    pub fn order_desc(attribute: &str) -> Self {
        Query::OrderDesc(attribute.to_string())
    }

    pub fn limit(limit: usize) -> Self {
        Query::Limit(limit)
    }
}

// The remote document database collaborator. Ordering of `list_documents` results is
// unspecified unless an order query is passed.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list_documents(
        &self,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<Vec<Document>, DocumentStoreError>;
    async fn create_document(
        &self,
        collection_id: &str,
        document_id: DocumentId,
        data: Map<String, Value>,
    ) -> Result<Document, DocumentStoreError>;
    async fn update_document(
        &self,
        collection_id: &str,
        document_id: &str,
        data: Map<String, Value>,
    ) -> Result<Document, DocumentStoreError>;
    async fn delete_document(
        &self,
        collection_id: &str,
        document_id: &str,
    ) -> Result<(), DocumentStoreError>;
}

#[derive(Debug, Error)]
pub enum DocumentStoreError {
    #[error("Document not found")]
    DocumentNotFound,
    #[error("Document already exists")]
    DocumentAlreadyExists,
    #[error("Document store unavailable")]
    Unavailable(#[source] Report),
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for DocumentStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::DocumentNotFound, Self::DocumentNotFound)
                | (Self::DocumentAlreadyExists, Self::DocumentAlreadyExists)
                | (Self::Unavailable(_), Self::Unavailable(_))
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}
