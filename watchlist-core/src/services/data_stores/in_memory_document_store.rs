use std::{
    cmp::Ordering,
    collections::HashMap,
    sync::atomic::{AtomicBool, AtomicU64, Ordering as AtomicOrdering},
};

use color_eyre::eyre::eyre;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::domain::{Document, DocumentId, DocumentStore, DocumentStoreError, Query};

type Collection = Vec<Document>;

/// Document store kept in process memory. Ids are assigned as `d1`, `d2`, ...
#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Collection>>,
    next_id: AtomicU64,
    offline: AtomicBool,
}

impl InMemoryDocumentStore {
    /// While offline every operation fails like an unreachable remote store.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, AtomicOrdering::SeqCst);
    }

    pub async fn document_count(&self, collection_id: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection_id)
            .map_or(0, Vec::len)
    }

    fn ensure_online(&self) -> Result<(), DocumentStoreError> {
        if self.offline.load(AtomicOrdering::SeqCst) {
            return Err(DocumentStoreError::Unavailable(eyre!(
                "in-memory document store is offline"
            )));
        }
        Ok(())
    }

    fn fresh_id(&self) -> String {
        format!("d{}", self.next_id.fetch_add(1, AtomicOrdering::SeqCst) + 1)
    }
}

#[async_trait::async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn list_documents(
        &self,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<Vec<Document>, DocumentStoreError> {
        self.ensure_online()?;

        let collections = self.collections.read().await;
        let mut documents: Vec<Document> = collections
            .get(collection_id)
            .map(|collection| {
                collection
                    .iter()
                    .filter(|document| matches_filters(document, queries))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        for query in queries {
            match query {
                Query::OrderAsc(attribute) => {
                    documents.sort_by(|a, b| compare_attribute(a, b, attribute))
                }
                Query::OrderDesc(attribute) => {
                    documents.sort_by(|a, b| compare_attribute(b, a, attribute))
                }
                _ => {}
            }
        }
        if let Some(limit) = queries.iter().find_map(|query| match query {
            Query::Limit(limit) => Some(*limit),
            _ => None,
        }) {
            documents.truncate(limit);
        }

        Ok(documents)
    }

    async fn create_document(
        &self,
        collection_id: &str,
        document_id: DocumentId,
        data: Map<String, Value>,
    ) -> Result<Document, DocumentStoreError> {
        self.ensure_online()?;

        let mut collections = self.collections.write().await;
        let collection = collections.entry(collection_id.to_string()).or_default();
        let id = match document_id {
            DocumentId::Unique => self.fresh_id(),
            DocumentId::Custom(id) => {
                if collection.iter().any(|document| document.id == id) {
                    return Err(DocumentStoreError::DocumentAlreadyExists);
                }
                id
            }
        };

        let document = Document { id, data };
        collection.push(document.clone());
        Ok(document)
    }

    async fn update_document(
        &self,
        collection_id: &str,
        document_id: &str,
        data: Map<String, Value>,
    ) -> Result<Document, DocumentStoreError> {
        self.ensure_online()?;

        let mut collections = self.collections.write().await;
        let document = collections
            .get_mut(collection_id)
            .and_then(|collection| collection.iter_mut().find(|doc| doc.id == document_id))
            .ok_or(DocumentStoreError::DocumentNotFound)?;

        // Partial update: only the given attributes change.
        document.data.extend(data);
        Ok(document.clone())
    }

    async fn delete_document(
        &self,
        collection_id: &str,
        document_id: &str,
    ) -> Result<(), DocumentStoreError> {
        self.ensure_online()?;

        let mut collections = self.collections.write().await;
        let collection = collections
            .get_mut(collection_id)
            .ok_or(DocumentStoreError::DocumentNotFound)?;
        let position = collection
            .iter()
            .position(|document| document.id == document_id)
            .ok_or(DocumentStoreError::DocumentNotFound)?;
        collection.remove(position);
        Ok(())
    }
}

fn matches_filters(document: &Document, queries: &[Query]) -> bool {
    queries.iter().all(|query| match query {
        Query::Equal(attribute, value) => document.data.get(attribute) == Some(value),
        _ => true,
    })
}

fn compare_attribute(a: &Document, b: &Document, attribute: &str) -> Ordering {
    match (a.data.get(attribute), b.data.get(attribute)) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}
