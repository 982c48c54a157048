use color_eyre::eyre::{eyre, Report};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::{
    domain::{Document, DocumentId, DocumentStore, DocumentStoreError, Query},
    utils::StoreSettings,
};

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const KEY_HEADER: &str = "X-Appwrite-Key";
// Asks the server to generate the document id.
const UNIQUE_ID: &str = "unique()";

/// Document store backed by the Appwrite databases REST API.
pub struct AppwriteDocumentStore {
    http_client: Client,
    endpoint: String,
    project_id: String,
    api_key: Option<Secret<String>>,
    database_id: String,
}

impl AppwriteDocumentStore {
    pub fn new(http_client: Client, settings: &StoreSettings) -> Self {
        Self {
            http_client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            project_id: settings.project_id.clone(),
            api_key: settings.api_key.clone(),
            database_id: settings.database_id.clone(),
        }
    }

    fn documents_url(&self, collection_id: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.database_id, collection_id
        )
    }

    fn document_url(&self, collection_id: &str, document_id: &str) -> String {
        format!("{}/{}", self.documents_url(collection_id), document_id)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(PROJECT_HEADER, &self.project_id);
        match &self.api_key {
            Some(key) => request.header(KEY_HEADER, key.expose_secret()),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, DocumentStoreError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| DocumentStoreError::Unavailable(e.into()))?;

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(DocumentStoreError::DocumentNotFound),
            StatusCode::CONFLICT => Err(DocumentStoreError::DocumentAlreadyExists),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(DocumentStoreError::UnexpectedError(eyre!(
                    "document store answered {}: {}",
                    status,
                    body
                )))
            }
        }
    }

    async fn read_document(response: Response) -> Result<Document, DocumentStoreError> {
        let body: Value = response
            .json()
            .await
            .map_err(|e| DocumentStoreError::UnexpectedError(e.into()))?;
        parse_document(body)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDocumentBody {
    document_id: String,
    data: Map<String, Value>,
}

#[derive(Serialize)]
struct UpdateDocumentBody {
    data: Map<String, Value>,
}

#[async_trait::async_trait]
impl DocumentStore for AppwriteDocumentStore {
    #[tracing::instrument(name = "List documents", skip_all, fields(collection_id = %collection_id))]
    async fn list_documents(
        &self,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<Vec<Document>, DocumentStoreError> {
        let params: Vec<(&str, String)> = queries
            .iter()
            .map(|query| ("queries[]", encode_query(query)))
            .collect();
        let request = self
            .http_client
            .get(self.documents_url(collection_id))
            .query(&params);

        let body: Value = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| DocumentStoreError::UnexpectedError(e.into()))?;

        match body.get("documents") {
            Some(Value::Array(documents)) => documents.iter().cloned().map(parse_document).collect(),
            _ => Err(DocumentStoreError::UnexpectedError(eyre!(
                "document list response has no documents array"
            ))),
        }
    }

    #[tracing::instrument(name = "Create document", skip_all, fields(collection_id = %collection_id))]
    async fn create_document(
        &self,
        collection_id: &str,
        document_id: DocumentId,
        data: Map<String, Value>,
    ) -> Result<Document, DocumentStoreError> {
        let body = CreateDocumentBody {
            document_id: match document_id {
                DocumentId::Unique => UNIQUE_ID.to_string(),
                DocumentId::Custom(id) => id,
            },
            data,
        };
        let request = self
            .http_client
            .post(self.documents_url(collection_id))
            .json(&body);

        Self::read_document(self.send(request).await?).await
    }

    #[tracing::instrument(name = "Update document", skip_all, fields(collection_id = %collection_id))]
    async fn update_document(
        &self,
        collection_id: &str,
        document_id: &str,
        data: Map<String, Value>,
    ) -> Result<Document, DocumentStoreError> {
        let request = self
            .http_client
            .patch(self.document_url(collection_id, document_id))
            .json(&UpdateDocumentBody { data });

        Self::read_document(self.send(request).await?).await
    }

    #[tracing::instrument(name = "Delete document", skip_all, fields(collection_id = %collection_id))]
    async fn delete_document(
        &self,
        collection_id: &str,
        document_id: &str,
    ) -> Result<(), DocumentStoreError> {
        let request = self
            .http_client
            .delete(self.document_url(collection_id, document_id));

        self.send(request).await?;
        Ok(())
    }
}

fn encode_query(query: &Query) -> String {
    let encoded = match query {
        Query::Equal(attribute, value) => {
            json!({ "method": "equal", "attribute": attribute, "values": [value] })
        }
        Query::OrderAsc(attribute) => json!({ "method": "orderAsc", "attribute": attribute }),
        Query::OrderDesc(attribute) => json!({ "method": "orderDesc", "attribute": attribute }),
        Query::Limit(limit) => json!({ "method": "limit", "values": [limit] }),
    };
    encoded.to_string()
}

// System attributes are `$`-prefixed; everything else is user data.
fn parse_document(value: Value) -> Result<Document, DocumentStoreError> {
    let Value::Object(mut fields) = value else {
        return Err(malformed("document is not an object"));
    };
    let id = match fields.remove("$id") {
        Some(Value::String(id)) => id,
        _ => return Err(malformed("document has no $id")),
    };
    fields.retain(|key, _| !key.starts_with('$'));

    Ok(Document { id, data: fields })
}

fn malformed(reason: &str) -> DocumentStoreError {
    DocumentStoreError::UnexpectedError(Report::msg(reason.to_string()))
}
