pub mod appwrite_document_store;
pub mod in_memory_document_store;

pub use appwrite_document_store::AppwriteDocumentStore;
pub use in_memory_document_store::InMemoryDocumentStore;
