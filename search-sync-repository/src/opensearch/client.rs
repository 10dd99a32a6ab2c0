//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchHandler`
//! using the OpenSearch Rust client.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts, IndicesRefreshParts},
    params::Refresh,
    BulkParts, DeleteByQueryParts, DeleteParts, IndexParts, OpenSearch,
};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::errors::SearchError;
use crate::interfaces::SearchHandler;
use crate::opensearch::index_config::{get_index_settings, IndexConfig, IndexLayout};
use search_sync_shared::{
    location_document_id, Content, ContentDocument, ContentId, Location, LocationDocument,
    LocationId, VersionNo,
};

const CONTENT_DOC_TYPE: &str = "content";
const LOCATION_DOC_TYPE: &str = "location";

/// OpenSearch search handler.
///
/// Writes content and location documents into the indices chosen by its
/// [`IndexConfig`]. Commit mode maps to the `refresh` parameter of each write.
///
/// # Example
///
/// ```ignore
/// use search_sync_repository::opensearch::{IndexConfig, IndexLayout};
/// let config = IndexConfig::new("content", IndexLayout::Shared);
/// let handler = OpenSearchHandler::new("http://localhost:9200", config).await?;
///
/// handler.ensure_indices().await?;
/// handler.set_commit(true);
/// handler.index_content(&content).await?;
/// ```
pub struct OpenSearchHandler {
    client: OpenSearch,
    index_config: IndexConfig,
    commit: AtomicBool,
    known_indices: Mutex<HashSet<String>>,
}

impl OpenSearchHandler {
    /// Create a new OpenSearch handler connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `index_config` - Index prefix and layout
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchHandler)` - A new handler instance
    /// * `Err(SearchError)` - If connection setup fails
    pub async fn new(url: &str, index_config: IndexConfig) -> Result<Self, SearchError> {
        let parsed_url = Url::parse(url).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            prefix = %index_config.prefix,
            layout = ?index_config.layout,
            "Created OpenSearch handler"
        );

        Ok(Self {
            client,
            index_config,
            commit: AtomicBool::new(false),
            known_indices: Mutex::new(HashSet::new()),
        })
    }

    /// The index configuration in use.
    pub fn index_config(&self) -> &IndexConfig {
        &self.index_config
    }

    /// Check if the cluster is reachable and not red.
    pub async fn health_check(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        if !response.status_code().is_success() {
            return Ok(false);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = body["status"].as_str().unwrap_or("red");
        debug!(status = %status, "Cluster health");
        Ok(status != "red")
    }

    /// Create every index whose name is known up front, if missing.
    pub async fn ensure_indices(&self) -> Result<(), SearchError> {
        for index in self.index_config.fixed_indices() {
            self.ensure_index(&index).await?;
        }
        Ok(())
    }

    async fn ensure_index(&self, index: &str) -> Result<(), SearchError> {
        let mut known = self.known_indices.lock().await;
        if known.contains(index) {
            return Ok(());
        }

        let exists = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        if exists.status_code().as_u16() == 404 {
            let response = self
                .client
                .indices()
                .create(IndicesCreateParts::Index(index))
                .body(get_index_settings())
                .send()
                .await
                .map_err(|e| SearchError::index_creation(e.to_string()))?;

            let status = response.status_code();
            if !status.is_success() {
                let error_body = response.text().await.unwrap_or_default();
                // Another writer may have created it in the meantime.
                if !error_body.contains("resource_already_exists_exception") {
                    error!(index = %index, status = %status, body = %error_body, "Index creation failed");
                    return Err(SearchError::index_creation(format!(
                        "Creating {} failed with status {}: {}",
                        index, status, error_body
                    )));
                }
            } else {
                info!(index = %index, "Created search index");
            }
        }

        known.insert(index.to_string());
        Ok(())
    }

    fn refresh(&self) -> Refresh {
        if self.commit.load(Ordering::SeqCst) {
            Refresh::True
        } else {
            Refresh::False
        }
    }

    fn content_body(content: &Content) -> Result<(String, Value), SearchError> {
        let document = ContentDocument::from_content(content);
        let id = document.document_id();
        Ok((id, with_doc_type(&document, CONTENT_DOC_TYPE)?))
    }

    fn location_body(location: &Location) -> Result<(String, Value), SearchError> {
        let document = LocationDocument::from_location(location);
        let id = document.document_id();
        Ok((id, with_doc_type(&document, LOCATION_DOC_TYPE)?))
    }

    async fn index_one(&self, index: &str, id: &str, body: Value) -> Result<(), SearchError> {
        self.ensure_index(index).await?;

        let response = self
            .client
            .index(IndexParts::IndexId(index, id))
            .body(body)
            .refresh(self.refresh())
            .send()
            .await
            .map_err(|e| SearchError::index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index request failed");
            return Err(SearchError::index(format!(
                "Index of {} failed with status {}: {}",
                id, status, error_body
            )));
        }

        debug!(index = %index, doc_id = %id, "Document indexed");
        Ok(())
    }

    async fn delete_by_query(
        &self,
        targets: &[String],
        query: Value,
        to_error: fn(String) -> SearchError,
    ) -> Result<(), SearchError> {
        let targets: Vec<&str> = targets.iter().map(String::as_str).collect();
        let response = self
            .client
            .delete_by_query(DeleteByQueryParts::Index(&targets))
            .body(json!({ "query": query }))
            .allow_no_indices(true)
            .refresh(self.commit.load(Ordering::SeqCst))
            .send()
            .await
            .map_err(|e| to_error(e.to_string()))?;

        let status = response.status_code();
        // A missing index has nothing to delete.
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Delete by query failed");
            return Err(to_error(format!(
                "Delete by query on {} failed with status {}: {}",
                targets.join(","),
                status,
                error_body
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl SearchHandler for OpenSearchHandler {
    #[instrument(skip(self, content), fields(content_id = %content.id(), version_no = %content.version_no))]
    async fn index_content(&self, content: &Content) -> Result<(), SearchError> {
        let index = self
            .index_config
            .content_index(&content.info.main_language_code);
        let (id, body) = Self::content_body(content)?;

        if self.index_config.layout == IndexLayout::Dedicated {
            // The main language may have changed since the last write.
            self.delete_by_query(
                &[self.index_config.content_pattern()],
                stale_content_query(content.id(), &index),
                SearchError::DeleteError,
            )
            .await?;
        }

        self.index_one(&index, &id, body).await
    }

    #[instrument(skip(self, location), fields(location_id = %location.id))]
    async fn index_location(&self, location: &Location) -> Result<(), SearchError> {
        let index = self.index_config.location_index();
        let (id, body) = Self::location_body(location)?;
        self.index_one(&index, &id, body).await
    }

    async fn delete_content(
        &self,
        content_id: ContentId,
        version_no: Option<VersionNo>,
    ) -> Result<(), SearchError> {
        let mut filters = vec![
            json!({ "term": { "doc_type": CONTENT_DOC_TYPE } }),
            json!({ "term": { "content_id": content_id.get() } }),
        ];
        if let Some(version_no) = version_no {
            filters.push(json!({ "term": { "version_no": version_no.get() } }));
        }

        self.delete_by_query(
            &[self.index_config.content_pattern()],
            json!({ "bool": { "filter": filters } }),
            SearchError::DeleteError,
        )
        .await?;

        debug!(content_id = %content_id, "Content removed from index");
        Ok(())
    }

    async fn delete_location(
        &self,
        location_id: LocationId,
        content_id: ContentId,
    ) -> Result<(), SearchError> {
        let index = self.index_config.location_index();
        let doc_id = location_document_id(location_id);

        let response = self
            .client
            .delete(DeleteParts::IndexId(&index, &doc_id))
            .refresh(self.refresh())
            .send()
            .await
            .map_err(|e| SearchError::delete(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable - document may not exist
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Delete request failed");
            return Err(SearchError::delete(format!(
                "Delete failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(doc_id = %doc_id, content_id = %content_id, "Location removed from index");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn purge_index(&self) -> Result<(), SearchError> {
        let targets = self.index_config.managed_indices();
        self.delete_by_query(&targets, json!({ "match_all": {} }), SearchError::PurgeError)
            .await?;

        warn!(indices = %targets.join(","), "Search index purged");
        Ok(())
    }

    fn set_commit(&self, commit: bool) {
        self.commit.store(commit, Ordering::SeqCst);
        debug!(commit = commit, "Commit mode changed");
    }

    async fn commit(&self) -> Result<(), SearchError> {
        let targets = self.index_config.managed_indices();
        let targets: Vec<&str> = targets.iter().map(String::as_str).collect();
        let response = self
            .client
            .indices()
            .refresh(IndicesRefreshParts::Index(&targets))
            .allow_no_indices(true)
            .send()
            .await
            .map_err(|e| SearchError::commit(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(SearchError::commit(format!(
                "Refresh failed with status {}: {}",
                status, error_body
            )));
        }
        Ok(())
    }

    #[instrument(skip(self, contents), fields(count = contents.len()))]
    async fn bulk_index_content(&self, contents: &[Content]) -> Result<(), SearchError> {
        if contents.is_empty() {
            debug!("Empty bulk request, nothing to send");
            return Ok(());
        }

        let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(contents.len() * 2);
        let mut indices = HashSet::new();

        for content in contents {
            let index = self
                .index_config
                .content_index(&content.info.main_language_code);
            let (id, document) = Self::content_body(content)?;
            body.push(json!({ "index": { "_index": index, "_id": id } }).into());
            body.push(document.into());
            indices.insert(index);
        }

        for index in &indices {
            self.ensure_index(index).await?;
        }

        let response = self
            .client
            .bulk(BulkParts::None)
            .body(body)
            .refresh(self.refresh())
            .send()
            .await
            .map_err(|e| SearchError::bulk_index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchError::bulk_index(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        let result: Value = response
            .json()
            .await
            .map_err(|e| SearchError::bulk_index(e.to_string()))?;

        let failures = bulk_failures(&result);
        if !failures.is_empty() {
            error!(failed = failures.len(), "Bulk request had item failures");
            return Err(SearchError::bulk_index(format!(
                "{} of {} documents failed: {}",
                failures.len(),
                contents.len(),
                failures.join(", ")
            )));
        }

        info!(count = contents.len(), "Bulk indexed content");
        Ok(())
    }
}

/// Serialize a document and tag it with its type.
fn with_doc_type<T: Serialize>(document: &T, doc_type: &str) -> Result<Value, SearchError> {
    let mut value = serde_json::to_value(document)?;
    match value.as_object_mut() {
        Some(object) => {
            object.insert("doc_type".to_string(), json!(doc_type));
            Ok(value)
        }
        None => Err(SearchError::SerializationError(
            "document did not serialize to an object".to_string(),
        )),
    }
}

/// Query matching a content's documents in every index except `keep_index`.
fn stale_content_query(content_id: ContentId, keep_index: &str) -> Value {
    json!({
        "bool": {
            "filter": [
                { "term": { "doc_type": CONTENT_DOC_TYPE } },
                { "term": { "content_id": content_id.get() } }
            ],
            "must_not": [
                { "term": { "_index": keep_index } }
            ]
        }
    })
}

/// Ids and reasons of failed items in a `_bulk` response.
fn bulk_failures(response: &Value) -> Vec<String> {
    if !response["errors"].as_bool().unwrap_or(false) {
        return Vec::new();
    }

    response["items"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let action = &item["index"];
                    let error = action.get("error")?;
                    Some(format!(
                        "{} ({})",
                        action["_id"].as_str().unwrap_or("?"),
                        error["reason"].as_str().unwrap_or("unknown reason")
                    ))
                })
                .collect()
        })
        .unwrap_or_default()
}
