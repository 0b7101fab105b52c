//! REST client for the document store.
//!
//! Exposes exactly the collaborator primitives the product uses:
//! create-with-id, point lookup by id, filtered listing by equality
//! predicates (with optional ordering), field update, and delete. No
//! transactions, no batch writes.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use url::Url;

use crate::config::StoreConfig;

use super::error::{StoreError, StoreResult};
use super::value::{decode_fields, encode_fields, to_store_value};

/// Sort direction for listing queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending order.
    Ascending,
    /// Descending order.
    Descending,
}

impl Direction {
    /// Wire name of the direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ASCENDING",
            Self::Descending => "DESCENDING",
        }
    }
}

/// One document fetched from the store, with its id split off the path.
#[derive(Debug, Clone)]
pub struct Document {
    /// Document id (last path segment of the resource name).
    pub id: String,
    /// Decoded plain-JSON fields.
    pub data: Map<String, Value>,
}

/// Decode a fetched document into a record type, injecting the id field.
///
/// # Errors
/// Returns [`StoreError::Decode`] when the fields do not match the record.
pub fn decode_record<T: DeserializeOwned>(document: Document) -> StoreResult<T> {
    let mut data = document.data;
    data.insert("id".to_string(), Value::String(document.id));
    serde_json::from_value(Value::Object(data)).map_err(|e| StoreError::Decode(e.to_string()))
}

/// Encode a record into a plain-JSON field object, stripping the id (the id
/// is the document key, not a field).
///
/// # Errors
/// Returns [`StoreError::InvalidDocument`] when the record does not
/// serialize to an object.
pub fn encode_record<T: Serialize>(record: &T) -> StoreResult<Value> {
    let mut value = serde_json::to_value(record)?;
    match value.as_object_mut() {
        Some(map) => {
            map.remove("id");
        }
        None => {
            return Err(StoreError::InvalidDocument(
                "record did not serialize to an object".to_string(),
            ));
        }
    }
    Ok(value)
}

/// Build the request body for a filtered listing query.
///
/// Multiple filters are combined with AND; all predicates are equality.
#[must_use]
pub fn build_query_body(
    collection: &str,
    filters: &[(&str, Value)],
    order_by: Option<(&str, Direction)>,
) -> Value {
    let mut query = Map::new();
    query.insert(
        "from".to_string(),
        json!([{ "collectionId": collection }]),
    );

    let field_filter = |field: &str, value: &Value| {
        json!({
            "fieldFilter": {
                "field": { "fieldPath": field },
                "op": "EQUAL",
                "value": to_store_value(value)
            }
        })
    };

    match filters {
        [] => {}
        [(field, value)] => {
            query.insert("where".to_string(), field_filter(field, value));
        }
        many => {
            let parts: Vec<Value> = many.iter().map(|(f, v)| field_filter(f, v)).collect();
            query.insert(
                "where".to_string(),
                json!({
                    "compositeFilter": { "op": "AND", "filters": parts }
                }),
            );
        }
    }

    if let Some((field, direction)) = order_by {
        query.insert(
            "orderBy".to_string(),
            json!([{
                "field": { "fieldPath": field },
                "direction": direction.as_str()
            }]),
        );
    }

    json!({ "structuredQuery": query })
}

/// Parse one raw document resource into a [`Document`].
///
/// # Errors
/// Returns [`StoreError::Decode`] when the resource has no name or its
/// fields are malformed.
pub fn parse_document(raw: &Value) -> StoreResult<Document> {
    let name = raw
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Decode("document without a name".to_string()))?;
    let id = name
        .rsplit('/')
        .next()
        .unwrap_or(name)
        .to_string();

    let data = match raw.get("fields").and_then(Value::as_object) {
        Some(fields) => decode_fields(fields)?,
        None => Map::new(),
    };

    Ok(Document { id, data })
}

/// Client for the document-store REST surface.
#[derive(Clone)]
pub struct DocumentClient {
    client: reqwest::Client,
    config: StoreConfig,
}

impl DocumentClient {
    /// Build a client with the configured timeouts.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()?;

        Ok(Self { client, config })
    }

    /// Root of the documents resource tree.
    fn documents_root(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents",
            self.config.base_url.trim_end_matches('/'),
            self.config.project_id
        )
    }

    /// Append the web API key, when configured.
    fn apply_key(&self, url: &mut Url) {
        if let Some(key) = &self.config.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
    }

    /// URL of one document.
    fn document_url(&self, collection: &str, id: &str) -> StoreResult<Url> {
        let mut url = Url::parse(&format!("{}/{collection}/{id}", self.documents_root()))?;
        self.apply_key(&mut url);
        Ok(url)
    }

    /// Create a document under `collection` with the caller-chosen id.
    ///
    /// The store enforces create-by-id uniqueness; a second create for the
    /// same id fails with [`StoreError::AlreadyExists`].
    ///
    /// # Errors
    /// Returns an error on conflict, upstream failure, or bad payload.
    pub async fn create(
        &self,
        collection: &'static str,
        id: &str,
        data: &Value,
    ) -> StoreResult<Document> {
        let mut url = Url::parse(&format!("{}/{collection}", self.documents_root()))?;
        self.apply_key(&mut url);
        url.query_pairs_mut().append_pair("documentId", id);

        let fields = Self::require_object(data)?;
        let response = self
            .client
            .post(url)
            .json(&json!({ "fields": encode_fields(fields) }))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::CONFLICT {
            return Err(StoreError::AlreadyExists {
                collection,
                id: id.to_string(),
            });
        }

        let raw = Self::read_success(response).await?;
        parse_document(&raw)
    }

    /// Point lookup by id. Absent documents are `Ok(None)`, not errors.
    ///
    /// # Errors
    /// Returns an error on upstream failure or a malformed document.
    pub async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let url = self.document_url(collection, id)?;
        let response = self.client.get(url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let raw = Self::read_success(response).await?;
        parse_document(&raw).map(Some)
    }

    /// Update the named fields of an existing document.
    ///
    /// Only the keys present in `data` are touched (field-mask update).
    ///
    /// # Errors
    /// Returns an error on upstream failure or bad payload.
    pub async fn update(
        &self,
        collection: &str,
        id: &str,
        data: &Value,
    ) -> StoreResult<Document> {
        let mut url = self.document_url(collection, id)?;
        let fields = Self::require_object(data)?;
        {
            let mut params = url.query_pairs_mut();
            for key in fields.keys() {
                params.append_pair("updateMask.fieldPaths", key);
            }
        }

        let response = self
            .client
            .patch(url)
            .json(&json!({ "fields": encode_fields(fields) }))
            .send()
            .await?;

        let raw = Self::read_success(response).await?;
        parse_document(&raw)
    }

    /// Delete a document. Deleting an absent document is not an error.
    ///
    /// # Errors
    /// Returns an error on upstream failure.
    pub async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        let url = self.document_url(collection, id)?;
        let response = self.client.delete(url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }

        Self::read_success(response).await.map(|_| ())
    }

    /// Filtered listing by equality predicates, with optional ordering.
    ///
    /// # Errors
    /// Returns an error on upstream failure or malformed results.
    pub async fn list(
        &self,
        collection: &str,
        filters: &[(&str, Value)],
        order_by: Option<(&str, Direction)>,
    ) -> StoreResult<Vec<Document>> {
        let mut url = Url::parse(&format!("{}:runQuery", self.documents_root()))?;
        self.apply_key(&mut url);

        let body = build_query_body(collection, filters, order_by);
        let response = self.client.post(url).json(&body).send().await?;
        let raw = Self::read_success(response).await?;

        let entries = raw
            .as_array()
            .ok_or_else(|| StoreError::Decode("query result is not an array".to_string()))?;

        let mut documents = Vec::new();
        for entry in entries {
            // Entries without a document carry only a read time.
            if let Some(doc) = entry.get("document") {
                documents.push(parse_document(doc)?);
            }
        }

        tracing::debug!(
            collection,
            count = documents.len(),
            "document store listing"
        );
        Ok(documents)
    }

    /// Require a plain-JSON object payload.
    fn require_object(data: &Value) -> StoreResult<&Map<String, Value>> {
        data.as_object().ok_or_else(|| {
            StoreError::InvalidDocument("payload is not a JSON object".to_string())
        })
    }

    /// Turn a non-success response into [`StoreError::Upstream`].
    async fn read_success(response: reqwest::Response) -> StoreResult<Value> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Upstream {
                status: Some(status.as_u16()),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_single_filter() {
        let body = build_query_body("applications", &[("jobId", json!("job-1"))], None);
        assert_eq!(
            body.pointer("/structuredQuery/where/fieldFilter/field/fieldPath"),
            Some(&json!("jobId"))
        );
        assert_eq!(
            body.pointer("/structuredQuery/where/fieldFilter/value/stringValue"),
            Some(&json!("job-1"))
        );
        assert_eq!(
            body.pointer("/structuredQuery/from/0/collectionId"),
            Some(&json!("applications"))
        );
    }

    #[test]
    fn test_build_query_composite_filter() {
        let body = build_query_body(
            "applications",
            &[
                ("jobId", json!("job-1")),
                ("applicantId", json!("u-2")),
            ],
            None,
        );
        assert_eq!(
            body.pointer("/structuredQuery/where/compositeFilter/op"),
            Some(&json!("AND"))
        );
        assert_eq!(
            body.pointer(
                "/structuredQuery/where/compositeFilter/filters/1/fieldFilter/field/fieldPath"
            ),
            Some(&json!("applicantId"))
        );
    }

    #[test]
    fn test_build_query_order_by() {
        let body = build_query_body(
            "interviews",
            &[],
            Some(("scheduledAt", Direction::Descending)),
        );
        assert!(body.pointer("/structuredQuery/where").is_none());
        assert_eq!(
            body.pointer("/structuredQuery/orderBy/0/direction"),
            Some(&json!("DESCENDING"))
        );
    }

    #[test]
    fn test_parse_document_splits_id() {
        let raw = json!({
            "name": "projects/demo/databases/(default)/documents/jobs/job-42",
            "fields": { "title": { "stringValue": "Backend Engineer" } }
        });
        let document = parse_document(&raw).ok();
        assert_eq!(document.as_ref().map(|d| d.id.as_str()), Some("job-42"));
        assert_eq!(
            document.and_then(|d| d.data.get("title").cloned()),
            Some(json!("Backend Engineer"))
        );
    }

    #[test]
    fn test_encode_record_strips_id() {
        let record = json!({ "id": "abc", "title": "kept" });
        let encoded = encode_record(&record).ok();
        assert_eq!(encoded, Some(json!({ "title": "kept" })));
    }
}
