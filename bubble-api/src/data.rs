//! Data API operations: search with pagination, create, modify, replace,
//! and delete for a data type.

use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use bubble_core::constants::PAGE_SIZE;
use bubble_core::error::BubbleResult;

use crate::client::DataApiClient;
use crate::query::{Constraint, DataQuery, SortOption};
use crate::response::{DataEnvelope, RecordPage};

impl DataApiClient {
    /// Fetch every record of a data type, in provider order.
    pub async fn fetch_all(&self, object: &str) -> BubbleResult<Vec<Value>> {
        self.fetch_query(object, &DataQuery::new()).await
    }

    /// Fetch every record matching the given constraints, optionally
    /// sorted server-side.
    pub async fn fetch_all_filtered(
        &self,
        object: &str,
        constraints: &[Constraint],
        sort: Option<&SortOption>,
    ) -> BubbleResult<Vec<Value>> {
        let query = DataQuery {
            constraints: constraints.to_vec(),
            sort: sort.cloned(),
        };
        self.fetch_query(object, &query).await
    }

    /// Fetch every record matching a prebuilt query, draining all pages.
    ///
    /// The first request probes the result size. When more records remain,
    /// the full range is walked by cursor in steps of [`PAGE_SIZE`], each
    /// page appended to the accumulator so the final sequence equals the
    /// provider's record set for the query, in provider order.
    pub async fn fetch_query(&self, object: &str, query: &DataQuery) -> BubbleResult<Vec<Value>> {
        let first = self.fetch_page(object, query, None).await?;
        if first.is_last() {
            return Ok(first.results);
        }

        let total = first.total();
        let pages = total.div_ceil(PAGE_SIZE);
        debug!("paginating {object}: {total} records, walking cursors 0..={}", pages * PAGE_SIZE);

        let mut records: Vec<Value> = Vec::with_capacity(total as usize);
        for index in 0..=pages {
            let page = self.fetch_page(object, query, Some(index * PAGE_SIZE)).await?;
            records.extend(page.results);
        }
        Ok(records)
    }

    /// Fetch a single page at the given cursor offset.
    ///
    /// `None` issues the probe request with the cursor left implicit.
    pub async fn fetch_page(
        &self,
        object: &str,
        query: &DataQuery,
        cursor: Option<u64>,
    ) -> BubbleResult<RecordPage> {
        let url = self.obj_url(object, query, cursor)?;
        let response = self.send(Method::GET, url, None).await?;
        let envelope: DataEnvelope = Self::decode(response).await?;
        Ok(envelope.response)
    }

    /// Create a record (POST). Returns the provider response unmodified.
    pub async fn create(&self, object: &str, body: &Value) -> BubbleResult<Value> {
        self.write(Method::POST, object, body).await
    }

    /// Modify records (PATCH). Returns the provider response unmodified.
    pub async fn update(&self, object: &str, body: &Value) -> BubbleResult<Value> {
        self.write(Method::PATCH, object, body).await
    }

    /// Replace records (PUT). Returns the provider response unmodified.
    pub async fn replace(&self, object: &str, body: &Value) -> BubbleResult<Value> {
        self.write(Method::PUT, object, body).await
    }

    /// Delete a data type's records (DELETE). Single request, never
    /// paginates; returns the provider response unmodified.
    pub async fn remove(&self, object: &str) -> BubbleResult<Value> {
        let url = self.obj_url(object, &DataQuery::new(), None)?;
        let response = self.send(Method::DELETE, url, None).await?;
        Self::passthrough(response).await
    }

    async fn write(&self, method: Method, object: &str, body: &Value) -> BubbleResult<Value> {
        let url = self.obj_url(object, &DataQuery::new(), None)?;
        let response = self.send(method, url, Some(body)).await?;
        Self::passthrough(response).await
    }
}
