use super::{ApiRequest, StatsApi};
use crate::error::IngestError;
use crate::mapper::records;
use serde_json::Value;

pub const DEFAULT_PAGE_SIZE: usize = 500;

/// Offset/limit walker over a list endpoint.
///
/// The offset advances by the records actually received, so a server that
/// caps the page below `limit` is still walked to the end. The walk ends on
/// an empty page, once a reported `total` is reached, or after the first
/// failed page.
#[derive(Debug, Clone)]
pub struct Paginator {
    request: ApiRequest,
    limit: usize,
    offset: usize,
    done: bool,
}

impl Paginator {
    #[must_use]
    pub fn new(request: ApiRequest, limit: usize) -> Self {
        Self {
            request,
            limit: limit.max(1),
            offset: 0,
            done: false,
        }
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// `None` once the listing is exhausted.
    pub async fn next_page(&mut self, api: &dyn StatsApi) -> Option<Result<Vec<Value>, IngestError>> {
        if self.done {
            return None;
        }
        let request = self
            .request
            .clone()
            .query("limit", self.limit)
            .query("offset", self.offset);

        let payload = match api.get_json(&request).await {
            Ok(payload) => payload,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };
        let page = match records(&payload, &self.request.path) {
            Ok(page) => page.to_vec(),
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };
        if page.is_empty() {
            self.done = true;
            return None;
        }

        self.offset += page.len();
        let total = payload
            .get("total")
            .and_then(Value::as_u64)
            .and_then(|t| usize::try_from(t).ok());
        if total.is_some_and(|t| self.offset >= t) {
            self.done = true;
        }
        Some(Ok(page))
    }
}
