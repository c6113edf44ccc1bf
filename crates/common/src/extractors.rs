//! Request extractors and the list envelope shared by both domains

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use validator::Validate;

use crate::Error;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 100;

/// `offset`/`limit` as they arrive on a list query string.
///
/// Both are optional; out-of-range values are clamped rather than rejected.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl Pagination {
    /// Rows to skip, never negative
    pub fn offset(&self) -> i64 {
        self.offset.map_or(0, |o| o.max(0))
    }

    /// Page size within `1..=100`, 50 when absent
    pub fn limit(&self) -> i64 {
        self.limit.map_or(DEFAULT_PAGE_SIZE, |l| l.clamp(1, MAX_PAGE_SIZE))
    }
}

/// One page of a list result with the effective paging values
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, pagination: &Pagination) -> Self {
        Self {
            items,
            total,
            offset: pagination.offset(),
            limit: pagination.limit(),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        let Page {
            items,
            total,
            offset,
            limit,
        } = self;
        Page {
            items: items.into_iter().map(f).collect(),
            total,
            offset,
            limit,
        }
    }
}

/// `Json<T>` followed by `T::validate()`.
///
/// Malformed bodies and failed field rules both reject with
/// [`Error::Validation`], so every input problem surfaces as a 400.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                Error::Validation(format!("Invalid request body: {}", rejection.body_text()))
            })?;

        value
            .validate()
            .map_err(|errors| Error::Validation(format!("Invalid request: {errors}")))?;

        Ok(Self(value))
    }
}
