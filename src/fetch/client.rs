use async_trait::async_trait;
use reqwest::{Request, Response};
use std::sync::Arc;

/// Transport used for every status API request.
///
/// Kept as a trait so that callers can wrap the client (extra headers,
/// instrumentation) without touching the fetch logic.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}

#[async_trait]
impl<C: HttpClient + ?Sized> HttpClient for Arc<C> {
    async fn execute(&self, req: Request) -> reqwest::Result<Response> {
        (**self).execute(req).await
    }
}
