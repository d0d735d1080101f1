use crate::utils::error::Result;
use async_trait::async_trait;

/// Performs the HTTP GET for the executor and hands back the raw body bytes.
///
/// Implementations surface connection and status failures as errors; the
/// body itself is returned untouched so the executor can decide whether it
/// is a readable carrier reply.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Vec<u8>>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        (**self).get(url).await
    }
}
