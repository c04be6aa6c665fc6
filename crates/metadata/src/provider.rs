use crate::MetadataError;

/// An upstream catalog service reachable by path.
///
/// `path` is relative to the API root (e.g. `/movie/550/similar`); `query`
/// pairs are forwarded verbatim. The decoded JSON body is returned untouched.
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<serde_json::Value, MetadataError>;
}
