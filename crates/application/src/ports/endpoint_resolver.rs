use async_trait::async_trait;
use endpoint_dns_domain::DomainError;
use std::sync::Arc;

/// The single operation the service directory exposes: the current list
/// of address strings backing a named resource.
///
/// An empty list is a valid outcome and means "no backing addresses
/// right now". The concrete directory adapter degrades its own failures
/// to an empty list; the `Err` arm exists for decorators and other
/// implementations, and the caching layer turns it into a cached empty
/// result rather than propagating it.
#[async_trait]
pub trait EndpointResolver: Send + Sync {
    async fn resolve_endpoint(&self, name: &str) -> Result<Arc<Vec<String>>, DomainError>;
}
