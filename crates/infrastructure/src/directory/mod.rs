mod cached;
mod kubernetes;

pub use cached::CachedEndpointResolver;
pub use kubernetes::{flatten_subsets, Endpoints, KubernetesEndpointResolver};
