use async_trait::async_trait;
use endpoint_dns_application::ports::EndpointResolver;
use endpoint_dns_domain::DomainError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

#[derive(Default)]
pub struct MockEndpointResolver {
    responses: RwLock<HashMap<String, Arc<Vec<String>>>>,
    error_responses: RwLock<HashMap<String, DomainError>>,
    call_count: AtomicUsize,
}

impl MockEndpointResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_response(&self, endpoint: &str, addresses: Vec<&str>) {
        self.responses.write().unwrap().insert(
            endpoint.to_string(),
            Arc::new(addresses.into_iter().map(String::from).collect()),
        );
    }

    pub fn set_response_error(&self, endpoint: &str, error: DomainError) {
        self.error_responses
            .write()
            .unwrap()
            .insert(endpoint.to_string(), error);
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EndpointResolver for MockEndpointResolver {
    async fn resolve_endpoint(&self, name: &str) -> Result<Arc<Vec<String>>, DomainError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(err) = self.error_responses.read().unwrap().get(name).cloned() {
            return Err(err);
        }

        Ok(self
            .responses
            .read()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_else(|| Arc::new(vec![])))
    }
}
