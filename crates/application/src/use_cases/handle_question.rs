use crate::ports::EndpointResolver;
use endpoint_dns_domain::{EndpointKey, Question, RecordType};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves one question of a query against the service directory.
///
/// Only A questions are resolved; every other type yields no addresses
/// and the caller falls through to NXDOMAIN if nothing else answers.
pub struct HandleQuestionUseCase {
    resolver: Arc<dyn EndpointResolver>,
}

impl HandleQuestionUseCase {
    pub fn new(resolver: Arc<dyn EndpointResolver>) -> Self {
        Self { resolver }
    }

    /// Returns the parsed IPv4 addresses backing the questioned name, in
    /// the order the directory returned them.
    pub async fn execute(&self, question: &Question) -> Vec<Ipv4Addr> {
        if question.record_type != RecordType::A {
            debug!(
                name = %question.name,
                record_type = %question.record_type,
                "Skipping non-A question"
            );
            return Vec::new();
        }

        let key = EndpointKey::from_query_name(&question.name);

        let addresses = match self.resolver.resolve_endpoint(key.as_str()).await {
            Ok(addresses) => addresses,
            Err(e) => {
                warn!(endpoint = %key, error = %e, "Endpoint resolution failed, answering empty");
                return Vec::new();
            }
        };

        addresses
            .iter()
            .filter_map(|address| match address.parse::<Ipv4Addr>() {
                Ok(ip) => Some(ip),
                Err(_) => {
                    warn!(endpoint = %key, address = %address, "Failed to parse address, skipping");
                    None
                }
            })
            .collect()
    }
}
