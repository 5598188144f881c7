use endpoint_dns_application::{ports::EndpointResolver, use_cases::HandleQuestionUseCase};
use endpoint_dns_domain::Config;
use endpoint_dns_infrastructure::directory::{CachedEndpointResolver, KubernetesEndpointResolver};
use endpoint_dns_infrastructure::dns::DnsMessageHandler;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct DnsServices {
    pub handler: Arc<DnsMessageHandler>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let directory = Arc::new(KubernetesEndpointResolver::new(&config.directory)?);

        let cached = Arc::new(CachedEndpointResolver::new(
            directory as Arc<dyn EndpointResolver>,
            Duration::from_secs(config.cache.ttl_secs),
            config.cache.max_entries,
            Duration::from_secs(config.directory.lookup_timeout_secs),
        ));

        let use_case = Arc::new(HandleQuestionUseCase::new(
            cached as Arc<dyn EndpointResolver>,
        ));
        let handler = Arc::new(DnsMessageHandler::new(use_case));

        info!(
            namespace = %config.directory.namespace,
            cache_ttl_secs = config.cache.ttl_secs,
            cache_max_entries = config.cache.max_entries,
            "DNS services initialized"
        );

        Ok(Self { handler })
    }
}
