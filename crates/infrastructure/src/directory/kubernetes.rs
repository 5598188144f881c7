use async_trait::async_trait;
use endpoint_dns_application::ports::EndpointResolver;
use endpoint_dns_domain::{config::DirectoryConfig, DomainError};
use reqwest::StatusCode;
use serde::Deserialize;
use std::path::Path;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tracing::{debug, error, info, warn};

static EMPTY_ADDRESSES: LazyLock<Arc<Vec<String>>> = LazyLock::new(|| Arc::new(vec![]));

/// Wire model of a Kubernetes Endpoints object, reduced to the fields
/// this resolver reads. Ports and protocol metadata are not needed for
/// A-record answers and are left out.
#[derive(Debug, Deserialize)]
pub struct Endpoints {
    #[serde(default)]
    pub subsets: Option<Vec<EndpointSubset>>,
}

#[derive(Debug, Deserialize)]
pub struct EndpointSubset {
    #[serde(default)]
    pub addresses: Option<Vec<EndpointAddress>>,
}

#[derive(Debug, Deserialize)]
pub struct EndpointAddress {
    pub ip: String,
}

/// Flattens all address subsets of an Endpoints object into one list of
/// IP strings, preserving subset order.
pub fn flatten_subsets(endpoints: Endpoints) -> Vec<String> {
    endpoints
        .subsets
        .unwrap_or_default()
        .into_iter()
        .flat_map(|subset| subset.addresses.unwrap_or_default())
        .map(|address| address.ip)
        .collect()
}

/// Resolves endpoint names by reading the Endpoints object of the
/// configured namespace from the Kubernetes API server.
///
/// Failures never cross this boundary: a missing resource, an HTTP
/// error, or a transport fault all degrade to an empty address list,
/// logged here. The caller's cache TTL is the retry mechanism.
pub struct KubernetesEndpointResolver {
    client: reqwest::Client,
    api_server: String,
    namespace: String,
    token: Option<String>,
}

impl KubernetesEndpointResolver {
    pub fn new(config: &DirectoryConfig) -> Result<Self, DomainError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("endpoint-dns/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.lookup_timeout_secs));

        if Path::new(&config.ca_cert_path).exists() {
            let pem = std::fs::read(&config.ca_cert_path)
                .map_err(|e| DomainError::IoError(e.to_string()))?;
            let cert = reqwest::Certificate::from_pem(&pem)
                .map_err(|e| DomainError::ConfigError(e.to_string()))?;
            builder = builder.add_root_certificate(cert);
        }

        let client = builder
            .build()
            .map_err(|e| DomainError::ConfigError(e.to_string()))?;

        let token = match std::fs::read_to_string(&config.token_path) {
            Ok(token) => Some(token.trim().to_string()),
            Err(_) => {
                warn!(
                    path = %config.token_path,
                    "Service-account token not found, talking to the API server unauthenticated"
                );
                None
            }
        };

        info!(
            api_server = %config.api_server,
            namespace = %config.namespace,
            "Directory client initialized"
        );

        Ok(Self {
            client,
            api_server: config.api_server.trim_end_matches('/').to_string(),
            namespace: config.namespace.clone(),
            token,
        })
    }

    fn endpoints_url(&self, name: &str) -> String {
        format!(
            "{}/api/v1/namespaces/{}/endpoints/{}",
            self.api_server, self.namespace, name
        )
    }
}

#[async_trait]
impl EndpointResolver for KubernetesEndpointResolver {
    async fn resolve_endpoint(&self, name: &str) -> Result<Arc<Vec<String>>, DomainError> {
        let mut request = self.client.get(self.endpoints_url(name));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!(endpoint = %name, error = %e, "Endpoints lookup failed");
                return Ok(Arc::clone(&EMPTY_ADDRESSES));
            }
        };

        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!(endpoint = %name, "Endpoints resource does not exist");
                return Ok(Arc::clone(&EMPTY_ADDRESSES));
            }
            status if !status.is_success() => {
                error!(endpoint = %name, %status, "Endpoints lookup rejected by API server");
                return Ok(Arc::clone(&EMPTY_ADDRESSES));
            }
            _ => {}
        }

        match response.json::<Endpoints>().await {
            Ok(endpoints) => {
                let addresses = flatten_subsets(endpoints);
                debug!(endpoint = %name, count = addresses.len(), "Endpoints resolved");
                Ok(Arc::new(addresses))
            }
            Err(e) => {
                error!(endpoint = %name, error = %e, "Failed to decode Endpoints object");
                Ok(Arc::clone(&EMPTY_ADDRESSES))
            }
        }
    }
}
