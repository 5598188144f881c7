use serde::{Deserialize, Serialize};

/// Where the service directory lives and how to authenticate against it.
///
/// Defaults target an in-cluster deployment: the API server service DNS
/// name and the mounted service-account credentials.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DirectoryConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default = "default_api_server")]
    pub api_server: String,

    /// Bearer token file; skipped if the file does not exist (e.g. when
    /// talking to an unauthenticated `kubectl proxy`).
    #[serde(default = "default_token_path")]
    pub token_path: String,

    /// CA bundle for the API server certificate; skipped if absent.
    #[serde(default = "default_ca_cert_path")]
    pub ca_cert_path: String,

    /// Upper bound on a single Endpoints lookup. The cache TTL is the
    /// retry mechanism, so this stays well below it.
    #[serde(default = "default_lookup_timeout_secs")]
    pub lookup_timeout_secs: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            api_server: default_api_server(),
            token_path: default_token_path(),
            ca_cert_path: default_ca_cert_path(),
            lookup_timeout_secs: default_lookup_timeout_secs(),
        }
    }
}

fn default_namespace() -> String {
    "default".to_string()
}

fn default_api_server() -> String {
    "https://kubernetes.default.svc".to_string()
}

fn default_token_path() -> String {
    "/var/run/secrets/kubernetes.io/serviceaccount/token".to_string()
}

fn default_ca_cert_path() -> String {
    "/var/run/secrets/kubernetes.io/serviceaccount/ca.crt".to_string()
}

fn default_lookup_timeout_secs() -> u64 {
    5
}
