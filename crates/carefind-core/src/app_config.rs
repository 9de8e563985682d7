use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which backing answers doctor/clinic searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBackendKind {
    Mock,
    Nominatim,
    Gemini,
}

impl std::fmt::Display for SearchBackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchBackendKind::Mock => write!(f, "mock"),
            SearchBackendKind::Nominatim => write!(f, "nominatim"),
            SearchBackendKind::Gemini => write!(f, "gemini"),
        }
    }
}

/// Which backing analyzes prescription images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisBackendKind {
    Mock,
    Gemini,
}

impl std::fmt::Display for AnalysisBackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisBackendKind::Mock => write!(f, "mock"),
            AnalysisBackendKind::Gemini => write!(f, "gemini"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub search_backend: SearchBackendKind,
    pub analysis_backend: AnalysisBackendKind,
    /// Present whenever either backend is [`SearchBackendKind::Gemini`] /
    /// [`AnalysisBackendKind::Gemini`]; checked at load time.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub nominatim_base_url: String,
    pub nominatim_limit: u32,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub fallback_location: String,
    pub max_image_bytes: usize,
    /// Simulated round trip for the mock backends; zero answers at once.
    pub mock_latency_ms: u64,
    pub directory_path: Option<PathBuf>,
}

impl AppConfig {
    #[must_use]
    pub fn needs_gemini(&self) -> bool {
        self.search_backend == SearchBackendKind::Gemini
            || self.analysis_backend == AnalysisBackendKind::Gemini
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("search_backend", &self.search_backend)
            .field("analysis_backend", &self.analysis_backend)
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("nominatim_base_url", &self.nominatim_base_url)
            .field("nominatim_limit", &self.nominatim_limit)
            .field("user_agent", &self.user_agent)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("fallback_location", &self.fallback_location)
            .field("max_image_bytes", &self.max_image_bytes)
            .field("mock_latency_ms", &self.mock_latency_ms)
            .field("directory_path", &self.directory_path)
            .finish()
    }
}
