use crate::app_config::{AnalysisBackendKind, AppConfig, Environment, SearchBackendKind};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("CAREFIND_ENV", "development"))?;

    let bind_addr = or_default("CAREFIND_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("CAREFIND_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("CAREFIND_LOG_LEVEL", "info");

    let search_backend = parse_search_backend(&or_default("CAREFIND_SEARCH_BACKEND", "mock"))?;
    let analysis_backend =
        parse_analysis_backend(&or_default("CAREFIND_ANALYSIS_BACKEND", "mock"))?;

    let gemini_api_key = lookup("GEMINI_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    let gemini_model = or_default("CAREFIND_GEMINI_MODEL", "gemini-2.5-flash");
    let gemini_base_url = or_default(
        "CAREFIND_GEMINI_BASE_URL",
        "https://generativelanguage.googleapis.com",
    );

    let nominatim_base_url = or_default(
        "CAREFIND_NOMINATIM_BASE_URL",
        "https://nominatim.openstreetmap.org",
    );
    let nominatim_limit = parse_u32("CAREFIND_NOMINATIM_LIMIT", "6")?;
    if nominatim_limit == 0 || nominatim_limit > 50 {
        return Err(invalid(
            "CAREFIND_NOMINATIM_LIMIT",
            format!("{nominatim_limit} is outside 1..=50"),
        ));
    }

    let user_agent = or_default("CAREFIND_USER_AGENT", "carefind/0.1 (healthcare-finder)");
    if user_agent.trim().is_empty() {
        return Err(invalid(
            "CAREFIND_USER_AGENT",
            "public geocoding services require a client identifier".to_string(),
        ));
    }

    let request_timeout_secs = parse_u64("CAREFIND_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "CAREFIND_REQUEST_TIMEOUT_SECS",
            "timeout must be at least one second".to_string(),
        ));
    }

    let fallback_location = or_default("CAREFIND_FALLBACK_LOCATION", "Ranchi");
    let max_image_bytes = parse_usize("CAREFIND_MAX_IMAGE_BYTES", "10485760")?;
    let mock_latency_ms = parse_u64("CAREFIND_MOCK_LATENCY_MS", "0")?;
    let directory_path = lookup("CAREFIND_DIRECTORY_PATH").ok().map(PathBuf::from);

    let config = AppConfig {
        env,
        bind_addr,
        log_level,
        search_backend,
        analysis_backend,
        gemini_api_key,
        gemini_model,
        gemini_base_url,
        nominatim_base_url,
        nominatim_limit,
        user_agent,
        request_timeout_secs,
        fallback_location,
        max_image_bytes,
        mock_latency_ms,
        directory_path,
    };

    // Fail at startup rather than on the first analysis request.
    if config.needs_gemini() && config.gemini_api_key.is_none() {
        return Err(ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()));
    }

    Ok(config)
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CAREFIND_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_search_backend(s: &str) -> Result<SearchBackendKind, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "mock" => Ok(SearchBackendKind::Mock),
        "nominatim" | "osm" => Ok(SearchBackendKind::Nominatim),
        "gemini" => Ok(SearchBackendKind::Gemini),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CAREFIND_SEARCH_BACKEND".to_string(),
            reason: format!("expected mock, nominatim or gemini, got '{other}'"),
        }),
    }
}

fn parse_analysis_backend(s: &str) -> Result<AnalysisBackendKind, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "mock" => Ok(AnalysisBackendKind::Mock),
        "gemini" => Ok(AnalysisBackendKind::Gemini),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CAREFIND_ANALYSIS_BACKEND".to_string(),
            reason: format!("expected mock or gemini, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
