//! Validation of user-supplied servers and monitor settings.

use anyhow::{Result, anyhow};
use url::Url;

const MAX_HOST_LEN: usize = 255;

/// Validate a server entered by the user and return it in stored form.
///
/// Accepts `host`, `host:port`, IP literals and `tnfs://host[:port]`.
pub fn normalize_server_host(input: &str) -> Result<String> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(anyhow!("Server cannot be empty"));
    }

    let host = if trimmed.contains("://") {
        host_from_url(trimmed)?
    } else {
        trimmed.to_string()
    };

    if host.len() > MAX_HOST_LEN {
        return Err(anyhow!("Server too long (max {MAX_HOST_LEN} characters)"));
    }

    if host.chars().any(char::is_whitespace) {
        return Err(anyhow!("Server cannot contain spaces"));
    }

    if host.starts_with('-') || host.ends_with('-') {
        return Err(anyhow!("Hostname cannot start or end with hyphen"));
    }

    if !host.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ':' | '[' | ']')) {
        return Err(anyhow!("Invalid server '{host}'. Use an IP address or hostname"));
    }

    if let Some((name, port)) = host.rsplit_once(':') {
        if !name.contains(':') || name.ends_with(']') {
            let port: u16 = port.parse().map_err(|_| anyhow!("Invalid port number"))?;
            validate_port(port)?;
        }
    }

    Ok(host)
}

fn host_from_url(target: &str) -> Result<String> {
    let url = Url::parse(target).map_err(|e| anyhow!("Invalid URL: {e}"))?;

    if url.scheme() != "tnfs" {
        return Err(anyhow!("Invalid scheme '{}'. Must be tnfs", url.scheme()));
    }

    let host = url.host_str().ok_or_else(|| anyhow!("URL must have a valid host"))?;

    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Validate port is in valid range
fn validate_port(port: u16) -> Result<()> {
    if port == 0 {
        return Err(anyhow!("Port 0 is not valid"));
    }
    Ok(())
}

/// Validate check interval
pub fn validate_check_interval(interval_seconds: u64) -> Result<()> {
    const MIN_INTERVAL: u64 = 10; // 10 seconds
    const MAX_INTERVAL: u64 = 86400; // 24 hours

    if interval_seconds < MIN_INTERVAL {
        return Err(anyhow!(
            "Check interval too short: {} seconds (minimum: {})",
            interval_seconds,
            MIN_INTERVAL
        ));
    }

    if interval_seconds > MAX_INTERVAL {
        return Err(anyhow!(
            "Check interval too long: {} seconds (maximum: {})",
            interval_seconds,
            MAX_INTERVAL
        ));
    }

    Ok(())
}

/// Validate a probe timeout is reasonable
pub fn validate_timeout_ms(timeout_ms: u64) -> Result<()> {
    const MIN_TIMEOUT: u64 = 100;
    const MAX_TIMEOUT: u64 = 300_000; // 5 minutes

    if timeout_ms < MIN_TIMEOUT {
        return Err(anyhow!("Timeout too short: {} ms (minimum: {})", timeout_ms, MIN_TIMEOUT));
    }

    if timeout_ms > MAX_TIMEOUT {
        return Err(anyhow!("Timeout too long: {} ms (maximum: {})", timeout_ms, MAX_TIMEOUT));
    }

    Ok(())
}
