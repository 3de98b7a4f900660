//! User-Agent header sent by the REST transport.

use std::sync::OnceLock;

/// Client name used in the User-Agent string.
const CLIENT_NAME: &str = "ifoodapp-rust";

/// Client version from Cargo.toml.
const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

static USER_AGENT: OnceLock<String> = OnceLock::new();

/// Returns the User-Agent string.
///
/// Format: `ifoodapp-rust/0.1.0 (rust/1.92; linux/x86_64)`
///
/// Computed once and cached.
pub fn user_agent() -> &'static str {
    USER_AGENT.get_or_init(|| {
        format!(
            "{}/{} ({}; {}/{})",
            CLIENT_NAME,
            CLIENT_VERSION,
            rust_version(),
            os_name(),
            std::env::consts::ARCH,
        )
    })
}

fn rust_version() -> &'static str {
    concat!("rust/", env!("CARGO_PKG_RUST_VERSION"))
}

fn os_name() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        os => os,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_format() {
        let ua = user_agent();
        assert!(ua.starts_with("ifoodapp-rust/"));
        assert!(ua.contains(CLIENT_VERSION));
        assert!(ua.contains("rust/"));
        assert!(ua.contains(std::env::consts::ARCH));
        assert!(ua.ends_with(')'));
    }

    #[test]
    fn test_user_agent_cached() {
        assert!(std::ptr::eq(user_agent(), user_agent()));
    }

    #[test]
    fn test_os_name() {
        assert!(!os_name().is_empty());
        assert_ne!(os_name(), "macos");
    }
}
