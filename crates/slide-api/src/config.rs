//! Service configuration, read from the environment.
//!
//! | variable        | default | meaning                                   |
//! |-----------------|---------|-------------------------------------------|
//! | `PORT`          | 8080    | TCP port to listen on (all interfaces)    |
//! | `SLIDE_STRICT`  | false   | reject unknown categories / negative input |
//! | `RUST_LOG`      | info    | tracing filter                            |

use slide_core::ScoringMode;

/// Request bodies above this size are refused.
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub mode: ScoringMode,
    pub body_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            mode: ScoringMode::Permissive,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);
        let strict = lookup("SLIDE_STRICT")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Self {
            port,
            mode: if strict { ScoringMode::Strict } else { ScoringMode::Permissive },
            ..defaults
        }
    }
}
