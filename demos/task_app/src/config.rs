//! Dotted-key configuration backed by environment variables.
//!
//! Property names use the conventional dotted form (`app.http.port`) and
//! map to upper-snake environment variables (`APP_HTTP_PORT`).

use std::env;

#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigProvider;

impl ConfigProvider {
    pub fn new() -> Self {
        Self
    }

    /// Look up a dotted property name in the environment.
    #[must_use]
    pub fn get_config_property(&self, name: &str) -> Option<String> {
        let var = name.replace('.', "_").to_uppercase();
        env::var(var).ok()
    }

    /// Like [`get_config_property`](Self::get_config_property) with a
    /// fallback value.
    #[must_use]
    pub fn get_config_property_or(&self, name: &str, default: &str) -> String {
        self.get_config_property(name)
            .unwrap_or_else(|| default.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_name_maps_to_env_var() {
        // Safe to set process-wide: the variable name is test-specific.
        env::set_var("APP_TEST_SETTING", "forty-two");
        let config = ConfigProvider::new();
        assert_eq!(
            config.get_config_property("app.test.setting").as_deref(),
            Some("forty-two")
        );
        assert_eq!(config.get_config_property("app.test.missing"), None);
        assert_eq!(
            config.get_config_property_or("app.test.missing", "fallback"),
            "fallback"
        );
    }
}
