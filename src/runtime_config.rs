//! Environment-based runtime configuration.
//!
//! The hosting server runs handlers on `may` coroutines; their stack size
//! is the one runtime knob this crate exposes. Set `REXROUTER_STACK_SIZE`
//! in decimal (`32768`) or hex (`0x8000`) before startup. Default is 16 KB.

use std::env;

const DEFAULT_STACK_SIZE: usize = 0x4000;

/// Runtime configuration loaded once at startup.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeConfig {
    /// Coroutine stack size in bytes.
    pub stack_size: usize,
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let stack_size = env::var("REXROUTER_STACK_SIZE")
            .ok()
            .and_then(|v| parse_stack_size(&v))
            .unwrap_or(DEFAULT_STACK_SIZE);
        RuntimeConfig { stack_size }
    }

    /// Apply the configuration to the `may` runtime.
    pub fn apply(&self) {
        may::config().set_stack_size(self.stack_size);
    }
}

fn parse_stack_size(value: &str) -> Option<usize> {
    if let Some(hex) = value.strip_prefix("0x") {
        usize::from_str_radix(hex, 16).ok()
    } else {
        value.parse().ok()
    }
}
