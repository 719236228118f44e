//! Trace-level settings.
//!
//! Plain configuration data consumed by hosts of the page writer: a
//! default verbosity plus per-category overrides. Nothing here affects
//! the rotation algorithm; the only coupling to the writer is
//! [`TraceSettings::courtesy_debug_enabled`], which hosts typically
//! feed into `setup` as the debug-mirroring capability flag.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Environment variable that forces verbose tracing when set non-empty.
pub const TRACE_ENV_VAR: &str = "PAGELOG_TRACE";

/// Trace verbosity levels, least to most verbose.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum TraceLevel {
    /// No trace output
    Off,
    /// Unrecoverable failures only
    Critical,
    /// Errors
    Error,
    /// Warnings
    Warning,
    /// Informational messages
    #[default]
    Info,
    /// Everything, including debug detail
    Verbose,
}

/// Trace configuration: a default level plus per-category overrides.
///
/// Category lookup is case-insensitive. The struct is a value object
/// with serde support so hosts can persist it alongside their other
/// settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceSettings {
    /// Level applied to categories without an override
    pub default_level: TraceLevel,

    /// Per-category overrides, keyed by lowercased category name
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    detail: HashMap<String, TraceLevel>,
}

impl Default for TraceSettings {
    fn default() -> Self {
        // Debug builds default to verbose, release builds to info.
        let default_level = if cfg!(debug_assertions) {
            TraceLevel::Verbose
        } else {
            TraceLevel::Info
        };
        TraceSettings {
            default_level,
            detail: HashMap::new(),
        }
    }
}

impl TraceSettings {
    /// Build settings from the defaults plus the environment.
    ///
    /// A non-empty [`TRACE_ENV_VAR`] forces the default level to
    /// [`TraceLevel::Verbose`].
    pub fn detect() -> Self {
        let mut settings = Self::default();
        if std::env::var(TRACE_ENV_VAR).is_ok_and(|v| !v.is_empty()) {
            settings.default_level = TraceLevel::Verbose;
        }
        settings
    }

    /// Set an override for one category.
    pub fn set_detail(&mut self, category: impl AsRef<str>, level: TraceLevel) {
        self.detail.insert(category.as_ref().to_lowercase(), level);
    }

    /// Resolve the effective level for `category`.
    pub fn level_for(&self, category: impl AsRef<str>) -> TraceLevel {
        self.detail
            .get(&category.as_ref().to_lowercase())
            .copied()
            .unwrap_or(self.default_level)
    }

    /// Whether writers configured from these settings should request
    /// courtesy debug mirroring of their output.
    pub fn courtesy_debug_enabled(&self) -> bool {
        self.default_level >= TraceLevel::Verbose
    }
}
