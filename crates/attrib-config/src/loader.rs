// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./attrib.toml` > `~/.config/attrib/attrib.toml` > `/etc/attrib/attrib.toml`
//! with environment variable overrides via `ATTRIB_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::AttribConfig;

/// Config sections reachable from `ATTRIB_<SECTION>_<KEY>` variables.
const ENV_SECTIONS: &[&str] = &["pipeline", "storage", "scoring", "report"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/attrib/attrib.toml` (system-wide)
/// 3. `~/.config/attrib/attrib.toml` (user XDG config)
/// 4. `./attrib.toml` (local directory)
/// 5. `ATTRIB_*` environment variables
pub fn load_config() -> Result<AttribConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<AttribConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AttribConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<AttribConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AttribConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(AttribConfig::default()))
        .merge(Toml::file("/etc/attrib/attrib.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("attrib/attrib.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("attrib.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider with explicit section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `ATTRIB_SCORING_API_KEY` must map to `scoring.api_key`, not
/// `scoring.api.key`.
fn env_provider() -> Env {
    Env::prefixed("ATTRIB_").map(|key| {
        let key_str = key.as_str();
        for section in ENV_SECTIONS {
            if let Some(rest) = key_str
                .strip_prefix(section)
                .and_then(|r| r.strip_prefix('_'))
            {
                return format!("{section}.{rest}").into();
            }
        }
        key_str.to_string().into()
    })
}
