// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Configuration loading.

use std::path::Path;

use marksheet_core::AppConfig;
use marksheet_core::error::Result;
use tracing::{info, warn};

/// Load `path`, falling back to the defaults when no file is given or it
/// cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> AppConfig {
    let Some(path) = path else {
        return AppConfig::default();
    };
    match read_config(path) {
        Ok(config) => {
            info!(path = %path.display(), "Loaded configuration");
            config
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Using default configuration");
            AppConfig::default()
        }
    }
}

fn read_config(path: &Path) -> Result<AppConfig> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
