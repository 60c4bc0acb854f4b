/*
 * Copyright (c) 2024 Yunshan Networks
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::common::{DEFAULT_EXPORT_BUFFER_SIZE, DEFAULT_FLOW_TABLE_CAPACITY};

const DEFAULT_EXPORT_FILE: &str = "/var/lib/netflow/flows.csv";
const DEFAULT_LOG_RETENTION: u32 = 7;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("runtime config invalid: {0}")]
    RuntimeConfigInvalid(String),
    #[error("yaml config invalid: {0}")]
    YamlConfigInvalid(String),
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    // bucket count, fixed for the lifetime of the table
    pub flow_table_capacity: usize,
    pub export_file: String,
    pub export_buffer_size: usize,
    #[serde(with = "LevelDef")]
    pub log_level: log::Level,
    pub log_file: String,
    pub log_retention: u32,
}

impl Config {
    pub fn load_from_file<T: AsRef<Path>>(path: T) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::YamlConfigInvalid(e.to_string()))?;
        Self::load(&contents)
    }

    pub fn load<C: AsRef<str>>(contents: C) -> Result<Self, ConfigError> {
        let contents = contents.as_ref();
        if contents.trim().is_empty() {
            // parsing empty string leads to EOF error
            return Ok(Self::default());
        }
        let cfg: Self = serde_yaml::from_str(contents)
            .map_err(|e| ConfigError::YamlConfigInvalid(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.flow_table_capacity == 0 {
            return Err(ConfigError::RuntimeConfigInvalid(
                "flow-table-capacity must be greater than 0".to_owned(),
            ));
        }
        if self.export_buffer_size == 0 {
            return Err(ConfigError::RuntimeConfigInvalid(
                "export-buffer-size must be greater than 0".to_owned(),
            ));
        }
        if self.export_file.is_empty() {
            return Err(ConfigError::RuntimeConfigInvalid(
                "export-file is empty".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flow_table_capacity: DEFAULT_FLOW_TABLE_CAPACITY,
            export_file: DEFAULT_EXPORT_FILE.to_owned(),
            export_buffer_size: DEFAULT_EXPORT_BUFFER_SIZE,
            log_level: log::Level::Info,
            log_file: String::new(),
            log_retention: DEFAULT_LOG_RETENTION,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub level: log::Level,
    // empty for stderr only
    pub file: String,
    pub retention: u32,
}

impl From<&Config> for LogConfig {
    fn from(c: &Config) -> Self {
        Self {
            level: c.log_level,
            file: c.log_file.clone(),
            retention: c.log_retention,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(remote = "log::Level", rename_all = "kebab-case")]
enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}
