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

use flexi_logger::{
    colored_opt_format, Age, Cleanup, Criterion, Duplicate, FileSpec, FlexiLoggerError, Logger,
    LoggerHandle, Naming,
};

use crate::config::LogConfig;

fn writable_dir(base_path: &Path) -> bool {
    if base_path.exists() {
        base_path
            .metadata()
            .ok()
            .map(|meta| !meta.permissions().readonly())
            .unwrap_or(false)
    } else {
        fs::create_dir_all(base_path).is_ok()
    }
}

/// Starts the global logger. `RUST_LOG` overrides the configured level.
///
/// The returned handle must be kept alive for as long as logs should be written.
pub fn init(config: &LogConfig) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::try_with_env_or_str(config.level.as_str().to_lowercase())?
        .format(colored_opt_format);
    if config.file.is_empty() {
        return logger.log_to_stderr().start();
    }

    let base_path = Path::new(&config.file)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    if !writable_dir(base_path) {
        eprintln!(
            "Log file path '{}' access denied, logs will not be written to file",
            &config.file
        );
        return logger.log_to_stderr().start();
    }

    logger
        .log_to_file(FileSpec::try_from(&config.file)?)
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(config.retention as usize),
        )
        .append()
        .duplicate_to_stderr(Duplicate::Warn)
        .start()
}
