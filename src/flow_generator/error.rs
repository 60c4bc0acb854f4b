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

use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("flow table capacity must be greater than 0")]
    ZeroCapacity,
    #[error("flow table allocation failed: {0}")]
    AllocFailed(#[from] TryReserveError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// The destination keeps its previous content for every variant
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export buffer allocation failed: {0}")]
    AllocFailed(#[from] TryReserveError),
    #[error("flow table snapshot failed: {0}")]
    Snapshot(#[from] Error),
    #[error("export io failed: {0}")]
    Io(#[from] io::Error),
    #[error("export rename failed: {0}")]
    Persist(#[from] tempfile::PersistError),
}
