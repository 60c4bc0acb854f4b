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

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
#[cfg(unix)]
use std::{fs::Permissions, os::unix::fs::PermissionsExt};

use log::{debug, info};
use tempfile::NamedTempFile;

use super::{
    error::ExportError,
    flow_map::FlowMap,
    flow_node::{FlowRecord, CSV_RECORD_MAX_LEN},
};
use crate::common::DEFAULT_EXPORT_BUFFER_SIZE;
use crate::config::Config;
use public::counter::{Counter, CounterType, CounterValue, RefCountable};

#[derive(Debug, Default)]
pub struct ExporterCounter {
    exports: AtomicU64,
    failures: AtomicU64,
    records: AtomicU64,
    bytes: AtomicU64,
}

impl RefCountable for ExporterCounter {
    fn get_counters(&self) -> Vec<Counter> {
        vec![
            (
                "exports",
                CounterType::Counted,
                CounterValue::Unsigned(self.exports.swap(0, Ordering::Relaxed)),
            ),
            (
                "failures",
                CounterType::Counted,
                CounterValue::Unsigned(self.failures.swap(0, Ordering::Relaxed)),
            ),
            (
                "records",
                CounterType::Counted,
                CounterValue::Unsigned(self.records.swap(0, Ordering::Relaxed)),
            ),
            (
                "bytes",
                CounterType::Counted,
                CounterValue::Unsigned(self.bytes.swap(0, Ordering::Relaxed)),
            ),
        ]
    }
}

/// Serializes records as CSV lines without header.
///
/// The buffer starts at `initial_size` and doubles whenever less than one
/// record of free space is left, a failed allocation is returned instead of aborting.
pub fn serialize(records: &[FlowRecord], initial_size: usize) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(initial_size.max(CSV_RECORD_MAX_LEN))?;
    for record in records {
        if buf.capacity() - buf.len() <= CSV_RECORD_MAX_LEN {
            buf.try_reserve_exact(buf.capacity())?;
        }
        record.write_csv(&mut buf)?;
    }
    Ok(buf)
}

pub struct Exporter {
    path: PathBuf,
    buffer_size: usize,

    counter: ExporterCounter,
}

impl Exporter {
    pub fn new<P: AsRef<Path>>(path: P, buffer_size: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            buffer_size,
            counter: ExporterCounter::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn counter(&self) -> &ExporterCounter {
        &self.counter
    }

    /// Writes a snapshot of `flow_map` to the destination and returns the record count.
    ///
    /// Readers of the destination only ever see a complete export, the previous
    /// one is left in place when anything fails before the final rename.
    pub fn export(&self, flow_map: &FlowMap) -> Result<usize, ExportError> {
        match self.export_inner(flow_map) {
            Ok((records, bytes)) => {
                self.counter.exports.fetch_add(1, Ordering::Relaxed);
                self.counter
                    .records
                    .fetch_add(records as u64, Ordering::Relaxed);
                self.counter.bytes.fetch_add(bytes as u64, Ordering::Relaxed);
                info!(
                    "exported {} flows ({} bytes) to {}",
                    records,
                    bytes,
                    self.path.display()
                );
                Ok(records)
            }
            Err(e) => {
                self.counter.failures.fetch_add(1, Ordering::Relaxed);
                Err(e)
            }
        }
    }

    fn export_inner(&self, flow_map: &FlowMap) -> Result<(usize, usize), ExportError> {
        let records = flow_map.snapshot()?;
        let buf = serialize(&records, self.buffer_size)?;
        write_atomically(&self.path, &buf)?;
        Ok((records.len(), buf.len()))
    }
}

impl From<&Config> for Exporter {
    fn from(c: &Config) -> Self {
        Self::new(&c.export_file, c.export_buffer_size)
    }
}

pub fn export<P: AsRef<Path>>(flow_map: &FlowMap, path: P) -> Result<usize, ExportError> {
    Exporter::new(path, DEFAULT_EXPORT_BUFFER_SIZE).export(flow_map)
}

// rename is only atomic within one filesystem, so the temp file sits next to the destination
fn write_atomically(path: &Path, buf: &[u8]) -> Result<(), ExportError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)?;
    debug!(
        "writing {} bytes to {}",
        buf.len(),
        temp.path().display()
    );
    temp.write_all(buf)?;
    temp.as_file().sync_all()?;
    #[cfg(unix)]
    temp.as_file().set_permissions(Permissions::from_mode(0o644))?;
    temp.persist(path)?;
    Ok(())
}
