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

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use log::{debug, info};
use parking_lot::Mutex;

use super::{
    error::{Error, Result},
    flow_config::FlowMapConfig,
    flow_node::FlowRecord,
};
use crate::common::{parse_packet, FlowKey, FlowValue, ParseError};
use crate::utils::hasher::flow_hash;
use public::counter::{Counter, CounterType, CounterValue, RefCountable};

#[derive(Default)]
pub struct FlowMapCounter {
    new: AtomicU64,
    update: AtomicU64,
    drop_truncated: AtomicU64,
    drop_ether_type: AtomicU64,
    drop_protocol: AtomicU64,
    // gauge, never reset
    flow_count: AtomicU64,
}

impl FlowMapCounter {
    fn dropped(&self, e: &ParseError) {
        match e {
            ParseError::TruncatedFrame { .. } => &self.drop_truncated,
            ParseError::UnsupportedEtherType(_) => &self.drop_ether_type,
            ParseError::UnsupportedProtocol(_) => &self.drop_protocol,
        }
        .fetch_add(1, Ordering::Relaxed);
    }
}

impl RefCountable for FlowMapCounter {
    fn get_counters(&self) -> Vec<Counter> {
        vec![
            (
                "new",
                CounterType::Counted,
                CounterValue::Unsigned(self.new.swap(0, Ordering::Relaxed)),
            ),
            (
                "update",
                CounterType::Counted,
                CounterValue::Unsigned(self.update.swap(0, Ordering::Relaxed)),
            ),
            (
                "drop-truncated",
                CounterType::Counted,
                CounterValue::Unsigned(self.drop_truncated.swap(0, Ordering::Relaxed)),
            ),
            (
                "drop-ether-type",
                CounterType::Counted,
                CounterValue::Unsigned(self.drop_ether_type.swap(0, Ordering::Relaxed)),
            ),
            (
                "drop-protocol",
                CounterType::Counted,
                CounterValue::Unsigned(self.drop_protocol.swap(0, Ordering::Relaxed)),
            ),
            (
                "flow-count",
                CounterType::Gauged,
                CounterValue::Unsigned(self.flow_count.load(Ordering::Relaxed)),
            ),
        ]
    }
}

/*
    FlowMap 是固定桶数的链式哈希表，桶下标为 flow_hash(key) % capacity。
    所有桶由同一把锁保护，插入、快照、遍历都必须持锁完成；不扩容、不老化。
    =========================================================================
    FlowMap is a chained hash table with a fixed bucket count, the bucket of a key
    is flow_hash(key) % capacity. One lock guards every bucket, inserts, snapshots
    and traversals all hold it for their whole duration. No resize, no expiry.
*/
pub struct FlowMap {
    buckets: Mutex<Vec<Vec<FlowRecord>>>,
    capacity: usize,

    counter: Arc<FlowMapCounter>,
}

impl FlowMap {
    pub fn new(config: &FlowMapConfig) -> Result<Self> {
        if config.capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        let mut buckets = Vec::new();
        buckets.try_reserve_exact(config.capacity)?;
        // chains allocate on first insert
        buckets.resize_with(config.capacity, Vec::new);
        info!("flow table initialized with {} buckets", config.capacity);
        Ok(Self {
            buckets: Mutex::new(buckets),
            capacity: config.capacity,
            counter: Arc::new(FlowMapCounter::default()),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn counter(&self) -> &Arc<FlowMapCounter> {
        &self.counter
    }

    pub fn bucket_index(&self, key: &FlowKey) -> usize {
        flow_hash(key) as usize % self.capacity
    }

    /// Merges one observation into the flow of `key`, creating the flow on first sight.
    ///
    /// Fails only when a new record cannot be allocated, the table is left unchanged then.
    pub fn insert_or_update(&self, key: &FlowKey, value: &FlowValue) -> Result<()> {
        let index = self.bucket_index(key);
        let mut buckets = self.buckets.lock();
        let chain = &mut buckets[index];
        if let Some(record) = chain.iter_mut().find(|r| r.key == *key) {
            record.update(value);
            self.counter.update.fetch_add(1, Ordering::Relaxed);
            return Ok(());
        }
        chain.try_reserve(1)?;
        chain.push(FlowRecord::new(*key, value));
        self.counter.new.fetch_add(1, Ordering::Relaxed);
        self.counter.flow_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Ingests one captured frame. Frames the parser rejects are counted and dropped,
    /// they never fail the call.
    pub fn inject_packet(&self, packet: &[u8]) -> Result<()> {
        match parse_packet(packet) {
            Ok((key, value)) => self.insert_or_update(&key, &value),
            Err(e) => {
                debug!("drop packet of {} bytes: {}", packet.len(), e);
                self.counter.dropped(&e);
                Ok(())
            }
        }
    }

    pub fn get(&self, key: &FlowKey) -> Option<FlowRecord> {
        let index = self.bucket_index(key);
        let buckets = self.buckets.lock();
        buckets[index].iter().find(|r| r.key == *key).copied()
    }

    pub fn len(&self) -> usize {
        self.buckets.lock().iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Point in time copy of every record, in bucket then insertion order.
    pub fn snapshot(&self) -> Result<Vec<FlowRecord>> {
        let buckets = self.buckets.lock();
        let count = buckets.iter().map(Vec::len).sum();
        let mut records = Vec::new();
        records.try_reserve_exact(count)?;
        for chain in buckets.iter() {
            records.extend_from_slice(chain);
        }
        Ok(records)
    }

    // Callback runs with the table lock held
    pub(super) fn try_for_each<E, F>(&self, mut f: F) -> Result<(), E>
    where
        F: FnMut(&FlowRecord) -> Result<(), E>,
    {
        let buckets = self.buckets.lock();
        for record in buckets.iter().flatten() {
            f(record)?;
        }
        Ok(())
    }

    #[cfg(test)]
    fn chain_len(&self, index: usize) -> usize {
        self.buckets.lock()[index].len()
    }

    #[cfg(test)]
    fn check_bucket_placement(&self) -> bool {
        let buckets = self.buckets.lock();
        buckets.iter().enumerate().all(|(i, chain)| {
            chain
                .iter()
                .all(|r| flow_hash(&r.key) as usize % self.capacity == i)
        })
    }
}

// for benchmarks
#[doc(hidden)]
pub fn _new_flow_map(capacity: usize) -> FlowMap {
    FlowMap::new(&FlowMapConfig { capacity }).unwrap()
}
