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

use crate::common::DEFAULT_FLOW_TABLE_CAPACITY;
use crate::config::Config;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowMapConfig {
    // number of hash buckets, never resized
    pub capacity: usize,
}

impl Default for FlowMapConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_FLOW_TABLE_CAPACITY,
        }
    }
}

impl From<&Config> for FlowMapConfig {
    fn from(c: &Config) -> Self {
        Self {
            capacity: c.flow_table_capacity,
        }
    }
}
