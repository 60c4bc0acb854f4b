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

use std::fmt;
use std::io::{self, Write};

use crate::common::{FlowKey, FlowValue};

// "255.255.255.255,255.255.255.255,65535,65535,255,<u64>,<u64>\n"
pub const CSV_RECORD_MAX_LEN: usize = 16 + 16 + 6 + 6 + 4 + 21 + 21;

/// Accumulated counters of one flow, owned by the flow table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlowRecord {
    pub key: FlowKey,
    pub bytes_sent: u64,
    pub packets_sent: u64,
}

impl FlowRecord {
    pub fn new(key: FlowKey, value: &FlowValue) -> Self {
        Self {
            key,
            bytes_sent: value.bytes as u64,
            packets_sent: value.packets as u64,
        }
    }

    pub fn update(&mut self, value: &FlowValue) {
        self.bytes_sent += value.bytes as u64;
        self.packets_sent += value.packets as u64;
    }

    pub fn write_csv<W: Write>(&self, w: &mut W) -> io::Result<()> {
        write!(
            w,
            "{},{},{},{},{},{},{}\n",
            self.key.src_addr(),
            self.key.dst_addr(),
            self.key.src_port,
            self.key.dst_port,
            self.key.protocol,
            self.bytes_sent,
            self.packets_sent
        )
    }
}

impl fmt::Display for FlowRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IP Source:     {}\n", self.key.src_addr())?;
        write!(f, "IP Destin:     {}\n", self.key.dst_addr())?;
        write!(f, "Port Source:   {}\n", self.key.src_port)?;
        write!(f, "Port Destin:   {}\n", self.key.dst_port)?;
        write!(f, "Protocol:      {}\n", self.key.protocol)?;
        write!(f, "Packets:       {}\n", self.packets_sent)?;
        write!(f, "Bytes:         {}\n", self.bytes_sent)
    }
}
