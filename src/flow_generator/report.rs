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

use super::flow_map::FlowMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlowSummary {
    pub record_count: u64,
    pub total_bytes: u64,
    pub total_packets: u64,
}

impl fmt::Display for FlowSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entries     = {}\n", self.record_count)?;
        write!(f, "total bytes = {}\n", self.total_bytes)?;
        write!(f, "total pkts  = {}\n", self.total_packets)
    }
}

impl FlowMap {
    /// Table wide totals, computed in one pass under the table lock.
    pub fn summarize(&self) -> FlowSummary {
        let mut summary = FlowSummary::default();
        let _ = self.try_for_each::<(), _>(|record| {
            summary.record_count += 1;
            summary.total_bytes += record.bytes_sent;
            summary.total_packets += record.packets_sent;
            Ok(())
        });
        summary
    }

    // Holds the table lock while writing, diagnostics only
    pub fn dump<W: Write>(&self, w: &mut W) -> io::Result<()> {
        write!(w, "\nPrinting Flow Table\n")?;
        self.try_for_each(|record| write!(w, "{}\n", record))
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;
    use crate::common::{FlowKey, FlowValue};
    use crate::flow_generator::flow_map::_new_flow_map;

    fn key(src_port: u16) -> FlowKey {
        FlowKey::new(
            6,
            Ipv4Addr::new(172, 16, 0, 1),
            Ipv4Addr::new(172, 16, 0, 2),
            src_port,
            443,
        )
    }

    #[test]
    fn summarize_empty() {
        assert_eq!(_new_flow_map(4).summarize(), FlowSummary::default());
    }

    #[test]
    fn summarize_totals() {
        let map = _new_flow_map(4);
        map.insert_or_update(&key(1), &FlowValue::new(100)).unwrap();
        map.insert_or_update(&key(1), &FlowValue::new(20)).unwrap();
        map.insert_or_update(&key(2), &FlowValue::new(3)).unwrap();
        let summary = map.summarize();
        assert_eq!(
            summary,
            FlowSummary {
                record_count: 2,
                total_bytes: 123,
                total_packets: 3,
            }
        );
        assert_eq!(
            summary.to_string(),
            "Entries     = 2\ntotal bytes = 123\ntotal pkts  = 3\n"
        );
        // read only
        assert_eq!(map.summarize(), summary);
    }

    #[test]
    fn dump_every_record() {
        let map = _new_flow_map(4);
        for port in 1..=3 {
            map.insert_or_update(&key(port), &FlowValue::new(60)).unwrap();
        }
        let mut out = vec![];
        map.dump(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\nPrinting Flow Table\n"));
        assert_eq!(text.matches("IP Source:     172.16.0.1\n").count(), 3);
        assert!(text.contains("Port Source:   2\n"));
    }
}
