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
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::thread;

use netflow_table::{
    Config, Exporter, FlowKey, FlowMap, FlowMapConfig, _new_tcp_frame as new_tcp_frame,
};

#[test]
fn capture_to_export() {
    let dir = tempfile::tempdir().unwrap();
    let export_file = dir.path().join("flows.csv");
    let config = Config::load(format!(
        "flow-table-capacity: 256\nexport-file: {}\nexport-buffer-size: 128\n",
        export_file.display()
    ))
    .unwrap();

    let map = Arc::new(FlowMap::new(&FlowMapConfig::from(&config)).unwrap());
    assert_eq!(map.capacity(), 256);
    let exporter = Exporter::from(&config);

    let client = Ipv4Addr::new(10, 0, 0, 1);
    let server = Ipv4Addr::new(10, 0, 0, 2);
    let workers = (0..4u16)
        .map(|w| {
            let map = map.clone();
            thread::spawn(move || {
                for bytes in [100, 200, 50] {
                    let packet = new_tcp_frame(client, server, 1234, 80, bytes);
                    map.inject_packet(&packet).unwrap();
                }
                // one flow per worker in the opposite direction
                let packet = new_tcp_frame(server, client, 80, 2000 + w, 60);
                map.inject_packet(&packet).unwrap();
                // dropped, too short
                map.inject_packet(&packet[..30]).unwrap();
            })
        })
        .collect::<Vec<_>>();
    for w in workers {
        w.join().unwrap();
    }

    let summary = map.summarize();
    assert_eq!(summary.record_count, 5);
    assert_eq!(summary.total_packets, 16);
    assert_eq!(summary.total_bytes, 4 * 350 + 4 * 60);

    assert_eq!(exporter.export(&map).unwrap(), 5);
    let contents = fs::read_to_string(&export_file).unwrap();
    let lines = contents.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 5);
    assert!(lines.contains(&"10.0.0.1,10.0.0.2,1234,80,6,1400,12"));
    for w in 0..4u16 {
        let line = format!("10.0.0.2,10.0.0.1,80,{},6,60,1", 2000 + w);
        assert!(lines.contains(&line.as_str()), "missing {}", line);
    }

    let key = FlowKey::new(6, client, server, 1234, 80);
    assert_eq!(map.get(&key).unwrap().packets_sent, 12);
}
