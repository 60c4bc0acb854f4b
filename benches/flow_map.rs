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

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use criterion::*;

use netflow_table::{
    _flow_hash as flow_hash, _new_flow_map as new_flow_map, _new_tcp_frame as new_tcp_frame,
    FlowKey, FlowValue,
};

fn key(i: u64) -> FlowKey {
    FlowKey::new(
        6,
        Ipv4Addr::new(10, (i >> 16) as u8, (i >> 8) as u8, i as u8),
        Ipv4Addr::new(10, 255, 0, 1),
        (i >> 24) as u16,
        80,
    )
}

fn bench_flow_map(c: &mut Criterion) {
    c.bench_function("flow_hash", |b| {
        let k = key(12345);
        b.iter(|| flow_hash(black_box(&k)))
    });

    c.bench_function("flow_map_new_flows", |b| {
        b.iter_custom(|iters| {
            let map = new_flow_map(65536);
            let keys = (0..iters).map(key).collect::<Vec<_>>();
            let value = FlowValue::new(1500);
            let start = Instant::now();
            for k in keys.iter() {
                map.insert_or_update(k, &value).unwrap();
            }
            start.elapsed()
        })
    });

    c.bench_function("flow_map_same_flow", |b| {
        let map = new_flow_map(65536);
        let k = key(1);
        let value = FlowValue::new(64);
        b.iter(|| map.insert_or_update(black_box(&k), &value).unwrap())
    });

    c.bench_function("flow_map_inject_packet", |b| {
        let map = new_flow_map(65536);
        let packets = (0..1024u16)
            .map(|i| {
                new_tcp_frame(
                    Ipv4Addr::new(192, 168, 0, 1),
                    Ipv4Addr::new(192, 168, 0, 2),
                    i,
                    443,
                    1400,
                )
            })
            .collect::<Vec<_>>();
        let mut i = 0;
        b.iter(|| {
            map.inject_packet(&packets[i & 1023]).unwrap();
            i += 1;
        })
    });

    c.bench_function("flow_map_contended_4_threads", |b| {
        b.iter_custom(|iters| {
            let map = Arc::new(new_flow_map(65536));
            let start = Instant::now();
            let handles = (0..4u64)
                .map(|t| {
                    let map = map.clone();
                    thread::spawn(move || {
                        let value = FlowValue::new(100);
                        for i in 0..iters {
                            map.insert_or_update(&key(t << 32 | i & 0xFFFF), &value)
                                .unwrap();
                        }
                    })
                })
                .collect::<Vec<_>>();
            for h in handles {
                h.join().unwrap();
            }
            start.elapsed()
        })
    });
}

criterion_group!(benches, bench_flow_map);
criterion_main!(benches);
