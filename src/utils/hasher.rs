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

use crate::common::FlowKey;

// CRC-32C (Castagnoli), 反射多项式 0x82F63B78
// 与 SSE4.2 crc32 指令一致：不做初值取反和结果取反，调用方提供种子逐段累加
const CRC32C_POLY: u32 = 0x82F6_3B78;

const CRC32C_TABLE: [u32; 256] = {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ CRC32C_POLY
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
};

pub fn crc32c(mut crc: u32, data: &[u8]) -> u32 {
    for &b in data {
        crc = CRC32C_TABLE[((crc ^ b as u32) & 0xFF) as usize] ^ (crc >> 8);
    }
    crc
}

pub fn crc32c_u8(crc: u32, v: u8) -> u32 {
    crc32c(crc, &[v])
}

pub fn crc32c_u16(crc: u32, v: u16) -> u32 {
    crc32c(crc, &v.to_le_bytes())
}

pub fn crc32c_u32(crc: u32, v: u32) -> u32 {
    crc32c(crc, &v.to_le_bytes())
}

// Field order and widths are part of the bucket layout, a table must keep
// using the same hash for its whole life since it never rehashes.
pub fn flow_hash(key: &FlowKey) -> u32 {
    let mut hash = crc32c_u8(0, key.protocol);
    hash = crc32c(hash, &key.src_ip.to_ne_bytes());
    hash = crc32c(hash, &key.dst_ip.to_ne_bytes());
    hash = crc32c_u16(hash, key.src_port);
    crc32c_u16(hash, key.dst_port)
}
