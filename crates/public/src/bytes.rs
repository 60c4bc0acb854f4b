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

// Callers are expected to check the slice length first, these panic on short input.

pub fn read_u16_be(bs: &[u8]) -> u16 {
    assert!(bs.len() >= 2);
    u16::from_be_bytes([bs[0], bs[1]])
}

pub fn read_u32_be(bs: &[u8]) -> u32 {
    assert!(bs.len() >= 4);
    u32::from_be_bytes([bs[0], bs[1], bs[2], bs[3]])
}

// Keeps the wire order in memory, the value is only meaningful through `to_ne_bytes`
pub fn read_u32_ne(bs: &[u8]) -> u32 {
    assert!(bs.len() >= 4);
    u32::from_ne_bytes([bs[0], bs[1], bs[2], bs[3]])
}

pub fn write_u16_be(bs: &mut [u8], v: u16) {
    assert!(bs.len() >= 2);
    bs[0..2].copy_from_slice(v.to_be_bytes().as_slice())
}

pub fn write_u32_be(bs: &mut [u8], v: u32) {
    assert!(bs.len() >= 4);
    bs[0..4].copy_from_slice(v.to_be_bytes().as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn big_endian_fields() {
        let bs = [0x08, 0x00, 0x0a, 0x00, 0x00, 0x01];
        assert_eq!(read_u16_be(&bs), 0x0800);
        assert_eq!(read_u32_be(&bs[2..]), 0x0a000001);
        assert_eq!(read_u32_ne(&bs[2..]).to_ne_bytes(), [10, 0, 0, 1]);
    }

    #[test]
    fn write_then_read() {
        let mut bs = [0u8; 6];
        write_u16_be(&mut bs, 1234);
        write_u32_be(&mut bs[2..], 0xc0a80001);
        assert_eq!(bs, [0x04, 0xd2, 0xc0, 0xa8, 0x00, 0x01]);
        assert_eq!(read_u16_be(&bs), 1234);
    }

    #[test]
    #[should_panic]
    fn short_slice_panics() {
        read_u32_be(&[1, 2, 3]);
    }
}
