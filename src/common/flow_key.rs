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
use std::net::Ipv4Addr;

/*
    FlowKey是流表中一条流的唯一标识，五元组逐字段比较。
    src_ip/dst_ip 保持网络序：内存中的字节即报文中的字节，只能通过 to_ne_bytes 取出地址。
    src_port/dst_port 为主机序。
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FlowKey {
    pub protocol: u8,
    pub src_ip: u32,
    pub dst_ip: u32,
    pub src_port: u16,
    pub dst_port: u16,
}

impl FlowKey {
    pub fn new(
        protocol: u8,
        src_ip: Ipv4Addr,
        dst_ip: Ipv4Addr,
        src_port: u16,
        dst_port: u16,
    ) -> Self {
        Self {
            protocol,
            src_ip: u32::from_ne_bytes(src_ip.octets()),
            dst_ip: u32::from_ne_bytes(dst_ip.octets()),
            src_port,
            dst_port,
        }
    }

    pub fn src_addr(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.src_ip.to_ne_bytes())
    }

    pub fn dst_addr(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.dst_ip.to_ne_bytes())
    }
}

impl fmt::Display for FlowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "proto: {} {}:{} > {}:{}",
            self.protocol,
            self.src_addr(),
            self.src_port,
            self.dst_addr(),
            self.dst_port
        )
    }
}

/// The contribution of a single observed frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlowValue {
    // ip total length
    pub bytes: u16,
    pub packets: u32,
}

impl FlowValue {
    pub fn new(bytes: u16) -> Self {
        Self { bytes, packets: 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_keeps_wire_order() {
        let key = FlowKey::new(
            6,
            Ipv4Addr::new(10, 0, 0, 1),
            Ipv4Addr::new(192, 168, 1, 20),
            1234,
            80,
        );
        assert_eq!(key.src_ip.to_ne_bytes(), [10, 0, 0, 1]);
        assert_eq!(key.src_addr(), Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(key.dst_addr(), Ipv4Addr::new(192, 168, 1, 20));
        assert_eq!(key.to_string(), "proto: 6 10.0.0.1:1234 > 192.168.1.20:80");
    }

    #[test]
    fn equality_is_field_wise() {
        let a = FlowKey::new(6, Ipv4Addr::LOCALHOST, Ipv4Addr::LOCALHOST, 1, 2);
        let mut b = a;
        assert_eq!(a, b);
        b.dst_port = 3;
        assert_ne!(a, b);
        let c = FlowKey::new(6, Ipv4Addr::LOCALHOST, Ipv4Addr::LOCALHOST, 2, 1);
        assert_ne!(a, c);
    }
}
