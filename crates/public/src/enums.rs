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

//! Referfence `gopacket/layers/enums.go`

/// EthernetType is an enumeration of ethernet type values, and acts as a decoder
/// for any type it supports.
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
pub enum EthernetType {
    Ipv4,
    Arp,
    Ipv6,
    Dot1Q,
    QinQ,
    Unknown(u16),
}

impl EthernetType {
    const IPV4: u16 = 0x0800;
    const ARP: u16 = 0x0806;
    const IPV6: u16 = 0x86DD;
    const DOT1Q: u16 = 0x8100;
    const QINQ: u16 = 0x88a8;
}

impl Default for EthernetType {
    fn default() -> Self {
        EthernetType::Unknown(0)
    }
}

impl From<u16> for EthernetType {
    fn from(t: u16) -> Self {
        match t {
            EthernetType::IPV4 => Self::Ipv4,
            EthernetType::ARP => Self::Arp,
            EthernetType::IPV6 => Self::Ipv6,
            EthernetType::DOT1Q => Self::Dot1Q,
            EthernetType::QINQ => Self::QinQ,
            _ => Self::Unknown(t),
        }
    }
}

impl From<EthernetType> for u16 {
    fn from(t: EthernetType) -> Self {
        match t {
            EthernetType::Ipv4 => EthernetType::IPV4,
            EthernetType::Arp => EthernetType::ARP,
            EthernetType::Ipv6 => EthernetType::IPV6,
            EthernetType::Dot1Q => EthernetType::DOT1Q,
            EthernetType::QinQ => EthernetType::QINQ,
            EthernetType::Unknown(t) => t,
        }
    }
}

impl PartialEq<u16> for EthernetType {
    fn eq(&self, other: &u16) -> bool {
        u16::from(*self).eq(other)
    }
}

impl PartialEq<EthernetType> for u16 {
    fn eq(&self, other: &EthernetType) -> bool {
        u16::from(*other).eq(self)
    }
}

// IPProtocol is an enumeration of IP protocol values, and acts as a decoder
// for any type it supports.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum IpProtocol {
    Icmpv4,
    Tcp,
    Udp,
    Icmpv6,
    Unknown(u8),
}

impl IpProtocol {
    const ICMPV4: u8 = 1;
    const TCP: u8 = 6;
    const UDP: u8 = 17;
    const ICMPV6: u8 = 58;
}

impl Default for IpProtocol {
    fn default() -> Self {
        IpProtocol::Unknown(0)
    }
}

impl From<u8> for IpProtocol {
    fn from(protocol: u8) -> Self {
        match protocol {
            Self::ICMPV4 => Self::Icmpv4,
            Self::TCP => Self::Tcp,
            Self::UDP => Self::Udp,
            Self::ICMPV6 => Self::Icmpv6,
            p => Self::Unknown(p),
        }
    }
}

impl From<IpProtocol> for u8 {
    fn from(protocol: IpProtocol) -> Self {
        match protocol {
            IpProtocol::Icmpv4 => IpProtocol::ICMPV4,
            IpProtocol::Tcp => IpProtocol::TCP,
            IpProtocol::Udp => IpProtocol::UDP,
            IpProtocol::Icmpv6 => IpProtocol::ICMPV6,
            IpProtocol::Unknown(p) => p,
        }
    }
}

impl PartialEq<u8> for IpProtocol {
    fn eq(&self, other: &u8) -> bool {
        u8::from(*self).eq(other)
    }
}

impl PartialEq<IpProtocol> for u8 {
    fn eq(&self, other: &IpProtocol) -> bool {
        u8::from(*other).eq(self)
    }
}
