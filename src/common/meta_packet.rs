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

use super::{
    enums::{EthernetType, IpProtocol},
    error::{ParseError, Result},
    flow_key::{FlowKey, FlowValue},
};
use public::{
    bytes::{read_u16_be, read_u32_ne, write_u16_be},
    consts::*,
};

fn check_len(packet: &[u8], need: usize) -> Result<()> {
    if packet.len() < need {
        return Err(ParseError::TruncatedFrame {
            len: packet.len(),
            need,
        });
    }
    Ok(())
}

/// Extracts the flow identity and volume of one ethernet frame.
///
/// Only untagged IPv4 carrying TCP with a 20 byte IP header is understood, every
/// field is read at a fixed offset. The length is checked before each stage so a
/// short frame is rejected instead of read past its end.
pub fn parse_packet(packet: &[u8]) -> Result<(FlowKey, FlowValue)> {
    check_len(packet, ETH_TYPE_END)?;
    let eth_type = EthernetType::from(read_u16_be(&packet[ETH_TYPE_OFFSET..]));
    if eth_type != EthernetType::Ipv4 {
        return Err(ParseError::UnsupportedEtherType(eth_type.into()));
    }

    check_len(packet, IPV4_PROTO_END)?;
    let total_length = read_u16_be(&packet[IPV4_TOTAL_LENGTH_OFFSET..]);
    let protocol = packet[IPV4_PROTO_OFFSET];
    if IpProtocol::from(protocol) != IpProtocol::Tcp {
        return Err(ParseError::UnsupportedProtocol(protocol));
    }

    check_len(packet, TCP_PORTS_END)?;
    let key = FlowKey {
        protocol,
        src_ip: read_u32_ne(&packet[IPV4_SRC_OFFSET..IPV4_SRC_OFFSET + IPV4_ADDR_LEN]),
        dst_ip: read_u32_ne(&packet[IPV4_DST_OFFSET..IPV4_DST_OFFSET + IPV4_ADDR_LEN]),
        src_port: read_u16_be(&packet[TCP_SPORT_OFFSET..]),
        dst_port: read_u16_be(&packet[TCP_DPORT_OFFSET..]),
    };
    Ok((key, FlowValue::new(total_length)))
}

// for benchmarks and tests
#[doc(hidden)]
pub fn _new_tcp_frame(
    src_ip: Ipv4Addr,
    dst_ip: Ipv4Addr,
    src_port: u16,
    dst_port: u16,
    total_length: u16,
) -> Vec<u8> {
    // eth + ipv4 + tcp without options
    let mut packet = vec![0u8; ETH_HEADER_SIZE + IPV4_HEADER_SIZE + 20];
    packet[..6].copy_from_slice(&[0x00, 0x16, 0x3e, 0x00, 0x00, 0x02]);
    packet[6..12].copy_from_slice(&[0x00, 0x16, 0x3e, 0x00, 0x00, 0x01]);
    write_u16_be(&mut packet[ETH_TYPE_OFFSET..], EthernetType::Ipv4.into());
    packet[IPV4_VERSION_IHL_OFFSET] = 0x45;
    write_u16_be(&mut packet[IPV4_TOTAL_LENGTH_OFFSET..], total_length);
    packet[IPV4_PROTO_OFFSET] = IpProtocol::Tcp.into();
    packet[IPV4_SRC_OFFSET..IPV4_SRC_OFFSET + IPV4_ADDR_LEN].copy_from_slice(&src_ip.octets());
    packet[IPV4_DST_OFFSET..IPV4_DST_OFFSET + IPV4_ADDR_LEN].copy_from_slice(&dst_ip.octets());
    write_u16_be(&mut packet[TCP_SPORT_OFFSET..], src_port);
    write_u16_be(&mut packet[TCP_DPORT_OFFSET..], dst_port);
    packet
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tcp_frame() -> Vec<u8> {
        _new_tcp_frame(
            Ipv4Addr::new(10, 0, 0, 1),
            Ipv4Addr::new(10, 0, 0, 2),
            1234,
            80,
            100,
        )
    }

    #[test]
    fn parse_tcp() {
        let (key, value) = parse_packet(&tcp_frame()).unwrap();
        assert_eq!(key.protocol, 6);
        assert_eq!(key.src_addr(), Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(key.dst_addr(), Ipv4Addr::new(10, 0, 0, 2));
        assert_eq!(key.src_port, 1234);
        assert_eq!(key.dst_port, 80);
        assert_eq!(
            value,
            FlowValue {
                bytes: 100,
                packets: 1
            }
        );
    }

    #[test]
    fn parse_exact_minimum() {
        let packet = tcp_frame();
        assert!(parse_packet(&packet[..TCP_PORTS_END]).is_ok());
        assert_eq!(
            parse_packet(&packet[..TCP_PORTS_END - 1]),
            Err(ParseError::TruncatedFrame {
                len: TCP_PORTS_END - 1,
                need: TCP_PORTS_END
            })
        );
    }

    #[test]
    fn reject_every_short_frame() {
        let packet = tcp_frame();
        for len in 0..TCP_PORTS_END {
            assert!(
                matches!(
                    parse_packet(&packet[..len]),
                    Err(ParseError::TruncatedFrame { .. })
                ),
                "frame of {} bytes not rejected",
                len
            );
        }
    }

    #[test]
    fn reject_non_ipv4() {
        let mut packet = tcp_frame();
        write_u16_be(&mut packet[ETH_TYPE_OFFSET..], 0x86dd);
        assert_eq!(
            parse_packet(&packet),
            Err(ParseError::UnsupportedEtherType(0x86dd))
        );

        // vlan tagged frames are not decoded
        write_u16_be(&mut packet[ETH_TYPE_OFFSET..], 0x8100);
        assert_eq!(
            parse_packet(&packet),
            Err(ParseError::UnsupportedEtherType(0x8100))
        );

        // ether type is checked before anything else is read
        assert_eq!(
            parse_packet(&packet[..ETH_TYPE_END]),
            Err(ParseError::UnsupportedEtherType(0x8100))
        );
    }

    #[test]
    fn reject_non_tcp() {
        let mut packet = tcp_frame();
        packet[IPV4_PROTO_OFFSET] = 17;
        assert_eq!(parse_packet(&packet), Err(ParseError::UnsupportedProtocol(17)));
        assert_eq!(
            parse_packet(&packet[..IPV4_PROTO_END]),
            Err(ParseError::UnsupportedProtocol(17))
        );
    }

    #[test]
    fn total_length_is_not_frame_length() {
        let mut packet = tcp_frame();
        write_u16_be(&mut packet[IPV4_TOTAL_LENGTH_OFFSET..], 1500);
        let (_, value) = parse_packet(&packet).unwrap();
        assert_eq!(value.bytes, 1500);
    }
}
