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

pub const MAC_ADDR_LEN: usize = 6;
pub const ETH_TYPE_LEN: usize = 2;
pub const IPV4_ADDR_LEN: usize = 4;
pub const IPV4_PROTO_LEN: usize = 1;
pub const PORT_LEN: usize = 2;

pub const ETH_HEADER_SIZE: usize = MAC_ADDR_LEN * 2 + ETH_TYPE_LEN; // 14
pub const IPV4_HEADER_SIZE: usize = 20;

mod ipv4 {
    // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    // |Version|  IHL  |Type of Service|          Total Length         |
    // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    // |         Identification        |Flags|      Fragment Offset    |
    // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    // |  Time to Live |    Protocol   |         Header Checksum       |
    // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    // |                       Source Address                          |
    // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    // |                    Destination Address                        |
    // +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    pub const VERSION_IHL_OFFSET: usize = 0;
    pub const TOTAL_LENGTH_OFFSET: usize = 2;
    pub const PROTO_OFFSET: usize = 9;
    pub const SRC_OFFSET: usize = 12;
    pub const DST_OFFSET: usize = 16;
}

mod tcp {
    pub const SPORT_OFFSET: usize = 0;
    pub const DPORT_OFFSET: usize = 2;
}

pub const ETH_ADDR_SIZE: usize = MAC_ADDR_LEN * 2;
pub const ETH_TYPE_OFFSET: usize = ETH_ADDR_SIZE; // 12

// VLAN tags and IPv4 options are not expected, every offset below is fixed
pub const IPV4_VERSION_IHL_OFFSET: usize = ETH_HEADER_SIZE + ipv4::VERSION_IHL_OFFSET; // 14
pub const IPV4_TOTAL_LENGTH_OFFSET: usize = ETH_HEADER_SIZE + ipv4::TOTAL_LENGTH_OFFSET; // 16
pub const IPV4_PROTO_OFFSET: usize = ETH_HEADER_SIZE + ipv4::PROTO_OFFSET; // 23
pub const IPV4_SRC_OFFSET: usize = ETH_HEADER_SIZE + ipv4::SRC_OFFSET; // 26
pub const IPV4_DST_OFFSET: usize = ETH_HEADER_SIZE + ipv4::DST_OFFSET; // 30

pub const TCP_SPORT_OFFSET: usize = ETH_HEADER_SIZE + IPV4_HEADER_SIZE + tcp::SPORT_OFFSET; // 34
pub const TCP_DPORT_OFFSET: usize = ETH_HEADER_SIZE + IPV4_HEADER_SIZE + tcp::DPORT_OFFSET; // 36

// min sizes needed before each stage of fixed offset parsing
pub const ETH_TYPE_END: usize = ETH_TYPE_OFFSET + ETH_TYPE_LEN; // 14
pub const IPV4_PROTO_END: usize = IPV4_PROTO_OFFSET + IPV4_PROTO_LEN; // 24
pub const TCP_PORTS_END: usize = TCP_DPORT_OFFSET + PORT_LEN; // 38
