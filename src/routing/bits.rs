//! Address-bit utilities.
//!
//! # Responsibilities
//! - Normalize IPv4/IPv6 addresses to a 128-bit form
//! - Extract single bits in MSB-first order
//! - Validate that a subnet is expressed over a 128-bit mask
//!
//! # Design Decisions
//! - Bit 0 is the most significant bit of byte 0
//! - IPv4 addresses normalize to their IPv4-mapped IPv6 form
//! - IPv4 subnets are not accepted as rules; callers embed them explicitly

use std::fmt;
use std::net::{IpAddr, Ipv6Addr};

use ipnet::{IpNet, Ipv4Net, Ipv6Net};

use crate::routing::error::ValidationError;

/// Number of bits in a normalized address.
pub const ADDRESS_BITS: usize = 128;

/// A 128-bit address, MSB-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 16]);

impl Address {
    pub fn octets(&self) -> [u8; 16] {
        self.0
    }

    /// Value of bit `n`, or `OutOfRange` when `n >= 128`.
    pub fn bit(&self, n: usize) -> Result<u8, OutOfRange> {
        extract_bit(self, n)
    }

    /// All 128 bits, MSB-first.
    pub fn bits(&self) -> impl Iterator<Item = u8> + '_ {
        (0..ADDRESS_BITS).map(move |n| bit_at(&self.0, n))
    }
}

impl From<Ipv6Addr> for Address {
    fn from(addr: Ipv6Addr) -> Self {
        Self(addr.octets())
    }
}

impl From<IpAddr> for Address {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(v4) => Self::from(v4.to_ipv6_mapped()),
            IpAddr::V6(v6) => Self::from(v6),
        }
    }
}

impl From<Address> for Ipv6Addr {
    fn from(addr: Address) -> Self {
        Ipv6Addr::from(addr.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Ipv6Addr::from(*self))
    }
}

/// Requested bit index lies outside the address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("bit index {index} out of range, must be less than 128")]
pub struct OutOfRange {
    pub index: usize,
}

/// Return bit `n` (0 or 1) of `address`, MSB-first.
pub fn extract_bit(address: &Address, n: usize) -> Result<u8, OutOfRange> {
    if n >= ADDRESS_BITS {
        return Err(OutOfRange { index: n });
    }
    Ok(bit_at(&address.0, n))
}

#[inline]
fn bit_at(octets: &[u8; 16], n: usize) -> u8 {
    (octets[n / 8] >> (7 - (n % 8))) & 1
}

/// Normalize any IP address to 128 bits.
pub fn normalize(addr: IpAddr) -> Address {
    Address::from(addr)
}

/// Check that `subnet` is present and declared over a 128-bit mask.
///
/// Returns the subnet as an [`Ipv6Net`] on success. Has no side effects.
pub fn validate_subnet(subnet: Option<&IpNet>) -> Result<Ipv6Net, ValidationError> {
    match subnet {
        None => Err(ValidationError::NilSubnet),
        Some(IpNet::V6(net)) => Ok(*net),
        Some(IpNet::V4(net)) => Err(ValidationError::WrongAddressFamily {
            prefix_len: net.prefix_len(),
            mask_bits: net.max_prefix_len(),
        }),
    }
}

/// Embed an IPv4 subnet into the IPv4-mapped IPv6 range (`::ffff:0:0/96`).
pub fn embed_ipv4(net: Ipv4Net) -> Ipv6Net {
    let mapped = net.network().to_ipv6_mapped();
    // 96 + at most 32 never exceeds 128
    Ipv6Net::new(mapped, 96 + net.prefix_len()).unwrap_or_else(|_| Ipv6Net::from(mapped))
}
