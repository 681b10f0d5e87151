use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A CIDR prefix length, written out as the equivalent address mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CidrNetmask(u32);

impl CidrNetmask {
    pub fn new(prefix_length: u32) -> CidrNetmask {
        CidrNetmask(prefix_length)
    }

    pub fn prefix_length(&self) -> u32 {
        self.0
    }

    /// Fills `buffer` with the mask. The address family comes from the buffer
    /// length: 4 bytes for IPv4, 16 bytes for IPv6.
    pub fn write(&self, buffer: &mut [u8]) -> Result<()> {
        let width = match buffer.len() {
            4 => 32,
            16 => 128,
            len => return Err(Error::Range(format!("cannot determine address family from a {} byte buffer", len))),
        };
        if self.0 > width {
            return Err(Error::Range(format!("prefix /{} exceeds the {} bit address space", self.0, width)))
        }

        let mut remaining = self.0;
        for byte in buffer.iter_mut() {
            let bits = remaining.min(8);
            *byte = if bits == 0 { 0 } else { 0xffu8 << (8 - bits) };
            remaining -= bits;
        }
        Ok(())
    }

    /// The mask as a freshly allocated buffer of `len` bytes.
    pub fn to_bytes(&self, len: usize) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; len];
        self.write(&mut buffer)?;
        Ok(buffer)
    }
}

impl FromStr for CidrNetmask {
    type Err = Error;

    fn from_str(s: &str) -> Result<CidrNetmask> {
        let value: i64 = s.trim().parse()
            .map_err(|_| Error::Format(format!("netmask {:?} is not a number", s)))?;
        if value < 0 {
            return Err(Error::Range(format!("netmask /{} is negative", value)))
        }
        u32::try_from(value)
            .map(CidrNetmask)
            .map_err(|_| Error::Range(format!("netmask /{} is too wide", value)))
    }
}

impl fmt::Display for CidrNetmask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
