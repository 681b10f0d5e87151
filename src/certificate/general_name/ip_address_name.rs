use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use yasna::{
    ASN1Result,
    DERWriter,
    BERReader,
    BERDecodable,
};

use crate::certificate::cidr_netmask::CidrNetmask;
use crate::der::{DerEncode, invalid};
use crate::error::{Error, Result};

/// iPAddress: the address octets in network byte order, followed by a mask
/// of the same width when the name appears in a name-constraint subtree.
/// Valid lengths are 4 (IPv4), 8 (IPv4 + mask), 16 (IPv6) and 32 (IPv6 + mask).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IpAddressName(Vec<u8>);

impl IpAddressName {
    pub fn new(octets: Vec<u8>) -> Result<IpAddressName> {
        match octets.len() {
            4 | 8 | 16 | 32 => Ok(IpAddressName(octets)),
            len => Err(Error::Range(format!("{} octets is not an IP address length", len))),
        }
    }

    pub fn with_netmask(address: IpAddr, netmask: CidrNetmask) -> Result<IpAddressName> {
        let mut octets = octets_of(address);
        let mask = netmask.to_bytes(octets.len())?;
        octets.extend_from_slice(&mask);
        Ok(IpAddressName(octets))
    }

    pub fn octets(&self) -> &[u8] {
        &self.0
    }

    pub fn address(&self) -> IpAddr {
        match self.0.len() {
            4 | 8 => IpAddr::V4(Ipv4Addr::new(self.0[0], self.0[1], self.0[2], self.0[3])),
            _ => {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(&self.0[..16]);
                IpAddr::V6(Ipv6Addr::from(octets))
            },
        }
    }

    /// The mask half, when present.
    pub fn netmask(&self) -> Option<&[u8]> {
        match self.0.len() {
            8 => Some(&self.0[4..]),
            32 => Some(&self.0[16..]),
            _ => None,
        }
    }
}

fn octets_of(address: IpAddr) -> Vec<u8> {
    match address {
        IpAddr::V4(v4) => v4.octets().to_vec(),
        IpAddr::V6(v6) => v6.octets().to_vec(),
    }
}

impl From<IpAddr> for IpAddressName {
    fn from(address: IpAddr) -> IpAddressName {
        IpAddressName(octets_of(address))
    }
}

/// Parses `a.b.c.d`, `a.b.c.d/n`, an IPv6 address or an IPv6 address with a
/// `/n` prefix length.
impl FromStr for IpAddressName {
    type Err = Error;

    fn from_str(s: &str) -> Result<IpAddressName> {
        let (address, prefix) = match s.split_once('/') {
            Some((address, prefix)) => (address, Some(prefix)),
            None => (s, None),
        };
        let address = IpAddr::from_str(address)
            .map_err(|_| Error::Format(format!("{:?} is not an IP address", address)))?;
        match prefix {
            Some(prefix) => IpAddressName::with_netmask(address, prefix.parse::<CidrNetmask>()?),
            None => Ok(IpAddressName::from(address)),
        }
    }
}

impl fmt::Display for IpAddressName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address())?;
        if let Some(mask) = self.netmask() {
            let ones: u32 = mask.iter().map(|b| b.count_ones()).sum();
            // only contiguous masks have a prefix form
            let contiguous = CidrNetmask::new(ones).to_bytes(mask.len()).map_or(false, |m| m == mask);
            if contiguous {
                write!(f, "/{}", ones)?;
            } else {
                let mask = IpAddressName(mask.to_vec());
                write!(f, "/{}", mask.address())?;
            }
        }
        Ok(())
    }
}

impl BERDecodable for IpAddressName {
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        let octets = reader.read_bytes()?;
        IpAddressName::new(octets).map_err(|_| invalid())
    }
}

impl DerEncode for IpAddressName {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        writer.write_bytes(&self.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::der::decode_der;

    #[test]
    fn ipv4_address_should_parse () {
        let name: IpAddressName = "127.0.0.1".parse().unwrap();
        assert_eq!(name.octets(), &[0x7f,0x00,0x00,0x01]);
        assert_eq!(name.netmask(), None);
        assert_eq!(name.to_string(), "127.0.0.1");
    }

    #[test]
    fn ipv4_subnet_should_append_mask () {
        let name: IpAddressName = "10.1.0.0/16".parse().unwrap();
        assert_eq!(name.octets(), &[0x0a,0x01,0x00,0x00, 0xff,0xff,0x00,0x00]);
        assert_eq!(name.to_string(), "10.1.0.0/16");
        assert_eq!(name.to_der().unwrap(), vec!(0x04,0x08,
            0x0a,0x01,0x00,0x00, 0xff,0xff,0x00,0x00));
    }

    #[test]
    fn ipv6_subnet_should_append_mask () {
        let name: IpAddressName = "2001:db8::/32".parse().unwrap();
        assert_eq!(name.octets().len(), 32);
        assert_eq!(&name.octets()[16..20], &[0xff,0xff,0xff,0xff]);
        assert_eq!(&name.octets()[20..], &[0u8; 12]);
        assert_eq!(name.to_string(), "2001:db8::/32");
    }

    #[test]
    fn bad_input_should_fail () {
        assert!(matches!("10.0.0.0/33".parse::<IpAddressName>(), Err(Error::Range(_))));
        assert!(matches!("10.0.0.0/-1".parse::<IpAddressName>(), Err(Error::Range(_))));
        assert!(matches!("10.0.0.0/x".parse::<IpAddressName>(), Err(Error::Format(_))));
        assert!(matches!("ca.example".parse::<IpAddressName>(), Err(Error::Format(_))));
        assert!(matches!(IpAddressName::new(vec!(1,2,3)), Err(Error::Range(_))));
    }

    #[test]
    fn odd_length_octets_should_fail_to_decode () {
        assert!(decode_der::<IpAddressName>(&[0x04,0x05, 1,2,3,4,5]).is_err());
        assert!(decode_der::<IpAddressName>(&[0x04,0x04, 1,2,3,4]).is_ok());
    }
}
