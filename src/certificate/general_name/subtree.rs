use yasna::{
    ASN1Result,
    DERWriter,
    BERReader,
    BERDecodable,
    Tag,
};

use crate::certificate::general_name::GeneralName;
use crate::der::{DerEncode, invalid, peek_tag};
use crate::error::Result;

#[cfg(feature = "tracing")]
use tracing::{debug};

/// ```text
/// GeneralSubtree ::= SEQUENCE {
///      base                    GeneralName,
///      minimum         [0]     BaseDistance DEFAULT 0,
///      maximum         [1]     BaseDistance OPTIONAL }
///
/// BaseDistance ::= INTEGER (0..MAX)
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GeneralSubtree {
    base: GeneralName,
    minimum: u64,
    maximum: Option<u64>,
}

impl GeneralSubtree {
    pub fn new(base: GeneralName) -> GeneralSubtree {
        GeneralSubtree {
            base: base,
            minimum: 0,
            maximum: None,
        }
    }

    pub fn with_bounds(base: GeneralName, minimum: u64, maximum: Option<u64>) -> GeneralSubtree {
        GeneralSubtree { base, minimum, maximum }
    }

    pub fn base(&self) -> &GeneralName {
        &self.base
    }

    pub fn minimum(&self) -> u64 {
        self.minimum
    }

    /// None means the subtree is unbounded.
    pub fn maximum(&self) -> Option<u64> {
        self.maximum
    }
}

impl BERDecodable for GeneralSubtree {
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "GeneralSubtree::decode_ber", skip_all))]
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        reader.read_sequence(|reader| {
            let base = GeneralName::decode_ber(reader.next())?;
            let mut minimum = None;
            let mut maximum = None;
            while let Some(tag) = peek_tag(reader)? {
                let slot = if tag == Tag::context(0) {
                    &mut minimum
                } else if tag == Tag::context(1) {
                    &mut maximum
                } else {
                    #[cfg(feature = "tracing")]
                    debug!("unexpected tag in general subtree: {:?}", tag);
                    return Err(invalid())
                };
                if slot.is_some() {
                    return Err(invalid())
                }
                // implicit tag: the content octets are the INTEGER's
                *slot = Some(reader.next().read_tagged_implicit(tag, |reader| reader.read_u64())?);
            }
            Ok(GeneralSubtree {
                base: base,
                minimum: minimum.unwrap_or(0),
                maximum: maximum,
            })
        })
    }
}

impl DerEncode for GeneralSubtree {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        writer.write_sequence(|writer| {
            self.base.encode_der(writer.next())?;
            if self.minimum != 0 {
                writer.next().write_tagged_implicit(Tag::context(0), |writer| writer.write_u64(self.minimum));
            }
            if let Some(maximum) = self.maximum {
                writer.next().write_tagged_implicit(Tag::context(1), |writer| writer.write_u64(maximum));
            }
            Ok(())
        })
    }
}

/// ```text
/// GeneralSubtrees ::= SEQUENCE SIZE (1..MAX) OF GeneralSubtree
/// ```
///
/// Member order is kept as decoded. An empty SEQUENCE decodes to an empty list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeneralSubtrees(pub Vec<GeneralSubtree>);

impl GeneralSubtrees {
    pub fn size(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&GeneralSubtree> {
        self.0.get(index)
    }

    pub fn push(&mut self, subtree: GeneralSubtree) {
        self.0.push(subtree);
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneralSubtree> {
        self.0.iter()
    }
}

impl From<Vec<GeneralSubtree>> for GeneralSubtrees {
    fn from(subtrees: Vec<GeneralSubtree>) -> GeneralSubtrees {
        GeneralSubtrees(subtrees)
    }
}

impl BERDecodable for GeneralSubtrees {
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        reader.collect_sequence_of(GeneralSubtree::decode_ber).map(GeneralSubtrees)
    }
}

impl DerEncode for GeneralSubtrees {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        writer.write_sequence(|writer| {
            for subtree in self.0.iter() {
                subtree.encode_der(writer.next())?;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::der::decode_der;
    use crate::error::Error;

    fn dns(name: &str) -> GeneralName {
        GeneralName::DnsName(name.to_string())
    }

    #[test]
    fn default_minimum_should_be_omitted () {
        let expected = vec!(0x30,0x06, // SEQUENCE, 6 bytes
            0x82,0x04, // [2] IMPLICIT, 4 bytes -- DNSName
                0x74,0x65,0x73,0x74); // "test"
        let subtree = GeneralSubtree::new(dns("test"));
        assert_eq!(subtree.to_der().unwrap(), expected);

        let decoded = decode_der::<GeneralSubtree>(&expected).unwrap();
        assert_eq!(decoded.minimum(), 0);
        assert_eq!(decoded.maximum(), None);
        assert_eq!(decoded, subtree);
    }

    #[test]
    fn bounds_should_encode_correctly () {
        let expected = vec!(0x30,0x0c, // SEQUENCE, 12 bytes
            0x82,0x04, // [2] IMPLICIT, 4 bytes -- DNSName
                0x74,0x65,0x73,0x74, // "test"
            0x80,0x01, // [0] IMPLICIT INTEGER, 1 byte -- minimum
                0x01,
            0x81,0x01, // [1] IMPLICIT INTEGER, 1 byte -- maximum
                0x05);
        let subtree = GeneralSubtree::with_bounds(dns("test"), 1, Some(5));
        assert_eq!(subtree.to_der().unwrap(), expected);
        assert_eq!(decode_der::<GeneralSubtree>(&expected), Ok(subtree));
    }

    #[test]
    fn explicit_zero_minimum_should_decode_to_default () {
        let asserted = vec!(0x30,0x09, // SEQUENCE, 9 bytes
            0x82,0x04, 0x74,0x65,0x73,0x74,
            0x80,0x01, 0x00); // [0] 0
        let decoded = decode_der::<GeneralSubtree>(&asserted).unwrap();
        assert_eq!(decoded, GeneralSubtree::new(dns("test")));
    }

    #[test]
    fn maximum_only_should_round_trip () {
        let expected = vec!(0x30,0x09, // SEQUENCE, 9 bytes
            0x82,0x04, 0x74,0x65,0x73,0x74,
            0x81,0x01, 0x00); // [1] 0
        let subtree = GeneralSubtree::with_bounds(dns("test"), 0, Some(0));
        assert_eq!(subtree.to_der().unwrap(), expected);
        assert_eq!(decode_der::<GeneralSubtree>(&expected), Ok(subtree));
    }

    #[test]
    fn unknown_bound_tag_should_fail () {
        let asserted = vec!(0x30,0x09,
            0x82,0x04, 0x74,0x65,0x73,0x74,
            0x82,0x01, 0x01); // [2] is not a bound
        assert!(matches!(decode_der::<GeneralSubtree>(&asserted), Err(Error::Format(_))));
    }

    #[test]
    fn constructed_bound_should_fail () {
        let asserted = vec!(0x30,0x0b,
            0x82,0x04, 0x74,0x65,0x73,0x74,
            0xa0,0x03, 0x02,0x01,0x01); // [0] constructed
        assert!(matches!(decode_der::<GeneralSubtree>(&asserted), Err(Error::Format(_))));
    }

    #[test]
    fn repeated_bound_should_fail () {
        let asserted = vec!(0x30,0x0c,
            0x82,0x04, 0x74,0x65,0x73,0x74,
            0x81,0x01, 0x01,
            0x81,0x01, 0x02);
        assert!(matches!(decode_der::<GeneralSubtree>(&asserted), Err(Error::Format(_))));
    }

    #[test]
    fn subtrees_should_preserve_order () {
        let expected = vec!(0x30,0x10, // SEQUENCE, 16 bytes
            0x30,0x06, 0x82,0x04, 0x74,0x65,0x73,0x74, // "test"
            0x30,0x06, 0x82,0x04, 0x61,0x63,0x6d,0x65); // "acme"
        let subtrees = GeneralSubtrees(vec!(
            GeneralSubtree::new(dns("test")),
            GeneralSubtree::new(dns("acme")),
        ));
        assert_eq!(subtrees.to_der().unwrap(), expected);

        let decoded = decode_der::<GeneralSubtrees>(&expected).unwrap();
        assert_eq!(decoded.get(0).map(|s| s.base()), Some(&dns("test")));
        assert_eq!(decoded.get(1).map(|s| s.base()), Some(&dns("acme")));
    }

    #[test]
    fn empty_subtrees_should_decode () {
        let decoded = decode_der::<GeneralSubtrees>(&[0x30,0x00]).unwrap();
        assert_eq!(decoded.size(), 0);
        assert_eq!(decoded.to_der().unwrap(), vec!(0x30,0x00));
    }
}
