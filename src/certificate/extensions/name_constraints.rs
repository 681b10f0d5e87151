use yasna::{
    ASN1Result,
    DERWriter,
    BERReader,
    BERDecodable,
    Tag,
    models::ObjectIdentifier,
};

use crate::certificate::extensions::Extension;
use crate::certificate::general_name::GeneralSubtrees;
use crate::der::{DerEncode, decode_der, invalid, peek_tag};
use crate::error::{Error, Result};

#[cfg(feature = "tracing")]
use tracing::{debug};

// OID: 2.5.29.30
// {
//      joint-iso-itu-t(2)
//      ds(5)
//      certificateExtension(29)
//      nameConstraints(30)
// }
pub const OID_CE_NAME_CONSTRAINTS : &'static [u64] = &[2,5,29,30];

/// ```text
/// NameConstraints ::= SEQUENCE {
///      permittedSubtrees       [0]     GeneralSubtrees OPTIONAL,
///      excludedSubtrees        [1]     GeneralSubtrees OPTIONAL }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NameConstraints {
    pub permitted: Option<GeneralSubtrees>,
    pub excluded: Option<GeneralSubtrees>,
}

impl BERDecodable for NameConstraints {
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "NameConstraints::decode_ber", skip_all))]
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        #[cfg(feature = "tracing")]
        debug!("parsing name constraints");
        reader.read_sequence(|reader| {
            let mut permitted = None;
            let mut excluded = None;
            while let Some(tag) = peek_tag(reader)? {
                let slot = if tag == Tag::context(0) {
                    &mut permitted
                } else if tag == Tag::context(1) {
                    &mut excluded
                } else {
                    return Err(invalid())
                };
                if slot.is_some() {
                    return Err(invalid())
                }
                *slot = Some(reader.next().read_tagged_implicit(tag, GeneralSubtrees::decode_ber)?);
            }
            Ok(NameConstraints { permitted, excluded })
        })
    }
}

impl DerEncode for NameConstraints {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        writer.write_sequence(|writer| {
            if let Some(permitted) = &self.permitted {
                writer.next().write_tagged_implicit(Tag::context(0), |writer| permitted.encode_der(writer))?;
            }
            if let Some(excluded) = &self.excluded {
                writer.next().write_tagged_implicit(Tag::context(1), |writer| excluded.encode_der(writer))?;
            }
            Ok(())
        })
    }
}

/// Name constraints are always marked critical.
impl TryFrom<&NameConstraints> for Extension {
    type Error = Error;

    fn try_from(constraints: &NameConstraints) -> Result<Extension> {
        Ok(Extension::new(
            ObjectIdentifier::from_slice(OID_CE_NAME_CONSTRAINTS),
            true,
            constraints.to_der()?,
        ))
    }
}

impl TryFrom<&Extension> for NameConstraints {
    type Error = Error;

    fn try_from(ext: &Extension) -> Result<NameConstraints> {
        ext.expect_oid(OID_CE_NAME_CONSTRAINTS, "nameConstraints")?;
        decode_der(ext.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certificate::general_name::{GeneralName, GeneralSubtree};

    #[test]
    fn name_constraints_should_encode_correctly () {
        let expected = vec!(0x30,0x16, // SEQUENCE, 22 bytes -- nameConstraints extension
            0x06,0x03, // OID, 3 bytes
                0x55,0x1d,0x1e, // encoding of OID(2.5.29.30)
            0x01,0x01, // BOOL, 1 byte
                0xff, // TRUE (is critical)
            0x04,0x0c, // OCTET STRING, 12 bytes
                0x30,0x0a, // SEQUENCE, 10 bytes -- NameConstraints
                    0xa0,0x08, // [0] IMPLICIT, 8 bytes -- permittedSubtrees
                        0x30,0x06, // SEQUENCE, 6 bytes -- GeneralSubtree
                            0x82,0x04, // [2] IMPLICIT, 4 bytes -- DNSName
                                0x74,0x65,0x73,0x74); // "test"
        let constraints = NameConstraints {
            permitted: Some(GeneralSubtrees(vec!(GeneralSubtree::new(GeneralName::DnsName("test".to_string()))))),
            excluded: None,
        };
        let ext = Extension::try_from(&constraints).unwrap();
        assert!(ext.is_name_constraints());
        assert!(ext.is_critical());
        assert_eq!(ext.to_der().unwrap(), expected);

        let decoded = decode_der::<Extension>(&expected).unwrap();
        assert_eq!(NameConstraints::try_from(&decoded), Ok(constraints));
    }

    #[test]
    fn excluded_subtrees_should_round_trip () {
        let expected = vec!(0x30,0x0e, // SEQUENCE, 14 bytes
            0xa1,0x0c, // [1] IMPLICIT, 12 bytes -- excludedSubtrees
                0x30,0x0a, // SEQUENCE, 10 bytes -- GeneralSubtree
                    0x87,0x08, // [7] IMPLICIT, 8 bytes -- iPAddress
                        0x0a,0x00,0x00,0x00, 0xff,0x00,0x00,0x00); // 10.0.0.0/8
        let decoded = decode_der::<NameConstraints>(&expected).unwrap();
        assert_eq!(decoded.permitted, None);
        let excluded = decoded.excluded.as_ref().unwrap();
        assert_eq!(excluded.get(0).map(|s| s.base()), Some(&GeneralName::IpAddress("10.0.0.0/8".parse().unwrap())));
        assert_eq!(decoded.to_der().unwrap(), expected);
    }

    #[test]
    fn repeated_permitted_subtrees_should_fail () {
        let asserted = vec!(0x30,0x04, 0xa0,0x00, 0xa0,0x00);
        assert!(matches!(decode_der::<NameConstraints>(&asserted), Err(Error::Format(_))));
    }
}
