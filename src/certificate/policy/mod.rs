pub mod notice;
pub mod qualifier;

use yasna::{
    ASN1Result,
    DERWriter,
    BERReader,
    BERDecodable,
    models::ObjectIdentifier,
};

use crate::der::{DerEncode, peek_tag};
use crate::error::Result;

#[cfg(feature = "tracing")]
use tracing::{debug};

pub use notice::*;
pub use qualifier::*;

// OID: 2.5.29.32.0
// {
//      joint-iso-itu-t(2)
//      ds(5)
//      certificateExtension(29)
//      certificatePolicies(32)
//      anyPolicy(0)
// }
pub const OID_ANY_POLICY : &'static [u64] = &[2,5,29,32,0];

/// ```text
/// CertPolicyId ::= OBJECT IDENTIFIER
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CertificatePolicyId(pub ObjectIdentifier);

impl CertificatePolicyId {
    pub fn any_policy() -> CertificatePolicyId {
        CertificatePolicyId(ObjectIdentifier::from_slice(OID_ANY_POLICY))
    }

    pub fn oid(&self) -> &ObjectIdentifier {
        &self.0
    }
}

impl From<ObjectIdentifier> for CertificatePolicyId {
    fn from(oid: ObjectIdentifier) -> CertificatePolicyId {
        CertificatePolicyId(oid)
    }
}

impl BERDecodable for CertificatePolicyId {
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        Ok(CertificatePolicyId(reader.read_oid()?))
    }
}

impl DerEncode for CertificatePolicyId {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        writer.write_oid(&self.0);
        Ok(())
    }
}

/// ```text
/// PolicyInformation ::= SEQUENCE {
///      policyIdentifier   CertPolicyId,
///      policyQualifiers   SEQUENCE SIZE (1..MAX) OF
///                              PolicyQualifierInfo OPTIONAL }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CertificatePolicyInfo {
    id: CertificatePolicyId,
    qualifiers: Option<PolicyQualifiers>,
}

impl CertificatePolicyInfo {
    pub fn new(id: CertificatePolicyId, qualifiers: Option<PolicyQualifiers>) -> CertificatePolicyInfo {
        CertificatePolicyInfo { id, qualifiers }
    }

    pub fn id(&self) -> &CertificatePolicyId {
        &self.id
    }

    pub fn qualifiers(&self) -> Option<&PolicyQualifiers> {
        self.qualifiers.as_ref()
    }
}

impl BERDecodable for CertificatePolicyInfo {
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "CertificatePolicyInfo::decode_ber", skip_all))]
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        reader.read_sequence(|reader| {
            let id = CertificatePolicyId::decode_ber(reader.next())?;
            // Some root certificates stop right after the identifier.
            let qualifiers = match peek_tag(reader)? {
                Some(_) => Some(PolicyQualifiers::decode_ber(reader.next())?),
                None => {
                    #[cfg(feature = "tracing")]
                    debug!("policy information carries no qualifiers");
                    None
                },
            };
            Ok(CertificatePolicyInfo { id, qualifiers })
        })
    }
}

impl DerEncode for CertificatePolicyInfo {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        writer.write_sequence(|writer| {
            self.id.encode_der(writer.next())?;
            if let Some(qualifiers) = &self.qualifiers {
                qualifiers.encode_der(writer.next())?;
            }
            Ok(())
        })
    }
}

/// ```text
/// PolicyMappings ::= SEQUENCE SIZE (1..MAX) OF SEQUENCE {
///      issuerDomainPolicy      CertPolicyId,
///      subjectDomainPolicy     CertPolicyId }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CertificatePolicyMap {
    issuer_domain: CertificatePolicyId,
    subject_domain: CertificatePolicyId,
}

impl CertificatePolicyMap {
    pub fn new(issuer_domain: CertificatePolicyId, subject_domain: CertificatePolicyId) -> CertificatePolicyMap {
        CertificatePolicyMap { issuer_domain, subject_domain }
    }

    pub fn issuer_domain(&self) -> &CertificatePolicyId {
        &self.issuer_domain
    }

    pub fn subject_domain(&self) -> &CertificatePolicyId {
        &self.subject_domain
    }
}

impl BERDecodable for CertificatePolicyMap {
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        reader.read_sequence(|reader| {
            let issuer_domain = CertificatePolicyId::decode_ber(reader.next())?;
            let subject_domain = CertificatePolicyId::decode_ber(reader.next())?;
            Ok(CertificatePolicyMap { issuer_domain, subject_domain })
        })
    }
}

impl DerEncode for CertificatePolicyMap {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        writer.write_sequence(|writer| {
            self.issuer_domain.encode_der(writer.next())?;
            self.subject_domain.encode_der(writer.next())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::der::decode_der;
    use crate::error::Error;

    #[test]
    fn policy_info_with_only_identifier_should_decode () {
        let asserted = vec!(0x30,0x06, // SEQUENCE, 6 bytes
            0x06,0x04, // OID, 4 bytes
                0x55,0x1d,0x20,0x00); // encoding of OID(2.5.29.32.0)
        let info = decode_der::<CertificatePolicyInfo>(&asserted).unwrap();
        assert_eq!(info.id(), &CertificatePolicyId::any_policy());
        assert_eq!(info.qualifiers(), None);
        assert_eq!(info.to_der().unwrap(), asserted);
    }

    #[test]
    fn policy_info_with_cps_qualifier_should_round_trip () {
        let asserted = vec!(0x30,0x1a, // SEQUENCE, 26 bytes
            0x06,0x04, // OID, 4 bytes
                0x55,0x1d,0x20,0x00, // encoding of OID(2.5.29.32.0)
            0x30,0x12, // SEQUENCE, 18 bytes -- policyQualifiers
                0x30,0x10, // SEQUENCE, 16 bytes -- PolicyQualifierInfo
                    0x06,0x08, // OID, 8 bytes
                        0x2b,0x06,0x01,0x05,0x05,0x07,0x02,0x01, // encoding of OID(1.3.6.1.5.5.7.2.1)
                    0x16,0x04, // IA5String, 4 bytes
                        0x68,0x74,0x74,0x70); // "http"
        let info = CertificatePolicyInfo::new(
            CertificatePolicyId::any_policy(),
            Some(PolicyQualifiers(vec!(PolicyQualifierInfo::cps_uri("http").unwrap()))),
        );
        assert_eq!(info.to_der().unwrap(), asserted);
        assert_eq!(decode_der::<CertificatePolicyInfo>(&asserted), Ok(info));
    }

    #[test]
    fn policy_info_with_trailing_garbage_should_fail () {
        let asserted = vec!(0x30,0x09, // SEQUENCE, 9 bytes
            0x06,0x04, // OID, 4 bytes
                0x55,0x1d,0x20,0x00,
            0x02,0x01,0x01); // INTEGER where policyQualifiers belongs
        assert!(matches!(decode_der::<CertificatePolicyInfo>(&asserted), Err(Error::Format(_))));
    }

    #[test]
    fn policy_map_should_encode_correctly () {
        let expected = vec!(0x30,0x0c, // SEQUENCE, 12 bytes
            0x06,0x04, // OID, 4 bytes
                0x2a,0x03,0x04,0x05, // encoding of OID(1.2.3.4.5)
            0x06,0x04, // OID, 4 bytes
                0x2a,0x03,0x04,0x06); // encoding of OID(1.2.3.4.6)
        let map = CertificatePolicyMap::new(
            CertificatePolicyId(ObjectIdentifier::from_slice(&[1,2,3,4,5])),
            CertificatePolicyId(ObjectIdentifier::from_slice(&[1,2,3,4,6])),
        );
        assert_eq!(map.to_der().unwrap(), expected);

        let decoded = decode_der::<CertificatePolicyMap>(&expected).unwrap();
        assert_eq!(decoded.issuer_domain().oid(), &ObjectIdentifier::from_slice(&[1,2,3,4,5]));
        assert_eq!(decoded.subject_domain().oid(), &ObjectIdentifier::from_slice(&[1,2,3,4,6]));
        assert_eq!(decoded, map);
    }

    #[test]
    fn policy_map_missing_subject_domain_should_fail () {
        let asserted = vec!(0x30,0x06, 0x06,0x04, 0x2a,0x03,0x04,0x05);
        assert!(decode_der::<CertificatePolicyMap>(&asserted).is_err());
    }
}
