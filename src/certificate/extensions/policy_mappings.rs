use yasna::{
    ASN1Result,
    DERWriter,
    BERReader,
    BERDecodable,
    models::ObjectIdentifier,
};

use crate::certificate::extensions::Extension;
use crate::certificate::policy::CertificatePolicyMap;
use crate::der::{DerEncode, decode_der};
use crate::error::{Error, Result};

// OID: 2.5.29.33
// {
//      joint-iso-itu-t(2)
//      ds(5)
//      certificateExtension(29)
//      policyMappings(33)
// }
pub const OID_CE_POLICY_MAPPINGS : &'static [u64] = &[2,5,29,33];

/// ```text
/// PolicyMappings ::= SEQUENCE SIZE (1..MAX) OF SEQUENCE {
///      issuerDomainPolicy      CertPolicyId,
///      subjectDomainPolicy     CertPolicyId }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolicyMappings(pub Vec<CertificatePolicyMap>);

impl BERDecodable for PolicyMappings {
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        reader.collect_sequence_of(CertificatePolicyMap::decode_ber).map(PolicyMappings)
    }
}

impl DerEncode for PolicyMappings {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        writer.write_sequence(|writer| {
            for map in self.0.iter() {
                map.encode_der(writer.next())?;
            }
            Ok(())
        })
    }
}

/// Policy mappings are marked critical.
impl TryFrom<&PolicyMappings> for Extension {
    type Error = Error;

    fn try_from(mappings: &PolicyMappings) -> Result<Extension> {
        Ok(Extension::new(
            ObjectIdentifier::from_slice(OID_CE_POLICY_MAPPINGS),
            true,
            mappings.to_der()?,
        ))
    }
}

impl TryFrom<&Extension> for PolicyMappings {
    type Error = Error;

    fn try_from(ext: &Extension) -> Result<PolicyMappings> {
        ext.expect_oid(OID_CE_POLICY_MAPPINGS, "policyMappings")?;
        decode_der(ext.value())
    }
}
