use yasna::{
    ASN1Result,
    DERWriter,
    BERReader,
    BERDecodable,
    models::ObjectIdentifier,
};

use crate::certificate::extensions::Extension;
use crate::certificate::policy::CertificatePolicyInfo;
use crate::der::{DerEncode, decode_der};
use crate::error::{Error, Result};

// OID: 2.5.29.32
// {
//      joint-iso-itu-t(2)
//      ds(5)
//      certificateExtension(29)
//      certificatePolicies(32)
// }
pub const OID_CE_CERTIFICATE_POLICIES : &'static [u64] = &[2,5,29,32];

/// ```text
/// certificatePolicies ::= SEQUENCE SIZE (1..MAX) OF PolicyInformation
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CertificatePolicies(pub Vec<CertificatePolicyInfo>);

impl CertificatePolicies {
    pub fn iter(&self) -> impl Iterator<Item = &CertificatePolicyInfo> {
        self.0.iter()
    }
}

impl BERDecodable for CertificatePolicies {
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        reader.collect_sequence_of(CertificatePolicyInfo::decode_ber).map(CertificatePolicies)
    }
}

impl DerEncode for CertificatePolicies {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        writer.write_sequence(|writer| {
            for info in self.0.iter() {
                info.encode_der(writer.next())?;
            }
            Ok(())
        })
    }
}

impl TryFrom<&CertificatePolicies> for Extension {
    type Error = Error;

    fn try_from(policies: &CertificatePolicies) -> Result<Extension> {
        Ok(Extension::new(
            ObjectIdentifier::from_slice(OID_CE_CERTIFICATE_POLICIES),
            false,
            policies.to_der()?,
        ))
    }
}

impl TryFrom<&Extension> for CertificatePolicies {
    type Error = Error;

    fn try_from(ext: &Extension) -> Result<CertificatePolicies> {
        ext.expect_oid(OID_CE_CERTIFICATE_POLICIES, "certificatePolicies")?;
        decode_der(ext.value())
    }
}
