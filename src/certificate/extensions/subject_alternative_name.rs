use yasna::{
    ASN1Result,
    DERWriter,
    BERReader,
    BERDecodable,
    models::ObjectIdentifier,
};

use crate::certificate::extensions::Extension;
use crate::certificate::general_name::{GeneralName, GeneralNames};
use crate::der::{DerEncode, decode_der};
use crate::error::{Error, Result};

// OID: 2.5.29.17
// {
//      joint-iso-itu-t(2)
//      ds(5)
//      certificateExtension(29)
//      subjectAltName(17)
// }
pub const OID_CE_SUBJECT_ALT_NAME : &'static [u64] = &[2,5,29,17];

/// ```text
/// SubjectAltName ::= GeneralNames
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubjectAlternativeName(pub GeneralNames);

impl SubjectAlternativeName {
    pub fn names(&self) -> impl Iterator<Item = &GeneralName> {
        self.0.iter()
    }
}

impl From<Vec<GeneralName>> for SubjectAlternativeName {
    fn from(names: Vec<GeneralName>) -> SubjectAlternativeName {
        SubjectAlternativeName(GeneralNames(names))
    }
}

impl BERDecodable for SubjectAlternativeName {
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        Ok(SubjectAlternativeName(GeneralNames::decode_ber(reader)?))
    }
}

impl DerEncode for SubjectAlternativeName {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        self.0.encode_der(writer)
    }
}

impl TryFrom<&SubjectAlternativeName> for Extension {
    type Error = Error;

    fn try_from(san: &SubjectAlternativeName) -> Result<Extension> {
        Ok(Extension::new(
            ObjectIdentifier::from_slice(OID_CE_SUBJECT_ALT_NAME),
            false,
            san.to_der()?,
        ))
    }
}

impl TryFrom<&Extension> for SubjectAlternativeName {
    type Error = Error;

    fn try_from(ext: &Extension) -> Result<SubjectAlternativeName> {
        ext.expect_oid(OID_CE_SUBJECT_ALT_NAME, "subjectAltName")?;
        decode_der(ext.value())
    }
}
