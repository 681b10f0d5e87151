use yasna::{
    ASN1Result,
    DERWriter,
    BERReader,
    BERDecodable,
    models::ObjectIdentifier,
};

use crate::certificate::policy::notice::UserNotice;
use crate::charset::{CharSet, TAG_IA5STRING};
use crate::der::{DerEncode, peek_tag};
use crate::error::{Error, Result};

// OID: 1.3.6.1.5.5.7.2.1
// {
//      iso(1)
//      identified-organization(3)
//      dod(6)
//      internet(1)
//      security(5)
//      mechanisms(5)
//      pkix(7)
//      qt(2)
//      id-qt-cps(1)
// }
pub const OID_QT_CPS : &'static [u64] = &[1,3,6,1,5,5,7,2,1];

// OID: 1.3.6.1.5.5.7.2.2
// {
//      iso(1)
//      identified-organization(3)
//      dod(6)
//      internet(1)
//      security(5)
//      mechanisms(5)
//      pkix(7)
//      qt(2)
//      id-qt-unotice(2)
// }
pub const OID_QT_UNOTICE : &'static [u64] = &[1,3,6,1,5,5,7,2,2];

/// The qualifier value. Which variant applies is decided by the DER tag of
/// the value itself: an IA5String is a CPS pointer, anything else a user
/// notice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Qualifier {
    CpsUri(String),
    UserNotice(UserNotice),
}

impl BERDecodable for Qualifier {
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        if reader.lookahead_tag()? == TAG_IA5STRING {
            Ok(Qualifier::CpsUri(CharSet::Ia5.read(reader)?))
        } else {
            Ok(Qualifier::UserNotice(UserNotice::decode_ber(reader)?))
        }
    }
}

impl DerEncode for Qualifier {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        match self {
            Qualifier::CpsUri(uri) => CharSet::Ia5.write(writer, uri),
            Qualifier::UserNotice(notice) => notice.encode_der(writer),
        }
    }
}

/// ```text
/// PolicyQualifierInfo ::= SEQUENCE {
///      policyQualifierId  PolicyQualifierId,
///      qualifier          ANY DEFINED BY policyQualifierId }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PolicyQualifierInfo {
    id: ObjectIdentifier,
    qualifier: Option<Qualifier>,
}

impl PolicyQualifierInfo {
    pub fn new(id: ObjectIdentifier, qualifier: Option<Qualifier>) -> PolicyQualifierInfo {
        PolicyQualifierInfo { id, qualifier }
    }

    pub fn cps_uri(uri: impl Into<String>) -> Result<PolicyQualifierInfo> {
        let uri = uri.into();
        if !CharSet::Ia5.can_encode(&uri) {
            return Err(Error::Unencodable(format!("CPS URI {:?} is not an IA5String", uri)))
        }
        Ok(PolicyQualifierInfo {
            id: ObjectIdentifier::from_slice(OID_QT_CPS),
            qualifier: Some(Qualifier::CpsUri(uri)),
        })
    }

    pub fn user_notice(notice: UserNotice) -> PolicyQualifierInfo {
        PolicyQualifierInfo {
            id: ObjectIdentifier::from_slice(OID_QT_UNOTICE),
            qualifier: Some(Qualifier::UserNotice(notice)),
        }
    }

    pub fn id(&self) -> &ObjectIdentifier {
        &self.id
    }

    pub fn qualifier(&self) -> Option<&Qualifier> {
        self.qualifier.as_ref()
    }
}

impl BERDecodable for PolicyQualifierInfo {
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        reader.read_sequence(|reader| {
            let id = reader.next().read_oid()?;
            let qualifier = match peek_tag(reader)? {
                Some(_) => Some(Qualifier::decode_ber(reader.next())?),
                None => None,
            };
            Ok(PolicyQualifierInfo { id, qualifier })
        })
    }
}

impl DerEncode for PolicyQualifierInfo {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        writer.write_sequence(|writer| {
            writer.next().write_oid(&self.id);
            if let Some(qualifier) = &self.qualifier {
                qualifier.encode_der(writer.next())?;
            }
            Ok(())
        })
    }
}

/// ```text
/// policyQualifiers   SEQUENCE SIZE (1..MAX) OF PolicyQualifierInfo
/// ```
///
/// An empty list is accepted on decode.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolicyQualifiers(pub Vec<PolicyQualifierInfo>);

impl PolicyQualifiers {
    pub fn size(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&PolicyQualifierInfo> {
        self.0.get(index)
    }

    pub fn push(&mut self, info: PolicyQualifierInfo) {
        self.0.push(info);
    }

    pub fn iter(&self) -> impl Iterator<Item = &PolicyQualifierInfo> {
        self.0.iter()
    }
}

impl From<Vec<PolicyQualifierInfo>> for PolicyQualifiers {
    fn from(infos: Vec<PolicyQualifierInfo>) -> PolicyQualifiers {
        PolicyQualifiers(infos)
    }
}

impl BERDecodable for PolicyQualifiers {
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        reader.collect_sequence_of(PolicyQualifierInfo::decode_ber).map(PolicyQualifiers)
    }
}

impl DerEncode for PolicyQualifiers {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        writer.write_sequence(|writer| {
            for info in self.0.iter() {
                info.encode_der(writer.next())?;
            }
            Ok(())
        })
    }
}
