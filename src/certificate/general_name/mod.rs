pub mod oid_name;
pub mod other_name;
pub mod edi_party_name;
pub mod ip_address_name;
pub mod subtree;

use yasna::{
    ASN1Result,
    DERWriter,
    BERReader,
    BERDecodable,
    Tag,
    TagClass,
};

use crate::certificate::name::X500Name;
use crate::charset::CharSet;
use crate::der::{DerEncode, invalid};
use crate::error::Result;

#[cfg(feature = "tracing")]
use tracing::{debug};

pub use oid_name::*;
pub use other_name::*;
pub use edi_party_name::*;
pub use ip_address_name::*;
pub use subtree::*;

/// Context tag numbers of the GeneralName CHOICE.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeneralNameType {
    OtherName = 0,
    Rfc822Name = 1,
    DnsName = 2,
    X400Address = 3,
    DirectoryName = 4,
    EdiPartyName = 5,
    Uri = 6,
    IpAddress = 7,
    RegisteredId = 8,
}

impl GeneralNameType {
    pub fn tag(self) -> Tag {
        Tag::context(self as u64)
    }
}

/// ```text
/// GeneralName ::= CHOICE {
///      otherName                 [0]  OtherName,
///      rfc822Name                [1]  IA5String,
///      dNSName                   [2]  IA5String,
///      x400Address               [3]  ORAddress,
///      directoryName             [4]  Name,
///      ediPartyName              [5]  EDIPartyName,
///      uniformResourceIdentifier [6]  IA5String,
///      iPAddress                 [7]  OCTET STRING,
///      registeredID              [8]  OBJECT IDENTIFIER }
/// ```
///
/// All alternatives are implicitly tagged except directoryName, whose tag is
/// explicit because Name is itself a CHOICE. x400Address is not supported.
#[derive(Clone, Debug, PartialEq)]
pub enum GeneralName {
    OtherName(OtherName),
    Rfc822Name(String),
    DnsName(String),
    DirectoryName(X500Name),
    EdiPartyName(EdiPartyName),
    Uri(String),
    IpAddress(IpAddressName),
    RegisteredId(OidName),
}

impl GeneralName {
    pub fn name_type(&self) -> GeneralNameType {
        match self {
            GeneralName::OtherName(_) => GeneralNameType::OtherName,
            GeneralName::Rfc822Name(_) => GeneralNameType::Rfc822Name,
            GeneralName::DnsName(_) => GeneralNameType::DnsName,
            GeneralName::DirectoryName(_) => GeneralNameType::DirectoryName,
            GeneralName::EdiPartyName(_) => GeneralNameType::EdiPartyName,
            GeneralName::Uri(_) => GeneralNameType::Uri,
            GeneralName::IpAddress(_) => GeneralNameType::IpAddress,
            GeneralName::RegisteredId(_) => GeneralNameType::RegisteredId,
        }
    }
}

impl BERDecodable for GeneralName {
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "GeneralName::decode_ber", skip_all))]
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        let tag = reader.lookahead_tag()?;
        if tag.tag_class != TagClass::ContextSpecific {
            return Err(invalid())
        }
        #[cfg(feature = "tracing")]
        debug!("parsing general name [{}]", tag.tag_number);
        let name = match tag.tag_number {
            0 => GeneralName::OtherName(reader.read_tagged_implicit(tag, OtherName::decode_ber)?),
            1 => GeneralName::Rfc822Name(reader.read_tagged_implicit(tag, |reader| CharSet::Ia5.read_content(reader))?),
            2 => GeneralName::DnsName(reader.read_tagged_implicit(tag, |reader| CharSet::Ia5.read_content(reader))?),
            4 => GeneralName::DirectoryName(reader.read_tagged(tag, X500Name::decode_ber)?),
            5 => GeneralName::EdiPartyName(reader.read_tagged_implicit(tag, EdiPartyName::decode_ber)?),
            6 => GeneralName::Uri(reader.read_tagged_implicit(tag, |reader| CharSet::Ia5.read_content(reader))?),
            7 => GeneralName::IpAddress(reader.read_tagged_implicit(tag, IpAddressName::decode_ber)?),
            8 => GeneralName::RegisteredId(reader.read_tagged_implicit(tag, OidName::decode_ber)?),
            _ => return Err(invalid()),
        };
        Ok(name)
    }
}

impl DerEncode for GeneralName {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        let tag = self.name_type().tag();
        match self {
            GeneralName::OtherName(name) => writer.write_tagged_implicit(tag, |writer| name.encode_der(writer)),
            GeneralName::Rfc822Name(text)
            | GeneralName::DnsName(text)
            | GeneralName::Uri(text) => CharSet::Ia5.write_implicit(writer, tag, text),
            GeneralName::DirectoryName(name) => writer.write_tagged(tag, |writer| name.encode_der(writer)),
            GeneralName::EdiPartyName(name) => writer.write_tagged_implicit(tag, |writer| name.encode_der(writer)),
            GeneralName::IpAddress(address) => writer.write_tagged_implicit(tag, |writer| address.encode_der(writer)),
            GeneralName::RegisteredId(oid) => writer.write_tagged_implicit(tag, |writer| oid.encode_der(writer)),
        }
    }
}

/// ```text
/// GeneralNames ::= SEQUENCE SIZE (1..MAX) OF GeneralName
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeneralNames(pub Vec<GeneralName>);

impl GeneralNames {
    pub fn size(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneralName> {
        self.0.iter()
    }
}

impl From<Vec<GeneralName>> for GeneralNames {
    fn from(names: Vec<GeneralName>) -> GeneralNames {
        GeneralNames(names)
    }
}

impl BERDecodable for GeneralNames {
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        reader.collect_sequence_of(GeneralName::decode_ber).map(GeneralNames)
    }
}

impl DerEncode for GeneralNames {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        writer.write_sequence(|writer| {
            for name in self.0.iter() {
                name.encode_der(writer.next())?;
            }
            Ok(())
        })
    }
}
