pub mod converter;

use yasna::{
    ASN1Result,
    DERWriter,
    BERReader,
    BERDecodable,
    models::ObjectIdentifier,
};

use crate::der::{DerEncode, invalid};
use crate::error::{Error, Result};

#[cfg(feature = "tracing")]
use tracing::{debug};

pub use converter::*;

// OID: 2.5.4.x
// {
//      joint-iso-itu-t(2)
//      ds(5)
//      attributeType(4)
//      ...
// }
pub const OID_AT_COMMON_NAME : &'static [u64] = &[2,5,4,3];
pub const OID_AT_COUNTRY_NAME : &'static [u64] = &[2,5,4,6];
pub const OID_AT_LOCALITY_NAME : &'static [u64] = &[2,5,4,7];
pub const OID_AT_STATE_OR_PROVINCE_NAME : &'static [u64] = &[2,5,4,8];
pub const OID_AT_ORGANIZATION_NAME : &'static [u64] = &[2,5,4,10];
pub const OID_AT_ORGANIZATIONAL_UNIT_NAME : &'static [u64] = &[2,5,4,11];

// OID: 1.2.840.113549.1.9.1
// {
//      iso(1)
//      member-body(2)
//      us(840)
//      rsadsi(113549)
//      pkcs(1)
//      pkcs-9(9)
//      emailAddress(1)
// }
pub const OID_PKCS9_EMAIL_ADDRESS : &'static [u64] = &[1,2,840,113549,1,9,1];

/// The converter used for values of the given attribute type. Types without
/// a dedicated syntax are treated as DirectoryString.
pub fn converter_for(attribute_type: &ObjectIdentifier) -> Box<dyn AvaValueConverter> {
    let components = &attribute_type.components()[..];
    if components == OID_AT_COUNTRY_NAME {
        Box::new(PrintableConverter)
    } else if components == OID_PKCS9_EMAIL_ADDRESS {
        Box::new(Ia5StringConverter)
    } else {
        Box::new(DirStrConverter::default())
    }
}

/// ```text
/// AttributeTypeAndValue ::= SEQUENCE {
///      type     AttributeType,
///      value    AttributeValue }
/// AttributeValue ::= ANY -- DEFINED BY AttributeType
/// ```
///
/// The value is kept as its complete DER element, so unknown attribute types
/// survive a decode/encode cycle untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeTypeAndValue {
    attribute_type: ObjectIdentifier,
    value: Vec<u8>,
}

impl AttributeTypeAndValue {
    pub fn new(attribute_type: ObjectIdentifier, value: Vec<u8>) -> AttributeTypeAndValue {
        AttributeTypeAndValue { attribute_type, value }
    }

    /// Builds the value from text with the converter registered for
    /// `attribute_type`.
    pub fn from_text(attribute_type: ObjectIdentifier, text: &str) -> Result<AttributeTypeAndValue> {
        let value = converter_for(&attribute_type).encode(text)?;
        Ok(AttributeTypeAndValue { attribute_type, value })
    }

    pub fn with_converter(
        attribute_type: ObjectIdentifier,
        text: &str,
        converter: &dyn AvaValueConverter,
    ) -> Result<AttributeTypeAndValue> {
        let value = converter.encode(text)?;
        Ok(AttributeTypeAndValue { attribute_type, value })
    }

    pub fn attribute_type(&self) -> &ObjectIdentifier {
        &self.attribute_type
    }

    /// Raw DER of the value element.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn text(&self) -> Result<String> {
        converter_for(&self.attribute_type).decode(&self.value)
    }
}

impl BERDecodable for AttributeTypeAndValue {
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        reader.read_sequence(|reader| {
            let attribute_type = reader.next().read_oid()?;
            let value = reader.next().read_der()?;
            Ok(AttributeTypeAndValue { attribute_type, value })
        })
    }
}

impl DerEncode for AttributeTypeAndValue {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        writer.write_sequence(|writer| {
            writer.next().write_oid(&self.attribute_type);
            writer.next().write_der(&self.value);
        });
        Ok(())
    }
}

/// ```text
/// RelativeDistinguishedName ::=
///      SET SIZE (1..MAX) OF AttributeTypeAndValue
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RelativeDistinguishedName(Vec<AttributeTypeAndValue>);

impl RelativeDistinguishedName {
    /// A multi-valued RDN. An empty one is refused when encoding.
    pub fn new(atvs: Vec<AttributeTypeAndValue>) -> RelativeDistinguishedName {
        RelativeDistinguishedName(atvs)
    }

    pub fn single(atv: AttributeTypeAndValue) -> RelativeDistinguishedName {
        RelativeDistinguishedName(vec!(atv))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeTypeAndValue> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl BERDecodable for RelativeDistinguishedName {
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "RelativeDistinguishedName::decode_ber", skip_all))]
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        #[cfg(feature = "tracing")]
        debug!("parsing relative distinguished name");
        let atvs = reader.collect_set_of(AttributeTypeAndValue::decode_ber)?;
        if atvs.is_empty() {
            return Err(invalid())
        }
        Ok(RelativeDistinguishedName(atvs))
    }
}

impl DerEncode for RelativeDistinguishedName {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        if self.0.is_empty() {
            return Err(Error::Unencodable("relative distinguished name has no attributes".to_string()))
        }
        writer.write_set_of(|writer| {
            for atv in self.0.iter() {
                atv.encode_der(writer.next())?;
            }
            Ok(())
        })
    }
}

/// ```text
/// Name ::= CHOICE { -- only one possibility for now --
///      rdnSequence  RDNSequence }
/// RDNSequence ::= SEQUENCE OF RelativeDistinguishedName
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct X500Name {
    rdn_sequence: Vec<RelativeDistinguishedName>,
}

impl X500Name {
    pub fn new(rdn_sequence: Vec<RelativeDistinguishedName>) -> X500Name {
        X500Name { rdn_sequence }
    }

    /// RDNs, most significant first.
    pub fn rdns(&self) -> impl Iterator<Item = &RelativeDistinguishedName> {
        self.rdn_sequence.iter()
    }

    /// Appends a single-valued RDN built from text.
    pub fn push_text(&mut self, attribute_type: &[u64], text: &str) -> Result<()> {
        let atv = AttributeTypeAndValue::from_text(ObjectIdentifier::from_slice(attribute_type), text)?;
        self.rdn_sequence.push(RelativeDistinguishedName::single(atv));
        Ok(())
    }

    /// Text of the first attribute of the given type, most significant RDN first.
    pub fn find(&self, attribute_type: &[u64]) -> Option<Result<String>> {
        self.rdn_sequence.iter()
            .flat_map(|rdn| rdn.iter())
            .find(|atv| &atv.attribute_type.components()[..] == attribute_type)
            .map(|atv| atv.text())
    }

    pub fn common_name(&self) -> Option<Result<String>> {
        self.find(OID_AT_COMMON_NAME)
    }

    pub fn is_empty(&self) -> bool {
        self.rdn_sequence.is_empty()
    }
}

impl BERDecodable for X500Name {
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        let rdn_sequence = reader.collect_sequence_of(RelativeDistinguishedName::decode_ber)?;
        Ok(X500Name { rdn_sequence })
    }
}

impl DerEncode for X500Name {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        writer.write_sequence(|writer| {
            for rdn in self.rdn_sequence.iter() {
                rdn.encode_der(writer.next())?;
            }
            Ok(())
        })
    }
}
