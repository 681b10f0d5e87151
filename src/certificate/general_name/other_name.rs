use yasna::{
    ASN1Result,
    DERWriter,
    BERReader,
    BERDecodable,
    Tag,
    models::ObjectIdentifier,
};

use crate::der::DerEncode;
use crate::error::Result;

/// ```text
/// OtherName ::= SEQUENCE {
///      type-id    OBJECT IDENTIFIER,
///      value      [0] EXPLICIT ANY DEFINED BY type-id }
/// ```
///
/// The value is carried as raw DER.
#[derive(Clone, Debug, PartialEq)]
pub struct OtherName {
    type_id: ObjectIdentifier,
    value: Vec<u8>,
}

impl OtherName {
    pub fn new(type_id: ObjectIdentifier, value: Vec<u8>) -> OtherName {
        OtherName { type_id, value }
    }

    pub fn type_id(&self) -> &ObjectIdentifier {
        &self.type_id
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

impl BERDecodable for OtherName {
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        reader.read_sequence(|reader| {
            let type_id = reader.next().read_oid()?;
            let value = reader.next().read_tagged(Tag::context(0), |reader| reader.read_der())?;
            Ok(OtherName { type_id, value })
        })
    }
}

impl DerEncode for OtherName {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        writer.write_sequence(|writer| {
            writer.next().write_oid(&self.type_id);
            writer.next().write_tagged(Tag::context(0), |writer| writer.write_der(&self.value));
        });
        Ok(())
    }
}
