use yasna::{
    ASN1Error,
    ASN1ErrorKind,
    ASN1Result,
    BERDecodable,
    BERReaderSeq,
    DERWriter,
    Tag,
};

use crate::error::Result;

/// DER serialization for structures whose encoding can fail, either because a
/// mandatory field was never set or because a string has no representation in
/// the requested character set.
pub trait DerEncode {
    fn encode_der(&self, writer: DERWriter) -> Result<()>;

    fn to_der(&self) -> Result<Vec<u8>> {
        yasna::try_construct_der(|writer| self.encode_der(writer))
    }
}

/// Parses a complete DER buffer into `T`. Trailing bytes are rejected.
pub fn decode_der<T: BERDecodable>(der: &[u8]) -> Result<T> {
    Ok(yasna::parse_der(der, T::decode_ber)?)
}

// Tag of the next element in the sequence, or None once its content is used up.
pub(crate) fn peek_tag(reader: &mut BERReaderSeq) -> ASN1Result<Option<Tag>> {
    reader.read_optional(|reader| reader.lookahead_tag())
}

pub(crate) fn invalid() -> ASN1Error {
    ASN1Error::new(ASN1ErrorKind::Invalid)
}
