use yasna::{
    ASN1Result,
    DERWriter,
    BERReader,
    BERDecodable,
    models::ObjectIdentifier,
};

use crate::der::{DerEncode, peek_tag};
use crate::error::Result;

// OID: 1.2.840.113549.1.1.1
// {
//      iso(1)
//      member-body(2)
//      us(840)
//      rsadsi(113549)
//      pkcs(1)
//      pkcs-1(1)
//      rsaEncryption(1)
// }
pub const OID_RSA_ENCRYPTION : &'static [u64] = &[1,2,840,113549,1,1,1];

// RFC 5480 2.1.1
// OID: 1.2.840.10045.2.1
// {
//      iso(1)
//      member-body(2)
//      us(840)
//      ansi-x962(10045)
//      keyType(2)
//      ecPublicKey(1)
// }
pub const OID_EC_PUBLIC_KEY : &'static [u64] = &[1,2,840,10045,2,1];

const DER_NULL: [u8; 2] = [0x05, 0x00];

/// ```text
/// AlgorithmIdentifier  ::=  SEQUENCE  {
///      algorithm               OBJECT IDENTIFIER,
///      parameters              ANY DEFINED BY algorithm OPTIONAL  }
/// ```
///
/// Parameters are held as the raw DER of the element. `None` leaves the field
/// out of the encoding entirely, which is not the same as an explicit NULL.
#[derive(Clone, Debug, PartialEq)]
pub struct AlgorithmId {
    oid: ObjectIdentifier,
    params: Option<Vec<u8>>,
}

impl AlgorithmId {
    pub fn new(oid: ObjectIdentifier, params: Option<Vec<u8>>) -> AlgorithmId {
        AlgorithmId { oid, params }
    }

    pub fn from_slice(components: &[u64]) -> AlgorithmId {
        AlgorithmId::new(ObjectIdentifier::from_slice(components), None)
    }

    /// An identifier whose parameters are an explicit NULL, as RSA requires.
    pub fn with_null_params(components: &[u64]) -> AlgorithmId {
        AlgorithmId::new(ObjectIdentifier::from_slice(components), Some(DER_NULL.to_vec()))
    }

    pub fn oid(&self) -> &ObjectIdentifier {
        &self.oid
    }

    pub fn params(&self) -> Option<&[u8]> {
        self.params.as_deref()
    }

    pub fn set_params(&mut self, params: Option<Vec<u8>>) {
        self.params = params;
    }

    pub(crate) fn is(&self, components: &[u64]) -> bool {
        &self.oid.components()[..] == components
    }
}

impl BERDecodable for AlgorithmId {
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        reader.read_sequence(|reader| {
            let oid = reader.next().read_oid()?;
            let params = match peek_tag(reader)? {
                Some(_) => Some(reader.next().read_der()?),
                None => None,
            };
            Ok(AlgorithmId { oid, params })
        })
    }
}

impl DerEncode for AlgorithmId {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        writer.write_sequence(|writer| {
            writer.next().write_oid(&self.oid);
            if let Some(params) = &self.params {
                writer.next().write_der(params);
            }
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::der::decode_der;

    #[test]
    fn rsa_identifier_should_encode_null_params () {
        let expected = vec!(0x30,0x0d, // SEQUENCE, 13 bytes
            0x06,0x09, // OID, 9 bytes
                0x2a,0x86,0x48,0x86,0xf7,0x0d,0x01,0x01,0x01, // encoding of OID(1.2.840.113549.1.1.1)
            0x05,0x00); // NULL
        let alg = AlgorithmId::with_null_params(OID_RSA_ENCRYPTION);
        assert_eq!(alg.to_der().unwrap(), expected);
        assert_eq!(decode_der::<AlgorithmId>(&expected), Ok(alg));
    }

    #[test]
    fn p256_identifier_should_decode_correctly () {
        let asserted = vec!(0x30,0x13, // SEQUENCE, 19 bytes
            0x06,0x07, // OID, 7 bytes
                0x2a,0x86,0x48,0xce,0x3d,0x02,0x01, // encoding of OID(1.2.840.10045.2.1)
            0x06,0x08, // OID, 8 bytes
                0x2a,0x86,0x48,0xce,0x3d,0x03,0x01,0x07);// encoding of OID(1.2.840.10045.3.1.7)
        let alg = decode_der::<AlgorithmId>(&asserted).unwrap();
        assert!(alg.is(OID_EC_PUBLIC_KEY));
        assert_eq!(alg.params(), Some(&asserted[11..]));
        assert_eq!(alg.to_der().unwrap(), asserted);
    }

    #[test]
    fn absent_params_should_be_omitted () {
        let expected = vec!(0x30,0x09, // SEQUENCE, 9 bytes
            0x06,0x07, // OID, 7 bytes
                0x2a,0x86,0x48,0xce,0x3d,0x02,0x01);
        let alg = AlgorithmId::from_slice(OID_EC_PUBLIC_KEY);
        assert_eq!(alg.to_der().unwrap(), expected);
        assert_eq!(decode_der::<AlgorithmId>(&expected).unwrap().params(), None);
    }

    #[test]
    fn trailing_element_after_params_should_fail () {
        let asserted = vec!(0x30,0x09,
            0x06,0x03, 0x2a,0x03,0x04,
            0x05,0x00,
            0x05,0x00);
        assert!(decode_der::<AlgorithmId>(&asserted).is_err());
    }
}
