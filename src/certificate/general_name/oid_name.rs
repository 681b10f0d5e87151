use yasna::{
    ASN1Result,
    DERWriter,
    BERReader,
    BERDecodable,
    models::ObjectIdentifier,
};

use crate::der::DerEncode;
use crate::error::Result;

/// registeredID: a name that is just an OBJECT IDENTIFIER.
#[derive(Clone, Debug, PartialEq)]
pub struct OidName(pub ObjectIdentifier);

impl OidName {
    pub fn from_slice(components: &[u64]) -> OidName {
        OidName(ObjectIdentifier::from_slice(components))
    }

    pub fn oid(&self) -> &ObjectIdentifier {
        &self.0
    }
}

impl BERDecodable for OidName {
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        Ok(OidName(reader.read_oid()?))
    }
}

impl DerEncode for OidName {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        writer.write_oid(&self.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::der::decode_der;

    #[test]
    fn oid_name_should_encode_as_bare_oid () {
        let expected = vec!(0x06,0x03, // OID, 3 bytes
            0x2a,0x03,0x04); // encoding of OID(1.2.3.4)
        let name = OidName::from_slice(&[1,2,3,4]);
        assert_eq!(name.to_der().unwrap(), expected);
        assert_eq!(decode_der::<OidName>(&expected), Ok(name));
    }
}
