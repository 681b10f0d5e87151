use yasna::{
    ASN1Result,
    DERWriter,
    BERReader,
    BERDecodable,
    models::ObjectIdentifier,
};

use crate::certificate::extensions::Extension;
use crate::certificate::revocation_reason::RevocationReason;
use crate::der::{DerEncode, decode_der, invalid};
use crate::error::{Error, Result};

#[cfg(feature = "tracing")]
use tracing::{debug};

// OID: 2.5.29.21
// {
//      joint-iso-itu-t(2)
//      ds(5)
//      certificateExtension(29)
//      cRLReasons(21)
// }
pub const OID_CE_CRL_REASON : &'static [u64] = &[2,5,29,21];

/// ```text
/// CRLReason ::= ENUMERATED { ... }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CrlReason(pub RevocationReason);

impl BERDecodable for CrlReason {
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        let code = reader.read_enum()?;
        match RevocationReason::from_code(code) {
            Some(reason) => Ok(CrlReason(reason)),
            None => {
                #[cfg(feature = "tracing")]
                debug!("unknown CRL reason code {}", code);
                Err(invalid())
            },
        }
    }
}

impl DerEncode for CrlReason {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        writer.write_enum(self.0.code());
        Ok(())
    }
}

impl TryFrom<&CrlReason> for Extension {
    type Error = Error;

    fn try_from(reason: &CrlReason) -> Result<Extension> {
        Ok(Extension::new(
            ObjectIdentifier::from_slice(OID_CE_CRL_REASON),
            false,
            reason.to_der()?,
        ))
    }
}

impl TryFrom<&Extension> for CrlReason {
    type Error = Error;

    fn try_from(ext: &Extension) -> Result<CrlReason> {
        ext.expect_oid(OID_CE_CRL_REASON, "cRLReason")?;
        decode_der(ext.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_compromise_should_encode_correctly () {
        let expected = vec!(0x30,0x0a, // SEQUENCE, 10 bytes -- cRLReason extension
            0x06,0x03, // OID, 3 bytes
                0x55,0x1d,0x15, // encoding of OID(2.5.29.21)
            0x04,0x03, // OCTET STRING, 3 bytes
                0x0a,0x01, // ENUMERATED, 1 byte
                    0x01); // keyCompromise
        let reason = CrlReason(RevocationReason::KeyCompromise);
        let ext = Extension::try_from(&reason).unwrap();
        assert!(ext.is_crl_reason());
        assert_eq!(ext.to_der().unwrap(), expected);

        let decoded = decode_der::<Extension>(&expected).unwrap();
        assert_eq!(CrlReason::try_from(&decoded), Ok(reason));
    }

    #[test]
    fn reserved_code_should_fail () {
        assert!(matches!(decode_der::<CrlReason>(&[0x0a,0x01,0x07]), Err(Error::Format(_))));
        assert_eq!(decode_der::<CrlReason>(&[0x0a,0x01,0x08]), Ok(CrlReason(RevocationReason::RemoveFromCrl)));
    }

    #[test]
    fn integer_instead_of_enumerated_should_fail () {
        assert!(decode_der::<CrlReason>(&[0x02,0x01,0x01]).is_err());
    }
}
