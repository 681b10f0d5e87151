use bytes::Bytes;
use yasna::{
    ASN1Result,
    DERWriter,
    BERReader,
    BERDecodable,
};

use crate::certificate::algorithm_identifier::AlgorithmId;
use crate::certificate::attribute::{CertAttribute, require};
use crate::der::DerEncode;
use crate::error::Result;

#[cfg(feature = "tracing")]
use tracing::{debug};

/// ```text
/// SubjectPublicKeyInfo  ::=  SEQUENCE  {
///      algorithm            AlgorithmIdentifier,
///      subjectPublicKey     BIT STRING  }
/// ```
///
/// The key is kept in its encoded form; no key material is interpreted.
#[derive(Clone, Debug, PartialEq)]
pub struct X509Key {
    algorithm: AlgorithmId,
    key: Bytes,
}

impl X509Key {
    pub fn new(algorithm: AlgorithmId, key: impl Into<Bytes>) -> X509Key {
        X509Key {
            algorithm: algorithm,
            key: key.into(),
        }
    }

    pub fn algorithm(&self) -> &AlgorithmId {
        &self.algorithm
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }
}

impl BERDecodable for X509Key {
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "X509Key::decode_ber", skip_all))]
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        #[cfg(feature = "tracing")]
        debug!("parsing subject public key info");
        reader.read_sequence(|reader| {
            let algorithm = AlgorithmId::decode_ber(reader.next())?;
            let (key, _) = reader.next().read_bitvec_bytes()?;
            Ok(X509Key {
                algorithm: algorithm,
                key: Bytes::from(key),
            })
        })
    }
}

impl DerEncode for X509Key {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        writer.write_sequence(|writer| {
            self.algorithm.encode_der(writer.next())?;
            writer.next().write_bitvec_bytes(&self.key[..], self.key.len() * 8);
            Ok(())
        })
    }
}

/// Holder for the subject public key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CertificateX509Key {
    key: Option<X509Key>,
}

impl CertificateX509Key {
    pub fn new(key: X509Key) -> CertificateX509Key {
        CertificateX509Key { key: Some(key) }
    }
}

impl CertAttribute for CertificateX509Key {
    type Value = X509Key;
    const NAME: &'static str = "value";

    fn value(&self) -> Option<&X509Key> {
        self.key.as_ref()
    }

    fn set_value(&mut self, value: X509Key) {
        self.key = Some(value);
    }

    fn take_value(&mut self) -> Option<X509Key> {
        self.key.take()
    }
}

impl BERDecodable for CertificateX509Key {
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        Ok(CertificateX509Key::new(X509Key::decode_ber(reader)?))
    }
}

impl DerEncode for CertificateX509Key {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        require(&self.key, "public key")?.encode_der(writer)
    }
}
