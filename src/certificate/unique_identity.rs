use yasna::{
    ASN1Result,
    DERWriter,
    BERReader,
    BERDecodable,
    Tag,
};

use crate::certificate::attribute::{CertAttribute, require};
use crate::der::DerEncode;
use crate::error::{Error, Result};

/// ```text
/// UniqueIdentifier  ::=  BIT STRING
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UniqueIdentity {
    bytes: Vec<u8>,
    bits: usize,
}

impl UniqueIdentity {
    pub fn new(bytes: Vec<u8>) -> UniqueIdentity {
        let bits = bytes.len() * 8;
        UniqueIdentity { bytes, bits }
    }

    /// An identifier of `bits` bits. Padding bits past `bits` in the last byte
    /// are cleared.
    pub fn from_bits(mut bytes: Vec<u8>, bits: usize) -> Result<UniqueIdentity> {
        if bits > bytes.len() * 8 || bytes.len() * 8 - bits >= 8 {
            return Err(Error::Range(format!("{} bits do not fit {} bytes", bits, bytes.len())))
        }
        let unused = bytes.len() * 8 - bits;
        if let Some(last) = bytes.last_mut() {
            *last &= 0xffu8 << unused;
        }
        Ok(UniqueIdentity { bytes, bits })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bit_len(&self) -> usize {
        self.bits
    }
}

impl BERDecodable for UniqueIdentity {
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        let (bytes, bits) = reader.read_bitvec_bytes()?;
        Ok(UniqueIdentity { bytes, bits })
    }
}

impl DerEncode for UniqueIdentity {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        writer.write_bitvec_bytes(&self.bytes, self.bits);
        Ok(())
    }
}

/// Which unique identifier field of a TBSCertificate a holder represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UniqueIdentityKind {
    /// `issuerUniqueID [1] IMPLICIT UniqueIdentifier OPTIONAL`
    Issuer,
    /// `subjectUniqueID [2] IMPLICIT UniqueIdentifier OPTIONAL`
    Subject,
}

impl UniqueIdentityKind {
    pub fn tag(self) -> Tag {
        match self {
            UniqueIdentityKind::Issuer => Tag::context(1),
            UniqueIdentityKind::Subject => Tag::context(2),
        }
    }
}

/// Holder for an issuer or subject unique identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CertificateUniqueIdentity {
    kind: UniqueIdentityKind,
    id: Option<UniqueIdentity>,
}

impl CertificateUniqueIdentity {
    pub fn new(kind: UniqueIdentityKind, id: UniqueIdentity) -> CertificateUniqueIdentity {
        CertificateUniqueIdentity { kind, id: Some(id) }
    }

    pub fn empty(kind: UniqueIdentityKind) -> CertificateUniqueIdentity {
        CertificateUniqueIdentity { kind, id: None }
    }

    pub fn kind(&self) -> UniqueIdentityKind {
        self.kind
    }

    /// Decodes the field carrying `kind`'s context tag.
    pub fn decode(kind: UniqueIdentityKind, reader: BERReader) -> ASN1Result<CertificateUniqueIdentity> {
        let id = reader.read_tagged_implicit(kind.tag(), UniqueIdentity::decode_ber)?;
        Ok(CertificateUniqueIdentity { kind, id: Some(id) })
    }
}

impl CertAttribute for CertificateUniqueIdentity {
    type Value = UniqueIdentity;
    const NAME: &'static str = "id";

    fn value(&self) -> Option<&UniqueIdentity> {
        self.id.as_ref()
    }

    fn set_value(&mut self, value: UniqueIdentity) {
        self.id = Some(value);
    }

    fn take_value(&mut self) -> Option<UniqueIdentity> {
        self.id.take()
    }
}

impl DerEncode for CertificateUniqueIdentity {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        let id = require(&self.id, "unique identity")?;
        writer.write_tagged_implicit(self.kind.tag(), |writer| id.encode_der(writer))
    }
}
