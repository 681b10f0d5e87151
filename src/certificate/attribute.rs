//! Name-based access to the single-valued fields of a certificate, so that
//! certificate assembly code can address them generically.

use yasna::{
    ASN1Result,
    DERWriter,
    BERReader,
    BERDecodable,
};

use crate::certificate::algorithm_identifier::AlgorithmId;
use crate::certificate::name::X500Name;
use crate::der::DerEncode;
use crate::error::{Error, Result};

/// A holder with exactly one named slot. Names match without regard to ASCII
/// case; any other name fails with `Error::UnknownAttribute`.
pub trait CertAttribute {
    type Value;

    const NAME: &'static str;

    fn value(&self) -> Option<&Self::Value>;
    fn set_value(&mut self, value: Self::Value);
    fn take_value(&mut self) -> Option<Self::Value>;

    fn names(&self) -> Vec<&'static str> {
        vec!(Self::NAME)
    }

    fn get(&self, name: &str) -> Result<Option<&Self::Value>> {
        check_name(Self::NAME, name)?;
        Ok(self.value())
    }

    fn set(&mut self, name: &str, value: Self::Value) -> Result<()> {
        check_name(Self::NAME, name)?;
        self.set_value(value);
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        check_name(Self::NAME, name)?;
        self.take_value();
        Ok(())
    }
}

fn check_name(known: &str, name: &str) -> Result<()> {
    if known.eq_ignore_ascii_case(name) {
        Ok(())
    } else {
        Err(Error::UnknownAttribute(format!("{:?}, only {:?} is recognized", name, known)))
    }
}

pub(crate) fn require<'a, T>(slot: &'a Option<T>, what: &str) -> Result<&'a T> {
    slot.as_ref().ok_or_else(|| Error::Unencodable(format!("{} is not set", what)))
}

/// Holder for the signature or key algorithm identifier.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CertificateAlgorithmId {
    algorithm: Option<AlgorithmId>,
}

impl CertificateAlgorithmId {
    pub fn new(algorithm: AlgorithmId) -> CertificateAlgorithmId {
        CertificateAlgorithmId { algorithm: Some(algorithm) }
    }
}

impl CertAttribute for CertificateAlgorithmId {
    type Value = AlgorithmId;
    const NAME: &'static str = "algorithm";

    fn value(&self) -> Option<&AlgorithmId> {
        self.algorithm.as_ref()
    }

    fn set_value(&mut self, value: AlgorithmId) {
        self.algorithm = Some(value);
    }

    fn take_value(&mut self) -> Option<AlgorithmId> {
        self.algorithm.take()
    }
}

impl BERDecodable for CertificateAlgorithmId {
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        Ok(CertificateAlgorithmId::new(AlgorithmId::decode_ber(reader)?))
    }
}

impl DerEncode for CertificateAlgorithmId {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        require(&self.algorithm, "algorithm identifier")?.encode_der(writer)
    }
}

/// Holder for the subject (or issuer) distinguished name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CertificateSubjectName {
    dname: Option<X500Name>,
}

impl CertificateSubjectName {
    pub fn new(dname: X500Name) -> CertificateSubjectName {
        CertificateSubjectName { dname: Some(dname) }
    }
}

impl CertAttribute for CertificateSubjectName {
    type Value = X500Name;
    const NAME: &'static str = "dname";

    fn value(&self) -> Option<&X500Name> {
        self.dname.as_ref()
    }

    fn set_value(&mut self, value: X500Name) {
        self.dname = Some(value);
    }

    fn take_value(&mut self) -> Option<X500Name> {
        self.dname.take()
    }
}

impl BERDecodable for CertificateSubjectName {
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        Ok(CertificateSubjectName::new(X500Name::decode_ber(reader)?))
    }
}

impl DerEncode for CertificateSubjectName {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        require(&self.dname, "subject name")?.encode_der(writer)
    }
}
