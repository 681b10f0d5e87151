use num_bigint::BigUint;
use yasna::{
    ASN1Result,
    DERWriter,
    BERReader,
    BERDecodable,
    models::ObjectIdentifier,
};

use crate::certificate::algorithm_identifier::AlgorithmId;
use crate::der::{DerEncode, invalid};
use crate::error::{Error, Result};

#[cfg(feature = "tracing")]
use tracing::{debug};

// OID: 1.2.840.10040.4.1
// {
//      iso(1)
//      member-body(2)
//      us(840)
//      x9-57(10040)
//      x9algorithm(4)
//      dsa(1)
// }
pub const OID_DSA : &'static [u64] = &[1,2,840,10040,4,1];

/// A DSA algorithm identifier carrying its domain parameters.
///
/// ```text
/// Dss-Parms  ::=  SEQUENCE  {
///      p             INTEGER,
///      q             INTEGER,
///      g             INTEGER  }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AlgIdDsa {
    algorithm: AlgorithmId,
    p: BigUint,
    q: BigUint,
    g: BigUint,
}

impl AlgIdDsa {
    pub fn new(p: BigUint, q: BigUint, g: BigUint) -> AlgIdDsa {
        let params = yasna::construct_der(|writer| {
            writer.write_sequence(|writer| {
                writer.next().write_biguint(&p);
                writer.next().write_biguint(&q);
                writer.next().write_biguint(&g);
            })
        });
        AlgIdDsa {
            algorithm: AlgorithmId::new(ObjectIdentifier::from_slice(OID_DSA), Some(params)),
            p: p,
            q: q,
            g: g,
        }
    }

    /// Builds the parameters from big-endian unsigned magnitudes.
    pub fn from_bytes(p: &[u8], q: &[u8], g: &[u8]) -> AlgIdDsa {
        AlgIdDsa::new(
            BigUint::from_bytes_be(p),
            BigUint::from_bytes_be(q),
            BigUint::from_bytes_be(g),
        )
    }

    pub fn algorithm(&self) -> &AlgorithmId {
        &self.algorithm
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn q(&self) -> &BigUint {
        &self.q
    }

    pub fn g(&self) -> &BigUint {
        &self.g
    }
}

impl TryFrom<AlgorithmId> for AlgIdDsa {
    type Error = Error;

    fn try_from(algorithm: AlgorithmId) -> Result<AlgIdDsa> {
        if !algorithm.is(OID_DSA) {
            return Err(Error::Format("algorithm is not DSA".to_string()))
        }
        let params = algorithm.params()
            .ok_or_else(|| Error::Format("DSA parameters are missing".to_string()))?;
        let (p, q, g) = yasna::parse_der(params, |reader| {
            reader.read_sequence(|reader| {
                let p = reader.next().read_biguint()?;
                let q = reader.next().read_biguint()?;
                let g = reader.next().read_biguint()?;
                Ok((p, q, g))
            })
        })?;
        Ok(AlgIdDsa { algorithm, p, q, g })
    }
}

impl From<AlgIdDsa> for AlgorithmId {
    fn from(dsa: AlgIdDsa) -> AlgorithmId {
        dsa.algorithm
    }
}

impl BERDecodable for AlgIdDsa {
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "AlgIdDsa::decode_ber", skip_all))]
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        let algorithm = AlgorithmId::decode_ber(reader)?;
        AlgIdDsa::try_from(algorithm).map_err(|_err| {
            #[cfg(feature = "tracing")]
            debug!("rejecting DSA algorithm identifier: {}", _err);
            invalid()
        })
    }
}

impl DerEncode for AlgIdDsa {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        self.algorithm.encode_der(writer)
    }
}
