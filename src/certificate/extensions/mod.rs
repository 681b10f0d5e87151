pub mod name_constraints;
pub mod certificate_policies;
pub mod policy_mappings;
pub mod crl_reason;
pub mod subject_alternative_name;

use bytes::Bytes;
use yasna::{
    ASN1Result,
    DERWriter,
    BERReader,
    BERDecodable,
    Tag,
    TagClass,
    models::ObjectIdentifier,
};

use crate::der::{DerEncode, peek_tag};
use crate::error::{Error, Result};

#[cfg(feature = "tracing")]
use tracing::{debug};

const TAG_BOOLEAN: Tag = Tag { tag_class: TagClass::Universal, tag_number: 1 };

/// ```text
/// Extension  ::=  SEQUENCE  {
///      extnID      OBJECT IDENTIFIER,
///      critical    BOOLEAN DEFAULT FALSE,
///      extnValue   OCTET STRING }
/// ```
#[derive(Clone, Debug, Default, PartialEq,)]
pub struct Extension {
    oid: Option<ObjectIdentifier>,
    critical: bool,
    value: Bytes,
}

impl Extension {
    pub fn new(oid: ObjectIdentifier, critical: bool, value: impl Into<Bytes>) -> Extension {
        Extension {
            oid: Some(oid),
            critical: critical,
            value: value.into(),
        }
    }

    pub fn oid(&self) -> Option<&ObjectIdentifier> {
        self.oid.as_ref()
    }

    pub fn is_critical(&self) -> bool {
        self.critical
    }

    /// The DER encoding carried inside extnValue.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn set_oid(&mut self, oid: ObjectIdentifier) {
        self.oid = Some(oid);
    }

    pub fn set_critical(&mut self, critical: bool) {
        self.critical = critical;
    }

    pub fn set_value(&mut self, value: impl Into<Bytes>) {
        self.value = value.into();
    }

    pub(crate) fn has_oid(&self, oid: &[u64]) -> bool {
        self.oid.as_ref().map_or(false, |own| &own.components()[..] == oid)
    }

    pub(crate) fn expect_oid(&self, oid: &[u64], name: &str) -> Result<()> {
        if self.has_oid(oid) {
            Ok(())
        } else {
            Err(Error::Format(format!("extension is not a {} extension", name)))
        }
    }

    pub fn is_name_constraints(&self) -> bool {
        self.has_oid(name_constraints::OID_CE_NAME_CONSTRAINTS)
    }

    pub fn is_certificate_policies(&self) -> bool {
        self.has_oid(certificate_policies::OID_CE_CERTIFICATE_POLICIES)
    }

    pub fn is_policy_mappings(&self) -> bool {
        self.has_oid(policy_mappings::OID_CE_POLICY_MAPPINGS)
    }

    pub fn is_crl_reason(&self) -> bool {
        self.has_oid(crl_reason::OID_CE_CRL_REASON)
    }

    pub fn is_subject_alternative_name(&self) -> bool {
        self.has_oid(subject_alternative_name::OID_CE_SUBJECT_ALT_NAME)
    }
}

impl BERDecodable for Extension {
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "Extension::decode_ber", skip_all))]
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        #[cfg(feature = "tracing")]
        debug!("parsing extension");
        reader.read_sequence(|reader| {
            let oid = reader.next().read_oid()?;
            // critical is DEFAULT FALSE, so the element after extnID may
            // already be extnValue
            let critical = match peek_tag(reader)? {
                Some(tag) if tag == TAG_BOOLEAN => reader.next().read_bool()?,
                _ => false,
            };
            let value = reader.next().read_bytes()?;
            Ok(Extension {
                oid: Some(oid),
                critical: critical,
                value: Bytes::from(value),
            })
        })
    }
}

impl DerEncode for Extension {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        let oid = self.oid.as_ref()
            .ok_or_else(|| Error::Unencodable("extension has no extnID".to_string()))?;
        writer.write_sequence(|writer| {
            writer.next().write_oid(oid); // extnID
            if self.critical {
                writer.next().write_bool(true); // is critical
            }
            writer.next().write_bytes(&self.value); // extnValue
        });
        Ok(())
    }
}

pub use name_constraints::*;
pub use certificate_policies::*;
pub use policy_mappings::*;
pub use crl_reason::*;
pub use subject_alternative_name::*;
