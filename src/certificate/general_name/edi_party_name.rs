use yasna::{
    ASN1Result,
    DERWriter,
    BERReader,
    BERDecodable,
    Tag,
};

use crate::charset::CharSet;
use crate::der::{DerEncode, invalid, peek_tag};
use crate::error::Result;

#[cfg(feature = "tracing")]
use tracing::{debug};

/// ```text
/// EDIPartyName ::= SEQUENCE {
///      nameAssigner    [0] DirectoryString OPTIONAL,
///      partyName       [1] DirectoryString }
/// ```
///
/// Both fields are written as implicitly tagged UTF-8 content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdiPartyName {
    assigner: Option<String>,
    party: String,
}

impl EdiPartyName {
    pub fn new(assigner: Option<String>, party: impl Into<String>) -> EdiPartyName {
        EdiPartyName {
            assigner: assigner,
            party: party.into(),
        }
    }

    pub fn assigner(&self) -> Option<&str> {
        self.assigner.as_deref()
    }

    pub fn party(&self) -> &str {
        &self.party
    }
}

impl BERDecodable for EdiPartyName {
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "EdiPartyName::decode_ber", skip_all))]
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        reader.read_sequence(|reader| {
            let mut assigner = None;
            let mut party = None;
            let mut count = 0;
            while let Some(tag) = peek_tag(reader)? {
                count += 1;
                if count > 2 {
                    #[cfg(feature = "tracing")]
                    debug!("EDIPartyName has more than two elements");
                    return Err(invalid())
                }
                let slot = if tag == Tag::context(0) {
                    &mut assigner
                } else if tag == Tag::context(1) {
                    &mut party
                } else {
                    return Err(invalid())
                };
                if slot.is_some() {
                    #[cfg(feature = "tracing")]
                    debug!("EDIPartyName repeats tag {}", tag.tag_number);
                    return Err(invalid())
                }
                *slot = Some(reader.next().read_tagged_implicit(tag, |reader| CharSet::Utf8.read_content(reader))?);
            }
            let party = party.ok_or_else(invalid)?;
            Ok(EdiPartyName { assigner, party })
        })
    }
}

impl DerEncode for EdiPartyName {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        writer.write_sequence(|writer| {
            if let Some(assigner) = &self.assigner {
                CharSet::Utf8.write_implicit(writer.next(), Tag::context(0), assigner)?;
            }
            CharSet::Utf8.write_implicit(writer.next(), Tag::context(1), &self.party)
        })
    }
}
