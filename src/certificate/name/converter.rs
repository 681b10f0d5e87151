//! Attribute value converters: turn the text of a name attribute into the DER
//! string that carries it, and back.

use std::borrow::Cow;
use std::sync::{PoisonError, RwLock};

use crate::charset::CharSet;
use crate::der::invalid;
use crate::error::{Error, Result};

#[cfg(feature = "tracing")]
use tracing::{debug};

static DEFAULT_ENCODING_ORDER: RwLock<Cow<'static, [CharSet]>> = RwLock::new(Cow::Borrowed(&[
    CharSet::Utf8,
    CharSet::Printable,
    CharSet::T61,
    CharSet::Universal,
]));

/// The character sets a default `DirStrConverter` tries, in order.
pub fn default_encoding_order() -> Vec<CharSet> {
    DEFAULT_ENCODING_ORDER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .to_vec()
}

/// Replaces the process-wide order used by `DirStrConverter::default()`.
/// Converters built with an explicit order are not affected.
pub fn set_default_encoding_order(order: impl Into<Vec<CharSet>>) -> Result<()> {
    let order = order.into();
    if order.is_empty() {
        return Err(Error::Range("encoding order must name at least one character set".to_string()))
    }
    *DEFAULT_ENCODING_ORDER.write().unwrap_or_else(PoisonError::into_inner) = Cow::Owned(order);
    Ok(())
}

/// Converts between attribute text and the complete DER string element
/// (tag, length, content) holding it.
pub trait AvaValueConverter {
    fn encode(&self, text: &str) -> Result<Vec<u8>>;
    fn decode(&self, der: &[u8]) -> Result<String>;
}

fn decode_accepting(der: &[u8], accepted: &[CharSet]) -> Result<String> {
    Ok(yasna::parse_der(der, |reader| {
        let charset = CharSet::from_tag(reader.lookahead_tag()?)
            .filter(|charset| accepted.contains(charset))
            .ok_or_else(invalid)?;
        charset.read(reader)
    })?)
}

/// DirectoryString values. Encoding picks the first character set in the
/// order that can represent the text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirStrConverter {
    order: Option<Vec<CharSet>>,
}

impl DirStrConverter {
    const DECODABLE: [CharSet; 6] = [
        CharSet::Printable,
        CharSet::T61,
        CharSet::Universal,
        CharSet::Utf8,
        CharSet::Bmp,
        CharSet::Ia5,
    ];

    pub fn with_order(order: impl Into<Vec<CharSet>>) -> DirStrConverter {
        DirStrConverter { order: Some(order.into()) }
    }

    /// The order this converter encodes with, reading the process-wide
    /// default when none was pinned.
    pub fn order(&self) -> Cow<'_, [CharSet]> {
        match &self.order {
            Some(order) => Cow::Borrowed(&order[..]),
            None => Cow::Owned(default_encoding_order()),
        }
    }

    pub fn encode_with_order(text: &str, order: &[CharSet]) -> Result<(CharSet, Vec<u8>)> {
        for charset in order.iter().copied() {
            if charset.can_encode(text) {
                #[cfg(feature = "tracing")]
                debug!("encoding directory string as {}", charset.name());
                return Ok((charset, charset.to_der(text)?))
            }
        }
        Err(Error::Unencodable(format!(
            "{:?} is not representable in any of {:?}", text, order
        )))
    }
}

impl AvaValueConverter for DirStrConverter {
    fn encode(&self, text: &str) -> Result<Vec<u8>> {
        DirStrConverter::encode_with_order(text, &self.order()).map(|(_, der)| der)
    }

    fn decode(&self, der: &[u8]) -> Result<String> {
        decode_accepting(der, &DirStrConverter::DECODABLE)
    }
}

/// IA5String-typed attributes such as emailAddress. PrintableString is
/// accepted on decode since it is a strict subset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ia5StringConverter;

impl AvaValueConverter for Ia5StringConverter {
    fn encode(&self, text: &str) -> Result<Vec<u8>> {
        CharSet::Ia5.to_der(text)
    }

    fn decode(&self, der: &[u8]) -> Result<String> {
        decode_accepting(der, &[CharSet::Ia5, CharSet::Printable])
    }
}

/// PrintableString-only attributes, such as countryName.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PrintableConverter;

impl AvaValueConverter for PrintableConverter {
    fn encode(&self, text: &str) -> Result<Vec<u8>> {
        CharSet::Printable.to_der(text)
    }

    fn decode(&self, der: &[u8]) -> Result<String> {
        decode_accepting(der, &[CharSet::Printable])
    }
}
