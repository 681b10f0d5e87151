//! Character-string codecs for the ASN.1 string types used in certificates.
//!
//! `yasna` frames the value; this module owns the repertoire checks and the
//! content octets. T.61 is handled as a one-octet-per-character mapping of
//! U+0000..U+00FF, BMPString as UCS-2 big endian and UniversalString as
//! UCS-4 big endian.

use yasna::{
    ASN1Result,
    BERReader,
    DERWriter,
    Tag,
    TagClass,
};

use crate::der::invalid;
use crate::error::{Error, Result};

const fn universal(tag_number: u64) -> Tag {
    Tag { tag_class: TagClass::Universal, tag_number }
}

pub const TAG_UTF8STRING: Tag = universal(12);
pub const TAG_PRINTABLESTRING: Tag = universal(19);
pub const TAG_T61STRING: Tag = universal(20);
pub const TAG_IA5STRING: Tag = universal(22);
pub const TAG_VISIBLESTRING: Tag = universal(26);
pub const TAG_UNIVERSALSTRING: Tag = universal(28);
pub const TAG_BMPSTRING: Tag = universal(30);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharSet {
    Printable,
    Ia5,
    T61,
    Visible,
    Utf8,
    Bmp,
    Universal,
}

impl CharSet {
    pub const ALL: [CharSet; 7] = [
        CharSet::Printable,
        CharSet::Ia5,
        CharSet::T61,
        CharSet::Visible,
        CharSet::Utf8,
        CharSet::Bmp,
        CharSet::Universal,
    ];

    pub fn tag(self) -> Tag {
        use CharSet::*;
        match self {
            Printable => TAG_PRINTABLESTRING,
            Ia5 => TAG_IA5STRING,
            T61 => TAG_T61STRING,
            Visible => TAG_VISIBLESTRING,
            Utf8 => TAG_UTF8STRING,
            Bmp => TAG_BMPSTRING,
            Universal => TAG_UNIVERSALSTRING,
        }
    }

    pub fn from_tag(tag: Tag) -> Option<CharSet> {
        CharSet::ALL.iter().copied().find(|charset| charset.tag() == tag)
    }

    pub fn name(self) -> &'static str {
        use CharSet::*;
        match self {
            Printable => "PrintableString",
            Ia5 => "IA5String",
            T61 => "T61String",
            Visible => "VisibleString",
            Utf8 => "UTF8String",
            Bmp => "BMPString",
            Universal => "UniversalString",
        }
    }

    pub fn can_encode(self, text: &str) -> bool {
        text.chars().all(|c| self.contains(c))
    }

    fn contains(self, c: char) -> bool {
        use CharSet::*;
        match self {
            Printable => is_printable(c),
            Ia5 => c.is_ascii(),
            T61 => (c as u32) <= 0xff,
            Visible => (' '..='~').contains(&c),
            Utf8 | Universal => true,
            Bmp => (c as u32) <= 0xffff,
        }
    }

    /// Content octets for `text`, or None when a character falls outside the
    /// repertoire.
    pub fn encode(self, text: &str) -> Option<Vec<u8>> {
        use CharSet::*;
        if !self.can_encode(text) {
            return None
        }
        let content = match self {
            Printable | Ia5 | Visible | Utf8 => text.as_bytes().to_vec(),
            T61 => text.chars().map(|c| c as u8).collect(),
            Bmp => text.chars()
                .flat_map(|c| (c as u16).to_be_bytes())
                .collect(),
            Universal => text.chars()
                .flat_map(|c| (c as u32).to_be_bytes())
                .collect(),
        };
        Some(content)
    }

    pub fn decode(self, content: &[u8]) -> Option<String> {
        use CharSet::*;
        let text = match self {
            Utf8 => String::from_utf8(content.to_vec()).ok()?,
            Printable | Ia5 | Visible => {
                let text = std::str::from_utf8(content).ok()?;
                if !self.can_encode(text) {
                    return None
                }
                text.to_string()
            },
            T61 => content.iter().map(|&b| char::from(b)).collect(),
            Bmp => {
                if content.len() % 2 != 0 {
                    return None
                }
                content.chunks_exact(2)
                    .map(|pair| char::from_u32(u16::from_be_bytes([pair[0], pair[1]]) as u32))
                    .collect::<Option<String>>()?
            },
            Universal => {
                if content.len() % 4 != 0 {
                    return None
                }
                content.chunks_exact(4)
                    .map(|quad| char::from_u32(u32::from_be_bytes([quad[0], quad[1], quad[2], quad[3]])))
                    .collect::<Option<String>>()?
            },
        };
        Some(text)
    }

    /// Reads a string carrying this character set's universal tag.
    pub fn read(self, reader: BERReader) -> ASN1Result<String> {
        reader.read_tagged_implicit(self.tag(), |reader| self.read_content(reader))
    }

    /// Reads primitive string content under whatever tag the caller has already
    /// applied, for implicitly tagged fields.
    pub fn read_content(self, reader: BERReader) -> ASN1Result<String> {
        let content = reader.read_bytes()?;
        self.decode(&content).ok_or_else(invalid)
    }

    pub fn write(self, writer: DERWriter, text: &str) -> Result<()> {
        let content = self.encode_or_err(text)?;
        writer.write_tagged_implicit(self.tag(), |writer| writer.write_bytes(&content));
        Ok(())
    }

    /// Writes string content under an implicit tag chosen by the caller.
    pub fn write_implicit(self, writer: DERWriter, tag: Tag, text: &str) -> Result<()> {
        let content = self.encode_or_err(text)?;
        writer.write_tagged_implicit(tag, |writer| writer.write_bytes(&content));
        Ok(())
    }

    /// Complete DER encoding (tag, length, content) of `text`.
    pub fn to_der(self, text: &str) -> Result<Vec<u8>> {
        yasna::try_construct_der(|writer| self.write(writer, text))
    }

    fn encode_or_err(self, text: &str) -> Result<Vec<u8>> {
        self.encode(text).ok_or_else(|| {
            Error::Unencodable(format!("{:?} is not representable as {}", text, self.name()))
        })
    }
}

fn is_printable(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '\'' | '(' | ')' | '+' | ',' | '-' | '.' | '/' | ':' | '=' | '?')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_rejects_at_sign() {
        assert!(CharSet::Printable.can_encode("Example Org. (Test)"));
        assert!(!CharSet::Printable.can_encode("user@example.com"));
        assert!(CharSet::Ia5.can_encode("user@example.com"));
    }

    #[test]
    fn t61_covers_latin1_only() {
        assert_eq!(CharSet::T61.encode("caf\u{e9}"), Some(vec!(0x63,0x61,0x66,0xe9)));
        assert_eq!(CharSet::T61.encode("\u{65e5}"), None);
        assert_eq!(CharSet::T61.decode(&[0x63,0x61,0x66,0xe9]), Some("caf\u{e9}".to_string()));
    }

    #[test]
    fn bmp_string_should_encode_correctly() {
        let expected = vec!(0x1e,0x04, // BMPString, 4 bytes
            0x00,0x41, // 'A'
            0x65,0xe5); // U+65E5
        assert_eq!(CharSet::Bmp.to_der("A\u{65e5}").unwrap(), expected);
    }

    #[test]
    fn bmp_string_rejects_astral_characters() {
        assert!(CharSet::Bmp.encode("\u{1f600}").is_none());
        assert!(CharSet::Universal.encode("\u{1f600}").is_some());
    }

    #[test]
    fn universal_string_should_decode_correctly() {
        let asserted = vec!(0x1c,0x08, // UniversalString, 8 bytes
            0x00,0x00,0x00,0x41, // 'A'
            0x00,0x01,0xf6,0x00); // U+1F600
        let actual = yasna::parse_der(&asserted, |reader| CharSet::Universal.read(reader));
        assert_eq!(actual, Ok("A\u{1f600}".to_string()));
    }

    #[test]
    fn odd_length_bmp_content_should_fail() {
        let asserted = vec!(0x1e,0x03, 0x00,0x41,0x00);
        let actual = yasna::parse_der(&asserted, |reader| CharSet::Bmp.read(reader));
        assert!(actual.is_err());
    }

    #[test]
    fn printable_string_with_ia5_only_character_should_fail_to_decode() {
        let asserted = vec!(0x13,0x03, 0x61,0x40,0x62); // PrintableString "a@b"
        let actual = yasna::parse_der(&asserted, |reader| CharSet::Printable.read(reader));
        assert!(actual.is_err());
    }

    #[test]
    fn unencodable_text_should_report_charset() {
        let err = CharSet::Ia5.to_der("\u{e9}").unwrap_err();
        assert!(matches!(err, Error::Unencodable(_)));
    }

    #[test]
    fn tags_should_map_back_to_charsets() {
        for charset in CharSet::ALL {
            assert_eq!(CharSet::from_tag(charset.tag()), Some(charset));
        }
        assert_eq!(CharSet::from_tag(Tag::context(0)), None);
    }
}
