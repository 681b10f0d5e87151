use num_bigint::BigInt;
use yasna::{
    ASN1Result,
    DERWriter,
    BERReader,
    BERDecodable,
    Tag,
    TagClass,
};

use crate::charset::CharSet;
use crate::der::{DerEncode, invalid, peek_tag};
use crate::error::{Error, Result};

const TAG_SEQUENCE: Tag = Tag { tag_class: TagClass::Universal, tag_number: 16 };

/// The string types a DisplayText CHOICE may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DisplayTextTag {
    Ia5String,
    BmpString,
    VisibleString,
    Utf8String,
}

impl DisplayTextTag {
    pub fn charset(self) -> CharSet {
        use DisplayTextTag::*;
        match self {
            Ia5String => CharSet::Ia5,
            BmpString => CharSet::Bmp,
            VisibleString => CharSet::Visible,
            Utf8String => CharSet::Utf8,
        }
    }

    pub fn from_tag(tag: Tag) -> Option<DisplayTextTag> {
        use DisplayTextTag::*;
        [Ia5String, BmpString, VisibleString, Utf8String]
            .iter()
            .copied()
            .find(|candidate| candidate.charset().tag() == tag)
    }
}

/// ```text
/// DisplayText ::= CHOICE {
///      ia5String        IA5String      (SIZE (1..200)),
///      visibleString    VisibleString  (SIZE (1..200)),
///      bmpString        BMPString      (SIZE (1..200)),
///      utf8String       UTF8String     (SIZE (1..200)) }
/// ```
///
/// The SIZE constraint is not enforced in either direction; certificates in
/// the wild carry longer explicit texts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayText {
    tag: DisplayTextTag,
    text: String,
}

impl DisplayText {
    pub fn new(tag: DisplayTextTag, text: impl Into<String>) -> Result<DisplayText> {
        let text = text.into();
        if !tag.charset().can_encode(&text) {
            return Err(Error::Unencodable(
                format!("{:?} is not representable as {}", text, tag.charset().name())
            ))
        }
        Ok(DisplayText { tag, text })
    }

    pub fn utf8(text: impl Into<String>) -> DisplayText {
        DisplayText {
            tag: DisplayTextTag::Utf8String,
            text: text.into(),
        }
    }

    pub fn tag(&self) -> DisplayTextTag {
        self.tag
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl BERDecodable for DisplayText {
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        let tag = DisplayTextTag::from_tag(reader.lookahead_tag()?).ok_or_else(invalid)?;
        let text = tag.charset().read(reader)?;
        Ok(DisplayText { tag, text })
    }
}

impl DerEncode for DisplayText {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        self.tag.charset().write(writer, &self.text)
    }
}

/// ```text
/// NoticeReference ::= SEQUENCE {
///      organization     DisplayText,
///      noticeNumbers    SEQUENCE OF INTEGER }
/// ```
///
/// A decoded reference whose noticeNumbers sequence is empty reports
/// `numbers() == None`, not an empty slice. Encoding `None` writes an empty
/// SEQUENCE so such a reference re-encodes to its original bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoticeReference {
    organization: DisplayText,
    numbers: Option<Vec<BigInt>>,
}

impl NoticeReference {
    pub fn new(organization: DisplayText, numbers: Vec<BigInt>) -> NoticeReference {
        NoticeReference {
            organization: organization,
            numbers: Some(numbers),
        }
    }

    pub fn organization(&self) -> &DisplayText {
        &self.organization
    }

    pub fn numbers(&self) -> Option<&[BigInt]> {
        self.numbers.as_deref()
    }
}

impl BERDecodable for NoticeReference {
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        reader.read_sequence(|reader| {
            let organization = DisplayText::decode_ber(reader.next())?;
            let numbers = reader.next().collect_sequence_of(|reader| reader.read_bigint())?;
            Ok(NoticeReference {
                organization: organization,
                numbers: if numbers.is_empty() { None } else { Some(numbers) },
            })
        })
    }
}

impl DerEncode for NoticeReference {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        writer.write_sequence(|writer| {
            self.organization.encode_der(writer.next())?;
            writer.next().write_sequence(|writer| {
                for number in self.numbers.iter().flatten() {
                    writer.next().write_bigint(number);
                }
            });
            Ok(())
        })
    }
}

/// ```text
/// UserNotice ::= SEQUENCE {
///      noticeRef        NoticeReference OPTIONAL,
///      explicitText     DisplayText OPTIONAL }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserNotice {
    notice_ref: Option<NoticeReference>,
    explicit_text: Option<DisplayText>,
}

impl UserNotice {
    pub fn new(notice_ref: Option<NoticeReference>, explicit_text: Option<DisplayText>) -> UserNotice {
        UserNotice { notice_ref, explicit_text }
    }

    pub fn notice_ref(&self) -> Option<&NoticeReference> {
        self.notice_ref.as_ref()
    }

    pub fn explicit_text(&self) -> Option<&DisplayText> {
        self.explicit_text.as_ref()
    }
}

impl BERDecodable for UserNotice {
    fn decode_ber(reader: BERReader) -> ASN1Result<Self> {
        reader.read_sequence(|reader| {
            let notice_ref = match peek_tag(reader)? {
                Some(tag) if tag == TAG_SEQUENCE => Some(NoticeReference::decode_ber(reader.next())?),
                _ => None,
            };
            let explicit_text = match peek_tag(reader)? {
                Some(_) => Some(DisplayText::decode_ber(reader.next())?),
                None => None,
            };
            Ok(UserNotice { notice_ref, explicit_text })
        })
    }
}

impl DerEncode for UserNotice {
    fn encode_der(&self, writer: DERWriter) -> Result<()> {
        writer.write_sequence(|writer| {
            if let Some(notice_ref) = &self.notice_ref {
                notice_ref.encode_der(writer.next())?;
            }
            if let Some(explicit_text) = &self.explicit_text {
                explicit_text.encode_der(writer.next())?;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::der::decode_der;

    #[test]
    fn display_text_should_keep_its_tag () {
        let asserted = vec!(0x1a,0x04, // VisibleString, 4 bytes
            0x54,0x65,0x73,0x74); // "Test"
        let text = decode_der::<DisplayText>(&asserted).unwrap();
        assert_eq!(text.tag(), DisplayTextTag::VisibleString);
        assert_eq!(text.text(), "Test");
        assert_eq!(text.to_der().unwrap(), asserted);
    }

    #[test]
    fn display_text_with_bmp_tag_should_decode () {
        let asserted = vec!(0x1e,0x04, // BMPString, 4 bytes
            0x00,0x4f,0x00,0x4b); // "OK"
        let text = decode_der::<DisplayText>(&asserted).unwrap();
        assert_eq!(text.tag(), DisplayTextTag::BmpString);
        assert_eq!(text.text(), "OK");
    }

    #[test]
    fn display_text_with_printable_tag_should_fail () {
        let asserted = vec!(0x13,0x02, 0x4f,0x4b); // PrintableString "OK"
        assert!(matches!(decode_der::<DisplayText>(&asserted), Err(Error::Format(_))));
    }

    #[test]
    fn display_text_longer_than_200_characters_is_accepted () {
        let long = "x".repeat(250);
        let text = DisplayText::new(DisplayTextTag::Ia5String, long.clone()).unwrap();
        let der = text.to_der().unwrap();
        assert_eq!(decode_der::<DisplayText>(&der).unwrap().text(), long);
    }

    #[test]
    fn display_text_rejects_text_outside_its_charset () {
        let err = DisplayText::new(DisplayTextTag::VisibleString, "caf\u{e9}").unwrap_err();
        assert!(matches!(err, Error::Unencodable(_)));
    }

    #[test]
    fn notice_reference_should_encode_correctly () {
        let expected = vec!(0x30,0x0e, // SEQUENCE, 14 bytes
            0x0c,0x04, // UTF8String, 4 bytes
                0x41,0x43,0x4d,0x45, // "ACME"
            0x30,0x06, // SEQUENCE, 6 bytes -- noticeNumbers
                0x02,0x01,0x01, // INTEGER 1
                0x02,0x01,0x02); // INTEGER 2
        let reference = NoticeReference::new(
            DisplayText::utf8("ACME"),
            vec!(BigInt::from(1), BigInt::from(2)),
        );
        assert_eq!(reference.to_der().unwrap(), expected);
        assert_eq!(decode_der::<NoticeReference>(&expected), Ok(reference));
    }

    #[test]
    fn notice_reference_with_no_numbers_should_leave_numbers_unset () {
        let asserted = vec!(0x30,0x08, // SEQUENCE, 8 bytes
            0x0c,0x04, // UTF8String, 4 bytes
                0x41,0x43,0x4d,0x45, // "ACME"
            0x30,0x00); // empty SEQUENCE -- noticeNumbers
        let reference = decode_der::<NoticeReference>(&asserted).unwrap();
        assert_eq!(reference.numbers(), None);
        assert_eq!(reference.organization().text(), "ACME");
        assert_eq!(reference.to_der().unwrap(), asserted);
    }

    #[test]
    fn user_notice_with_explicit_text_only_should_decode () {
        let asserted = vec!(0x30,0x06, // SEQUENCE, 6 bytes
            0x0c,0x04, // UTF8String, 4 bytes
                0x54,0x65,0x73,0x74); // "Test"
        let notice = decode_der::<UserNotice>(&asserted).unwrap();
        assert_eq!(notice.notice_ref(), None);
        assert_eq!(notice.explicit_text(), Some(&DisplayText::utf8("Test")));
        assert_eq!(notice.to_der().unwrap(), asserted);
    }

    #[test]
    fn user_notice_with_both_fields_should_round_trip () {
        let asserted = vec!(0x30,0x15, // SEQUENCE, 21 bytes
            0x30,0x0b, // SEQUENCE, 11 bytes -- noticeRef
                0x16,0x04, // IA5String, 4 bytes
                    0x41,0x43,0x4d,0x45, // "ACME"
                0x30,0x03, // SEQUENCE, 3 bytes
                    0x02,0x01,0x07, // INTEGER 7
            0x0c,0x06, // UTF8String, 6 bytes -- explicitText
                0x4e,0x6f,0x74,0x69,0x63,0x65); // "Notice"
        let notice = decode_der::<UserNotice>(&asserted).unwrap();
        let reference = notice.notice_ref().unwrap();
        assert_eq!(reference.organization().tag(), DisplayTextTag::Ia5String);
        assert_eq!(reference.numbers(), Some(&[BigInt::from(7)][..]));
        assert_eq!(notice.to_der().unwrap(), asserted);
    }

    #[test]
    fn empty_user_notice_should_round_trip () {
        let asserted = vec!(0x30,0x00);
        let notice = decode_der::<UserNotice>(&asserted).unwrap();
        assert_eq!(notice, UserNotice::default());
        assert_eq!(notice.to_der().unwrap(), asserted);
    }
}
