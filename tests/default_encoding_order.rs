// Replaces the process-wide DirectoryString order, so it lives in its own
// test binary and keeps to a single test function.

use x509_certattrs::certificate::*;
use x509_certattrs::CharSet;

#[test]
fn replaced_default_order_should_reach_default_converters () {
    let pinned = DirStrConverter::with_order(vec!(CharSet::Utf8));
    assert_eq!(DirStrConverter::default().encode("Acme").unwrap()[0], 0x0c); // UTF8String

    set_default_encoding_order(vec!(CharSet::Printable, CharSet::T61, CharSet::Universal)).unwrap();
    assert_eq!(default_encoding_order(), vec!(CharSet::Printable, CharSet::T61, CharSet::Universal));

    let expected = vec!(0x13,0x04, // PrintableString, 4 bytes
        0x41,0x63,0x6d,0x65); // "Acme"
    assert_eq!(DirStrConverter::default().encode("Acme").unwrap(), expected);
    // falls through to T61String once PrintableString cannot hold the text
    assert_eq!(DirStrConverter::default().encode("Caf\u{e9}").unwrap(), vec!(0x14,0x04, 0x43,0x61,0x66,0xe9));

    // names built from text pick up the new order too
    let atv = AttributeTypeAndValue::from_text(
        yasna::models::ObjectIdentifier::from_slice(OID_AT_COMMON_NAME),
        "Acme",
    ).unwrap();
    assert_eq!(atv.value(), &expected[..]);

    // a pinned order is unaffected
    assert_eq!(pinned.order().to_vec(), vec!(CharSet::Utf8));
    assert_eq!(pinned.encode("Acme").unwrap(), vec!(0x0c,0x04, 0x41,0x63,0x6d,0x65));

    assert!(set_default_encoding_order(Vec::new()).is_err());
    assert_eq!(default_encoding_order()[0], CharSet::Printable);

    set_default_encoding_order(vec!(CharSet::Utf8, CharSet::Printable, CharSet::T61, CharSet::Universal)).unwrap();
    assert_eq!(DirStrConverter::default().encode("Acme").unwrap()[0], 0x0c);
}
