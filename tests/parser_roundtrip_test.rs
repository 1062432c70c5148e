//! Round-trip tests: serializing a parsed synset and re-parsing it yields
//! an equivalent record.

use std::io::Cursor;

use wnquery::parser::SynsetParser;
use wnquery::synset::{Synset, escape_pcdata};

fn parse_one(input: &str) -> Synset {
    let mut parser = SynsetParser::utf8();
    let mut record = Synset::new();
    let mut line_no = 0u64;
    parser
        .parse_next(&mut Cursor::new(input), &mut record, &mut line_no)
        .unwrap();
    assert!(!record.is_empty(), "fixture should contain a synset");
    record
}

#[test]
fn test_round_trip_full_record() {
    let input = "<SYNSET><ID>n-dog</ID><POS>n</POS>\
                 <SYNONYM><LITERAL>dog<SENSE>1</SENSE><LNOTE>zool</LNOTE></LITERAL>\
                 <LITERAL>domestic dog<SENSE>1</SENSE><NUCLEUS>dog</NUCLEUS></LITERAL></SYNONYM>\
                 <ILR>n-canid<TYPE>hypernym</TYPE></ILR>\
                 <ILR>n-pack<TYPE>holo_member</TYPE></ILR>\
                 <DEF>a domesticated canid</DEF><BCS>1</BCS>\
                 <USAGE>the dog barked</USAGE><SNOTE>common</SNOTE>\
                 <STAMP>ed 2004</STAMP><DOMAIN>zoology</DOMAIN>\
                 <SUMO>Canine<TYPE>+</TYPE></SUMO>\
                 <NL>yes</NL><TNL>no</TNL>\
                 <EQ_NEAR_SYNONYM>ENG20-123-n</EQ_NEAR_SYNONYM>\
                 <ELR>ENG20-456-n<TYPE>eq_synonym</TYPE></ELR>\
                 <EKSZ>E-77<TYPE>sense</TYPE></EKSZ>\
                 <VFRAME>F-1<TYPE>frame</TYPE></VFRAME></SYNSET>\n";

    let first = parse_one(input);
    let second = parse_one(&format!("{}\n", first.to_xml()));

    assert_eq!(first, second);
    // And serialization itself is stable.
    assert_eq!(first.to_xml(), second.to_xml());
}

#[test]
fn test_round_trip_with_escaped_content() {
    let input = "<SYNSET><ID>n-amp</ID><POS>n</POS>\
                 <SYNONYM><LITERAL>R&amp;D<SENSE>1</SENSE></LITERAL></SYNONYM>\
                 <DEF>research &lt;and&gt; development, &quot;R&amp;D&quot;</DEF></SYNSET>\n";

    let first = parse_one(input);
    assert_eq!(first.synonyms[0].literal, "R&D");
    assert_eq!(first.def, "research <and> development, \"R&D\"");

    let second = parse_one(&format!("{}\n", first.to_xml()));
    assert_eq!(first, second);
}

#[test]
fn test_round_trip_omits_unset_optionals() {
    let input = "<SYNSET><ID>n-min</ID><POS>n</POS>\
                 <SYNONYM><LITERAL>minimal<SENSE>1</SENSE></LITERAL></SYNONYM></SYNSET>\n";

    let first = parse_one(input);
    let xml = first.to_xml();
    for tag in ["<DEF>", "<BCS>", "<STAMP>", "<DOMAIN>", "<NL>", "<TNL>", "<LNOTE>", "<NUCLEUS>"] {
        assert!(!xml.contains(tag), "{tag} should be omitted: {xml}");
    }
    assert_eq!(first, parse_one(&format!("{xml}\n")));
}

#[test]
fn test_escaping_is_idempotent_for_existing_references() {
    assert_eq!(escape_pcdata("cat &amp; dog"), "cat &amp; dog");
    assert_eq!(escape_pcdata("<a&b>"), "&lt;a&amp;b&gt;");
    // Numeric character references produced by the transcoder survive.
    assert_eq!(escape_pcdata("&#1071; &#x44F;"), "&#1071; &#x44F;");
}

#[test]
fn test_eq_shorthand_serializes_as_elr() {
    // The shorthand forms are sugar for ELR with an implied type; they come
    // back as plain ELR elements and re-parse identically.
    let input = "<SYNSET><ID>n-x</ID><POS>n</POS><SYNONYM></SYNONYM>\
                 <EQ_HYPERNYM>ENG20-9-n</EQ_HYPERNYM></SYNSET>\n";
    let first = parse_one(input);
    assert_eq!(first.elrs[0].rtype, "eq_has_hypernym");

    let xml = first.to_xml();
    assert!(xml.contains("<ELR>ENG20-9-n<TYPE>eq_has_hypernym</TYPE></ELR>"));
    assert_eq!(first, parse_one(&format!("{xml}\n")));
}
