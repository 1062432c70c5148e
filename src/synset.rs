//! The synset entity model.
//!
//! A [`Synset`] is one node of the lexical graph: a set of synonymous word
//! senses plus typed relation pointers to other synsets. Synsets are plain
//! data; they own all of their nested entries exclusively and carry no
//! back-references. A synset with an empty `id` is the "no synset" sentinel
//! produced by [`Synset::clear`] and recognized by [`Synset::is_empty`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// One word sense belonging to a synset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSense {
    /// The literal text form of the word or phrase.
    pub literal: String,
    /// Sense number of the literal, kept in its textual form.
    pub sense: String,
    /// Optional literal note.
    pub lnote: String,
    /// Optional multi-word-nucleus marker.
    pub nucleus: String,
}

impl WordSense {
    /// Create a word sense from its literal and sense number.
    pub fn new<L: Into<String>, S: Into<String>>(literal: L, sense: S) -> Self {
        WordSense {
            literal: literal.into(),
            sense: sense.into(),
            lnote: String::new(),
            nucleus: String::new(),
        }
    }
}

/// A typed relation pointer: the link target and the relation type.
///
/// For internal relations the target is a synset id; for SUMO, dictionary
/// and verb-frame links it is the target term or label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pointer {
    /// Target synset id or label.
    pub target: String,
    /// Relation type or link category.
    pub rtype: String,
}

impl Pointer {
    /// Create a pointer from its target and type.
    pub fn new<T: Into<String>, R: Into<String>>(target: T, rtype: R) -> Self {
        Pointer {
            target: target.into(),
            rtype: rtype.into(),
        }
    }
}

/// A synonym set: the atomic node of the lexical graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synset {
    /// Unique synset id; empty for the "no synset" sentinel.
    pub id: String,
    /// Part-of-speech tag in its textual form (`n|v|a|b`).
    pub pos: String,
    /// Word senses, in file order.
    pub synonyms: Vec<WordSense>,
    /// Internal relation pointers (the edges of the lexical graph).
    pub ilrs: Vec<Pointer>,
    /// Free-text definition.
    pub def: String,
    /// Base-concept-set marker.
    pub bcs: String,
    /// Usage examples.
    pub usages: Vec<String>,
    /// Semantic notes.
    pub snotes: Vec<String>,
    /// Editorial stamp.
    pub stamp: String,
    /// Domain label.
    pub domain: String,
    /// SUMO ontology links.
    pub sumolinks: Vec<Pointer>,
    /// Processing marker.
    pub nl: String,
    /// Processing marker.
    pub tnl: String,
    /// External relation pointers.
    pub elrs: Vec<Pointer>,
    /// Dictionary cross-reference links.
    pub ekszlinks: Vec<Pointer>,
    /// Verb frame links.
    pub vframelinks: Vec<Pointer>,
}

impl Synset {
    /// Create an empty synset (the "no synset" sentinel).
    pub fn new() -> Self {
        Synset::default()
    }

    /// Reset all fields to the empty sentinel state.
    pub fn clear(&mut self) {
        *self = Synset::default();
    }

    /// True iff this is the "no synset" sentinel.
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }

    /// Render the synset in its VisDic XML form.
    ///
    /// Empty optional scalar fields are omitted entirely; text content is
    /// escaped by [`escape_pcdata`].
    pub fn to_xml(&self) -> String {
        let mut out = String::new();

        out.push_str("<SYNSET>");
        tag_into(&mut out, "ID", &self.id);
        tag_into(&mut out, "POS", &self.pos);

        out.push_str("<SYNONYM>");
        for syn in &self.synonyms {
            out.push_str("<LITERAL>");
            out.push_str(&escape_pcdata(&syn.literal));
            tag_into(&mut out, "SENSE", &syn.sense);
            if !syn.lnote.is_empty() {
                tag_into(&mut out, "LNOTE", &syn.lnote);
            }
            if !syn.nucleus.is_empty() {
                tag_into(&mut out, "NUCLEUS", &syn.nucleus);
            }
            out.push_str("</LITERAL>");
        }
        out.push_str("</SYNONYM>");

        pointers_into(&mut out, "ILR", &self.ilrs);

        if !self.def.is_empty() {
            tag_into(&mut out, "DEF", &self.def);
        }
        if !self.bcs.is_empty() {
            tag_into(&mut out, "BCS", &self.bcs);
        }
        for usage in &self.usages {
            tag_into(&mut out, "USAGE", usage);
        }
        for snote in &self.snotes {
            tag_into(&mut out, "SNOTE", snote);
        }
        if !self.stamp.is_empty() {
            tag_into(&mut out, "STAMP", &self.stamp);
        }
        if !self.domain.is_empty() {
            tag_into(&mut out, "DOMAIN", &self.domain);
        }

        pointers_into(&mut out, "SUMO", &self.sumolinks);

        if !self.nl.is_empty() {
            tag_into(&mut out, "NL", &self.nl);
        }
        if !self.tnl.is_empty() {
            tag_into(&mut out, "TNL", &self.tnl);
        }

        pointers_into(&mut out, "ELR", &self.elrs);
        pointers_into(&mut out, "EKSZ", &self.ekszlinks);
        pointers_into(&mut out, "VFRAME", &self.vframelinks);

        out.push_str("</SYNSET>");
        out
    }

    /// Compact one-line rendering: `id  {literal:sense, …}  (definition)`.
    pub fn to_compact_line(&self) -> String {
        let senses = self
            .synonyms
            .iter()
            .map(|s| format!("{}:{}", s.literal, s.sense))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}  {{{}}}  ({})", self.id, senses, self.def)
    }
}

impl fmt::Display for Synset {
    /// The VisDic XML representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml())
    }
}

/// Append `<TAG>escaped-text</TAG>` to `out`.
fn tag_into(out: &mut String, tag: &str, text: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.push_str(&escape_pcdata(text));
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Append a pointer sequence: `<TAG>target<TYPE>rtype</TYPE></TAG>` each.
fn pointers_into(out: &mut String, tag: &str, pointers: &[Pointer]) {
    for ptr in pointers {
        out.push('<');
        out.push_str(tag);
        out.push('>');
        out.push_str(&escape_pcdata(&ptr.target));
        tag_into(out, "TYPE", &ptr.rtype);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}

/// Escape character data for XML output.
///
/// Replaces `& < > " '` with entity references, except that an ampersand
/// opening a sequence of letters, digits, `-`, `_` or `#` terminated by `;`
/// is taken to be an existing entity or character reference and passed
/// through unchanged, so already-escaped text is not escaped twice.
pub fn escape_pcdata(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let chars: Vec<char> = text.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        match c {
            '&' => {
                if is_entity_reference(&chars[i + 1..]) {
                    out.push('&');
                } else {
                    out.push_str("&amp;");
                }
            }
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// True if `rest` (the characters following an `&`) starts with an entity
/// body: zero or more of `[A-Za-z0-9_#-]` followed by `;`.
fn is_entity_reference(rest: &[char]) -> bool {
    for &c in rest {
        if c == ';' {
            return true;
        }
        if !(c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '#') {
            return false;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sentinel() {
        let mut syns = Synset::new();
        assert!(syns.is_empty());

        syns.id = "ENG20-02084071-n".to_string();
        assert!(!syns.is_empty());

        syns.clear();
        assert!(syns.is_empty());
        assert!(syns.synonyms.is_empty());
    }

    #[test]
    fn test_escape_basic() {
        assert_eq!(escape_pcdata("<a&b>"), "&lt;a&amp;b&gt;");
        assert_eq!(escape_pcdata("say \"hi\""), "say &quot;hi&quot;");
        assert_eq!(escape_pcdata("it's"), "it&apos;s");
    }

    #[test]
    fn test_escape_preserves_entity_references() {
        // An existing reference is not double-escaped.
        assert_eq!(escape_pcdata("cat &amp; dog"), "cat &amp; dog");
        assert_eq!(escape_pcdata("&#233;clair"), "&#233;clair");
        // A bare ampersand with no terminating semicolon is escaped.
        assert_eq!(escape_pcdata("AT&T"), "AT&amp;T");
        // A semicolon too far away (invalid body chars) does not rescue it.
        assert_eq!(escape_pcdata("a & b;"), "a &amp; b;");
    }

    #[test]
    fn test_to_xml_field_order_and_omission() {
        let mut syns = Synset::new();
        syns.id = "ENG20-1-n".to_string();
        syns.pos = "n".to_string();
        syns.synonyms.push(WordSense::new("dog", "1"));
        syns.ilrs.push(Pointer::new("ENG20-2-n", "hypernym"));
        syns.def = "a domesticated canid".to_string();

        let xml = syns.to_xml();
        assert_eq!(
            xml,
            "<SYNSET><ID>ENG20-1-n</ID><POS>n</POS>\
             <SYNONYM><LITERAL>dog<SENSE>1</SENSE></LITERAL></SYNONYM>\
             <ILR>ENG20-2-n<TYPE>hypernym</TYPE></ILR>\
             <DEF>a domesticated canid</DEF></SYNSET>"
        );
        // Unset optional scalars produce no tags at all.
        assert!(!xml.contains("<BCS>"));
        assert!(!xml.contains("<STAMP>"));
        assert!(!xml.contains("<NL>"));
    }

    #[test]
    fn test_to_xml_optional_sense_fields() {
        let mut syns = Synset::new();
        syns.id = "ENG20-1-n".to_string();
        syns.pos = "n".to_string();
        let mut sense = WordSense::new("hot dog", "2");
        sense.lnote = "colloquial".to_string();
        sense.nucleus = "dog".to_string();
        syns.synonyms.push(sense);

        let xml = syns.to_xml();
        assert!(xml.contains(
            "<LITERAL>hot dog<SENSE>2</SENSE><LNOTE>colloquial</LNOTE>\
             <NUCLEUS>dog</NUCLEUS></LITERAL>"
        ));
    }

    #[test]
    fn test_compact_line() {
        let mut syns = Synset::new();
        syns.id = "ENG20-1-n".to_string();
        syns.synonyms.push(WordSense::new("dog", "1"));
        syns.synonyms.push(WordSense::new("domestic dog", "1"));
        syns.def = "a domesticated canid".to_string();

        assert_eq!(
            syns.to_compact_line(),
            "ENG20-1-n  {dog:1, domestic dog:1}  (a domesticated canid)"
        );
    }
}
