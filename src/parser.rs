//! Streaming parser for VisDic synset XML.
//!
//! The input is an XML-like document holding a sequence of `<SYNSET>`
//! elements, optionally wrapped in a `<WNXML>` root. [`SynsetParser`] reads
//! it line by line and produces one [`Synset`] per call to
//! [`SynsetParser::parse_next`], so a whole lexicon never has to be held as
//! a DOM. This is not a validating XML parser: there is no DTD/schema or
//! namespace support, attributes are ignored, and the tag set is fixed.
//!
//! Internally the parser keeps a stack of structural context frames, pushed
//! and popped as elements open and close. Which field a chunk of character
//! data belongs to is a function of the top of that stack alone, so content
//! split across lines or character references is appended to the right slot
//! without re-deriving element ancestry.
//!
//! Fault tolerance: lexicon dumps in the wild are often bare `<SYNSET>`
//! sequences with no root element. A missing root is synthesized before the
//! first synset, and the matching close tag is synthesized by
//! [`SynsetParser::finish`] if the input never provided one.

use std::io::BufRead;

use crate::error::{Result, WnQueryError};
use crate::synset::{Pointer, Synset, WordSense};
use crate::transcode::Transcoder;

/// Structural context of the innermost open element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    /// The document root wrapper (real or synthesized).
    Document,
    /// An open `SYNSET` element.
    Synset,
    // Scalar fields directly under SYNSET.
    Id,
    Pos,
    Def,
    Bcs,
    Stamp,
    Domain,
    Nl,
    Tnl,
    /// The `SYNONYM` container element.
    Synonym,
    /// A `LITERAL` under `SYNONYM` and its nested fields.
    Literal,
    Sense,
    Lnote,
    Nucleus,
    /// Pointer elements and their nested `TYPE` tags.
    Ilr,
    IlrType,
    Sumo,
    SumoType,
    Elr,
    ElrType,
    /// `EQ_NEAR_SYNONYM` / `EQ_HYPERNYM` / `EQ_HYPONYM` shorthand; the
    /// pointer type is preset, only the target is read from content.
    EqLink,
    Eksz,
    EkszType,
    Vframe,
    VframeType,
    /// `USAGE` / `SNOTE` entries.
    Usage,
    Snote,
    /// Any element the dialect does not define; contents are ignored.
    Other,
}

/// Progress of the record being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordState {
    /// No `SYNSET` element opened yet.
    NotStarted,
    /// Inside an open `SYNSET`.
    Open,
    /// The `SYNSET` closed; further content is ignored until the next call.
    Complete,
}

/// Streaming parser producing one [`Synset`] per `<SYNSET>` element.
#[derive(Debug)]
pub struct SynsetParser {
    transcoder: Transcoder,
    frames: Vec<Frame>,
    state: RecordState,
    saw_root_open: bool,
    saw_root_close: bool,
    /// Markup left unterminated at the end of a line, carried to the next.
    pending: String,
}

impl SynsetParser {
    /// Create a parser whose character data is normalized to the destination
    /// encoding named by `label` (see [`Transcoder`]).
    ///
    /// An unrecognized label is a configuration error, raised here before
    /// any parsing begins.
    pub fn new(label: &str) -> Result<Self> {
        Ok(SynsetParser::with_transcoder(Transcoder::new(label)?))
    }

    /// Create a parser that leaves character data in UTF-8 unchanged.
    pub fn utf8() -> Self {
        SynsetParser::with_transcoder(Transcoder::utf8())
    }

    fn with_transcoder(transcoder: Transcoder) -> Self {
        SynsetParser {
            transcoder,
            frames: Vec::new(),
            state: RecordState::NotStarted,
            saw_root_open: false,
            saw_root_close: false,
            pending: String::new(),
        }
    }

    /// Read lines from `reader` until one complete `SYNSET` element has been
    /// parsed into `record`, or until end of input.
    ///
    /// `line_no` is advanced past every consumed line and is used in error
    /// messages. On clean end of input with no synset in progress, `record`
    /// is left empty (the "no synset" sentinel). End of input in the middle
    /// of a synset is a parse error.
    pub fn parse_next<R: BufRead>(
        &mut self,
        reader: &mut R,
        record: &mut Synset,
        line_no: &mut u64,
    ) -> Result<()> {
        self.state = RecordState::NotStarted;
        record.clear();

        let mut line = String::new();
        loop {
            line.clear();
            let read = reader.read_line(&mut line)?;
            if read == 0 {
                if self.state == RecordState::Open {
                    return Err(WnQueryError::parse(
                        *line_no,
                        "end of input reached before </SYNSET>, possibly corrupt input",
                    ));
                }
                return Ok(());
            }
            *line_no += 1;
            while line.ends_with('\n') || line.ends_with('\r') {
                line.pop();
            }

            // Root-wrapper fault tolerance: synthesize the opening tag when
            // the first SYNSET arrives without one.
            if !self.saw_root_open && line.contains("<WNXML>") {
                self.saw_root_open = true;
            }
            if !self.saw_root_open && line.contains("<SYNSET>") {
                self.process_chunk("<WNXML>", record, *line_no)?;
                self.saw_root_open = true;
            }
            if line.contains("</WNXML>") {
                self.saw_root_close = true;
            }

            self.process_chunk(&line, record, *line_no)?;

            if self.state == RecordState::Complete {
                return Ok(());
            }
        }
    }

    /// Finish parsing, synthesizing the root close tag if the input never
    /// provided one. Call once after the last [`SynsetParser::parse_next`].
    pub fn finish(&mut self, line_no: u64) -> Result<()> {
        if self.saw_root_open && !self.saw_root_close {
            self.process_chunk("</WNXML>", &mut Synset::new(), line_no)?;
            self.saw_root_close = true;
        }
        Ok(())
    }

    /// Scan one chunk of markup, dispatching tag and text events.
    fn process_chunk(&mut self, chunk: &str, record: &mut Synset, line_no: u64) -> Result<()> {
        let data = if self.pending.is_empty() {
            chunk.to_string()
        } else {
            let mut carried = std::mem::take(&mut self.pending);
            carried.push_str(chunk);
            carried
        };

        let mut rest = data.as_str();
        while !rest.is_empty() {
            match rest.find('<') {
                None => {
                    self.on_text(rest, record, line_no)?;
                    break;
                }
                Some(start) => {
                    if start > 0 {
                        self.on_text(&rest[..start], record, line_no)?;
                    }
                    let tail = &rest[start..];
                    match tail.find('>') {
                        None => {
                            // Tag spans the line boundary; keep it for the
                            // next chunk.
                            self.pending = tail.to_string();
                            break;
                        }
                        Some(end) => {
                            self.on_markup(&tail[1..end], record, line_no)?;
                            rest = &tail[end + 1..];
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Dispatch the contents of one `<...>` span.
    fn on_markup(&mut self, inner: &str, record: &mut Synset, line_no: u64) -> Result<()> {
        let inner = inner.trim();
        if inner.is_empty() || inner.starts_with('!') || inner.starts_with('?') {
            // Comments, doctype and processing instructions.
            return Ok(());
        }
        if let Some(name) = inner.strip_prefix('/') {
            return self.on_close(name.trim(), record, line_no);
        }
        let self_closing = inner.ends_with('/');
        let body = inner.strip_suffix('/').unwrap_or(inner);
        let name = body.split_whitespace().next().unwrap_or("");
        if name.is_empty() {
            return Ok(());
        }
        self.on_open(name, record)?;
        if self_closing {
            self.on_close(name, record, line_no)?;
        }
        Ok(())
    }

    /// Handle an element open: push the matching context frame and create
    /// the slot that subsequent character data will be routed into.
    fn on_open(&mut self, name: &str, record: &mut Synset) -> Result<()> {
        if self.state == RecordState::Complete {
            // Keep the stack balanced but touch nothing else.
            self.frames.push(Frame::Other);
            return Ok(());
        }

        if name == "SYNSET" {
            self.state = RecordState::Open;
            self.frames.push(Frame::Synset);
            return Ok(());
        }

        let frame = match self.frames.last() {
            None => Frame::Document,
            Some(Frame::Synset) => match name {
                "ID" => Frame::Id,
                "POS" => Frame::Pos,
                "SYNONYM" => Frame::Synonym,
                "DEF" => Frame::Def,
                "BCS" => Frame::Bcs,
                "STAMP" => Frame::Stamp,
                "DOMAIN" => Frame::Domain,
                "NL" => Frame::Nl,
                "TNL" => Frame::Tnl,
                "ILR" => {
                    record.ilrs.push(Pointer::default());
                    Frame::Ilr
                }
                "USAGE" => {
                    record.usages.push(String::new());
                    Frame::Usage
                }
                "SNOTE" => {
                    record.snotes.push(String::new());
                    Frame::Snote
                }
                "SUMO" => {
                    record.sumolinks.push(Pointer::default());
                    Frame::Sumo
                }
                "ELR" => {
                    record.elrs.push(Pointer::default());
                    Frame::Elr
                }
                "EQ_NEAR_SYNONYM" => {
                    record.elrs.push(Pointer::new("", "eq_near_synonym"));
                    Frame::EqLink
                }
                "EQ_HYPERNYM" => {
                    record.elrs.push(Pointer::new("", "eq_has_hypernym"));
                    Frame::EqLink
                }
                "EQ_HYPONYM" => {
                    record.elrs.push(Pointer::new("", "eq_has_hyponym"));
                    Frame::EqLink
                }
                "EKSZ" => {
                    record.ekszlinks.push(Pointer::default());
                    Frame::Eksz
                }
                "VFRAME" => {
                    record.vframelinks.push(Pointer::default());
                    Frame::Vframe
                }
                _ => Frame::Other,
            },
            Some(Frame::Synonym) => match name {
                "LITERAL" => {
                    record.synonyms.push(WordSense::default());
                    Frame::Literal
                }
                _ => Frame::Other,
            },
            Some(Frame::Literal) => match name {
                "SENSE" => Frame::Sense,
                "LNOTE" => Frame::Lnote,
                "NUCLEUS" => Frame::Nucleus,
                _ => Frame::Other,
            },
            Some(Frame::Ilr) if name == "TYPE" => Frame::IlrType,
            Some(Frame::Sumo) if name == "TYPE" => Frame::SumoType,
            Some(Frame::Elr) if name == "TYPE" => Frame::ElrType,
            Some(Frame::Eksz) if name == "TYPE" => Frame::EkszType,
            Some(Frame::Vframe) if name == "TYPE" => Frame::VframeType,
            Some(_) => Frame::Other,
        };
        self.frames.push(frame);
        Ok(())
    }

    /// Handle an element close: pop the frame and mark the record complete
    /// when the `SYNSET` element itself closes.
    fn on_close(&mut self, name: &str, _record: &mut Synset, line_no: u64) -> Result<()> {
        if self.frames.pop().is_none() {
            return Err(WnQueryError::parse(
                line_no,
                format!("unexpected end tag </{name}> with no open element"),
            ));
        }
        if name == "SYNSET" && self.state != RecordState::Complete {
            if self.state == RecordState::NotStarted {
                return Err(WnQueryError::parse(
                    line_no,
                    "SYNSET end tag without a matching begin tag",
                ));
            }
            self.state = RecordState::Complete;
        }
        Ok(())
    }

    /// Route one chunk of character data to the field selected by the
    /// current context frame, appending to whatever is already there.
    fn on_text(&mut self, raw: &str, record: &mut Synset, line_no: u64) -> Result<()> {
        if self.state != RecordState::Open {
            return Ok(());
        }
        let Some(&frame) = self.frames.last() else {
            return Ok(());
        };

        let text = self.transcoder.convert(&decode_entities(raw));

        match frame {
            Frame::Id => record.id.push_str(&text),
            Frame::Pos => record.pos.push_str(&text),
            Frame::Def => record.def.push_str(&text),
            Frame::Bcs => record.bcs.push_str(&text),
            Frame::Stamp => record.stamp.push_str(&text),
            Frame::Domain => record.domain.push_str(&text),
            Frame::Nl => record.nl.push_str(&text),
            Frame::Tnl => record.tnl.push_str(&text),
            Frame::Literal => {
                last_sense(record, line_no, "LITERAL")?.literal.push_str(&text);
            }
            Frame::Sense => {
                last_sense(record, line_no, "SENSE")?.sense.push_str(&text);
            }
            Frame::Lnote => {
                last_sense(record, line_no, "LNOTE")?.lnote.push_str(&text);
            }
            Frame::Nucleus => {
                last_sense(record, line_no, "NUCLEUS")?.nucleus.push_str(&text);
            }
            Frame::Ilr => {
                last_pointer(&mut record.ilrs, line_no, "ILR")?.target.push_str(&text);
            }
            Frame::IlrType => {
                last_pointer(&mut record.ilrs, line_no, "ILR/TYPE")?.rtype.push_str(&text);
            }
            Frame::Sumo => {
                last_pointer(&mut record.sumolinks, line_no, "SUMO")?.target.push_str(&text);
            }
            Frame::SumoType => {
                last_pointer(&mut record.sumolinks, line_no, "SUMO/TYPE")?.rtype.push_str(&text);
            }
            Frame::Elr | Frame::EqLink => {
                last_pointer(&mut record.elrs, line_no, "ELR")?.target.push_str(&text);
            }
            Frame::ElrType => {
                last_pointer(&mut record.elrs, line_no, "ELR/TYPE")?.rtype.push_str(&text);
            }
            Frame::Eksz => {
                last_pointer(&mut record.ekszlinks, line_no, "EKSZ")?.target.push_str(&text);
            }
            Frame::EkszType => {
                last_pointer(&mut record.ekszlinks, line_no, "EKSZ/TYPE")?.rtype.push_str(&text);
            }
            Frame::Vframe => {
                last_pointer(&mut record.vframelinks, line_no, "VFRAME")?.target.push_str(&text);
            }
            Frame::VframeType => {
                last_pointer(&mut record.vframelinks, line_no, "VFRAME/TYPE")?
                    .rtype
                    .push_str(&text);
            }
            Frame::Usage => {
                let Some(last) = record.usages.last_mut() else {
                    return Err(internal_routing_error(line_no, "USAGE"));
                };
                last.push_str(&text);
            }
            Frame::Snote => {
                let Some(last) = record.snotes.last_mut() else {
                    return Err(internal_routing_error(line_no, "SNOTE"));
                };
                last.push_str(&text);
            }
            // Container elements and unknown tags: whitespace and stray
            // content between child tags, dropped.
            Frame::Document | Frame::Synset | Frame::Synonym | Frame::Other => {}
        }
        Ok(())
    }
}

/// Last word sense of the record, or the internal-consistency fault the
/// opening-tag handler is supposed to make impossible.
fn last_sense<'a>(record: &'a mut Synset, line_no: u64, at: &str) -> Result<&'a mut WordSense> {
    record
        .synonyms
        .last_mut()
        .ok_or_else(|| internal_routing_error(line_no, at))
}

/// Last pointer of a sequence, or the internal-consistency fault.
fn last_pointer<'a>(pointers: &'a mut Vec<Pointer>, line_no: u64, at: &str) -> Result<&'a mut Pointer> {
    pointers
        .last_mut()
        .ok_or_else(|| internal_routing_error(line_no, at))
}

fn internal_routing_error(line_no: u64, at: &str) -> WnQueryError {
    WnQueryError::parse(
        line_no,
        format!("internal parser error: no open entry while routing {at} content"),
    )
}

/// Decode predefined and numeric character references.
///
/// `&amp; &lt; &gt; &quot; &apos;` and `&#NNN;` / `&#xHH;` become their
/// characters; anything else ampersand-shaped is passed through untouched.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match tail.find(';') {
            Some(end) => {
                let body = &tail[1..end];
                match decode_entity_body(body) {
                    Some(c) => {
                        out.push(c);
                        rest = &tail[end + 1..];
                    }
                    None => {
                        out.push('&');
                        rest = &tail[1..];
                    }
                }
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decode one entity body (the text between `&` and `;`).
fn decode_entity_body(body: &str) -> Option<char> {
    match body {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let digits = body.strip_prefix('#')?;
            let code = if let Some(hex) = digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                digits.parse::<u32>().ok()?
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse_all(input: &str) -> Result<Vec<Synset>> {
        let mut parser = SynsetParser::utf8();
        let mut reader = Cursor::new(input);
        let mut out = Vec::new();
        let mut line_no = 0u64;
        loop {
            let mut record = Synset::new();
            parser.parse_next(&mut reader, &mut record, &mut line_no)?;
            if record.is_empty() {
                break;
            }
            out.push(record);
        }
        parser.finish(line_no)?;
        Ok(out)
    }

    #[test]
    fn test_parse_single_synset() {
        let input = "<WNXML>\n\
                     <SYNSET><ID>ENG20-1-n</ID><POS>n</POS>\
                     <SYNONYM><LITERAL>dog<SENSE>1</SENSE></LITERAL>\
                     <LITERAL>domestic dog<SENSE>1</SENSE><LNOTE>zool</LNOTE></LITERAL></SYNONYM>\
                     <ILR>ENG20-2-n<TYPE>hypernym</TYPE></ILR>\
                     <DEF>a domesticated canid</DEF>\
                     <USAGE>the dog barked</USAGE>\
                     <SUMO>Canine<TYPE>+</TYPE></SUMO></SYNSET>\n\
                     </WNXML>\n";
        let synsets = parse_all(input).unwrap();
        assert_eq!(synsets.len(), 1);

        let s = &synsets[0];
        assert_eq!(s.id, "ENG20-1-n");
        assert_eq!(s.pos, "n");
        assert_eq!(s.synonyms.len(), 2);
        assert_eq!(s.synonyms[0].literal, "dog");
        assert_eq!(s.synonyms[0].sense, "1");
        assert_eq!(s.synonyms[1].literal, "domestic dog");
        assert_eq!(s.synonyms[1].lnote, "zool");
        assert_eq!(s.ilrs, vec![Pointer::new("ENG20-2-n", "hypernym")]);
        assert_eq!(s.def, "a domesticated canid");
        assert_eq!(s.usages, vec!["the dog barked".to_string()]);
        assert_eq!(s.sumolinks, vec![Pointer::new("Canine", "+")]);
    }

    #[test]
    fn test_parse_without_root_wrapper() {
        // A bare sequence of SYNSET fragments is accepted.
        let input = "<SYNSET><ID>ENG20-1-n</ID><POS>n</POS>\
                     <SYNONYM><LITERAL>dog<SENSE>1</SENSE></LITERAL></SYNONYM></SYNSET>\n\
                     <SYNSET><ID>ENG20-2-n</ID><POS>n</POS>\
                     <SYNONYM><LITERAL>canid<SENSE>1</SENSE></LITERAL></SYNONYM></SYNSET>\n";
        let synsets = parse_all(input).unwrap();
        assert_eq!(synsets.len(), 2);
        assert_eq!(synsets[0].id, "ENG20-1-n");
        assert_eq!(synsets[1].id, "ENG20-2-n");
    }

    #[test]
    fn test_eof_inside_synset_is_fatal() {
        let input = "<WNXML>\n<SYNSET><ID>ENG20-1-n</ID><POS>n</POS>\n";
        let err = parse_all(input).unwrap_err();
        match err {
            WnQueryError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("end of input"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_eq_shorthand_presets_type() {
        let input = "<SYNSET><ID>ENG20-1-n</ID><POS>n</POS><SYNONYM></SYNONYM>\
                     <EQ_NEAR_SYNONYM>ENG20-9-n</EQ_NEAR_SYNONYM>\
                     <EQ_HYPERNYM>ENG20-8-n</EQ_HYPERNYM>\
                     <EQ_HYPONYM>ENG20-7-n</EQ_HYPONYM>\
                     <ELR>ENG20-6-n<TYPE>eq_synonym</TYPE></ELR></SYNSET>\n";
        let synsets = parse_all(input).unwrap();
        let elrs = &synsets[0].elrs;
        assert_eq!(elrs.len(), 4);
        assert_eq!(elrs[0], Pointer::new("ENG20-9-n", "eq_near_synonym"));
        assert_eq!(elrs[1], Pointer::new("ENG20-8-n", "eq_has_hypernym"));
        assert_eq!(elrs[2], Pointer::new("ENG20-7-n", "eq_has_hyponym"));
        assert_eq!(elrs[3], Pointer::new("ENG20-6-n", "eq_synonym"));
    }

    #[test]
    fn test_content_split_across_lines_appends() {
        let input = "<SYNSET><ID>ENG20-1-n</ID><POS>n</POS><SYNONYM></SYNONYM>\
                     <DEF>a very\nlong definition</DEF></SYNSET>\n";
        let synsets = parse_all(input).unwrap();
        // Lines are fed without their terminators, like the original
        // chunked SAX feed, so the halves join directly.
        assert_eq!(synsets[0].def, "a verylong definition");
    }

    #[test]
    fn test_tag_spanning_line_boundary() {
        let input = "<SYNSET><ID>ENG20-1-n</ID><POS\n>n</POS><SYNONYM></SYNONYM></SYNSET>\n";
        let synsets = parse_all(input).unwrap();
        assert_eq!(synsets[0].pos, "n");
    }

    #[test]
    fn test_entity_decoding() {
        let input = "<SYNSET><ID>ENG20-1-n</ID><POS>n</POS>\
                     <SYNONYM><LITERAL>R&amp;D<SENSE>1</SENSE></LITERAL></SYNONYM>\
                     <DEF>&lt;research&gt; &#233;tude &unknown;</DEF></SYNSET>\n";
        let synsets = parse_all(input).unwrap();
        assert_eq!(synsets[0].synonyms[0].literal, "R&D");
        assert_eq!(synsets[0].def, "<research> étude &unknown;");
    }

    #[test]
    fn test_unknown_tags_are_ignored() {
        let input = "<SYNSET><ID>ENG20-1-n</ID><POS>n</POS><SYNONYM></SYNONYM>\
                     <FANCY><DEEP>ignored</DEEP></FANCY>\
                     <DEF>kept</DEF></SYNSET>\n";
        let synsets = parse_all(input).unwrap();
        assert_eq!(synsets[0].def, "kept");
    }

    #[test]
    fn test_unknown_encoding_fails_at_construction() {
        assert!(SynsetParser::new("latin-42").is_err());
    }

    #[test]
    fn test_transcoding_applies_to_character_data() {
        let input = "<SYNSET><ID>ENG20-1-n</ID><POS>n</POS><SYNONYM></SYNONYM>\
                     <DEF>кутя</DEF></SYNSET>\n";
        let mut parser = SynsetParser::new("ISO-8859-2").unwrap();
        let mut reader = Cursor::new(input);
        let mut record = Synset::new();
        let mut line_no = 0u64;
        parser.parse_next(&mut reader, &mut record, &mut line_no).unwrap();
        // Cyrillic is outside Latin-2: normalized to character references.
        assert_eq!(record.def, "&#1082;&#1091;&#1090;&#1103;");
    }
}
