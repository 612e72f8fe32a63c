//! Per-message fact extraction.
//!
//! Turns one raw MBOX message into the fixed [`MessageFacts`] tuple the
//! accumulator consumes. Header facts come from our own unfolding (so a
//! message that defeats the MIME parser still contributes them); body and
//! attachment facts come from a `mail-parser` MIME walk.

use mail_parser::{MessageParser, MimeHeaders, PartType};
use tracing::debug;

use crate::model::address::extract_addresses;
use crate::model::facts::{MessageFacts, REQUIRED_HEADERS};

use super::header::{
    decode_encoded_words, decode_header_bytes, extract_subject_keywords, get_header, month_key,
    parse_date, unfold_headers,
};

/// Extension sentinel for attachments without a usable filename.
const UNKNOWN_EXTENSION: &str = "unknown";

/// Extract all facts from a single raw message (including its `From `
/// separator line).
///
/// Never fails: unparseable sections simply contribute nothing.
pub fn extract_facts(raw_message: &[u8]) -> MessageFacts {
    let message_bytes = skip_from_line(raw_message);
    let mut facts = MessageFacts::default();

    extract_header_facts(message_bytes, &mut facts);
    extract_content_facts(message_bytes, &mut facts);

    facts
}

/// Header-side facts: addresses, keywords, month key, missing headers.
fn extract_header_facts(message_bytes: &[u8], facts: &mut MessageFacts) {
    let header_text = decode_header_bytes(raw_header_bytes(message_bytes));
    let headers = unfold_headers(&header_text);

    for name in REQUIRED_HEADERS {
        if get_header(&headers, name).is_none() {
            facts.missing_headers.push(name);
        }
    }

    if let Some(from) = get_header(&headers, "from") {
        facts.from = extract_addresses(&decode_encoded_words(&from));
    }
    if let Some(to) = get_header(&headers, "to") {
        facts.to = extract_addresses(&decode_encoded_words(&to));
    }
    if let Some(cc) = get_header(&headers, "cc") {
        facts.cc = extract_addresses(&decode_encoded_words(&cc));
    }
    if let Some(bcc) = get_header(&headers, "bcc") {
        facts.bcc = extract_addresses(&decode_encoded_words(&bcc));
    }
    if let Some(subject) = get_header(&headers, "subject") {
        facts.subject_keywords = extract_subject_keywords(&decode_encoded_words(&subject));
    }
    if let Some(date) = get_header(&headers, "date") {
        facts.month_key = parse_date(&decode_encoded_words(&date))
            .as_ref()
            .map(month_key);
    }
}

/// One leaf MIME part, reduced to what the content facts need.
struct LeafPart {
    kind: LeafKind,
    size: u64,
    filename: Option<String>,
    attachment_disposition: bool,
}

enum LeafKind {
    Text,
    Html,
    Binary,
}

/// Content-side facts: body sizes and attachments, via a MIME leaf walk.
fn extract_content_facts(message_bytes: &[u8], facts: &mut MessageFacts) {
    let parser = MessageParser::default();
    let Some(msg) = parser.parse(message_bytes) else {
        debug!("MIME parse failed, counting raw body as plain text");
        let body_len = raw_body_len(message_bytes);
        if body_len > 0 {
            facts.plain_text_size = body_len;
        }
        return;
    };

    let mut leaves = Vec::new();
    collect_leaves(&msg, &mut leaves);

    // A message with a single text leaf is a plain body, never an
    // attachment, even if the part carries a filename.
    let single_part = leaves.len() == 1;

    for leaf in leaves {
        match leaf.kind {
            LeafKind::Text => {
                facts.plain_text_size += leaf.size;
                if !single_part && leaf.is_attachment() {
                    facts.attachments.push((leaf.extension(), leaf.size));
                }
            }
            LeafKind::Html => {
                facts.html_size += leaf.size;
                if !single_part && leaf.is_attachment() {
                    facts.attachments.push((leaf.extension(), leaf.size));
                }
            }
            LeafKind::Binary => {
                if leaf.is_attachment() {
                    facts.attachments.push((leaf.extension(), leaf.size));
                }
            }
        }
    }
}

impl LeafPart {
    fn is_attachment(&self) -> bool {
        self.filename.is_some() || self.attachment_disposition
    }

    /// Lowercase dotted extension (`".pdf"`), or the `"unknown"` sentinel.
    fn extension(&self) -> String {
        let Some(name) = self.filename.as_deref() else {
            return UNKNOWN_EXTENSION.to_string();
        };
        match name.rfind('.') {
            Some(pos) if pos > 0 && pos + 1 < name.len() => name[pos..].to_lowercase(),
            _ => UNKNOWN_EXTENSION.to_string(),
        }
    }
}

/// Recursively collect leaf parts, descending into attached messages.
fn collect_leaves(msg: &mail_parser::Message<'_>, leaves: &mut Vec<LeafPart>) {
    for part in &msg.parts {
        let filename = part.attachment_name().map(String::from);
        let attachment_disposition = part
            .content_disposition()
            .map(|d| d.ctype().eq_ignore_ascii_case("attachment"))
            .unwrap_or(false);

        match &part.body {
            PartType::Text(text) => leaves.push(LeafPart {
                kind: LeafKind::Text,
                size: text.len() as u64,
                filename,
                attachment_disposition,
            }),
            PartType::Html(html) => leaves.push(LeafPart {
                kind: LeafKind::Html,
                size: html.len() as u64,
                filename,
                attachment_disposition,
            }),
            PartType::Binary(data) | PartType::InlineBinary(data) => leaves.push(LeafPart {
                kind: LeafKind::Binary,
                size: data.len() as u64,
                filename,
                attachment_disposition,
            }),
            PartType::Message(nested) => collect_leaves(nested, leaves),
            PartType::Multipart(_) => {}
        }
    }
}

/// Skip the `From ` separator line at the start of MBOX messages.
fn skip_from_line(data: &[u8]) -> &[u8] {
    // Handle BOM
    let data = if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
        &data[3..]
    } else {
        data
    };

    if data.starts_with(b"From ") {
        if let Some(pos) = data.iter().position(|&b| b == b'\n') {
            return &data[pos + 1..];
        }
    }
    data
}

/// Everything before the first blank line.
fn raw_header_bytes(data: &[u8]) -> &[u8] {
    if let Some(pos) = find_subslice(data, b"\r\n\r\n") {
        &data[..pos]
    } else if let Some(pos) = find_subslice(data, b"\n\n") {
        &data[..pos]
    } else {
        data
    }
}

/// Byte length of everything after the first blank line.
fn raw_body_len(data: &[u8]) -> u64 {
    if let Some(pos) = find_subslice(data, b"\r\n\r\n") {
        (data.len() - pos - 4) as u64
    } else if let Some(pos) = find_subslice(data, b"\n\n") {
        (data.len() - pos - 2) as u64
    } else {
        0
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
