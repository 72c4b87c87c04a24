//! hg output parser
//!
//! Parses templated `hg log` output into structured changeset records.
//!
//! Fields are read by position: the six leading fields end at a single
//! separator and the description runs up to the record terminator. A record
//! separator only terminates a record when it is followed by the end of the
//! output, a newline, or the `rev|node|` head of the next record, so empty
//! fields and descriptions with leading or trailing pipes survive.

use super::HgError;
use super::template::{FIELD_COUNT, FIELD_SEPARATOR, RECORD_SEPARATOR};
use crate::model::ChangesetRecord;

const NEWLINES: [char; 2] = ['\n', '\r'];

/// Parser for hg command output
pub struct Parser;

impl Parser {
    /// Parse `hg log` output produced with [`Templates::log`](super::Templates::log)
    pub fn parse_log(output: &str) -> Result<Vec<ChangesetRecord>, HgError> {
        Self::parse_records(output, RECORD_SEPARATOR, FIELD_SEPARATOR)
    }

    /// Split raw text into records, then each record into fields
    ///
    /// Records come back in input order. Only newlines between records are
    /// stripped; field text is kept as emitted. Any record that does not
    /// yield [`FIELD_COUNT`] fields fails the whole parse.
    pub fn parse_records(
        output: &str,
        record_separator: &str,
        field_separator: &str,
    ) -> Result<Vec<ChangesetRecord>, HgError> {
        let mut records = Vec::new();
        let mut rest = output.trim_start_matches(NEWLINES);

        while !rest.trim().is_empty() {
            let (end, next) = Self::record_end(rest, record_separator, field_separator);
            let record = Self::parse_record(
                records.len(),
                &rest[..end],
                record_separator,
                field_separator,
            )?;
            records.push(record);
            rest = rest[next..].trim_start_matches(NEWLINES);
        }

        Ok(records)
    }

    /// Find the terminator of the record at the start of `text`
    ///
    /// Returns the end of the record text and the offset where the next
    /// record may start. Overlapping matches are tried in order, so in
    /// `"x|||2|…"` the terminator is the second pair and the description
    /// keeps its trailing pipe. Without a terminator the record runs to the
    /// end of the output.
    fn record_end(text: &str, record_separator: &str, field_separator: &str) -> (usize, usize) {
        let mut from = 0;
        while let Some(offset) = text[from..].find(record_separator) {
            let start = from + offset;
            let after = &text[start + record_separator.len()..];
            if after.starts_with(NEWLINES)
                || after.trim().is_empty()
                || Self::is_record_head(after, field_separator)
            {
                return (start, start + record_separator.len());
            }
            from = start + text[start..].chars().next().map_or(1, char::len_utf8);
        }
        (text.trim_end_matches(NEWLINES).len(), text.len())
    }

    /// Whether `text` opens with a decimal revision and a hex node
    fn is_record_head(text: &str, field_separator: &str) -> bool {
        let mut fields = text.splitn(3, field_separator);
        let (Some(revision), Some(node), Some(_)) = (fields.next(), fields.next(), fields.next())
        else {
            return false;
        };
        !revision.is_empty()
            && revision.bytes().all(|b| b.is_ascii_digit())
            && !node.is_empty()
            && node.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Parse one record
    ///
    /// The description is the last field, so it absorbs any extra field
    /// separators (`"fix a|b"` stays one description). A record separator
    /// inside it cannot be told apart from a record end and is rejected.
    fn parse_record(
        index: usize,
        record: &str,
        record_separator: &str,
        field_separator: &str,
    ) -> Result<ChangesetRecord, HgError> {
        let malformed = || {
            tracing::warn!(index, fragment = record, "malformed log record");
            HgError::MalformedRecord {
                index,
                fragment: record.to_string(),
            }
        };

        let mut leading = Vec::with_capacity(FIELD_COUNT - 1);
        let mut rest = record;
        for _ in 1..FIELD_COUNT {
            let (field, tail) = rest.split_once(field_separator).ok_or_else(malformed)?;
            leading.push(field);
            rest = tail;
        }
        if rest.contains(record_separator) {
            return Err(malformed());
        }

        Ok(ChangesetRecord {
            revision: leading[0].to_string(),
            node: leading[1].to_string(),
            branch: leading[2].to_string(),
            author: leading[3].to_string(),
            date: leading[4].to_string(),
            age: leading[5].to_string(),
            description: rest.to_string(),
        })
    }
}
