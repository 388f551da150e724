use std::io::BufRead;

use crate::front_matter::types::Document;
use crate::utils::error::{QuireError, QuireResult};

/// Line that opens and closes the front matter block
const DELIMITER: &str = "---";

/// Where the parser stands relative to the front matter block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BeforeBlock,
    InBlock,
}

/// Parse the front matter block at the top of a post, on top of `base`;
/// keys found in the block override the ones in `base`.
///
/// Returns as soon as the closing delimiter is consumed, so the reader is
/// left on the first line of the body.
pub fn parse<R: BufRead>(reader: &mut R, base: &Document) -> QuireResult<Document> {
    let mut doc = base.clone();
    let mut state = State::BeforeBlock;
    let mut buf = String::new();

    while let Some(line) = next_line(reader, &mut buf)? {
        match state {
            State::BeforeBlock if line == DELIMITER => state = State::InBlock,
            State::BeforeBlock if line.is_empty() => {}
            State::BeforeBlock => return Err(QuireError::MissingFrontMatter),
            State::InBlock if line == DELIMITER => return Ok(doc),
            State::InBlock => {
                let (key, value) = split_field(line)
                    .ok_or_else(|| QuireError::InvalidFrontMatter(line.to_string()))?;
                doc.insert(key, value);
            }
        }
    }

    Err(QuireError::EmptyPost)
}

/// Read the next line, stripped of its line ending and surrounding spaces
fn next_line<'a, R: BufRead>(reader: &mut R, buf: &'a mut String) -> QuireResult<Option<&'a str>> {
    buf.clear();
    if reader.read_line(buf)? == 0 {
        return Ok(None);
    }
    let line = buf.trim_end_matches(['\n', '\r']);
    Ok(Some(line.trim_matches(' ')))
}

/// Split a `key: value` line on its first colon
fn split_field(line: &str) -> Option<(&str, &str)> {
    line.split_once(':')
        .map(|(key, value)| (key.trim_matches(' '), value.trim_matches(' ')))
}

/// Collect the rest of the stream as the post body, one `\n` per line
pub fn read_body<R: BufRead>(reader: &mut R) -> QuireResult<String> {
    let mut body = String::new();
    for line in reader.lines() {
        body.push_str(&line?);
        body.push('\n');
    }
    Ok(body)
}
