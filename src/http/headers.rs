use std::collections::HashMap;

use crate::http::parser::{CRLF, ParseError, find_crlf};

/// Lookup table for the RFC 9110 `tchar` grammar, built once at compile time.
static TOKEN_CHARS: [bool; 256] = build_token_table();

const fn build_token_table() -> [bool; 256] {
    let mut table = [false; 256];
    let mut i = 0;
    while i < table.len() {
        let c = i as u8;
        table[i] = c.is_ascii_alphanumeric()
            || matches!(
                c,
                b'!' | b'#'
                    | b'$'
                    | b'%'
                    | b'&'
                    | b'\''
                    | b'*'
                    | b'+'
                    | b'-'
                    | b'.'
                    | b'^'
                    | b'_'
                    | b'`'
                    | b'|'
                    | b'~'
            );
        i += 1;
    }
    table
}

/// Returns true if `s` is a non-empty HTTP token.
pub fn is_token(s: &[u8]) -> bool {
    !s.is_empty() && s.iter().all(|&b| TOKEN_CHARS[b as usize])
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Field {
    /// Spelling of the name as first inserted, used when serializing.
    name: String,
    value: String,
}

/// Header fields keyed by lowercase name.
///
/// Repeated names accumulate into a single comma-joined value: setting
/// `Accept: a` then `Accept: b` stores `a,b`. This cannot be told apart
/// from one field whose value already contains a comma.
///
/// Iteration order is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    fields: HashMap<String, Field>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, appending to any existing value for the same name.
    pub fn set(&mut self, name: &str, value: &str) {
        self.fields
            .entry(name.to_ascii_lowercase())
            .and_modify(|field| {
                field.value.push(',');
                field.value.push_str(value);
            })
            .or_insert_with(|| Field {
                name: name.to_string(),
                value: value.to_string(),
            });
    }

    /// Overwrites any existing value for `name`.
    pub fn replace(&mut self, name: &str, value: &str) {
        self.fields.insert(
            name.to_ascii_lowercase(),
            Field {
                name: name.to_string(),
                value: value.to_string(),
            },
        );
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.fields
            .remove(&name.to_ascii_lowercase())
            .map(|field| field.value)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(&name.to_ascii_lowercase())
            .map(|field| field.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .values()
            .map(|field| (field.name.as_str(), field.value.as_str()))
    }

    pub fn for_each(&self, mut visit: impl FnMut(&str, &str)) {
        for (name, value) in self.iter() {
            visit(name, value);
        }
    }

    /// Consumes complete field lines from the front of `data`.
    ///
    /// Returns the number of bytes consumed and whether the empty line ending
    /// the header block was reached. Zero bytes consumed without completion
    /// means no full line has arrived yet.
    pub fn parse(&mut self, data: &[u8]) -> Result<(usize, bool), ParseError> {
        let mut read = 0;

        while let Some(idx) = find_crlf(&data[read..]) {
            if idx == 0 {
                return Ok((read + CRLF.len(), true));
            }

            let (name, value) = parse_field_line(&data[read..read + idx])?;
            self.set(&name, &value);
            read += idx + CRLF.len();
        }

        Ok((read, false))
    }
}

fn parse_field_line(line: &[u8]) -> Result<(String, String), ParseError> {
    let colon = line
        .iter()
        .position(|&b| b == b':')
        .ok_or(ParseError::BadFieldLine)?;

    let name = &line[..colon];
    let value = line[colon + 1..].trim_ascii();

    if name.ends_with(b" ") {
        return Err(ParseError::BadFieldName);
    }

    if !is_token(name) {
        return Err(ParseError::BadHeaderName);
    }

    // Token bytes are ascii; values may carry obs-text.
    let name = String::from_utf8_lossy(name).into_owned();
    let value = String::from_utf8_lossy(value).into_owned();

    Ok((name, value))
}
