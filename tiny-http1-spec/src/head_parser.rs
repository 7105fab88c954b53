use crate::{
    message::{Headers, Message, StartLine},
    COLON, CR, HEADER_TERMINATOR, LF, SP,
};

//
//
//
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HeadParseError {
    #[error("no header terminator found")]
    NoHeaderTerminator,
    #[error("invalid start line {0:?}")]
    InvalidStartLine(String),
    #[error("invalid header line {0:?}")]
    InvalidHeader(String),
    #[error("invalid status code {0:?}")]
    InvalidStatusCode(String),
}

//
//
//
pub trait HeadParser {
    fn parse_start_line(line: &str) -> Result<StartLine, HeadParseError>;

    /// Head lines must be UTF-8. The body is taken as is.
    fn parse(bytes: &[u8]) -> Result<Message, HeadParseError> {
        let (head, body) = split_head(bytes)?;

        // CR is dropped everywhere in the head, LF alone separates lines.
        let head: Vec<u8> = head.iter().copied().filter(|b| *b != CR).collect();

        let mut lines = head.split(|b| *b == LF);
        let start_line = lines.next().unwrap_or_default();
        let start_line = std::str::from_utf8(start_line).map_err(|_| {
            HeadParseError::InvalidStartLine(String::from_utf8_lossy(start_line).into_owned())
        })?;
        let start_line = Self::parse_start_line(start_line)?;

        let mut headers = Headers::new();
        for line in lines {
            let line = std::str::from_utf8(line).map_err(|_| {
                HeadParseError::InvalidHeader(String::from_utf8_lossy(line).into_owned())
            })?;
            Self::parse_header(line, &mut headers)?;
        }

        log::trace!(
            "parsed head with {} headers and {} body bytes",
            headers.len(),
            body.len()
        );

        Ok(Message::from_parts(start_line, headers, body.to_vec()))
    }

    fn parse_header(line: &str, headers: &mut Headers) -> Result<(), HeadParseError> {
        let header_colon_index = line
            .find(COLON as char)
            .ok_or_else(|| HeadParseError::InvalidHeader(line.to_owned()))?;
        let header_name = &line[..header_colon_index];
        if header_name.is_empty() {
            return Err(HeadParseError::InvalidHeader(line.to_owned()));
        }

        let header_value = &line[header_colon_index + 1..];
        let header_value = header_value
            .strip_prefix(SP as char)
            .unwrap_or(header_value);

        headers.insert(header_name.to_owned(), header_value.to_owned());
        Ok(())
    }
}

/// Splits at the first CRLFCRLF into head and body.
pub fn split_head(bytes: &[u8]) -> Result<(&[u8], &[u8]), HeadParseError> {
    let header_end = find_header_terminator(bytes).ok_or(HeadParseError::NoHeaderTerminator)?;

    Ok((
        &bytes[..header_end],
        &bytes[header_end + HEADER_TERMINATOR.len()..],
    ))
}

pub fn find_header_terminator(bytes: &[u8]) -> Option<usize> {
    bytes
        .windows(HEADER_TERMINATOR.len())
        .position(|w| w == HEADER_TERMINATOR)
}

/// Index of the first space and of the space after it.
pub(crate) fn find_two_spaces(line: &str) -> Option<(usize, usize)> {
    let first = line.find(SP as char)?;
    let second = line[first + 1..].find(SP as char)? + first + 1;
    Some((first, second))
}
