use http::StatusCode;

use crate::{
    head_parser::{HeadParseError, HeadParser},
    message::StartLine,
    SP,
};

//
//
//
const STATUS_CODE_LEN: usize = 3;
const HTTP_VERSION_PREFIX: &str = "HTTP/";

/// Parses `VERSION SP STATUS [SP] [REASON]`.
///
/// The status code is the three bytes after the first space, so a reason
/// phrase glued to the code (`200OK`) is accepted as well.
#[derive(Debug, Default)]
pub struct ResponseHeadParser;

impl HeadParser for ResponseHeadParser {
    fn parse_start_line(line: &str) -> Result<StartLine, HeadParseError> {
        let invalid = || HeadParseError::InvalidStartLine(line.to_owned());

        let version_end = line.find(SP as char).ok_or_else(invalid)?;
        if !line[..version_end].starts_with(HTTP_VERSION_PREFIX) {
            return Err(invalid());
        }

        let status_start = version_end + 1;
        let status_code = line
            .get(status_start..status_start + STATUS_CODE_LEN)
            .ok_or_else(invalid)?;
        let status = StatusCode::from_bytes(status_code.as_bytes())
            .map_err(|_| HeadParseError::InvalidStatusCode(status_code.to_owned()))?;

        Ok(StartLine::Response { status })
    }
}
