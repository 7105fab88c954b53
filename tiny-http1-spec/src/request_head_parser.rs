use http::Method;

use crate::{
    head_parser::{find_two_spaces, HeadParseError, HeadParser},
    message::StartLine,
};

//
//
//
/// Parses `METHOD SP TARGET SP VERSION`. Only the target is validated, the
/// method token is reduced to POST or GET.
#[derive(Debug, Default)]
pub struct RequestHeadParser;

impl HeadParser for RequestHeadParser {
    fn parse_start_line(line: &str) -> Result<StartLine, HeadParseError> {
        let (url_start, url_end) = find_two_spaces(line)
            .ok_or_else(|| HeadParseError::InvalidStartLine(line.to_owned()))?;

        let method = if &line[..url_start] == Method::POST.as_str() {
            Method::POST
        } else {
            Method::GET
        };

        Ok(StartLine::request(method, &line[url_start + 1..url_end]))
    }
}
