use std::num::ParseIntError;

use crate::message::Headers;

//
//
//
pub const CONTENT_LENGTH: &str = "Content-Length";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BodyFramingError {
    #[error("missing Content-Length header")]
    MissingContentLength,
    #[error("invalid Content-Length value {value:?}")]
    InvalidContentLength {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Body length announced by the `Content-Length` header.
///
/// The header name is matched case-sensitively. Surrounding whitespace in the
/// value is ignored.
pub fn content_length(headers: &Headers) -> Result<usize, BodyFramingError> {
    let value = headers
        .get(CONTENT_LENGTH)
        .ok_or(BodyFramingError::MissingContentLength)?;

    value
        .trim()
        .parse()
        .map_err(|source| BodyFramingError::InvalidContentLength {
            value: value.to_owned(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect() -> Result<(), BodyFramingError> {
        let mut headers = Headers::new();

        headers.insert("Content-Length".to_owned(), "1".to_owned());
        assert_eq!(content_length(&headers)?, 1);

        headers.insert("Content-Length".to_owned(), " 1270 ".to_owned());
        assert_eq!(content_length(&headers)?, 1270);

        headers.clear();
        headers.insert("content-length".to_owned(), "1".to_owned());
        assert_eq!(
            content_length(&headers),
            Err(BodyFramingError::MissingContentLength)
        );

        headers.clear();
        headers.insert("Content-Length".to_owned(), "-1".to_owned());
        assert!(matches!(
            content_length(&headers),
            Err(BodyFramingError::InvalidContentLength { value, .. }) if value == "-1"
        ));

        headers.insert("Content-Length".to_owned(), "".to_owned());
        assert!(matches!(
            content_length(&headers),
            Err(BodyFramingError::InvalidContentLength { .. })
        ));

        Ok(())
    }
}
