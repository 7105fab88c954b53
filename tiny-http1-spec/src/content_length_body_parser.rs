use crate::{
    body_framing::BodyFramingError,
    body_parser::{BodyParseOutput, BodyParser},
    message::Message,
};

//
//
//
/// Counts down the body bytes still expected after the head.
///
/// Every chunk is appended whole and subtracted whole, so the remaining
/// count goes negative when the last chunk carries more than was announced.
#[derive(Debug, Default)]
pub struct ContentLengthBodyParser {
    remaining: i64,
}
impl ContentLengthBodyParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the message's `Content-Length` minus the body bytes that
    /// arrived together with the head.
    pub fn for_message(message: &Message) -> Result<Self, BodyFramingError> {
        let mut parser = Self::new();
        parser.set_length(message.content_length()?);
        parser.remaining -= to_i64(message.body().len());
        Ok(parser)
    }

    pub fn set_length(&mut self, length: usize) {
        self.remaining = to_i64(length)
    }
    pub fn get_remaining(&self) -> i64 {
        self.remaining
    }
    pub fn is_completed(&self) -> bool {
        self.remaining <= 0
    }
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

//
//
//
impl BodyParser for ContentLengthBodyParser {
    fn parse(&mut self, chunk: &[u8], body_buf: &mut Vec<u8>) -> BodyParseOutput {
        body_buf.extend_from_slice(chunk);
        self.remaining = self.remaining.saturating_sub(to_i64(chunk.len()));

        if self.is_completed() {
            BodyParseOutput::Completed(chunk.len())
        } else {
            BodyParseOutput::Partial(chunk.len())
        }
    }
}
