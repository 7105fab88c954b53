//
//
//
#[derive(Debug, PartialEq, Eq)]
pub enum BodyParseOutput {
    Completed(usize),
    Partial(usize),
}

//
//
//
pub trait BodyParser {
    fn parse(&mut self, chunk: &[u8], body_buf: &mut Vec<u8>) -> BodyParseOutput;
}
