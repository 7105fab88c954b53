use std::collections::HashMap;

use http::{Method, StatusCode};

use crate::{
    body_framing::{self, BodyFramingError},
    head_parser::{HeadParseError, HeadParser as _},
    request_head_parser::RequestHeadParser,
    response_head_parser::ResponseHeadParser,
    USER_AGENT,
};

/// Header names are kept exactly as written, one value per name.
pub type Headers = HashMap<String, String>;

//
//
//
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartLine {
    /// `method` is either `GET` or `POST`.
    Request { method: Method, target: String },
    Response { status: StatusCode },
}

impl StartLine {
    pub fn request(method: Method, target: impl Into<String>) -> Self {
        // Only the GET/POST distinction survives on the wire.
        let method = if method == Method::POST {
            Method::POST
        } else {
            Method::GET
        };
        Self::Request {
            method,
            target: target.into(),
        }
    }
}

//
//
//
/// One HTTP/1.1 request or response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    start_line: StartLine,
    headers: Headers,
    body: Vec<u8>,
    host: Option<String>,
}

impl Message {
    /// Builds an outgoing request with the default `Host`, `User-Agent`,
    /// `Accept` and `Connection` headers.
    pub fn request(host: impl Into<String>, target: impl Into<String>, method: Method) -> Self {
        let host = host.into();

        let mut headers = Headers::with_capacity(4);
        headers.insert("Host".to_owned(), host.to_owned());
        headers.insert("User-Agent".to_owned(), USER_AGENT.to_owned());
        headers.insert("Accept".to_owned(), "text/html".to_owned());
        headers.insert("Connection".to_owned(), "close".to_owned());

        Self {
            start_line: StartLine::request(method, target),
            headers,
            body: Vec::new(),
            host: Some(host),
        }
    }

    pub fn response(status: StatusCode) -> Self {
        Self {
            start_line: StartLine::Response { status },
            headers: Headers::new(),
            body: Vec::new(),
            host: None,
        }
    }

    pub(crate) fn from_parts(start_line: StartLine, headers: Headers, body: Vec<u8>) -> Self {
        Self {
            start_line,
            headers,
            body,
            host: None,
        }
    }

    /// Parses an incoming request. Everything after the header terminator
    /// becomes the body.
    pub fn parse(bytes: &[u8]) -> Result<Self, HeadParseError> {
        RequestHeadParser::parse(bytes)
    }

    /// Parses an incoming response, status line `HTTP/1.1 200 OK` or
    /// `HTTP/1.1 200OK`.
    pub fn parse_response(bytes: &[u8]) -> Result<Self, HeadParseError> {
        ResponseHeadParser::parse(bytes)
    }

    //
    pub fn start_line(&self) -> &StartLine {
        &self.start_line
    }
    pub fn is_request(&self) -> bool {
        matches!(self.start_line, StartLine::Request { .. })
    }
    pub fn is_response(&self) -> bool {
        matches!(self.start_line, StartLine::Response { .. })
    }
    pub fn method(&self) -> Option<&Method> {
        match &self.start_line {
            StartLine::Request { method, .. } => Some(method),
            StartLine::Response { .. } => None,
        }
    }
    pub fn is_post(&self) -> bool {
        self.method() == Some(&Method::POST)
    }
    pub fn target(&self) -> Option<&str> {
        match &self.start_line {
            StartLine::Request { target, .. } => Some(target),
            StartLine::Response { .. } => None,
        }
    }
    pub fn status(&self) -> Option<StatusCode> {
        match &self.start_line {
            StartLine::Request { .. } => None,
            StartLine::Response { status } => Some(*status),
        }
    }
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// POST requests and responses serialize their body, GET requests never do.
    pub fn is_body_carrying(&self) -> bool {
        self.is_response() || self.is_post()
    }

    //
    pub fn headers(&self) -> &Headers {
        &self.headers
    }
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
    /// Returns the value that was replaced, if any.
    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.headers.insert(key.into(), value.into())
    }
    pub fn remove_header(&mut self, key: &str) -> Option<String> {
        self.headers.remove(key)
    }

    pub fn content_length(&self) -> Result<usize, BodyFramingError> {
        body_framing::content_length(&self.headers)
    }

    //
    pub fn body(&self) -> &[u8] {
        &self.body
    }
    pub fn body_mut(&mut self) -> &mut Vec<u8> {
        &mut self.body
    }
    pub fn append_body(&mut self, bytes: impl AsRef<[u8]>) -> &mut Self {
        self.body.extend_from_slice(bytes.as_ref());
        self
    }
    pub fn reset_body(&mut self) {
        self.body.clear()
    }
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}
