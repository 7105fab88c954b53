use http::Method;

use crate::{
    body_framing::CONTENT_LENGTH,
    message::{Message, StartLine},
    COLON, CRLF, HTTP_VERSION_11, SP, STATUS_TEXT,
};

//
//
//
impl Message {
    /// Writes the wire form of the message into `buf`.
    ///
    /// Responses always carry the status text `OK`, written directly after
    /// the code. A final CRLF is appended after everything else.
    pub fn render(&self, buf: &mut Vec<u8>) {
        render_start_line(self.start_line(), buf);

        let with_body = self.is_body_carrying() && !self.body().is_empty();

        for (k, v) in self.headers() {
            // The computed length below replaces any stale value.
            if with_body && k == CONTENT_LENGTH {
                continue;
            }
            render_header(k, v, buf);
        }

        if self.is_body_carrying() {
            if with_body {
                render_header(CONTENT_LENGTH, &self.body().len().to_string(), buf);
                buf.extend_from_slice(CRLF);
                buf.extend_from_slice(self.body());
            } else {
                buf.extend_from_slice(CRLF);
            }
        }

        buf.extend_from_slice(CRLF);
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(256 + self.body().len());
        self.render(&mut buf);
        buf
    }
}

fn render_start_line(start_line: &StartLine, buf: &mut Vec<u8>) {
    match start_line {
        StartLine::Request { method, target } => {
            let method = if method == Method::POST {
                Method::POST
            } else {
                Method::GET
            };
            buf.extend_from_slice(method.as_str().as_bytes());
            buf.extend_from_slice(&[SP]);
            buf.extend_from_slice(target.as_bytes());
            buf.extend_from_slice(&[SP]);
            buf.extend_from_slice(HTTP_VERSION_11);
        }
        StartLine::Response { status } => {
            buf.extend_from_slice(HTTP_VERSION_11);
            buf.extend_from_slice(&[SP]);
            buf.extend_from_slice(status.as_str().as_bytes());
            buf.extend_from_slice(STATUS_TEXT);
        }
    }
    buf.extend_from_slice(CRLF);
}

fn render_header(k: &str, v: &str, buf: &mut Vec<u8>) {
    buf.extend_from_slice(k.as_bytes());
    buf.extend_from_slice(&[COLON, SP]);
    buf.extend_from_slice(v.as_bytes());
    buf.extend_from_slice(CRLF);
}
