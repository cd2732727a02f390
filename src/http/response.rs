/// HTTP status codes the endpoint can answer with.
///
/// - `Ok` (200): commands were delivered
/// - `BadRequest` (400): the request was rejected, body says why
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use cmdport::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
        }
    }
}

/// One of the two responses the endpoint ever sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Bare status line, no headers, no body.
    Ok,
    /// Status line, `Content-Length`, and the message followed by `\n`.
    BadRequest(String),
}

impl Response {
    /// Creates a 400 response carrying `message`.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Response::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Response::Ok => StatusCode::Ok,
            Response::BadRequest(_) => StatusCode::BadRequest,
        }
    }

    /// Body bytes as they go on the wire.
    pub fn body(&self) -> Vec<u8> {
        match self {
            Response::Ok => Vec::new(),
            Response::BadRequest(message) => {
                let mut body = Vec::with_capacity(message.len() + 1);
                body.extend_from_slice(message.as_bytes());
                body.push(b'\n');
                body
            }
        }
    }
}
