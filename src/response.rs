//! Writable-body seam for HTTP responses.
//!
//! The rendering context never constructs HTTP messages; it only appends
//! rendered text to the body of a response the caller provides.

/// An outgoing HTTP message with a writable, append-only body.
pub trait HttpResponse {
    /// Append rendered text to the response body.
    fn write_body(&mut self, text: &str);
}

impl HttpResponse for http::Response<String> {
    fn write_body(&mut self, text: &str) {
        self.body_mut().push_str(text);
    }
}

impl HttpResponse for http::Response<Vec<u8>> {
    fn write_body(&mut self, text: &str) {
        self.body_mut().extend_from_slice(text.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_body_appends_text() {
        let mut response = http::Response::builder()
            .status(200)
            .body("<!-- head -->".to_string())
            .unwrap();

        response.write_body("<p>rendered</p>");
        assert_eq!(response.body(), "<!-- head --><p>rendered</p>");
    }

    #[test]
    fn test_write_body_appends_bytes() {
        let mut response: http::Response<Vec<u8>> =
            http::Response::builder().body(Vec::new()).unwrap();

        response.write_body("rendered");
        assert_eq!(response.body(), b"rendered");
    }
}
