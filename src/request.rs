//! Incoming HTTP request type.

/// An incoming HTTP request, as seen by a handler.
///
/// Only the query string is kept: every route this service exposes is a
/// `GET` whose inputs arrive there.
pub struct Request {
    pub(crate) query: Option<String>,
}

impl Request {
    pub(crate) fn new(uri: &http::Uri) -> Self {
        Self { query: uri.query().map(str::to_owned) }
    }

    /// Builds a request without a connection. Handy for exercising handlers.
    pub fn from_uri(uri: &str) -> Result<Self, http::uri::InvalidUri> {
        let uri: http::Uri = uri.parse()?;
        Ok(Self::new(&uri))
    }

    pub fn query(&self) -> Option<&str> { self.query.as_deref() }

    /// Returns the first decoded value for `key` in the query string.
    ///
    /// Decoding follows `application/x-www-form-urlencoded`, so both `+` and
    /// `%20` become a space. Repeated keys resolve to the first occurrence.
    pub fn query_param(&self, key: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_query_values() {
        let req = Request::from_uri("/lookup?college=Test+U&x=a%20b").unwrap();
        assert_eq!(req.query(), Some("college=Test+U&x=a%20b"));
        assert_eq!(req.query_param("college").as_deref(), Some("Test U"));
        assert_eq!(req.query_param("x").as_deref(), Some("a b"));
        assert_eq!(req.query_param("missing"), None);
    }

    #[test]
    fn first_repeated_key_wins() {
        let req = Request::from_uri("/lookup?college=A&college=B").unwrap();
        assert_eq!(req.query_param("college").as_deref(), Some("A"));
    }

    #[test]
    fn no_query_string() {
        let req = Request::from_uri("/lookup").unwrap();
        assert_eq!(req.query(), None);
        assert_eq!(req.query_param("college"), None);
    }
}
