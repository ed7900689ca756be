use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method, Uri};

/// The request side of a [`Context`](crate::Context).
#[derive(Debug)]
pub struct Request {
    pub inner: http::Request<Bytes>,
}

impl Request {
    /// Build a request from method and path. A path that is not a valid URI
    /// falls back to `/`.
    pub fn new<M: Into<Method>, S: AsRef<str>>(method: M, path: S) -> Self {
        let mut inner = http::Request::new(Bytes::new());
        *inner.method_mut() = method.into();
        *inner.uri_mut() = path.as_ref().parse().unwrap_or_else(|_| Uri::from_static("/"));
        Self { inner }
    }

    pub fn header<K, V>(mut self, k: K, v: V) -> Self
    where
        K: TryInto<http::HeaderName>,
        V: TryInto<HeaderValue>,
    {
        if let (Ok(key), Ok(value)) = (k.try_into(), v.try_into()) {
            self.inner.headers_mut().append(key, value);
        }
        self
    }

    pub fn with_body<B: Into<Bytes>>(mut self, body: B) -> Self {
        *self.inner.body_mut() = body.into();
        self
    }

    // Convenience accessors for the inner http::Request
    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    pub fn uri(&self) -> &Uri {
        self.inner.uri()
    }

    pub fn path(&self) -> &str {
        self.inner.uri().path()
    }

    pub fn headers(&self) -> &HeaderMap<HeaderValue> {
        self.inner.headers()
    }

    pub fn body(&self) -> &Bytes {
        self.inner.body()
    }

    pub fn is_head(&self) -> bool {
        self.method() == Method::HEAD
    }
}
