//! The read-only view of an HTTP request that the verifiers work from.

use {
    crate::{canonical::latin1_to_string, constants::*},
    derive_builder::Builder,
    http::{
        header::{HeaderMap, AUTHORIZATION},
        request::Parts,
    },
    std::collections::HashMap,
};

/// The parts of an HTTP request covered by an AWS SigV2 signature.
///
/// SigV2Request structs are immutable. Use [`SigV2RequestBuilder`] to programmatically construct one, or
/// [`SigV2Request::from_http_request_parts`] to build one from an [`http::request::Parts`].
#[derive(Builder, Clone, Debug)]
pub struct SigV2Request {
    /// The HTTP method, e.g. `GET`.
    #[builder(setter(into))]
    method: String,

    /// The request path as sent on the wire (percent-encoding preserved). Virtual-host-style
    /// requests must already be rewritten to path style (`/bucket/key`).
    #[builder(setter(into))]
    path: String,

    /// Decoded query parameters. Repeated keys keep their values in order of appearance.
    #[builder(setter(into), default)]
    query_parameters: HashMap<String, Vec<String>>,

    /// The request headers.
    #[builder(setter(into), default)]
    headers: HeaderMap,
}

impl SigV2Request {
    /// Create a [`SigV2RequestBuilder`] to construct a [`SigV2Request`].
    #[inline]
    pub fn builder() -> SigV2RequestBuilder {
        SigV2RequestBuilder::default()
    }

    /// Create a `SigV2Request` from the method, URI, and headers of an HTTP request.
    pub fn from_http_request_parts(parts: &Parts) -> Self {
        let query_parameters = match parts.uri.query() {
            Some(query) => query_string_to_map(query),
            None => HashMap::new(),
        };

        Self {
            method: parts.method.as_str().to_string(),
            path: parts.uri.path().to_string(),
            query_parameters,
            headers: parts.headers.clone(),
        }
    }

    /// The HTTP method.
    #[inline]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The request path.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The decoded query parameters.
    #[inline]
    pub fn query_parameters(&self) -> &HashMap<String, Vec<String>> {
        &self.query_parameters
    }

    /// The request headers.
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The first value of the query parameter `name`, if present.
    pub fn query_parameter(&self, name: &str) -> Option<&str> {
        self.query_parameters.get(name).and_then(|values| values.first()).map(String::as_str)
    }

    /// The first value of the header `name`, if present. Header names are case-insensitive.
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers.get(name).map(|value| latin1_to_string(value.as_bytes()))
    }

    /// The raw bytes of the first value of the header `name`, if present.
    pub fn header_bytes(&self, name: &str) -> Option<&[u8]> {
        self.headers.get(name).map(|value| value.as_bytes())
    }
}

/// Decode a raw query string into a map of keys to their values, in order of appearance.
pub(crate) fn query_string_to_map(query: &str) -> HashMap<String, Vec<String>> {
    let mut result = HashMap::<String, Vec<String>>::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        result.entry(key.into_owned()).or_default().push(value.into_owned());
    }
    result
}

/// The authentication scheme a request uses.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AuthType {
    /// No credentials at all.
    Anonymous,

    /// `Authorization: AWS <AccessKeyId>:<Signature>`.
    SignedV2,

    /// `AWSAccessKeyId`, `Signature`, and `Expires` in the query string.
    PresignedV2,

    /// A browser upload carrying a signed policy in a `multipart/form-data` body.
    PostPolicy,

    /// An `Authorization` header in a scheme this crate does not handle.
    Unknown,
}

/// Classify the authentication scheme used by `request`.
pub fn get_request_auth_type(request: &SigV2Request) -> AuthType {
    let authorization = request.headers().get(AUTHORIZATION);

    if let Some(value) = authorization {
        if value.as_bytes().starts_with(b"AWS ") {
            return AuthType::SignedV2;
        }
    }

    if request.query_parameters().contains_key(QP_AWS_ACCESS_KEY_ID) {
        return AuthType::PresignedV2;
    }

    if request.method().eq_ignore_ascii_case("POST") {
        if let Some(content_type) = request.header(HDR_CONTENT_TYPE) {
            if content_type.to_ascii_lowercase().contains(MULTIPART_FORM_DATA) {
                return AuthType::PostPolicy;
            }
        }
    }

    if authorization.is_none() {
        AuthType::Anonymous
    } else {
        AuthType::Unknown
    }
}
