//! Canonicalization functionality for signature generation and validation.
//!
//! This includes the `x-amz-*` header and resource canonicalization functions, as well as the
//! ability to create the AWS SigV2 string to sign.
//!
//! **Stability of this module is not guaranteed except for items exposed at the crate root**.
//! The functions and types are subject to change in minor/patch versions. This is exposed for
//! testing purposes only.

use {
    crate::{constants::*, SigV2Request},
    log::trace,
    qualifier_attr::qualifiers,
    std::collections::{BTreeMap, HashMap},
};

/// Where the timestamp line of the string to sign comes from.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum SigningMode {
    /// `Authorization` header signing: the `Date` header is signed.
    Header,

    /// Query-string (presigned URL) signing: the `Expires` query parameter is signed, and `x-amz-*`
    /// query parameters are canonicalized alongside `x-amz-*` headers.
    Presigned,
}

/// The canonicalized components of an AWS SigV2 request.
///
/// Header values are kept as the raw bytes sent on the wire; the client signed those bytes.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
#[derive(Clone, Debug, Eq, PartialEq)]
struct CanonicalRequestV2 {
    /// The HTTP method for the request (e.g., "GET", "PUT", etc.)
    method: String,

    /// The `Content-MD5` header, or empty.
    content_md5: Vec<u8>,

    /// The `Content-Type` header, or empty.
    content_type: Vec<u8>,

    /// The `Date` header or `Expires` query parameter, or empty.
    timestamp: Vec<u8>,

    /// The canonicalized `x-amz-*` headers, including the trailing newline when non-empty.
    amz_headers: Vec<u8>,

    /// The canonicalized resource.
    resource: String,
}

impl CanonicalRequestV2 {
    /// Canonicalize `request` for the given signing mode.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn from_request(request: &SigV2Request, mode: SigningMode) -> Self {
        let timestamp = match mode {
            SigningMode::Header => request.header_bytes(HDR_DATE).unwrap_or_default().to_vec(),
            SigningMode::Presigned => request.query_parameter(QP_EXPIRES).unwrap_or_default().as_bytes().to_vec(),
        };

        let mut amz = amz_headers_from_request(request);
        if mode == SigningMode::Presigned {
            // Sorted so that case variants of a key merge in the same order every time.
            let mut keys: Vec<&String> = request.query_parameters().keys().collect();
            keys.sort_unstable();

            for key in keys {
                let lower = key.to_lowercase();
                if lower.starts_with(X_AMZ_PREFIX) {
                    let values = &request.query_parameters()[key];
                    amz.entry(lower).or_default().extend(values.iter().map(|v| v.as_bytes().to_vec()));
                }
            }
        }

        Self {
            method: request.method().to_string(),
            content_md5: request.header_bytes(HDR_CONTENT_MD5).unwrap_or_default().to_vec(),
            content_type: request.header_bytes(HDR_CONTENT_TYPE).unwrap_or_default().to_vec(),
            timestamp,
            amz_headers: canonicalize_amz_headers(&amz),
            resource: canonicalize_resource(request.path(), request.query_parameters()),
        }
    }

    /// The bytes that are HMAC'd to produce the signature.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn string_to_sign(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(
            self.method.len()
                + self.content_md5.len()
                + self.content_type.len()
                + self.timestamp.len()
                + self.amz_headers.len()
                + self.resource.len()
                + 4,
        );

        let fields: [&[u8]; 4] = [self.method.as_bytes(), &self.content_md5, &self.content_type, &self.timestamp];
        for field in fields {
            result.extend_from_slice(field);
            result.push(b'\n');
        }
        result.extend_from_slice(&self.amz_headers);
        result.extend_from_slice(self.resource.as_bytes());

        trace!("String to sign: {:?}", latin1_to_string(&result));
        result
    }
}

/// Collect the `x-amz-*` headers of a request, keyed by lower-cased name.
fn amz_headers_from_request(request: &SigV2Request) -> BTreeMap<String, Vec<Vec<u8>>> {
    let mut result = BTreeMap::<String, Vec<Vec<u8>>>::new();
    for (name, value) in request.headers().iter() {
        let name = name.as_str().to_lowercase();
        if name.starts_with(X_AMZ_PREFIX) {
            result.entry(name).or_default().push(value.as_bytes().to_vec());
        }
    }
    result
}

/// Produce the canonicalized AWS header block: one `name:value1,value2` line per header in sorted
/// name order, each terminated by a newline. Empty if there are no headers.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn canonicalize_amz_headers(headers: &BTreeMap<String, Vec<Vec<u8>>>) -> Vec<u8> {
    let mut result = Vec::new();
    for (name, values) in headers {
        result.extend_from_slice(name.as_bytes());
        result.push(b':');
        result.extend_from_slice(&values.join(&b","[..]));
        result.push(b'\n');
    }
    result
}

/// Produce the canonicalized resource: the path followed by any whitelisted sub-resources present
/// in the query, in whitelist order.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn canonicalize_resource(path: &str, query_parameters: &HashMap<String, Vec<String>>) -> String {
    let mut sub_resources = Vec::new();

    for key in SUB_RESOURCES {
        if let Some(values) = query_parameters.get(key) {
            match values.first().map(String::as_str) {
                None | Some("") => sub_resources.push(key.to_string()),
                Some(value) => sub_resources.push(format!("{}={}", key, value)),
            }
        }
    }

    if sub_resources.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, sub_resources.join("&"))
    }
}

/// Convert a Latin-1 byte slice to a `String`.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn latin1_to_string(bytes: &[u8]) -> String {
    let mut result = String::new();
    for b in bytes {
        result.push(*b as char);
    }
    result
}

#[cfg(test)]
mod tests {
    use {
        super::{canonicalize_amz_headers, canonicalize_resource, latin1_to_string, CanonicalRequestV2, SigningMode},
        crate::{constants::SUB_RESOURCES, SigV2Request},
        http::{
            header::{HeaderMap, HeaderValue},
            request::Request,
        },
        std::collections::{BTreeMap, HashMap},
    };

    fn request(method: &str, uri: &str, headers: &[(&str, &str)]) -> SigV2Request {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        SigV2Request::from_http_request_parts(&parts)
    }

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        let mut result = HashMap::<String, Vec<String>>::new();
        for (key, value) in pairs {
            result.entry(key.to_string()).or_default().push(value.to_string());
        }
        result
    }

    #[test_log::test]
    fn sub_resources_sorted() {
        let mut sorted = SUB_RESOURCES;
        sorted.sort_unstable();
        assert_eq!(sorted, SUB_RESOURCES);
    }

    #[test_log::test]
    fn resource_without_sub_resources() {
        assert_eq!(canonicalize_resource("/bucket/key", &HashMap::new()), "/bucket/key");
        assert_eq!(canonicalize_resource("/bucket", &query(&[("prefix", "foo"), ("max-keys", "10")])), "/bucket");
        assert_eq!(canonicalize_resource("/", &HashMap::new()), "/");
    }

    #[test_log::test]
    fn resource_with_sub_resources() {
        assert_eq!(canonicalize_resource("/bucket/key", &query(&[("acl", "")])), "/bucket/key?acl");
        assert_eq!(
            canonicalize_resource("/bucket/key", &query(&[("versionId", "123"), ("acl", ""), ("prefix", "x")])),
            "/bucket/key?acl&versionId=123"
        );
        assert_eq!(
            canonicalize_resource(
                "/bucket/key",
                &query(&[("uploadId", "abc"), ("partNumber", "2"), ("response-content-type", "text/plain")])
            ),
            "/bucket/key?partNumber=2&response-content-type=text/plain&uploadId=abc"
        );
        // First value wins for repeated keys.
        assert_eq!(
            canonicalize_resource("/bucket/key", &query(&[("versionId", "1"), ("versionId", "2")])),
            "/bucket/key?versionId=1"
        );
        // Keys are case-sensitive.
        assert_eq!(canonicalize_resource("/bucket", &query(&[("ACL", "")])), "/bucket");
    }

    #[test_log::test]
    fn amz_headers() {
        let mut headers = BTreeMap::new();
        assert!(canonicalize_amz_headers(&headers).is_empty());

        headers.insert("x-amz-meta-b".to_string(), vec![b"two".to_vec()]);
        headers.insert("x-amz-acl".to_string(), vec![b"public-read".to_vec()]);
        headers.insert("x-amz-meta-a".to_string(), vec![b"1".to_vec(), b"2".to_vec()]);
        assert_eq!(canonicalize_amz_headers(&headers), b"x-amz-acl:public-read\nx-amz-meta-a:1,2\nx-amz-meta-b:two\n");
    }

    #[test_log::test]
    fn string_to_sign_documented_example() {
        let req = request("GET", "/johnsmith/photos/puppy.jpg", &[("Date", "Tue, 27 Mar 2007 19:36:42 +0000")]);
        let cr = CanonicalRequestV2::from_request(&req, SigningMode::Header);
        assert_eq!(cr.string_to_sign(), b"GET\n\n\nTue, 27 Mar 2007 19:36:42 +0000\n/johnsmith/photos/puppy.jpg");
    }

    #[test_log::test]
    fn string_to_sign_full_header_mode() {
        let req = request(
            "PUT",
            "/bucket/my%20object?acl&prefix=ignored",
            &[
                ("Content-MD5", "1B2M2Y8AsgTpgAmY7PhCfg=="),
                ("Content-Type", "text/plain"),
                ("Date", "Tue, 27 Mar 2007 21:15:45 +0000"),
                ("X-Amz-Meta-Zed", "z"),
                ("x-amz-meta-multi", "a"),
                ("x-amz-meta-multi", "b"),
                ("host", "s3.example.com"),
            ],
        );
        let cr = CanonicalRequestV2::from_request(&req, SigningMode::Header);
        assert_eq!(cr.amz_headers, b"x-amz-meta-multi:a,b\nx-amz-meta-zed:z\n");
        assert_eq!(cr.resource, "/bucket/my%20object?acl");
        assert_eq!(
            cr.string_to_sign(),
            b"PUT\n1B2M2Y8AsgTpgAmY7PhCfg==\ntext/plain\nTue, 27 Mar 2007 21:15:45 +0000\n\
              x-amz-meta-multi:a,b\nx-amz-meta-zed:z\n/bucket/my%20object?acl"
        );
    }

    #[test_log::test]
    fn string_to_sign_keeps_header_bytes() {
        let mut headers = HeaderMap::new();
        headers.insert("date", HeaderValue::from_static("Wed, 01 May 2024 12:00:00 GMT"));
        headers.insert("content-type", HeaderValue::from_bytes(b"text/plain; name=\xe9t\xe9").unwrap());
        headers.insert("x-amz-meta-name", HeaderValue::from_bytes("caf\u{e9}".as_bytes()).unwrap());
        let req = SigV2Request::builder().method("PUT").path("/bucket/key").headers(headers).build().unwrap();

        let cr = CanonicalRequestV2::from_request(&req, SigningMode::Header);
        assert_eq!(
            cr.string_to_sign(),
            b"PUT\n\ntext/plain; name=\xe9t\xe9\nWed, 01 May 2024 12:00:00 GMT\nx-amz-meta-name:caf\xc3\xa9\n/bucket/key"
        );
    }

    #[test_log::test]
    fn string_to_sign_missing_headers() {
        let req = request("DELETE", "/bucket/key", &[]);
        let sts = CanonicalRequestV2::from_request(&req, SigningMode::Header).string_to_sign();
        assert_eq!(sts, b"DELETE\n\n\n\n/bucket/key");
        assert_eq!(sts.iter().filter(|b| **b == b'\n').count(), 4);
    }

    #[test_log::test]
    fn string_to_sign_ignores_x_amz_date() {
        // Only the Date header fills the timestamp line; x-amz-date is signed as an ordinary x-amz header.
        let req = request("GET", "/bucket/key", &[("x-amz-date", "Wed, 01 May 2024 12:00:00 GMT")]);
        let cr = CanonicalRequestV2::from_request(&req, SigningMode::Header);
        assert_eq!(cr.string_to_sign(), b"GET\n\n\n\nx-amz-date:Wed, 01 May 2024 12:00:00 GMT\n/bucket/key");

        let req = request(
            "GET",
            "/bucket/key",
            &[("Date", "Tue, 30 Apr 2024 12:00:00 GMT"), ("x-amz-date", "Wed, 01 May 2024 12:00:00 GMT")],
        );
        let cr = CanonicalRequestV2::from_request(&req, SigningMode::Header);
        assert_eq!(
            cr.string_to_sign(),
            b"GET\n\n\nTue, 30 Apr 2024 12:00:00 GMT\nx-amz-date:Wed, 01 May 2024 12:00:00 GMT\n/bucket/key"
        );
    }

    #[test_log::test]
    fn string_to_sign_presigned_mode() {
        let req = request(
            "GET",
            "/bucket/key?AWSAccessKeyId=AKIDEXAMPLE&Expires=1175139620&Signature=abc&X-Amz-Meta-Q=v&versionId=7",
            &[("Date", "Tue, 27 Mar 2007 19:36:42 +0000"), ("x-amz-acl", "private")],
        );
        let cr = CanonicalRequestV2::from_request(&req, SigningMode::Presigned);
        assert_eq!(cr.string_to_sign(), b"GET\n\n\n1175139620\nx-amz-acl:private\nx-amz-meta-q:v\n/bucket/key?versionId=7");

        // The Date header is not used in presigned mode, and Expires is not used in header mode.
        let cr = CanonicalRequestV2::from_request(&req, SigningMode::Header);
        assert_eq!(
            cr.string_to_sign(),
            b"GET\n\n\nTue, 27 Mar 2007 19:36:42 +0000\nx-amz-acl:private\n/bucket/key?versionId=7"
        );
    }

    #[test_log::test]
    fn presigned_case_variants_merge_deterministically() {
        for uri in [
            "/bucket/key?Expires=60&X-Amz-Meta-Q=1&x-amz-meta-q=2&X-AMZ-META-Q=0",
            "/bucket/key?x-amz-meta-q=2&X-AMZ-META-Q=0&Expires=60&X-Amz-Meta-Q=1",
        ] {
            for _ in 0..8 {
                let cr = CanonicalRequestV2::from_request(&request("GET", uri, &[]), SigningMode::Presigned);
                assert_eq!(cr.amz_headers, b"x-amz-meta-q:0,1,2\n", "{}", uri);
            }
        }
    }

    #[test_log::test]
    fn latin1() {
        assert_eq!(latin1_to_string(b"abc"), "abc");
        assert_eq!(latin1_to_string(b"\xe9t\xe9"), "\u{e9}t\u{e9}");
    }
}
