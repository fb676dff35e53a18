//! Parsers for the credential material carried by AWS SigV2 requests.
//!
//! Each SigV2 form puts the access key and signature somewhere different: the `Authorization`
//! header, the `AWSAccessKeyId`/`Signature`/`Expires` query parameters, or the fields of a
//! browser upload form. The types here extract them without consulting any credential.
//!
//! **Stability of this module is not guaranteed except for items exposed at the crate root**.
//! The functions and types are subject to change in minor/patch versions. This is exposed for
//! testing purposes only.

use {
    crate::{constants::*, SigV2Request, SignatureError},
    log::trace,
    qualifier_attr::qualifiers,
    std::collections::HashMap,
};

/// The fields of an `Authorization: AWS <AccessKeyId>:<Signature>` header.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
#[derive(Clone, Debug, Eq, PartialEq)]
struct AuthorizationV2 {
    access_key: String,
    signature: String,
}

impl AuthorizationV2 {
    /// Parse an `Authorization` header value.
    ///
    /// The algorithm token (everything before the first space) must be `AWS`. The remainder must
    /// be a single space-free `AccessKeyId:Signature` token; it is split at the last colon, and
    /// neither side may be empty.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn parse(header: &str) -> Result<Self, SignatureError> {
        if header.is_empty() {
            return Err(SignatureError::AuthHeaderEmpty);
        }

        let (algorithm, credential) = match header.split_once(' ') {
            Some((algorithm, credential)) => (algorithm, Some(credential)),
            None => (header, None),
        };

        if algorithm != AWS_SIGV2_ALGORITHM {
            trace!("Unsupported authorization algorithm: {:?}", algorithm);
            return Err(SignatureError::SignatureVersionNotSupported);
        }

        let credential = match credential {
            Some(c) if !c.is_empty() && !c.contains(' ') => c,
            _ => return Err(SignatureError::MissingFields),
        };

        match credential.rsplit_once(':') {
            Some((access_key, signature)) if !access_key.is_empty() && !signature.is_empty() => Ok(Self {
                access_key: access_key.to_string(),
                signature: signature.to_string(),
            }),
            _ => Err(SignatureError::MissingFields),
        }
    }

    /// The access key named by the header.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    #[inline(always)]
    fn access_key(&self) -> &str {
        &self.access_key
    }

    /// The signature supplied by the client.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    #[inline(always)]
    fn signature(&self) -> &str {
        &self.signature
    }
}

/// The query parameters of a presigned URL.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
#[derive(Clone, Debug, Eq, PartialEq)]
struct PresignParams {
    access_key: String,
    signature: String,

    /// Unparsed; validated only after the access key has been looked up.
    expires: String,
}

impl PresignParams {
    /// Extract `AWSAccessKeyId`, `Signature`, and `Expires` from the query string of `request`.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn from_request(request: &SigV2Request) -> Result<Self, SignatureError> {
        let access_key = request.query_parameter(QP_AWS_ACCESS_KEY_ID);
        let signature = request.query_parameter(QP_SIGNATURE);
        let expires = request.query_parameter(QP_EXPIRES);

        match (access_key, signature, expires) {
            (Some(access_key), Some(signature), Some(expires)) if !access_key.is_empty() => Ok(Self {
                access_key: access_key.to_string(),
                signature: signature.to_string(),
                expires: expires.to_string(),
            }),
            _ => Err(SignatureError::InvalidQueryParams),
        }
    }

    /// The `AWSAccessKeyId` parameter.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    #[inline(always)]
    fn access_key(&self) -> &str {
        &self.access_key
    }

    /// The `Signature` parameter.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    #[inline(always)]
    fn signature(&self) -> &str {
        &self.signature
    }

    /// Parse `Expires` as seconds since the Unix epoch.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn expires(&self) -> Result<i64, SignatureError> {
        self.expires.parse::<i64>().map_err(|_| SignatureError::MalformedExpires)
    }
}

/// The signed fields of a POST policy upload form.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PostPolicyFields {
    access_key: String,
    signature: String,
    policy: String,
}

impl PostPolicyFields {
    /// Create a `PostPolicyFields` from its parts. `policy` is the raw (base64) policy document.
    pub fn new(access_key: impl Into<String>, signature: impl Into<String>, policy: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            signature: signature.into(),
            policy: policy.into(),
        }
    }

    /// Extract `AWSAccessKeyId`, `Signature`, and `Policy` from decoded form fields. Field names
    /// are matched case-insensitively; absent fields are treated as empty.
    ///
    /// If a field appears under more than one spelling, the spelling that sorts first wins (so
    /// `AWSAccessKeyId` beats `awsaccesskeyid`).
    pub fn from_form(form: &HashMap<String, String>) -> Self {
        let mut names: Vec<&String> = form.keys().collect();
        names.sort_unstable_by(|a, b| b.cmp(a));

        // Reverse order, so the first spelling is assigned last.
        let mut result = Self::default();
        for name in names {
            let value = &form[name];
            let name = name.to_lowercase();
            match name.as_str() {
                FORM_AWS_ACCESS_KEY_ID => result.access_key = value.clone(),
                FORM_SIGNATURE => result.signature = value.clone(),
                FORM_POLICY => result.policy = value.clone(),
                _ => (),
            }
        }
        result
    }

    /// The access key of the uploader.
    #[inline]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// The signature of the policy.
    #[inline]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The raw policy document.
    #[inline]
    pub fn policy(&self) -> &str {
        &self.policy
    }
}
