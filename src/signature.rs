use {
    crate::{
        auth::{AuthorizationV2, PresignParams},
        canonical::{CanonicalRequestV2, SigningMode},
        crypto::{signatures_match, sigv2_signature},
        get_request_auth_type, AuthType, Credential, GetCredential, PostPolicyFields, SigV2Request, SignatureError,
    },
    chrono::{DateTime, Utc},
    http::header::AUTHORIZATION,
    log::{debug, trace},
    std::collections::HashMap,
};

/// Look up `access_key`, mapping "not found" to [`SignatureError::InvalidAccessKeyID`] and failures of
/// the store to [`SignatureError::InternalServiceError`].
fn lookup_credential<G>(store: &G, access_key: &str) -> Result<Credential, SignatureError>
where
    G: GetCredential + ?Sized,
{
    match store.get_credential(access_key) {
        Ok(Some(credential)) => Ok(credential),
        Ok(None) => {
            debug!("Unknown access key: access_key={}", access_key);
            Err(SignatureError::InvalidAccessKeyID)
        }
        Err(e) => {
            debug!("Credential lookup failed: access_key={} error={}", access_key, e);
            Err(SignatureError::from(e))
        }
    }
}

/// Compare the client's signature against the signature of `string_to_sign` under `credential`.
fn check_signature(credential: &Credential, string_to_sign: &[u8], provided: &str) -> Result<(), SignatureError> {
    let expected = sigv2_signature(credential.secret_key(), string_to_sign);
    trace!("Comparing signatures: expected={} provided={}", expected, provided);

    if signatures_match(provided, &expected) {
        debug!("Signature verified: access_key={}", credential.access_key());
        Ok(())
    } else {
        debug!("Signature mismatch: access_key={}", credential.access_key());
        Err(SignatureError::SignatureDoesNotMatch)
    }
}

/// Validate the format of an `Authorization` header value and check that it names a known access
/// key. The signature itself is not checked.
///
/// Returns [`SignatureError::AuthHeaderEmpty`], [`SignatureError::SignatureVersionNotSupported`],
/// [`SignatureError::MissingFields`], or [`SignatureError::InvalidAccessKeyID`], checked in that order.
pub fn validate_v2_auth_header<G>(auth_header: &str, store: &G) -> Result<(), SignatureError>
where
    G: GetCredential + ?Sized,
{
    let auth = AuthorizationV2::parse(auth_header)?;
    lookup_credential(store, auth.access_key()).map(|_| ())
}

/// Verify a request signed with an `Authorization: AWS <AccessKeyId>:<Signature>` header.
///
/// The header format is checked first, then the access key is looked up, then the signature over
/// the canonical string (using the `Date` header) is compared.
pub fn sigv2_verify_header<G>(request: &SigV2Request, store: &G) -> Result<(), SignatureError>
where
    G: GetCredential + ?Sized,
{
    let auth_header = request.header(AUTHORIZATION.as_str()).unwrap_or_default();
    let auth = AuthorizationV2::parse(&auth_header)?;
    let credential = lookup_credential(store, auth.access_key())?;

    let string_to_sign = CanonicalRequestV2::from_request(request, SigningMode::Header).string_to_sign();
    check_signature(&credential, &string_to_sign, auth.signature())
}

/// Verify a presigned URL against the current time.
///
/// See [`sigv2_verify_presigned_at`].
pub fn sigv2_verify_presigned<G>(request: &SigV2Request, store: &G) -> Result<(), SignatureError>
where
    G: GetCredential + ?Sized,
{
    sigv2_verify_presigned_at(request, store, Utc::now())
}

/// Verify a presigned URL as of `server_timestamp`.
///
/// Checks, in order: that `AWSAccessKeyId`, `Signature`, and `Expires` are present; that the access
/// key is known; that `Expires` is an integer; that `server_timestamp` is not after `Expires`; and
/// finally the signature over the canonical string (using `Expires` in place of the date).
pub fn sigv2_verify_presigned_at<G>(
    request: &SigV2Request,
    store: &G,
    server_timestamp: DateTime<Utc>,
) -> Result<(), SignatureError>
where
    G: GetCredential + ?Sized,
{
    let params = PresignParams::from_request(request)?;
    let credential = lookup_credential(store, params.access_key())?;
    let expires = params.expires()?;

    if server_timestamp.timestamp() > expires {
        debug!(
            "Presigned request expired: access_key={} expires={} now={}",
            params.access_key(),
            expires,
            server_timestamp.timestamp()
        );
        return Err(SignatureError::ExpiredPresignRequest);
    }

    let string_to_sign = CanonicalRequestV2::from_request(request, SigningMode::Presigned).string_to_sign();
    check_signature(&credential, &string_to_sign, params.signature())
}

/// Verify the signature of a browser POST policy upload.
///
/// `form` holds the decoded form fields; `AWSAccessKeyId`, `Signature`, and `Policy` are matched
/// case-insensitively. The signature covers the raw policy string. The policy's own expiration and
/// conditions are not evaluated here.
pub fn sigv2_verify_post_policy<G>(form: &HashMap<String, String>, store: &G) -> Result<(), SignatureError>
where
    G: GetCredential + ?Sized,
{
    let fields = PostPolicyFields::from_form(form);
    let credential = lookup_credential(store, fields.access_key())?;
    check_signature(&credential, fields.policy().as_bytes(), fields.signature())
}

/// Verify a request in whichever SigV2 form it uses.
///
/// Requests carrying `AWSAccessKeyId` in the query string (and no `AWS` authorization header) are
/// verified as presigned URLs; everything else is verified as header-signed, so requests without an
/// `Authorization` header fail with [`SignatureError::AuthHeaderEmpty`] and other schemes with
/// [`SignatureError::SignatureVersionNotSupported`].
pub fn sigv2_verify_request<G>(request: &SigV2Request, store: &G) -> Result<(), SignatureError>
where
    G: GetCredential + ?Sized,
{
    match get_request_auth_type(request) {
        AuthType::PresignedV2 => sigv2_verify_presigned(request, store),
        _ => sigv2_verify_header(request, store),
    }
}

/// Compute the `Authorization` header value for `request`, signed with `credential`.
pub fn sigv2_authorization_header(request: &SigV2Request, credential: &Credential) -> String {
    let string_to_sign = CanonicalRequestV2::from_request(request, SigningMode::Header).string_to_sign();
    format!("AWS {}:{}", credential.access_key(), sigv2_signature(credential.secret_key(), &string_to_sign))
}

/// Compute the `Signature` query parameter for a presigned URL.
///
/// `request` must already carry the `Expires` query parameter; any existing `Signature` parameter is
/// ignored.
pub fn sigv2_presign_signature(request: &SigV2Request, credential: &Credential) -> String {
    let string_to_sign = CanonicalRequestV2::from_request(request, SigningMode::Presigned).string_to_sign();
    sigv2_signature(credential.secret_key(), &string_to_sign)
}
