//! Common constants used throughout the crate.
//!
//! This keeps the wire-level strings (error codes, header names, query parameter names) in one
//! spot so the entire crate agrees on their spelling.
//!
//! Tests that are testing the content of an error code or message should not use these constants;
//! they should use hard-coded strings so the tests are also testing for misspellings.
//!
//! Please keep this file organized alphabetically.

/// Maximum length of an access key.
pub(crate) const ACCESS_KEY_MAX_LEN: usize = 20;

/// Minimum length of an access key.
pub(crate) const ACCESS_KEY_MIN_LEN: usize = 5;

/// Algorithm token for AWS SigV2 `Authorization` headers.
pub(crate) const AWS_SIGV2_ALGORITHM: &str = "AWS";

/// Error code: AccessDenied
pub(crate) const ERR_CODE_ACCESS_DENIED: &str = "AccessDenied";

/// Error code: AuthorizationQueryParametersError
pub(crate) const ERR_CODE_AUTHORIZATION_QUERY_PARAMETERS_ERROR: &str = "AuthorizationQueryParametersError";

/// Error code: InternalError
pub(crate) const ERR_CODE_INTERNAL_ERROR: &str = "InternalError";

/// Error code: InvalidAccessKeyId
pub(crate) const ERR_CODE_INVALID_ACCESS_KEY_ID: &str = "InvalidAccessKeyId";

/// Error code: InvalidArgument
pub(crate) const ERR_CODE_INVALID_ARGUMENT: &str = "InvalidArgument";

/// Error code: InvalidRequest
pub(crate) const ERR_CODE_INVALID_REQUEST: &str = "InvalidRequest";

/// Error code: MissingFields
pub(crate) const ERR_CODE_MISSING_FIELDS: &str = "MissingFields";

/// Error code: SignatureDoesNotMatch
pub(crate) const ERR_CODE_SIGNATURE_DOES_NOT_MATCH: &str = "SignatureDoesNotMatch";

/// Error message: Access key too long
pub(crate) const ERR_MSG_ACCESS_KEY_TOO_LONG: &str = "Access key too long";

/// Error message: Access key too short
pub(crate) const ERR_MSG_ACCESS_KEY_TOO_SHORT: &str = "Access key too short";

/// Error message: Secret key too long
pub(crate) const ERR_MSG_SECRET_KEY_TOO_LONG: &str = "Secret key too long";

/// Error message: Secret key too short
pub(crate) const ERR_MSG_SECRET_KEY_TOO_SHORT: &str = "Secret key too short";

/// Form field carrying the access key of a POST policy upload.
pub(crate) const FORM_AWS_ACCESS_KEY_ID: &str = "awsaccesskeyid";

/// Form field carrying the policy document of a POST policy upload.
pub(crate) const FORM_POLICY: &str = "policy";

/// Form field carrying the signature of a POST policy upload.
pub(crate) const FORM_SIGNATURE: &str = "signature";

/// Header for `content-md5`
pub(crate) const HDR_CONTENT_MD5: &str = "content-md5";

/// Header for `content-type`
pub(crate) const HDR_CONTENT_TYPE: &str = "content-type";

/// Header for `date`
pub(crate) const HDR_DATE: &str = "date";

/// Error message: `"Authorization header is missing or empty"`
pub(crate) const MSG_AUTH_HEADER_EMPTY: &str = "Authorization header is missing or empty";

/// Error message: `"The authorization mechanism you have provided is not supported. Please use AWS4-HMAC-SHA256."`
pub(crate) const MSG_AUTH_MECHANISM_NOT_SUPPORTED: &str =
    "The authorization mechanism you have provided is not supported. Please use AWS4-HMAC-SHA256.";

/// Error message: `"Expires should be a number"`
pub(crate) const MSG_EXPIRES_NOT_A_NUMBER: &str = "Expires should be a number";

/// Error message: `"Missing fields in request."`
pub(crate) const MSG_MISSING_FIELDS: &str = "Missing fields in request.";

/// Error message: `"Query-string authentication requires the Signature, Expires and AWSAccessKeyId parameters"`
pub(crate) const MSG_QUERY_STRING_REQUIRES_PARAMS: &str =
    "Query-string authentication requires the Signature, Expires and AWSAccessKeyId parameters";

/// Error message: `"Request has expired"`
pub(crate) const MSG_REQUEST_HAS_EXPIRED: &str = "Request has expired";

/// Error message: `"The request signature we calculated does not match the signature you provided. Check your key and signing method."`
pub(crate) const MSG_REQUEST_SIGNATURE_MISMATCH: &str =
    "The request signature we calculated does not match the signature you provided. Check your key and signing method.";

/// Error message: `"The access key ID you provided does not exist in our records."`
pub(crate) const MSG_UNKNOWN_ACCESS_KEY: &str = "The access key ID you provided does not exist in our records.";

/// Content-Type of a browser upload form.
pub(crate) const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// Query parameter for delivering the access key of a presigned URL
pub(crate) const QP_AWS_ACCESS_KEY_ID: &str = "AWSAccessKeyId";

/// Query parameter for delivering the expiration time of a presigned URL
pub(crate) const QP_EXPIRES: &str = "Expires";

/// Query parameter for delivering the signature of a presigned URL
pub(crate) const QP_SIGNATURE: &str = "Signature";

/// Maximum length of a secret key.
pub(crate) const SECRET_KEY_MAX_LEN: usize = 40;

/// Minimum length of a secret key.
pub(crate) const SECRET_KEY_MIN_LEN: usize = 8;

/// Length of an HMAC-SHA1 digest in bytes.
pub(crate) const SHA1_OUTPUT_LEN: usize = 20;

/// Query parameters naming S3 sub-resources that are part of the canonicalized resource.
///
/// This must stay sorted; the canonicalized resource relies on this order.
pub(crate) const SUB_RESOURCES: [&str; 22] = [
    "acl",
    "delete",
    "lifecycle",
    "location",
    "logging",
    "notification",
    "partNumber",
    "policy",
    "requestPayment",
    "response-cache-control",
    "response-content-disposition",
    "response-content-encoding",
    "response-content-language",
    "response-content-type",
    "response-expires",
    "torrent",
    "uploadId",
    "uploads",
    "versionId",
    "versioning",
    "versions",
    "website",
];

/// Prefix of the AWS-specific headers that are part of the string to sign.
pub(crate) const X_AMZ_PREFIX: &str = "x-amz-";
