use {
    crate::constants::*,
    http::status::StatusCode,
    scratchstack_errors::ServiceError,
    std::{
        error::Error,
        fmt::{Display, Formatter, Result as FmtResult},
    },
};

/// Error returned when an attempt at validating an AWS SigV2 signature fails.
///
/// Apart from [`InternalServiceError`][SignatureError::InternalServiceError], every variant is an
/// expected outcome of verifying client input. Successful verification is reported as `Ok(())`.
#[derive(Debug)]
#[non_exhaustive]
pub enum SignatureError {
    /// The `Authorization` header is missing or empty.
    AuthHeaderEmpty,

    /// The `Authorization` header does not use the `AWS` algorithm.
    SignatureVersionNotSupported,

    /// The `Authorization` header is missing the access key or the signature.
    MissingFields,

    /// The AWS access key provided does not exist in our records.
    InvalidAccessKeyID,

    /// The presigned URL is missing one of `AWSAccessKeyId`, `Signature`, or `Expires`.
    InvalidQueryParams,

    /// The `Expires` query parameter is not a base-10 integer.
    MalformedExpires,

    /// The presigned URL has expired.
    ExpiredPresignRequest,

    /// Signature did not match the calculated signature value.
    SignatureDoesNotMatch,

    /// The credential store failed while looking up the access key.
    InternalServiceError(Box<dyn Error + Send + Sync>),
}

impl SignatureError {
    /// The error code to send back to the client.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AuthHeaderEmpty => ERR_CODE_INVALID_ARGUMENT,
            Self::SignatureVersionNotSupported => ERR_CODE_INVALID_REQUEST,
            Self::MissingFields => ERR_CODE_MISSING_FIELDS,
            Self::InvalidAccessKeyID => ERR_CODE_INVALID_ACCESS_KEY_ID,
            Self::InvalidQueryParams | Self::MalformedExpires => ERR_CODE_AUTHORIZATION_QUERY_PARAMETERS_ERROR,
            Self::ExpiredPresignRequest => ERR_CODE_ACCESS_DENIED,
            Self::SignatureDoesNotMatch => ERR_CODE_SIGNATURE_DOES_NOT_MATCH,
            Self::InternalServiceError(_) => ERR_CODE_INTERNAL_ERROR,
        }
    }

    /// The HTTP status code to send back to the client.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::AuthHeaderEmpty
            | Self::SignatureVersionNotSupported
            | Self::MissingFields
            | Self::InvalidQueryParams
            | Self::MalformedExpires => StatusCode::BAD_REQUEST,
            Self::InternalServiceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::FORBIDDEN,
        }
    }
}

impl ServiceError for SignatureError {
    fn error_code(&self) -> &'static str {
        SignatureError::error_code(self)
    }

    fn http_status(&self) -> StatusCode {
        SignatureError::http_status(self)
    }
}

impl Display for SignatureError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::AuthHeaderEmpty => f.write_str(MSG_AUTH_HEADER_EMPTY),
            Self::SignatureVersionNotSupported => f.write_str(MSG_AUTH_MECHANISM_NOT_SUPPORTED),
            Self::MissingFields => f.write_str(MSG_MISSING_FIELDS),
            Self::InvalidAccessKeyID => f.write_str(MSG_UNKNOWN_ACCESS_KEY),
            Self::InvalidQueryParams => f.write_str(MSG_QUERY_STRING_REQUIRES_PARAMS),
            Self::MalformedExpires => f.write_str(MSG_EXPIRES_NOT_A_NUMBER),
            Self::ExpiredPresignRequest => f.write_str(MSG_REQUEST_HAS_EXPIRED),
            Self::SignatureDoesNotMatch => f.write_str(MSG_REQUEST_SIGNATURE_MISMATCH),
            Self::InternalServiceError(ref e) => Display::fmt(e, f),
        }
    }
}

impl Error for SignatureError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InternalServiceError(ref e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<Box<dyn Error + Send + Sync>> for SignatureError {
    fn from(e: Box<dyn Error + Send + Sync>) -> SignatureError {
        match e.downcast::<SignatureError>() {
            Ok(sig_err) => *sig_err,
            Err(e) => SignatureError::InternalServiceError(e),
        }
    }
}

/// Error returned by [`Credential::new`][crate::Credential::new] when a key does not fit the
/// allowed length.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CredentialError {
    /// The access key is too long.
    AccessKeyTooLong,
    /// The access key is too short.
    AccessKeyTooShort,
    /// The secret key is too long.
    SecretKeyTooLong,
    /// The secret key is too short.
    SecretKeyTooShort,
}

impl Display for CredentialError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            CredentialError::AccessKeyTooLong => f.write_str(ERR_MSG_ACCESS_KEY_TOO_LONG),
            CredentialError::AccessKeyTooShort => f.write_str(ERR_MSG_ACCESS_KEY_TOO_SHORT),
            CredentialError::SecretKeyTooLong => f.write_str(ERR_MSG_SECRET_KEY_TOO_LONG),
            CredentialError::SecretKeyTooShort => f.write_str(ERR_MSG_SECRET_KEY_TOO_SHORT),
        }
    }
}

impl Error for CredentialError {}
