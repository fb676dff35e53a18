use {
    crate::{constants::*, CredentialError},
    parking_lot::RwLock,
    std::{
        error::Error,
        fmt::{Debug, Display, Formatter, Result as FmtResult},
    },
};

/// Error type returned by credential stores when the store itself fails.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// An access key/secret key pair permitted to sign requests.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// The access key (`AWSAccessKeyId`).
    access_key: String,

    /// The secret key used to compute signatures.
    secret_key: String,
}

impl Credential {
    /// Create a new `Credential`, validating the lengths of the access key and secret key.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Result<Self, CredentialError> {
        let access_key = access_key.into();
        let secret_key = secret_key.into();

        if access_key.len() < ACCESS_KEY_MIN_LEN {
            return Err(CredentialError::AccessKeyTooShort);
        }
        if access_key.len() > ACCESS_KEY_MAX_LEN {
            return Err(CredentialError::AccessKeyTooLong);
        }
        if secret_key.len() < SECRET_KEY_MIN_LEN {
            return Err(CredentialError::SecretKeyTooShort);
        }
        if secret_key.len() > SECRET_KEY_MAX_LEN {
            return Err(CredentialError::SecretKeyTooLong);
        }

        Ok(Self {
            access_key,
            secret_key,
        })
    }

    /// Retrieve the access key.
    #[inline]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Retrieve the secret key.
    #[inline]
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Credential").field("access_key", &self.access_key).finish_non_exhaustive()
    }
}

impl Display for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.access_key)
    }
}

/// Looks up the credential for an access key.
///
/// `Ok(None)` means the access key is unknown. `Err` is reserved for failures of the store itself
/// (e.g. the backing database is unavailable); these are reported to the caller as
/// [`SignatureError::InternalServiceError`][crate::SignatureError::InternalServiceError], never as
/// an unknown access key. Implementations must be safe for concurrent reads.
pub trait GetCredential {
    /// Return the credential for `access_key`, if any.
    fn get_credential(&self, access_key: &str) -> Result<Option<Credential>, BoxError>;
}

impl<T: GetCredential + ?Sized> GetCredential for &T {
    fn get_credential(&self, access_key: &str) -> Result<Option<Credential>, BoxError> {
        (**self).get_credential(access_key)
    }
}

/// A credential store holding the single active credential of a server process.
///
/// The credential can be replaced at runtime with [`set_credential`][Self::set_credential]; this
/// is serialized against concurrent lookups.
#[derive(Debug)]
pub struct SingleCredentialStore {
    credential: RwLock<Credential>,
}

impl SingleCredentialStore {
    /// Create a store holding `credential`.
    pub fn new(credential: Credential) -> Self {
        Self {
            credential: RwLock::new(credential),
        }
    }

    /// Return a copy of the active credential.
    pub fn credential(&self) -> Credential {
        self.credential.read().clone()
    }

    /// Replace the active credential.
    pub fn set_credential(&self, credential: Credential) {
        *self.credential.write() = credential;
    }
}

impl GetCredential for SingleCredentialStore {
    fn get_credential(&self, access_key: &str) -> Result<Option<Credential>, BoxError> {
        let credential = self.credential.read();
        if credential.access_key() == access_key {
            Ok(Some(credential.clone()))
        } else {
            Ok(None)
        }
    }
}

/// A [`GetCredential`] implementation that wraps a function.
///
/// Created by [`credential_lookup_fn`].
#[derive(Clone, Copy)]
pub struct CredentialLookupFn<F> {
    f: F,
}

impl<F> Debug for CredentialLookupFn<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("CredentialLookupFn")
    }
}

impl<F> GetCredential for CredentialLookupFn<F>
where
    F: Fn(&str) -> Result<Option<Credential>, BoxError>,
{
    fn get_credential(&self, access_key: &str) -> Result<Option<Credential>, BoxError> {
        (self.f)(access_key)
    }
}

/// Create a [`GetCredential`] implementation that wraps a function that can look up a credential.
///
/// If you need to encapsulate additional data (e.g. a database connection) to look up a key,
/// implement [`GetCredential`] on a struct instead.
pub fn credential_lookup_fn<F>(f: F) -> CredentialLookupFn<F>
where
    F: Fn(&str) -> Result<Option<Credential>, BoxError>,
{
    CredentialLookupFn {
        f,
    }
}
