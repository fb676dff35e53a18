use {
    crate::constants::SHA1_OUTPUT_LEN,
    base64::{engine::general_purpose::STANDARD as BASE64, Engine},
    hmac::{Hmac, Mac},
    sha1::Sha1,
    subtle::ConstantTimeEq,
};

type HmacSha1 = Hmac<Sha1>;

/// Wrapper function to form a HMAC-SHA1 operation.
#[inline(always)]
pub(crate) fn hmac_sha1(key: &[u8], value: &[u8]) -> [u8; SHA1_OUTPUT_LEN] {
    let mut mac = HmacSha1::new_from_slice(key).expect("HMAC can take a key of any size");
    mac.update(value);
    let mut result = [0; SHA1_OUTPUT_LEN];
    result.copy_from_slice(mac.finalize().into_bytes().as_slice());
    result
}

/// Compute the AWS SigV2 signature of `string_to_sign`: `base64(HMAC-SHA1(secret_key, string_to_sign))`.
///
/// The string to sign is hashed exactly as given; header values that are not ASCII must be passed as their
/// raw wire bytes.
pub fn sigv2_signature<S: AsRef<[u8]>>(secret_key: &str, string_to_sign: S) -> String {
    BASE64.encode(hmac_sha1(secret_key.as_bytes(), string_to_sign.as_ref()))
}

/// Compare a client-supplied signature against the expected signature in constant time.
pub(crate) fn signatures_match(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}
