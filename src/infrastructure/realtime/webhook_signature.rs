use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verifies provider webhook signatures: a hex-encoded HMAC-SHA256 over
/// the exact raw request body, keyed by the shared webhook secret.
///
/// Verification must run on the unparsed bytes; re-serializing the body
/// can change its byte layout and invalidate the signature.
#[derive(Clone)]
pub struct WebhookSignature {
    secret: String,
}

impl WebhookSignature {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Returns false on any mismatch or undecodable signature, never an
    /// error. The comparison is constant-time.
    pub fn verify(&self, raw_body: &[u8], signature: &str) -> bool {
        let Ok(expected) = hex::decode(signature.trim()) else {
            return false;
        };

        let Ok(mut mac) = HmacSha256::new_from_slice(self.secret.as_bytes()) else {
            return false;
        };
        mac.update(raw_body);
        mac.verify_slice(&expected).is_ok()
    }

    /// Produces the signature the provider would send for a body. Used
    /// by tests and local tooling.
    pub fn sign(&self, raw_body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
        mac.update(raw_body);
        hex::encode(mac.finalize().into_bytes())
    }
}
