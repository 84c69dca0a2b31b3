use crate::error::Error;
use crate::field::{bytes_to_int, int_to_bytes, modulo, order, prime};
use crate::keys_management::{normalize_private_key, PrivateKeyInput};
use crate::point::Point;
use crate::rand_nonce::{fresh_aux_rand, RandomNonce};
use crate::tagged_hash::{TagCache, CHALLENGE_TAG};
use crate::utils::{from_hex, hex};
use num_bigint::BigInt;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

pub const MESSAGE_LENGTH: usize = 32;
pub const PUBLIC_KEY_LENGTH: usize = 32;
pub const SIGNATURE_LENGTH: usize = 64;

/// BIP-340 signature: `r` is the x-coordinate of the nonce point, `s` the response scalar.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub struct SchnorrSignature {
    pub r: [u8; 32],
    pub s: [u8; 32],
}

impl SchnorrSignature {
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..32].copy_from_slice(&self.r);
        out[32..].copy_from_slice(&self.s);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(Error::MalformedSignature(bytes.len()));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Ok(SchnorrSignature { r, s })
    }

    /// 128 lowercase hex characters.
    pub fn to_hex(&self) -> String {
        hex(&self.to_bytes())
    }

    pub fn from_hex(encoded: &str) -> Result<Self, Error> {
        let bytes = from_hex(encoded).ok_or(Error::InvalidHex)?;
        Self::from_bytes(&bytes)
    }

    /// Checks this signature against a 32-byte message and x-only public key.
    pub fn verify(&self, message: &[u8], public_key_x: &[u8]) -> bool {
        verify(&self.to_bytes(), message, public_key_x)
    }
}

/// Signing and verification sharing one [TagCache].
///
/// Hold one per process or per signing session to reuse the tag prefix digests.
#[derive(Debug, Default)]
pub struct SchnorrContext {
    tags: TagCache,
}

impl SchnorrContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> &TagCache {
        &self.tags
    }

    /// Signs a 32-byte message:
    /// (R, s) = (kG, k + H(R.x, P.x, m) d)
    ///
    /// # Arguments
    ///
    /// * `message` - The 32-byte message to be signed.
    /// * `private_key` - Any accepted private key encoding.
    /// * `aux_rand` - 32 bytes of fresh randomness mixed into the nonce.
    ///
    /// # Returns
    ///
    /// The signature, which has already passed verification against the signer's key.
    ///
    #[tracing::instrument(name = "Signing the message with BIP-340 Schnorr", skip_all)]
    pub fn sign<'a>(
        &self,
        message: &[u8],
        private_key: impl Into<PrivateKeyInput<'a>>,
        aux_rand: &[u8],
    ) -> Result<SchnorrSignature, Error> {
        if message.len() != MESSAGE_LENGTH {
            return Err(Error::InvalidMessageLength(message.len()));
        }
        let aux_rand: &[u8; 32] = aux_rand
            .try_into()
            .map_err(|_| Error::InvalidAuxRandLength(aux_rand.len()))?;

        let d0 = normalize_private_key(private_key)?;
        let public_point = Point::mul_base(&d0);
        let public_key_x = public_point.to_x_only()?;
        let d = if public_point.has_even_y() {
            d0
        } else {
            order() - d0
        };

        let nonce = RandomNonce::derive(&self.tags, &d, &public_key_x, message, aux_rand)?;
        let e = self.challenge(&nonce.r_public, &public_key_x, message);
        let s = modulo(&(nonce.scalar() + e * &d), order());

        let signature = SchnorrSignature {
            r: nonce.r_public,
            s: int_to_bytes(&s),
        };
        if !self.verify(&signature.to_bytes(), message, &public_key_x) {
            error!("freshly produced signature failed verification");
            return Err(Error::SignatureSelfCheckFailed);
        }
        Ok(signature)
    }

    /// Signs with auxiliary randomness drawn from `rng`.
    pub fn sign_with_rng<'a, R>(
        &self,
        message: &[u8],
        private_key: impl Into<PrivateKeyInput<'a>>,
        rng: &mut R,
    ) -> Result<SchnorrSignature, Error>
    where
        R: CryptoRng + RngCore,
    {
        let aux_rand = fresh_aux_rand(rng)?;
        self.sign(message, private_key, &aux_rand)
    }

    /// Verifies a signature using:
    /// sG - eP = R, with R.y even and R.x = r
    ///
    /// # Arguments
    ///
    /// * `signature` - 64 raw signature bytes.
    /// * `message` - The 32-byte message that was signed.
    /// * `public_key_x` - The signer's 32-byte x-only public key.
    ///
    /// # Returns
    ///
    /// `true` if the signature is valid, `false` for every other input.
    ///
    #[tracing::instrument(name = "Verifying the BIP-340 Schnorr signature", skip_all)]
    pub fn verify(&self, signature: &[u8], message: &[u8], public_key_x: &[u8]) -> bool {
        if signature.len() != SIGNATURE_LENGTH
            || message.len() != MESSAGE_LENGTH
            || public_key_x.len() != PUBLIC_KEY_LENGTH
        {
            debug!(
                signature_len = signature.len(),
                message_len = message.len(),
                public_key_len = public_key_x.len(),
                "rejected: unexpected input length"
            );
            return false;
        }

        let r = bytes_to_int(&signature[..32]);
        let s = bytes_to_int(&signature[32..]);
        if &r >= prime() || &s >= order() {
            debug!("rejected: signature component out of range");
            return false;
        }

        let e = self.challenge(&signature[..32], public_key_x, message);
        let public_point = match Point::lift_x(&bytes_to_int(public_key_x)) {
            Ok(point) => point,
            Err(err) => {
                debug!(%err, "rejected: public key is not on the curve");
                return false;
            }
        };

        let big_r = Point::mul_base(&s).add(&public_point.multiply(&e).negate());
        if big_r.is_infinity() || !big_r.has_even_y() || big_r.x() != Some(&r) {
            debug!("rejected: nonce point mismatch");
            return false;
        }
        true
    }

    /// e = H_challenge(R.x || P.x || m) mod n
    fn challenge(&self, r: &[u8], public_key_x: &[u8], message: &[u8]) -> BigInt {
        let digest = self.tags.hash(CHALLENGE_TAG, &[r, public_key_x, message]);
        modulo(&bytes_to_int(&digest), order())
    }
}

/// Signs with a throwaway [SchnorrContext].
pub fn sign<'a>(
    message: &[u8],
    private_key: impl Into<PrivateKeyInput<'a>>,
    aux_rand: &[u8],
) -> Result<SchnorrSignature, Error> {
    SchnorrContext::new().sign(message, private_key, aux_rand)
}

/// Signs with a throwaway [SchnorrContext] and randomness from `rng`.
pub fn sign_with_rng<'a, R>(
    message: &[u8],
    private_key: impl Into<PrivateKeyInput<'a>>,
    rng: &mut R,
) -> Result<SchnorrSignature, Error>
where
    R: CryptoRng + RngCore,
{
    SchnorrContext::new().sign_with_rng(message, private_key, rng)
}

/// Verifies with a throwaway [SchnorrContext]. Never panics on malformed input.
pub fn verify(signature: &[u8], message: &[u8], public_key_x: &[u8]) -> bool {
    SchnorrContext::new().verify(signature, message, public_key_x)
}
