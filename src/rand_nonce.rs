use crate::error::Error;
use crate::field::{bytes_to_int, int_to_bytes, modulo, order};
use crate::point::Point;
use crate::tagged_hash::{TagCache, AUX_TAG, NONCE_TAG};
use num_bigint::BigInt;
use num_traits::Zero;
use rand::{CryptoRng, RngCore};
use secrecy::{ExposeSecret, Secret};

/// Draws 32 bytes of auxiliary signing randomness from `rng`.
///
/// A failing source aborts with [Error::RandomnessUnavailable]; there is no fallback value.
pub fn fresh_aux_rand<R>(rng: &mut R) -> Result<[u8; 32], Error>
where
    R: CryptoRng + RngCore,
{
    let mut aux = [0u8; 32];
    rng.try_fill_bytes(&mut aux)
        .map_err(|e| Error::RandomnessUnavailable(e.to_string()))?;
    Ok(aux)
}

/// Per-signature nonce `k` together with the x-coordinate of `R = k * G`.
///
/// `k` is already negated where needed so that `R` has an even `y`.
pub struct RandomNonce {
    pub r_public: [u8; 32],
    pub(crate) k: Secret<[u8; 32]>,
}

use std::fmt;
impl fmt::Debug for RandomNonce {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Format the RandomNonce struct without including k
        write!(f, "RandomNonce {{ r_public: {:?} }}", self.r_public)
    }
}

impl RandomNonce {
    /// Derives the nonce from the (parity-adjusted) secret `d`, the x-only public key,
    /// the message, and the auxiliary randomness.
    pub fn derive(
        tags: &TagCache,
        d: &BigInt,
        public_key_x: &[u8; 32],
        message: &[u8],
        aux_rand: &[u8; 32],
    ) -> Result<RandomNonce, Error> {
        let masked = Secret::new(xor(&int_to_bytes(d), &tags.hash(AUX_TAG, &[aux_rand])));
        let rand = tags.hash(
            NONCE_TAG,
            &[masked.expose_secret(), public_key_x, message],
        );
        let k0 = modulo(&bytes_to_int(&rand), order());
        if k0.is_zero() {
            return Err(Error::InvalidNonce);
        }

        let r = Point::mul_base(&k0);
        let r_public = r.to_x_only()?;
        let k = if r.has_even_y() { k0 } else { order() - k0 };
        Ok(RandomNonce {
            r_public,
            k: Secret::new(int_to_bytes(&k)),
        })
    }

    pub(crate) fn scalar(&self) -> BigInt {
        bytes_to_int(self.k.expose_secret())
    }
}

fn xor(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let mut out = [0u8; 32];
    for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b.iter())) {
        *o = x ^ y;
    }
    out
}
