//! Private key normalization, public key derivation, and the [KeyPair] type.

use crate::error::Error;
use crate::field::{bytes_to_int, int_to_bytes, order};
use crate::point::Point;
use crate::utils::from_hex;
use num_bigint::BigInt;
use num_traits::Zero;
use rand::{CryptoRng, RngCore};
use secrecy::{ExposeSecret, Secret};

/// Accepted encodings of a private key.
#[derive(Clone, Debug)]
pub enum PrivateKeyInput<'a> {
    /// 32 big-endian bytes.
    Bytes(&'a [u8]),
    /// 64 hexadecimal characters.
    Hex(&'a str),
    /// An already-parsed scalar.
    Scalar(BigInt),
}

impl<'a> From<&'a [u8]> for PrivateKeyInput<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        PrivateKeyInput::Bytes(bytes)
    }
}

impl<'a> From<&'a [u8; 32]> for PrivateKeyInput<'a> {
    fn from(bytes: &'a [u8; 32]) -> Self {
        PrivateKeyInput::Bytes(bytes)
    }
}

impl<'a> From<&'a str> for PrivateKeyInput<'a> {
    fn from(hex: &'a str) -> Self {
        PrivateKeyInput::Hex(hex)
    }
}

impl From<BigInt> for PrivateKeyInput<'_> {
    fn from(scalar: BigInt) -> Self {
        PrivateKeyInput::Scalar(scalar)
    }
}

impl From<u64> for PrivateKeyInput<'_> {
    fn from(scalar: u64) -> Self {
        PrivateKeyInput::Scalar(BigInt::from(scalar))
    }
}

impl<'a> From<&'a KeyPair> for PrivateKeyInput<'a> {
    fn from(key_pair: &'a KeyPair) -> Self {
        PrivateKeyInput::Bytes(key_pair.private_key.expose_secret())
    }
}

/// Parses a private key into a scalar `d` with `0 < d < n`.
pub fn normalize_private_key<'a>(input: impl Into<PrivateKeyInput<'a>>) -> Result<BigInt, Error> {
    let scalar = match input.into() {
        PrivateKeyInput::Bytes(bytes) => {
            if bytes.len() != 32 {
                return Err(Error::InvalidPrivateKey);
            }
            bytes_to_int(bytes)
        }
        PrivateKeyInput::Hex(hex) => {
            if hex.len() != 64 {
                return Err(Error::InvalidPrivateKey);
            }
            let bytes = from_hex(hex).ok_or(Error::InvalidPrivateKey)?;
            bytes_to_int(&bytes)
        }
        PrivateKeyInput::Scalar(scalar) => scalar,
    };
    if scalar <= BigInt::zero() || &scalar >= order() {
        return Err(Error::InvalidPrivateKey);
    }
    Ok(scalar)
}

/// Computes `d * G` and encodes it compressed (33 bytes) or uncompressed (65 bytes).
pub fn get_public_key<'a>(
    private_key: impl Into<PrivateKeyInput<'a>>,
    compressed: bool,
) -> Result<Vec<u8>, Error> {
    let point = Point::mul_base(&normalize_private_key(private_key)?);
    if compressed {
        Ok(point.to_compressed()?.to_vec())
    } else {
        Ok(point.to_uncompressed()?.to_vec())
    }
}

/// Returns the 32-byte x-coordinate of `d * G`.
pub fn get_x_only_public_key<'a>(
    private_key: impl Into<PrivateKeyInput<'a>>,
) -> Result<[u8; 32], Error> {
    Point::mul_base(&normalize_private_key(private_key)?).to_x_only()
}

/// Converts a 32-byte x-only, 33-byte compressed, or 65-byte uncompressed public key
/// into the x-only form, validating that it lies on the curve.
pub fn x_only_from_public_key(public_key: &[u8]) -> Result<[u8; 32], Error> {
    Point::from_bytes(public_key)
        .map_err(|_| Error::InvalidPublicKey)?
        .to_x_only()
}

/// A private key together with its x-only public key.
pub struct KeyPair {
    pub(crate) private_key: Secret<[u8; 32]>,
    pub public_key: [u8; 32],
}

use std::fmt;
impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Format the KeyPair struct without including private_key
        write!(f, "KeyPair {{ public_key: {:?} }}", self.public_key)
    }
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        KeyPair {
            private_key: Secret::new(*self.private_key.expose_secret()),
            public_key: self.public_key,
        }
    }
}

impl KeyPair {
    /// Generates a fresh key pair, resampling until the bytes fall in `(0, n)`.
    pub fn create<R>(rng: &mut R) -> Result<KeyPair, Error>
    where
        R: CryptoRng + RngCore,
    {
        loop {
            let mut candidate = [0u8; 32];
            rng.try_fill_bytes(&mut candidate)
                .map_err(|e| Error::RandomnessUnavailable(e.to_string()))?;
            match KeyPair::create_from_private_key(&candidate) {
                Err(Error::InvalidPrivateKey) => continue,
                result => return result,
            }
        }
    }

    pub fn create_from_private_key<'a>(
        private_key: impl Into<PrivateKeyInput<'a>>,
    ) -> Result<KeyPair, Error> {
        let d = normalize_private_key(private_key)?;
        let public_key = Point::mul_base(&d).to_x_only()?;
        Ok(KeyPair {
            private_key: Secret::new(int_to_bytes(&d)),
            public_key,
        })
    }

    pub fn get_public_key(&self) -> [u8; 32] {
        self.public_key
    }

    /// Exposes the raw private key bytes, e.g. for bech32 export.
    pub fn secret_bytes(&self) -> &[u8; 32] {
        self.private_key.expose_secret()
    }
}
