//! # secp256k1 Schnorr Signature Library
//!
//! This Rust library implements BIP-340 Schnorr signatures over secp256k1, the scheme used to
//! prove ownership of an x-only identity key (for example a Nostr `npub`).
//!
//! ## Overview
//!
//! - Field arithmetic: reduction, inversion, and square roots modulo the curve prime `p`
//!   on arbitrary-precision integers.
//! - Curve arithmetic: addition, doubling, scalar multiplication, and x-only point lifting,
//!   with the identity as an explicit [point::Point::Infinity] variant.
//! - Key management: private keys are 32 big-endian bytes (or 64 hex characters) in `(0, n)`;
//!   public keys are the 32-byte x-coordinate of `d * G` with an implicit even `y`.
//! - Tagged hashing: `H_tag(x) = SHA256(SHA256(tag) || SHA256(tag) || x)`.
//!
//! ## Algorithm
//!
//! - Signing: with `d` negated if `d * G` has odd `y`, derive
//!   `k = H_nonce(d XOR H_aux(a) || P.x || m) mod n`, negate `k` if `k * G` has odd `y`, and output
//!   `(R.x, k + H_challenge(R.x || P.x || m) * d mod n)`.
//! - Verification: `R = sG - eP` must be finite, have even `y`, and `R.x = r`.
//!
//! Every signature is verified before it is returned. Verification returns `false` for any
//! malformed input instead of failing.
//!
//! ## Usage
//!
//! ```
//! use rand_core::OsRng;
//! use secp256k1_schnorr::keys_management::KeyPair;
//! use secp256k1_schnorr::schnorr_single_signature::SchnorrContext;
//!
//! let context = SchnorrContext::new();
//! let keys = KeyPair::create(&mut OsRng).unwrap();
//! let message = [7u8; 32];
//! let signature = context.sign_with_rng(&message, &keys, &mut OsRng).unwrap();
//! assert!(context.verify(&signature.to_bytes(), &message, &keys.public_key));
//! ```

pub mod error;
pub mod field;
pub mod key_encoding;
pub mod keys_management;
pub mod point;
pub mod rand_nonce;
pub mod schnorr_single_signature;
pub mod tagged_hash;
pub mod utils;

#[cfg(feature = "tracing")]
pub mod telemetry;

pub use crate::error::Error;
pub use crate::keys_management::{
    get_public_key, get_x_only_public_key, normalize_private_key, KeyPair,
};
pub use crate::point::Point;
pub use crate::schnorr_single_signature::{
    sign, sign_with_rng, verify, SchnorrContext, SchnorrSignature,
};
pub use crate::tagged_hash::{tagged_hash, TagCache};
