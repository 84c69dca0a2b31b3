use thiserror::Error;

/// Errors raised while handling keys, field elements, and signatures.
///
/// Verification never surfaces these: a rejected signature is reported as `false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid private key")]
    InvalidPrivateKey,
    #[error("invalid field element")]
    InvalidFieldElement,
    #[error("invalid x coordinate")]
    InvalidXCoordinate,
    #[error("no square root")]
    NoSquareRoot,
    #[error("division by zero")]
    DivisionByZero,
    #[error("invalid nonce")]
    InvalidNonce,
    #[error("malformed signature: expected 64 bytes, got {0}")]
    MalformedSignature(usize),
    #[error("signature failed self-verification")]
    SignatureSelfCheckFailed,
    #[error("invalid message length: expected 32 bytes, got {0}")]
    InvalidMessageLength(usize),
    #[error("invalid auxiliary randomness length: expected 32 bytes, got {0}")]
    InvalidAuxRandLength(usize),
    #[error("secure randomness unavailable: {0}")]
    RandomnessUnavailable(String),
    #[error("invalid public key")]
    InvalidPublicKey,
    #[error("point at infinity has no encoding")]
    PointAtInfinity,
    #[error("invalid hex")]
    InvalidHex,
    #[error("invalid key encoding: {0}")]
    InvalidEncoding(String),
}
