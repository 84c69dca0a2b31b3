//! Human-readable bech32 key encodings (`npub1...` / `nsec1...`).
//!
//! Decoding validates the payload as well as the checksum: an `nsec` must hold a private
//! key in `(0, n)` and an `npub` must be an x-coordinate on the curve.

use crate::error::Error;
use crate::field::bytes_to_int;
use crate::keys_management::normalize_private_key;
use crate::point::Point;
use bech32::primitives::decode::CheckedHrpstring;
use bech32::{Bech32, Hrp};

pub const PUBLIC_KEY_PREFIX: &str = "npub";
pub const SECRET_KEY_PREFIX: &str = "nsec";

fn parse_prefix(prefix: &str) -> Result<Hrp, Error> {
    Hrp::parse(prefix).map_err(|e| Error::InvalidEncoding(e.to_string()))
}

/// Encodes 32 bytes under the given human-readable prefix.
pub fn encode(prefix: &str, data: &[u8; 32]) -> Result<String, Error> {
    bech32::encode::<Bech32>(parse_prefix(prefix)?, data)
        .map_err(|e| Error::InvalidEncoding(e.to_string()))
}

/// Decodes a bech32 string, requiring the given prefix and a 32-byte payload.
///
/// Only the original bech32 checksum is accepted; bech32m strings are rejected.
pub fn decode(prefix: &str, encoded: &str) -> Result<[u8; 32], Error> {
    let checked = CheckedHrpstring::new::<Bech32>(encoded)
        .map_err(|e| Error::InvalidEncoding(e.to_string()))?;
    let hrp = checked.hrp();
    if hrp != parse_prefix(prefix)? {
        return Err(Error::InvalidEncoding(format!(
            "expected prefix {prefix}, got {hrp}"
        )));
    }
    let data: Vec<u8> = checked.byte_iter().collect();
    data.as_slice().try_into().map_err(|_| {
        Error::InvalidEncoding(format!("expected 32 bytes, got {}", data.len()))
    })
}

pub fn encode_public_key(public_key_x: &[u8; 32]) -> Result<String, Error> {
    encode(PUBLIC_KEY_PREFIX, public_key_x)
}

/// Decodes an `npub` into an x-only public key that lifts onto the curve.
pub fn decode_public_key(encoded: &str) -> Result<[u8; 32], Error> {
    let public_key_x = decode(PUBLIC_KEY_PREFIX, encoded)?;
    Point::lift_x(&bytes_to_int(&public_key_x)).map_err(|_| Error::InvalidPublicKey)?;
    Ok(public_key_x)
}

pub fn encode_private_key(private_key: &[u8; 32]) -> Result<String, Error> {
    normalize_private_key(private_key)?;
    encode(SECRET_KEY_PREFIX, private_key)
}

/// Decodes an `nsec` into 32 private key bytes in `(0, n)`.
pub fn decode_private_key(encoded: &str) -> Result<[u8; 32], Error> {
    let private_key = decode(SECRET_KEY_PREFIX, encoded)?;
    normalize_private_key(&private_key)?;
    Ok(private_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys_management::{get_x_only_public_key, KeyPair};
    use crate::utils::{from_hex, hex};

    const NPUB: &str = "npub10elfcs4fr0l0r8af98jlmgdh9c8tcxjvz9qkw038js35mp4dma8qzvjptg";
    const NPUB_HEX: &str = "7e7e9c42a91bfef19fa929e5fda1b72e0ebc1a4c1141673e2794234d86addf4e";
    const NSEC: &str = "nsec1vl029mgpspedva04g90vltkh6fvh240zqtv9k0t9af8935ke9laqsnlfe5";
    const NSEC_HEX: &str = "67dea2ed018072d675f5415ecfaed7d2597555e202d85b3d65ea4e58d2d92ffa";

    fn bytes32(hex: &str) -> [u8; 32] {
        from_hex(hex).unwrap().try_into().unwrap()
    }

    #[test]
    fn test_known_encodings() {
        assert_eq!(encode_public_key(&bytes32(NPUB_HEX)).unwrap(), NPUB);
        assert_eq!(hex(&decode_public_key(NPUB).unwrap()), NPUB_HEX);
        assert_eq!(encode_private_key(&bytes32(NSEC_HEX)).unwrap(), NSEC);
        assert_eq!(hex(&decode_private_key(NSEC).unwrap()), NSEC_HEX);
    }

    #[test]
    fn test_key_for_scalar_three() {
        let public_key_x = get_x_only_public_key(3u64).unwrap();
        assert_eq!(
            encode_public_key(&public_key_x).unwrap(),
            "npub1lycg5qvjtrp3qjf5f7zl382j9x6nrjz9sdhenvyxq8c3808qxmus6gq266"
        );

        let keys = KeyPair::create_from_private_key(3u64).unwrap();
        assert_eq!(
            encode_private_key(keys.secret_bytes()).unwrap(),
            "nsec1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqps52s3re"
        );
    }

    #[test]
    fn test_prefix_mismatch() {
        assert!(matches!(
            decode_private_key(NPUB),
            Err(Error::InvalidEncoding(_))
        ));
        assert!(matches!(
            decode_public_key(NSEC),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_corrupted_checksum() {
        let mut corrupted = NPUB.to_string();
        corrupted.pop();
        corrupted.push('q');
        assert!(matches!(
            decode_public_key(&corrupted),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_bech32m_checksum_rejected() {
        // Same payload as the scalar-three npub, under the bech32m constant
        let bech32m = "npub1lycg5qvjtrp3qjf5f7zl382j9x6nrjz9sdhenvyxq8c3808qxmus05sxlc";
        assert!(matches!(
            decode_public_key(bech32m),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_invalid_payloads() {
        let zero = encode(SECRET_KEY_PREFIX, &[0u8; 32]).unwrap();
        assert_eq!(decode_private_key(&zero), Err(Error::InvalidPrivateKey));
        assert_eq!(encode_private_key(&[0u8; 32]), Err(Error::InvalidPrivateKey));

        // x = 5 is not on the curve
        let mut off_curve = [0u8; 32];
        off_curve[31] = 5;
        let encoded = encode(PUBLIC_KEY_PREFIX, &off_curve).unwrap();
        assert_eq!(decode_public_key(&encoded), Err(Error::InvalidPublicKey));
    }
}
