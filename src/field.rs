//! Modular arithmetic over the secp256k1 base field (mod `p`) and scalar field (mod `n`).
//!
//! Values are arbitrary-precision [BigInt]s; every result is normalized into `[0, m)`.

use crate::error::Error;
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};
use std::sync::OnceLock;

const P_BYTES: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, //
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, //
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, //
    0xff, 0xff, 0xff, 0xfe, 0xff, 0xff, 0xfc, 0x2f,
];

const N_BYTES: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, //
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe, //
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, //
    0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// Constant term of the curve equation `y^2 = x^3 + 7`.
pub const CURVE_B: u32 = 7;

/// The field prime `p = 2^256 - 2^32 - 977`.
pub fn prime() -> &'static BigInt {
    static P: OnceLock<BigInt> = OnceLock::new();
    P.get_or_init(|| bytes_to_int(&P_BYTES))
}

/// The order `n` of the generator point.
pub fn order() -> &'static BigInt {
    static N: OnceLock<BigInt> = OnceLock::new();
    N.get_or_init(|| bytes_to_int(&N_BYTES))
}

/// Returns `a mod m` normalized into `[0, m)`, including for negative `a`.
pub fn modulo(a: &BigInt, m: &BigInt) -> BigInt {
    a.mod_floor(m)
}

/// Reduces `a` into the base field.
pub fn fe(a: &BigInt) -> BigInt {
    modulo(a, prime())
}

/// Computes the inverse of `a` modulo `m` with the extended Euclidean algorithm.
///
/// Fails with [Error::DivisionByZero] if `a ≡ 0 (mod m)` or `gcd(a, m) != 1`.
pub fn invert(a: &BigInt, m: &BigInt) -> Result<BigInt, Error> {
    if m.sign() != Sign::Plus {
        return Err(Error::DivisionByZero);
    }
    let mut a = modulo(a, m);
    if a.is_zero() {
        return Err(Error::DivisionByZero);
    }

    // Invariant: x * a_initial ≡ b (mod m) and u * a_initial ≡ a (mod m)
    let mut b = m.clone();
    let (mut x, mut u) = (BigInt::zero(), BigInt::one());
    while !a.is_zero() {
        let (q, r) = b.div_rem(&a);
        let next = &x - &u * &q;
        b = std::mem::replace(&mut a, r);
        x = std::mem::replace(&mut u, next);
    }
    if !b.is_one() {
        return Err(Error::DivisionByZero);
    }
    Ok(modulo(&x, m))
}

/// Squares `x` repeatedly, `power` times, mod `p`.
fn pow2(x: &BigInt, power: u32) -> BigInt {
    let p = prime();
    let mut r = x.clone();
    for _ in 0..power {
        r = (&r * &r) % p;
    }
    r
}

/// Computes a square root of `a` mod `p`.
///
/// Because `p ≡ 3 (mod 4)`, a root is `a^((p + 1) / 4)`. The exponent
/// `2^254 - 2^30 - 244` is reached with a fixed addition chain of 253 squarings and 13
/// multiplications. Fails with [Error::NoSquareRoot] if `a` is not a quadratic residue.
pub fn sqrt(a: &BigInt) -> Result<BigInt, Error> {
    let p = prime();
    let x = fe(a);
    // bN holds x^(2^N - 1)
    let b2 = (&x * &x * &x) % p;
    let b3 = (&b2 * &b2 * &x) % p;
    let b6 = (pow2(&b3, 3) * &b3) % p;
    let b9 = (pow2(&b6, 3) * &b3) % p;
    let b11 = (pow2(&b9, 2) * &b2) % p;
    let b22 = (pow2(&b11, 11) * &b11) % p;
    let b44 = (pow2(&b22, 22) * &b22) % p;
    let b88 = (pow2(&b44, 44) * &b44) % p;
    let b176 = (pow2(&b88, 88) * &b88) % p;
    let b220 = (pow2(&b176, 44) * &b44) % p;
    let b223 = (pow2(&b220, 3) * &b3) % p;
    let t1 = (pow2(&b223, 23) * &b22) % p;
    let t2 = (pow2(&t1, 6) * &b2) % p;
    let root = pow2(&t2, 2);
    if (&root * &root) % p != x {
        return Err(Error::NoSquareRoot);
    }
    Ok(root)
}

/// Interprets `bytes` as an unsigned big-endian integer.
pub fn bytes_to_int(bytes: &[u8]) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, bytes)
}

/// Encodes a value in `[0, 2^256)` as 32 big-endian bytes.
pub fn int_to_bytes(value: &BigInt) -> [u8; 32] {
    let (_, bytes) = value.to_bytes_be();
    debug_assert!(bytes.len() <= 32, "value exceeds 256 bits");
    let mut out = [0u8; 32];
    let start = 32usize.saturating_sub(bytes.len());
    out[start..].copy_from_slice(&bytes[bytes.len().saturating_sub(32)..]);
    out
}

/// Parses 32 big-endian bytes as a field element, rejecting values `>= p`.
pub fn field_element_from_bytes(bytes: &[u8]) -> Result<BigInt, Error> {
    if bytes.len() != 32 {
        return Err(Error::InvalidFieldElement);
    }
    let value = bytes_to_int(bytes);
    if &value >= prime() {
        return Err(Error::InvalidFieldElement);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Num;

    fn big(hex: &str) -> BigInt {
        BigInt::from_str_radix(hex, 16).unwrap()
    }

    #[test]
    fn test_constants() {
        let expected_p = (BigInt::one() << 256) - (BigInt::one() << 32) - BigInt::from(977);
        assert_eq!(prime(), &expected_p);
        assert_eq!(
            order(),
            &big("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141")
        );
        assert_eq!(prime() % BigInt::from(4), BigInt::from(3));
    }

    #[test]
    fn test_modulo_normalizes_negative_values() {
        let m = BigInt::from(7);
        assert_eq!(modulo(&BigInt::from(-1), &m), BigInt::from(6));
        assert_eq!(modulo(&BigInt::from(-14), &m), BigInt::zero());
        assert_eq!(modulo(&BigInt::from(15), &m), BigInt::one());
        assert_eq!(fe(&(prime() + BigInt::from(5))), BigInt::from(5));
    }

    #[test]
    fn test_invert() {
        let p = prime();
        for value in [1u64, 2, 3, 977, u64::MAX] {
            let a = BigInt::from(value);
            let inv = invert(&a, p).unwrap();
            assert_eq!(modulo(&(a * inv), p), BigInt::one());
        }

        // Negative inputs are reduced first
        let inv = invert(&BigInt::from(-2), order()).unwrap();
        assert_eq!(modulo(&(BigInt::from(-2) * inv), order()), BigInt::one());

        // Small modulus
        assert_eq!(invert(&BigInt::from(3), &BigInt::from(7)), Ok(BigInt::from(5)));
    }

    #[test]
    fn test_invert_failures() {
        let p = prime();
        assert_eq!(invert(&BigInt::zero(), p), Err(Error::DivisionByZero));
        assert_eq!(invert(p, p), Err(Error::DivisionByZero));
        assert_eq!(
            invert(&BigInt::from(4), &BigInt::from(8)),
            Err(Error::DivisionByZero)
        );
        assert_eq!(
            invert(&BigInt::from(3), &BigInt::zero()),
            Err(Error::DivisionByZero)
        );
    }

    #[test]
    fn test_sqrt() {
        let p = prime();
        for value in [0u64, 1, 4, 9, 2, 8] {
            let a = BigInt::from(value);
            let root = sqrt(&a).unwrap();
            assert_eq!((&root * &root) % p, a);
        }

        // Compare against direct exponentiation
        let a = big("483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8");
        let square = (&a * &a) % p;
        let root = sqrt(&square).unwrap();
        let exp = (p + BigInt::one()) >> 2;
        assert_eq!(root, square.modpow(&exp, p));
        assert!(root == a || root == p - &a);
    }

    #[test]
    fn test_sqrt_non_residue() {
        // 5^3 + 7 = 132 is not a square mod p
        assert_eq!(sqrt(&BigInt::from(132)), Err(Error::NoSquareRoot));
        // -1 is not a square when p ≡ 3 (mod 4)
        assert_eq!(sqrt(&BigInt::from(-1)), Err(Error::NoSquareRoot));
    }

    #[test]
    fn test_byte_conversions() {
        let bytes = int_to_bytes(&BigInt::from(3));
        assert_eq!(bytes[31], 3);
        assert!(bytes[..31].iter().all(|b| *b == 0));
        assert_eq!(bytes_to_int(&bytes), BigInt::from(3));
        assert_eq!(int_to_bytes(&BigInt::zero()), [0u8; 32]);
        assert_eq!(bytes_to_int(&int_to_bytes(prime())), *prime());
    }

    #[test]
    fn test_field_element_from_bytes() {
        assert_eq!(
            field_element_from_bytes(&[0u8; 32]).unwrap(),
            BigInt::zero()
        );
        assert_eq!(
            field_element_from_bytes(&P_BYTES),
            Err(Error::InvalidFieldElement)
        );
        assert_eq!(
            field_element_from_bytes(&[0u8; 31]),
            Err(Error::InvalidFieldElement)
        );
    }
}
