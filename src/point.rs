//! Affine point arithmetic on secp256k1 (`y^2 = x^3 + 7` over `F_p`).

use crate::error::Error;
use crate::field::{
    bytes_to_int, fe, field_element_from_bytes, int_to_bytes, invert, modulo, order, prime, sqrt,
    CURVE_B,
};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;
use std::sync::OnceLock;

const GX_BYTES: [u8; 32] = [
    0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac, //
    0x55, 0xa0, 0x62, 0x95, 0xce, 0x87, 0x0b, 0x07, //
    0x02, 0x9b, 0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9, //
    0x59, 0xf2, 0x81, 0x5b, 0x16, 0xf8, 0x17, 0x98,
];

const GY_BYTES: [u8; 32] = [
    0x48, 0x3a, 0xda, 0x77, 0x26, 0xa3, 0xc4, 0x65, //
    0x5d, 0xa4, 0xfb, 0xfc, 0x0e, 0x11, 0x08, 0xa8, //
    0xfd, 0x17, 0xb4, 0x48, 0xa6, 0x85, 0x54, 0x19, //
    0x9c, 0x47, 0xd0, 0x8f, 0xfb, 0x10, 0xd4, 0xb8,
];

/// Number of ladder steps in [Point::multiply]; covers every scalar below `n`.
const SCALAR_BITS: u64 = 256;

/// A point on the curve, or the identity element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Point {
    Infinity,
    Affine { x: BigInt, y: BigInt },
}

/// Right-hand side of the curve equation, `x^3 + 7 mod p`.
fn curve_rhs(x: &BigInt) -> BigInt {
    fe(&(x * x * x + CURVE_B))
}

impl Point {
    /// The standard generator `G`.
    pub fn generator() -> &'static Point {
        static G: OnceLock<Point> = OnceLock::new();
        G.get_or_init(|| Point::Affine {
            x: bytes_to_int(&GX_BYTES),
            y: bytes_to_int(&GY_BYTES),
        })
    }

    /// Builds an affine point, checking that both coordinates are field elements and
    /// that the point satisfies the curve equation.
    pub fn new(x: BigInt, y: BigInt) -> Result<Self, Error> {
        let p = prime();
        if x.is_negative_or_ge(p) || y.is_negative_or_ge(p) {
            return Err(Error::InvalidFieldElement);
        }
        let point = Point::Affine { x, y };
        if !point.is_on_curve() {
            return Err(Error::InvalidPublicKey);
        }
        Ok(point)
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    /// Returns true for the identity or an affine point with `y^2 = x^3 + 7`.
    pub fn is_on_curve(&self) -> bool {
        match self {
            Point::Infinity => true,
            Point::Affine { x, y } => fe(&(y * y)) == curve_rhs(x),
        }
    }

    pub fn x(&self) -> Option<&BigInt> {
        match self {
            Point::Infinity => None,
            Point::Affine { x, .. } => Some(x),
        }
    }

    pub fn y(&self) -> Option<&BigInt> {
        match self {
            Point::Infinity => None,
            Point::Affine { y, .. } => Some(y),
        }
    }

    /// Whether the point has an even `y` coordinate. The identity has none.
    pub fn has_even_y(&self) -> bool {
        match self {
            Point::Infinity => false,
            Point::Affine { y, .. } => y.is_even(),
        }
    }

    pub fn negate(&self) -> Point {
        match self {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => Point::Affine {
                x: x.clone(),
                y: fe(&-y),
            },
        }
    }

    /// Chord-and-tangent addition.
    pub fn add(&self, other: &Point) -> Point {
        let (x1, y1, x2, y2) = match (self, other) {
            (Point::Infinity, _) => return other.clone(),
            (_, Point::Infinity) => return self.clone(),
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => (x1, y1, x2, y2),
        };
        if x1 == x2 {
            if y1 == y2 {
                return self.double();
            }
            // P + (-P)
            return Point::Infinity;
        }
        match invert(&(x2 - x1), prime()) {
            Ok(inv) => {
                let lambda = fe(&((y2 - y1) * inv));
                Self::from_slope(&lambda, x1, y1, x2)
            }
            Err(_) => Point::Infinity,
        }
    }

    /// Tangent-line doubling.
    pub fn double(&self) -> Point {
        let (x, y) = match self {
            Point::Infinity => return Point::Infinity,
            Point::Affine { x, y } => (x, y),
        };
        // A vertical tangent (y = 0) meets the curve at infinity
        match invert(&(y * 2u32), prime()) {
            Ok(inv) => {
                let lambda = fe(&(x * x * 3u32 * inv));
                Self::from_slope(&lambda, x, y, x)
            }
            Err(_) => Point::Infinity,
        }
    }

    /// Third intersection of the line with slope `lambda` through `(x1, y1)`, reflected.
    fn from_slope(lambda: &BigInt, x1: &BigInt, y1: &BigInt, x2: &BigInt) -> Point {
        let x3 = fe(&(lambda * lambda - x1 - x2));
        let y3 = fe(&(lambda * (x1 - &x3) - y1));
        Point::Affine { x: x3, y: y3 }
    }

    /// Scalar multiplication `k * self`, with `k` reduced mod `n`.
    ///
    /// Runs a Montgomery ladder over a fixed 256 bits, so every bit costs one addition and
    /// one doubling regardless of its value.
    pub fn multiply(&self, k: &BigInt) -> Point {
        let k = modulo(k, order());
        let mut r0 = Point::Infinity;
        let mut r1 = self.clone();
        for i in (0..SCALAR_BITS).rev() {
            if k.bit(i) {
                r0 = r0.add(&r1);
                r1 = r1.double();
            } else {
                r1 = r0.add(&r1);
                r0 = r0.double();
            }
        }
        r0
    }

    /// `k * G`.
    pub fn mul_base(k: &BigInt) -> Point {
        Point::generator().multiply(k)
    }

    /// Recovers the point with x-coordinate `x` and even `y` (BIP-340 convention).
    pub fn lift_x(x: &BigInt) -> Result<Point, Error> {
        if x.is_negative_or_ge(prime()) {
            return Err(Error::InvalidXCoordinate);
        }
        let y = sqrt(&curve_rhs(x)).map_err(|_| Error::InvalidXCoordinate)?;
        let y = if y.is_even() { y } else { prime() - y };
        Ok(Point::Affine { x: x.clone(), y })
    }

    /// 32-byte x-only encoding.
    pub fn to_x_only(&self) -> Result<[u8; 32], Error> {
        self.x().map(int_to_bytes).ok_or(Error::PointAtInfinity)
    }

    /// 33-byte SEC1 compressed encoding (`0x02`/`0x03` parity prefix, then x).
    pub fn to_compressed(&self) -> Result<[u8; 33], Error> {
        let Point::Affine { x, y } = self else {
            return Err(Error::PointAtInfinity);
        };
        let mut out = [0u8; 33];
        out[0] = if y.is_even() { 0x02 } else { 0x03 };
        out[1..].copy_from_slice(&int_to_bytes(x));
        Ok(out)
    }

    /// 65-byte SEC1 uncompressed encoding (`0x04`, then x, then y).
    pub fn to_uncompressed(&self) -> Result<[u8; 65], Error> {
        let Point::Affine { x, y } = self else {
            return Err(Error::PointAtInfinity);
        };
        let mut out = [0u8; 65];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&int_to_bytes(x));
        out[33..].copy_from_slice(&int_to_bytes(y));
        Ok(out)
    }

    /// Parses a public key: 32-byte x-only, 33-byte compressed, or 65-byte uncompressed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Point, Error> {
        match bytes.len() {
            32 => Point::lift_x(&bytes_to_int(bytes)),
            33 => {
                let x = field_element_from_bytes(&bytes[1..])?;
                let even = match bytes[0] {
                    0x02 => true,
                    0x03 => false,
                    _ => return Err(Error::InvalidPublicKey),
                };
                let point = Point::lift_x(&x)?;
                Ok(if even { point } else { point.negate() })
            }
            65 => {
                if bytes[0] != 0x04 {
                    return Err(Error::InvalidPublicKey);
                }
                let x = field_element_from_bytes(&bytes[1..33])?;
                let y = field_element_from_bytes(&bytes[33..])?;
                Point::new(x, y)
            }
            _ => Err(Error::InvalidPublicKey),
        }
    }
}

trait RangeCheck {
    fn is_negative_or_ge(&self, bound: &BigInt) -> bool;
}

impl RangeCheck for BigInt {
    fn is_negative_or_ge(&self, bound: &BigInt) -> bool {
        self < &BigInt::zero() || self >= bound
    }
}
