//! Hex helpers for keys, messages, and signatures.

/// Converts bytes to a lowercase hexadecimal string.
pub fn hex(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes.iter() {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}

/// Converts a hexadecimal string (either case) to bytes.
pub fn from_hex(hex: &str) -> Option<Vec<u8>> {
    // `from_str_radix` alone would accept a sign prefix such as "+3"
    if hex.len() % 2 != 0 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}

/// Converts a hexadecimal string to bytes, stripping whitespace and/or a `0x` prefix. Used
/// to paste external test vectors without modification.
pub fn from_hex_formatted(hex: &str) -> Option<Vec<u8>> {
    let hex = hex.replace(['\t', '\n', '\r', ' '], "");
    let res = hex.strip_prefix("0x").unwrap_or(&hex);
    from_hex(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        // Empty bytes
        let b: &[u8] = &[];
        let h = hex(b);
        assert_eq!(h, "");
        assert_eq!(from_hex(&h).unwrap(), b.to_vec());

        // Multiple bytes
        let b = &[0x00, 0xab, 0xff];
        let h = hex(b);
        assert_eq!(h, "00abff");
        assert_eq!(from_hex(&h).unwrap(), b.to_vec());
        assert_eq!(from_hex("00ABFF").unwrap(), b.to_vec());

        // Odd number of characters
        assert!(from_hex("0102030").is_none());

        // Invalid hexadecimal character
        assert!(from_hex("01g3").is_none());

        // Sign prefixes are not digits
        assert!(from_hex("+3").is_none());
        assert!(from_hex("-3").is_none());
        assert!(from_hex("00+f").is_none());

        // Multi-byte characters must not split a char boundary
        assert!(from_hex("éé").is_none());
    }

    #[test]
    fn test_from_hex_formatted() {
        assert_eq!(from_hex_formatted("0x01 02\n03").unwrap(), vec![1, 2, 3]);
        assert!(from_hex_formatted("0x0").is_none());
    }
}
