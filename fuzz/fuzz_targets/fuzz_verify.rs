#![no_main]

use libfuzzer_sys::fuzz_target;

use secp256k1_schnorr::schnorr_single_signature::verify;

fuzz_target!(|data: &[u8]| {
    // Arbitrary splits of untrusted bytes must be rejected without panicking
    let split = data.first().map(|b| *b as usize % 97).unwrap_or(0).min(data.len());
    let (signature, rest) = data.split_at(split);
    let (message, public_key) = rest.split_at(rest.len().min(32));
    let _ = verify(signature, message, public_key);

    if data.len() >= 128 {
        let _ = verify(&data[..64], &data[64..96], &data[96..128]);
    }
});
