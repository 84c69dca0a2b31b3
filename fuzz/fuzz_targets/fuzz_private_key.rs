#![no_main]

use libfuzzer_sys::fuzz_target;

use rand::rngs::StdRng;
use rand::SeedableRng;
use secp256k1_schnorr::keys_management::KeyPair;
use secp256k1_schnorr::schnorr_single_signature::SchnorrContext;
use sha2::{Digest, Sha256};

fuzz_target!(|data: &[u8]| {
    // Message to be signed
    let message: [u8; 32] = Sha256::digest(b"Hello world").into();

    // Randomness source
    let mut seeded_rng = StdRng::seed_from_u64(123);

    let private_key: [u8; 32] = Sha256::digest(data).into();
    let Ok(keys) = KeyPair::create_from_private_key(&private_key) else {
        return;
    };

    let context = SchnorrContext::new();
    let signature = context
        .sign_with_rng(&message, &keys, &mut seeded_rng)
        .expect("Error");
    let result = context.verify(&signature.to_bytes(), &message, &keys.public_key);

    assert!(result);
});
