use rand_core::OsRng;
use secp256k1_schnorr::key_encoding::encode_public_key;
use secp256k1_schnorr::keys_management::KeyPair;
use secp256k1_schnorr::schnorr_single_signature::SchnorrContext;
use sha2::{Digest, Sha256};

fn main() -> Result<(), secp256k1_schnorr::Error> {
    let mut csprng = OsRng;
    let context = SchnorrContext::new();

    // Create the identity key
    let keys = KeyPair::create(&mut csprng)?;
    println!("Identity: {}", encode_public_key(&keys.get_public_key())?);

    // Messages are signed as 32-byte digests
    let message: [u8; 32] = Sha256::digest(b"Hello World").into();

    // Signature generation
    let signature = context.sign_with_rng(&message, &keys, &mut csprng)?;
    println!("Signature: {}", signature.to_hex());

    // Verification of the signature
    let result = signature.verify(&message, &keys.get_public_key());

    println!("Verification result: {:?}", result);
    assert!(result);
    Ok(())
}
