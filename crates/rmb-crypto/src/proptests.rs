#[cfg(test)]
mod tests {
    use ed25519_dalek::{Signer, SigningKey};
    use proptest::prelude::*;

    use crate::codec::{decode, encode, SignatureError};
    use crate::scheme::SignatureScheme;
    use crate::transcript::Transcript;
    use crate::verifier::{construct_verifier, Verifier, SR25519_SIGNING_CONTEXT};

    fn sr25519_pair(seed: &[u8; 32]) -> schnorrkel::Keypair {
        schnorrkel::MiniSecretKey::from_bytes(seed)
            .unwrap()
            .expand_to_keypair(schnorrkel::ExpansionMode::Ed25519)
    }

    fn sr25519_sign(pair: &schnorrkel::Keypair, message: &[u8]) -> [u8; 64] {
        pair.sign(schnorrkel::signing_context(SR25519_SIGNING_CONTEXT).bytes(message))
            .to_bytes()
    }

    fn scheme() -> impl Strategy<Value = SignatureScheme> {
        prop_oneof![Just(SignatureScheme::Ed25519), Just(SignatureScheme::Sr25519)]
    }

    proptest! {
        #[test]
        fn test_ed25519_round_trip(seed in any::<[u8; 32]>(), message in any::<Vec<u8>>()) {
            let sk = SigningKey::from_bytes(&seed);
            let sig = sk.sign(&message).to_bytes();
            let verifier = construct_verifier(sk.verifying_key().as_bytes(), SignatureScheme::Ed25519);

            prop_assert!(verifier.verify(&message, &sig));
        }

        #[test]
        fn test_sr25519_round_trip(seed in any::<[u8; 32]>(), message in any::<Vec<u8>>()) {
            let pair = sr25519_pair(&seed);
            let sig = sr25519_sign(&pair, &message);
            let verifier = construct_verifier(&pair.public.to_bytes(), SignatureScheme::Sr25519);

            prop_assert!(verifier.verify(&message, &sig));
        }

        #[test]
        fn test_signature_bit_flip_rejected(
            seed in any::<[u8; 32]>(),
            message in any::<Vec<u8>>(),
            scheme in scheme(),
            bit in 0..512usize,
        ) {
            let (pk, mut sig) = match scheme {
                SignatureScheme::Ed25519 => {
                    let sk = SigningKey::from_bytes(&seed);
                    (sk.verifying_key().to_bytes(), sk.sign(&message).to_bytes())
                }
                SignatureScheme::Sr25519 => {
                    let pair = sr25519_pair(&seed);
                    (pair.public.to_bytes(), sr25519_sign(&pair, &message))
                }
            };
            sig[bit / 8] ^= 1 << (bit % 8);

            prop_assert!(!construct_verifier(&pk, scheme).verify(&message, &sig));
        }

        #[test]
        fn test_message_bit_flip_rejected(
            seed in any::<[u8; 32]>(),
            message in proptest::collection::vec(any::<u8>(), 1..256),
            scheme in scheme(),
            bit in any::<usize>(),
        ) {
            let (pk, sig) = match scheme {
                SignatureScheme::Ed25519 => {
                    let sk = SigningKey::from_bytes(&seed);
                    (sk.verifying_key().to_bytes(), sk.sign(&message).to_bytes())
                }
                SignatureScheme::Sr25519 => {
                    let pair = sr25519_pair(&seed);
                    (pair.public.to_bytes(), sr25519_sign(&pair, &message))
                }
            };
            let bit = bit % (message.len() * 8);
            let mut tampered = message.clone();
            tampered[bit / 8] ^= 1 << (bit % 8);

            prop_assert!(!construct_verifier(&pk, scheme).verify(&tampered, &sig));
        }

        #[test]
        fn test_codec_round_trip(scheme in scheme(), raw in any::<[u8; 64]>()) {
            let decoded = decode(&encode(scheme, &raw)).unwrap();
            prop_assert_eq!(decoded.scheme, scheme);
            prop_assert_eq!(decoded.bytes, raw.to_vec());
        }

        #[test]
        fn test_unknown_tag_rejected(tag in any::<u8>(), raw in any::<[u8; 64]>()) {
            prop_assume!(tag != b'e' && tag != b's');
            let mut blob = vec![tag];
            blob.extend_from_slice(&raw);

            let result = decode(&hex::encode(blob));
            prop_assert!(matches!(result, Err(SignatureError::UnrecognizedScheme(t)) if t == tag));
        }

        #[test]
        fn test_decode_never_panics(input in ".*") {
            let _ = decode(&input);
        }

        #[test]
        fn test_garbage_key_never_panics(
            key in proptest::collection::vec(any::<u8>(), 0..64),
            sig in proptest::collection::vec(any::<u8>(), 0..80),
            scheme in scheme(),
        ) {
            prop_assert!(!construct_verifier(&key, scheme).verify(b"message", &sig));
        }

        #[test]
        fn test_transcript_determinism(
            tag1 in any::<u32>(),
            data1 in any::<Vec<u8>>(),
            value in any::<u64>(),
        ) {
            let mut t1 = Transcript::new("test").unwrap();
            t1.append_bytes(tag1, &data1).unwrap().append_u64(tag1.wrapping_add(1), value);
            let mut t2 = Transcript::new("test").unwrap();
            t2.append_bytes(tag1, &data1).unwrap().append_u64(tag1.wrapping_add(1), value);

            prop_assert_eq!(t1.finalize(), t2.finalize());
        }
    }
}
