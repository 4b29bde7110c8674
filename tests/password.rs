use std::sync::Arc;
use std::thread;

use pbkeys::{
    Algorithm, CredentialRecord, DEFAULT_CHARSET, HashAlgorithm, KeyDerivation, OsRandom, Params,
    PasswordEncoder, Pbkdf1, Pbkdf2, PbkdfError, encode_password_pbkdf1, encode_password_pbkdf2,
    parse_record, random_in_range, random_password, serialize_record, verify_password_pbkdf1,
    verify_password_pbkdf2,
};
use tempfile::tempdir;

const SALT: [u8; 16] = [
    0x8a, 0x1f, 0x33, 0x07, 0xc2, 0x5e, 0x90, 0x4b, 0x11, 0xd6, 0x2a, 0x7c, 0xe8, 0x05, 0x6f, 0xb4,
];

fn flip_one_char(password: &str, at: usize) -> String {
    password
        .chars()
        .enumerate()
        .map(|(i, c)| match (i == at, c) {
            (true, 'a') => 'b',
            (true, _) => 'a',
            (false, c) => c,
        })
        .collect()
}

#[test]
fn random_parameters_roundtrip() {
    for _ in 0..8 {
        let password = random_password(&OsRandom, 8, 32, DEFAULT_CHARSET).unwrap();

        let salt_len = random_in_range(&OsRandom, 8, 32).unwrap() as usize;
        let iterations = random_in_range(&OsRandom, 1, 512).unwrap();
        let key_len = random_in_range(&OsRandom, 8, 20).unwrap() as usize;
        let record =
            encode_password_pbkdf1(HashAlgorithm::Sha1, &password, salt_len, iterations, key_len)
                .unwrap();
        assert!(verify_password_pbkdf1(HashAlgorithm::Sha1, &password, &record).unwrap());

        let salt_len = random_in_range(&OsRandom, 16, 32).unwrap() as usize;
        let iterations = random_in_range(&OsRandom, 1, 512).unwrap();
        let key_len = random_in_range(&OsRandom, 32, 128).unwrap() as usize;
        let record = encode_password_pbkdf2(
            HashAlgorithm::Sha512,
            &password,
            salt_len,
            iterations,
            key_len,
        )
        .unwrap();
        assert!(verify_password_pbkdf2(HashAlgorithm::Sha512, &password, &record).unwrap());
    }
}

#[test]
fn any_single_changed_character_fails_verification() {
    let password = "hunter2";
    let record = encode_password_pbkdf2(HashAlgorithm::Sha256, password, 16, 100, 32).unwrap();

    for at in 0..password.len() {
        let altered = flip_one_char(password, at);
        assert_ne!(altered, password);
        assert_eq!(
            verify_password_pbkdf2(HashAlgorithm::Sha256, &altered, &record),
            Ok(false),
            "{altered}"
        );
    }
}

#[test]
fn fixed_salt_scenario() {
    for kdf in [Algorithm::Pbkdf1, Algorithm::Pbkdf2] {
        let k1 = kdf
            .derive(HashAlgorithm::Sha1, b"hunter2", &SALT, 1000, 20)
            .unwrap();
        let k2 = kdf
            .derive(HashAlgorithm::Sha1, b"hunter2", &SALT, 1000, 20)
            .unwrap();
        assert_eq!(k1.len(), 20);
        assert_eq!(*k1, *k2);

        let k3 = kdf
            .derive(HashAlgorithm::Sha1, b"hunter2", &SALT, 1001, 20)
            .unwrap();
        assert_ne!(*k1, *k3);
    }
}

#[test]
fn output_length_always_matches_request() {
    for key_len in [1, 19, 20, 21, 40, 45, 64, 100] {
        let key = Pbkdf2
            .derive(HashAlgorithm::Sha1, b"pw", &SALT, 3, key_len)
            .unwrap();
        assert_eq!(key.len(), key_len);
    }
    for key_len in 0..=32 {
        let key = Pbkdf1
            .derive(HashAlgorithm::Sha256, b"pw", &SALT, 3, key_len)
            .unwrap();
        assert_eq!(key.len(), key_len);
    }
}

#[test]
fn pbkdf1_length_boundary() {
    assert!(Pbkdf1.derive(HashAlgorithm::Sha1, b"pw", &SALT, 2, 20).is_ok());
    assert!(matches!(
        Pbkdf1.derive(HashAlgorithm::Sha1, b"pw", &SALT, 2, 21),
        Err(PbkdfError::KeyTooLong { .. })
    ));
}

#[test]
fn pbkdf2_full_and_partial_last_block() {
    let k40 = Pbkdf2
        .derive(HashAlgorithm::Sha1, b"pw", &SALT, 10, 40)
        .unwrap();
    let k45 = Pbkdf2
        .derive(HashAlgorithm::Sha1, b"pw", &SALT, 10, 45)
        .unwrap();

    assert_eq!(k40.len(), 40);
    assert_eq!(k45.len(), 45);
    assert_eq!(&k45[..40], &k40[..]);
}

#[test]
fn record_text_roundtrip() {
    let text = serialize_record(&SALT, 1000, &[1, 2, 3]);
    let record = parse_record(&text).unwrap();

    assert_eq!(record, CredentialRecord::new(SALT.to_vec(), 1000, vec![1, 2, 3]));
    assert_eq!(record.to_string(), text);
}

#[test]
fn record_parse_rejections() {
    for bad in [
        "AAAA:10",
        "AAAA:10:AAAA:AAAA",
        "A*AA:10:AAAA",
        "AAAA:10:A*AA",
        "AAAA:ten:AAAA",
    ] {
        assert!(
            matches!(parse_record(bad), Err(PbkdfError::Format(_))),
            "{bad}"
        );
    }
}

#[test]
fn concurrent_derivations_are_independent() {
    let expected = Arc::new(
        Pbkdf2
            .derive(HashAlgorithm::Sha256, b"shared", &SALT, 200, 50)
            .unwrap(),
    );

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let expected = Arc::clone(&expected);
            thread::spawn(move || {
                // interleave with unrelated derivations
                let other = Pbkdf2
                    .derive(HashAlgorithm::Sha256, format!("pw{i}").as_bytes(), &SALT, 50, 33)
                    .unwrap();
                assert_eq!(other.len(), 33);

                let key = Pbkdf2
                    .derive(HashAlgorithm::Sha256, b"shared", &SALT, 200, 50)
                    .unwrap();
                assert_eq!(*key, **expected);
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}

#[test]
fn encoder_shared_between_threads() {
    let params = Params::new(Algorithm::Pbkdf2, HashAlgorithm::Sha1, 16, 100, 32).unwrap();
    let encoder = PasswordEncoder::new(params).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let encoder = encoder.clone();
            thread::spawn(move || {
                let password = format!("user-{i}");
                let record = encoder.encode(&password).unwrap();
                assert!(encoder.verify(&password, &record).unwrap());
                record
            })
        })
        .collect();

    let records: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for (i, record) in records.iter().enumerate() {
        assert!(encoder.verify(&format!("user-{i}"), record).unwrap());
        assert!(!encoder.verify(&format!("user-{}", i + 1), record).unwrap());
    }
}

#[test]
fn encoder_from_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pbkeys.json");
    std::fs::write(
        &path,
        r#"{"algorithm":"pbkdf1","hash":"sha256","salt_len":8,"iterations":64,"key_len":32}"#,
    )
    .unwrap();

    let encoder = PasswordEncoder::new(Params::load(&path).unwrap()).unwrap();
    let record = encoder.encode("s3cret").unwrap();

    assert!(verify_password_pbkdf1(HashAlgorithm::Sha256, "s3cret", &record).unwrap());
    assert_eq!(parse_record(&record).unwrap().salt().len(), 8);
}
