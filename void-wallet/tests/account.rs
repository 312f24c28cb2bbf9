//! Tests for the account operations

use std::sync::Arc;

use void_wallet::crypto::entropy::EntropySource;
use void_wallet::crypto::keys::{encode_wif, ChecksumPolicy, PrivateKey, WIF_VERSION};
use void_wallet::crypto::keystore::{seal, unseal, KdfParams};
use void_wallet::{AccountConfig, AccountService, CredentialKind, Error, ErrorKind};

struct UnavailableSource;

impl EntropySource for UnavailableSource {
    fn fill_bytes(&self, _dest: &mut [u8]) -> void_wallet::Result<()> {
        Err(Error::Entropy("no random device".to_string()))
    }
}

fn wif_with_bad_checksum(key: &PrivateKey) -> String {
    let mut payload = vec![WIF_VERSION];
    payload.extend_from_slice(key.as_bytes());
    payload.extend_from_slice(&[0u8; 4]);
    bs58::encode(payload).into_string()
}

#[test]
fn test_generate_then_import_every_way() {
    let service = AccountService::default();
    let account = service.generate().unwrap();

    let by_phrase = service.import_mnemonic(account.mnemonic()).unwrap();
    let by_hex = service.import_private_key(&account.private_key().to_hex()).unwrap();
    let by_wif = service.import_private_key(account.wif()).unwrap();

    for imported in [&by_phrase, &by_hex, &by_wif] {
        assert_eq!(imported.public_key(), account.public_key());
        assert_eq!(imported.address(), account.address());
        imported.verify(service.curve()).unwrap();
    }
}

#[test]
fn test_entropy_failure_propagates() {
    let service = AccountService::with_entropy(AccountConfig::default(), Arc::new(UnavailableSource));
    let err = service.generate().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Entropy);
}

#[test]
fn test_checksum_policy_controls_wif_import() {
    let key = PrivateKey::from_hex(&"3d".repeat(32)).unwrap();
    let wif = wif_with_bad_checksum(&key);

    let strict = AccountService::new(AccountConfig { wif_checksum: ChecksumPolicy::Verify });
    let lenient = AccountService::new(AccountConfig { wif_checksum: ChecksumPolicy::Skip });

    assert_eq!(strict.import_private_key(&wif).unwrap_err().kind(), ErrorKind::InvalidPrivateKey);
    assert_eq!(lenient.import_private_key(&wif).unwrap().wif(), encode_wif(&key));
}

#[test]
fn test_hex_key_is_never_read_as_wif() {
    // Hex with no '0' digit is also valid Base58
    let hex_key = "ab".repeat(32);
    assert!(bs58::decode(&hex_key).into_vec().unwrap().len() >= 37);

    for policy in [ChecksumPolicy::Verify, ChecksumPolicy::Skip] {
        let service = AccountService::new(AccountConfig { wif_checksum: policy });
        let account = service.import_private_key(&hex_key).unwrap();
        assert_eq!(account.private_key().to_hex(), hex_key, "{:?}", policy);
    }
}

#[test]
fn test_validate_credential_does_not_need_the_key_back() {
    let service = AccountService::default();
    let account = service.generate().unwrap();

    let info = service.validate_credential(CredentialKind::Mnemonic, account.mnemonic()).unwrap();
    assert_eq!(&info.address, account.address());

    let err = service.validate_credential(CredentialKind::Mnemonic, "abandon abandon").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidMnemonic);
}

#[test]
fn test_sealed_key_reopens_to_same_account() {
    let service = AccountService::default();
    let account = service.generate().unwrap();
    let params = KdfParams { m_cost_kib: 64, t_cost: 1, p_cost: 1 };

    let sealed = seal(account.private_key(), "hunter2", &params).unwrap();
    let reopened = unseal(&sealed, "hunter2").unwrap();
    let restored = service.derive_account(reopened).unwrap();

    assert_eq!(restored.address(), account.address());
    assert_eq!(unseal(&sealed, "hunter3").unwrap_err().kind(), ErrorKind::WrongPassword);
}

#[test]
fn test_service_is_shareable_across_threads() {
    let service = Arc::new(AccountService::default());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let service = service.clone();
            std::thread::spawn(move || service.generate().map(|a| a.address().to_string()))
        })
        .collect();

    let mut addresses: Vec<String> = handles.into_iter().map(|h| h.join().unwrap().unwrap()).collect();
    addresses.sort();
    addresses.dedup();
    assert_eq!(addresses.len(), 4);
}
