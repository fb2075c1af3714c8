//! Property tests: encoded lengths always equal the analytic sizes, and
//! decoding the encoded bytes recovers the same fields.

use proptest::prelude::*;

use sirius_protocol::crypto::PublicKey;
use sirius_protocol::model::{Address, Mosaic, NetworkType, UInt64};
use sirius_protocol::transaction::{
    AccountPropertyTransaction, Message, PropertyModification, PropertyType,
    RegisterNamespaceTransaction, Recipient, SecretHashType, SecretProofTransaction,
    TransactionBuilder, TransferTransaction, VerifiableTransaction,
};

const NETWORK: NetworkType = NetworkType::MijinTest;

fn recipient() -> Address {
    Address::from_public_key(&PublicKey::from_bytes([0x33; 32]), NETWORK)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn transfer_size_is_analytic(
        amounts in prop::collection::vec(any::<u64>(), 0..8),
        text in "[a-z ]{0,64}",
    ) {
        let mosaics: Vec<Mosaic> = amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| Mosaic::new(UInt64::from_u64(i as u64 + 1), UInt64::from_u64(*amount)))
            .collect();
        let tx = TransactionBuilder::new(NETWORK).build(
            TransferTransaction::new(Recipient::Address(recipient()))
                .mosaics(mosaics)
                .message(Message::plain(&text)),
        );
        let bytes = tx.build_transaction().unwrap().into_bytes();
        prop_assert_eq!(bytes.len(), 149 + 16 * amounts.len() + text.len());
        prop_assert_eq!(tx.embedded_size(), bytes.len() - 80);

        let reparsed = VerifiableTransaction::from_payload(bytes).unwrap();
        let table = reparsed.decode().unwrap();
        prop_assert_eq!(table.u8("numMosaics").unwrap() as usize, amounts.len());
    }

    #[test]
    fn namespace_size_tracks_name(name in "[a-z0-9_-]{1,64}") {
        let tx = TransactionBuilder::new(NETWORK)
            .build(RegisterNamespaceTransaction::root(&name, UInt64::from_u64(100)));
        let verifiable = tx.build_transaction().unwrap();
        prop_assert_eq!(verifiable.bytes().len(), 138 + name.len());
        let table = verifiable.decode().unwrap();
        prop_assert_eq!(table.bytes("name").unwrap(), name.as_bytes());
    }

    #[test]
    fn secret_proof_size_tracks_proof(proof in prop::collection::vec(any::<u8>(), 0..256)) {
        let body = SecretProofTransaction::from_proof(SecretHashType::Sha3_256, recipient(), proof.clone());
        let tx = TransactionBuilder::new(NETWORK).build(body);
        prop_assert_eq!(tx.build_transaction().unwrap().bytes().len(), 180 + proof.len());
    }

    #[test]
    fn mosaic_property_size_is_linear(ids in prop::collection::vec(any::<u64>(), 0..32)) {
        let modifications = ids
            .iter()
            .map(|id| PropertyModification::add(UInt64::from_u64(*id)))
            .collect();
        let tx = TransactionBuilder::new(NETWORK)
            .build(AccountPropertyTransaction::mosaic(PropertyType::AllowMosaic, modifications));
        prop_assert_eq!(tx.build_transaction().unwrap().bytes().len(), 122 + 9 * ids.len());
    }
}
