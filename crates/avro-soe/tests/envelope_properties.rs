use avro_soe::{
    avro_generated, schema_of, DynamicCodec, ErrorKind, Fingerprint, MemoryRegistry, TypedCodec,
    HEADER_LEN, MAGIC,
};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Test {
    #[serde(rename = "someString")]
    some_string: String,
    #[serde(rename = "someInt")]
    some_int: i32,
}

avro_generated!(
    Test,
    r#"{"name":"a.b.test","type":"record","fields":[{"name":"someString","type":"string"},{"name":"someInt","type":"int"}]}"#
);

proptest! {
    #[test]
    fn prop_roundtrip(some_string in any::<String>(), some_int in any::<i32>()) {
        let codec = TypedCodec::<Test>::new().unwrap();
        let value = Test { some_string, some_int };
        let data = codec.marshal(&value).unwrap();

        prop_assert_eq!(&data[..2], &MAGIC[..]);
        let fingerprint = codec.fingerprint();
        prop_assert_eq!(&data[2..HEADER_LEN], &fingerprint.as_bytes()[..]);
        prop_assert_eq!(codec.unmarshal(&data).unwrap(), value.clone());
        prop_assert_eq!(codec.unmarshal_strict(&data).unwrap(), value);
    }

    #[test]
    fn prop_short_input_rejected(data in proptest::collection::vec(any::<u8>(), 0..HEADER_LEN)) {
        let codec = TypedCodec::<Test>::new().unwrap();
        prop_assert_eq!(codec.unmarshal(&data).unwrap_err().kind(), ErrorKind::TooShort);
        prop_assert_eq!(codec.unmarshal_strict(&data).unwrap_err().kind(), ErrorKind::TooShort);

        let dynamic = DynamicCodec::new(MemoryRegistry::new());
        prop_assert_eq!(dynamic.unmarshal_value(&data).unwrap_err().kind(), ErrorKind::TooShort);
    }

    #[test]
    fn prop_bad_magic_rejected(
        magic in any::<[u8; 2]>(),
        some_int in any::<i32>(),
    ) {
        prop_assume!(magic != MAGIC);
        let codec = TypedCodec::<Test>::new().unwrap();
        let mut data = codec
            .marshal(&Test { some_string: "x".into(), some_int })
            .unwrap();
        data[..2].copy_from_slice(&magic);

        prop_assert_eq!(codec.unmarshal(&data).unwrap_err().kind(), ErrorKind::BadMagic);
        prop_assert_eq!(codec.unmarshal_strict(&data).unwrap_err().kind(), ErrorKind::BadMagic);

        let mut registry = MemoryRegistry::new();
        registry.register(schema_of::<Test>().clone()).unwrap();
        let dynamic = DynamicCodec::new(registry);
        prop_assert_eq!(dynamic.unmarshal_value(&data).unwrap_err().kind(), ErrorKind::BadMagic);
    }

    #[test]
    fn prop_foreign_fingerprint_rejected_in_strict_mode(fingerprint in any::<[u8; 8]>()) {
        let codec = TypedCodec::<Test>::new().unwrap();
        prop_assume!(Fingerprint::from_bytes(fingerprint) != codec.fingerprint());

        let mut data = codec
            .marshal(&Test { some_string: "x".into(), some_int: 1 })
            .unwrap();
        data[2..HEADER_LEN].copy_from_slice(&fingerprint);

        prop_assert_eq!(
            codec.unmarshal_strict(&data).unwrap_err().kind(),
            ErrorKind::SchemaMismatch
        );
        prop_assert!(codec.unmarshal(&data).is_ok());
    }

    #[test]
    fn prop_truncated_payload_rejected(
        some_string in any::<String>(),
        some_int in any::<i32>(),
        cut in any::<proptest::sample::Index>(),
    ) {
        let codec = TypedCodec::<Test>::new().unwrap();
        let data = codec.marshal(&Test { some_string, some_int }).unwrap();
        let end = HEADER_LEN + cut.index(data.len() - HEADER_LEN);

        prop_assert_eq!(codec.unmarshal(&data[..end]).unwrap_err().kind(), ErrorKind::Serializer);
        prop_assert_eq!(
            codec.unmarshal_strict(&data[..end]).unwrap_err().kind(),
            ErrorKind::Serializer
        );
    }

    #[test]
    fn prop_registry_key_matches_wire_bytes(key in any::<u64>()) {
        let fingerprint = Fingerprint::from_u64(key);
        prop_assert_eq!(fingerprint.as_bytes(), &key.to_le_bytes());
        prop_assert_eq!(fingerprint.to_u64(), key);
    }
}
