use crate::{
    config::CodecConfig,
    error::{CodecError, ErrorClass},
    index::{
        Entry, IndexCodec, IndexKeyCodec, IndexKeyEntry, PrimaryKeyCodec, PrimaryKeyEntry,
        SENTINEL_VALUE, UniqueKeyCodec,
    },
    key::{FieldDecodeError, KeyPrefix},
    model::TableName,
    serialize::{SerializeError, deserialize_bounded},
    test_fixtures::{ORDER_TABLE_ID, PERSON_TABLE_ID, order, order_table, person, person_table},
    value::{Record, Value},
};
use proptest::prelude::*;
use std::num::NonZeroU16;

fn index_prefix(table_id: u32, index_id: u16) -> KeyPrefix {
    KeyPrefix::index(table_id, NonZeroU16::new(index_id).expect("non-zero index id"))
}

fn age_index() -> IndexKeyCodec {
    IndexKeyCodec::new(b"p/".to_vec(), &person_table(), &["age"]).expect("age index should build")
}

fn email_index() -> UniqueKeyCodec {
    UniqueKeyCodec::new(index_prefix(PERSON_TABLE_ID, 2), &person_table(), &["email"])
        .expect("email index should build")
}

fn person_rows() -> PrimaryKeyCodec {
    PrimaryKeyCodec::new(KeyPrefix::primary(PERSON_TABLE_ID), &person_table())
        .expect("person primary codec should build")
}

fn person_name() -> TableName {
    person_table().name()
}

// ----------------------------------------------------------------------
// IndexKeyCodec
// ----------------------------------------------------------------------

#[test]
fn index_key_for_age_then_id_has_exact_layout() {
    let codec = age_index();

    let (key, value) = codec
        .encode_kv_from_record(&person(7, 30, "ada"))
        .expect("record should encode");

    assert_eq!(
        key,
        vec![
            b'p', b'/', // prefix
            0x80, 0x00, 0x00, 0x1E, // age = 30
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x07, // id = 7
        ]
    );
    assert_eq!(value, SENTINEL_VALUE.to_vec());
    assert_eq!(codec.key_codec().field_names(), ["age", "id"]);
}

#[test]
fn index_key_decode_recovers_primary_key() {
    let codec = age_index();
    let (key, value) = codec
        .encode_kv_from_record(&person(7, 30, "ada"))
        .expect("record should encode");

    let entry = codec.decode_entry(&key, &value).expect("entry should decode");

    assert_eq!(
        entry,
        Entry::Index(IndexKeyEntry {
            table_name: person_name(),
            unique: false,
            fields: vec!["age".into(), "id".into()],
            index_values: vec![Value::Int32(30), Value::Uint64(7)],
            primary_key: Some(vec![Value::Uint64(7)]),
        })
    );
}

#[test]
fn index_key_prefix_probe_yields_no_primary_key() {
    let codec = age_index();
    let probe = codec
        .key_codec()
        .encode_prefix(&[Value::Int32(30)])
        .expect("probe should encode");
    assert_eq!(probe, vec![b'p', b'/', 0x80, 0x00, 0x00, 0x1E]);

    let (values, pk) = codec.decode_index_key(&probe).expect("probe is not an error");
    assert_eq!(values, vec![Value::Int32(30)]);
    assert_eq!(pk, None);

    let entry = codec.decode_entry(&probe, &[]).expect("probe entry");
    assert!(!entry.as_index().expect("index entry").is_complete());
}

#[test]
fn index_key_value_is_always_the_sentinel() {
    let codec = age_index();

    for row in [
        person(1, 30, "ada"),
        person(2, -5, "bob"),
        person(u64::MAX, i32::MIN, ""),
        Record::new(),
    ] {
        let (_, value) = codec.encode_kv_from_record(&row).expect("record should encode");
        assert_eq!(value, [0x00]);
    }

    let entry = Entry::Index(IndexKeyEntry {
        table_name: person_name(),
        unique: false,
        fields: vec!["age".into(), "id".into()],
        index_values: vec![Value::Int32(1), Value::Uint64(2)],
        primary_key: Some(vec![Value::Uint64(2)]),
    });
    let (_, value) = codec.encode_entry(&entry).expect("entry should encode");
    assert_eq!(value, [0x00]);
}

#[test]
fn index_key_encode_entry_round_trips_and_builds_probes() {
    let codec = age_index();
    let (key, value) = codec
        .encode_kv_from_record(&person(9, 41, "cy"))
        .expect("record should encode");
    let entry = codec.decode_entry(&key, &value).expect("entry should decode");

    let (encoded, _) = codec.encode_entry(&entry).expect("entry should encode");
    assert_eq!(encoded, key);

    let probe = Entry::Index(IndexKeyEntry {
        table_name: person_name(),
        unique: false,
        fields: vec!["age".into()],
        index_values: vec![Value::Int32(41)],
        primary_key: None,
    });
    let (probe_key, _) = codec.encode_entry(&probe).expect("probe should encode");
    assert!(key.starts_with(&probe_key));
    assert!(probe_key < key);
}

#[test]
fn index_key_rejects_foreign_entries() {
    let codec = age_index();

    let other_table = Entry::Index(IndexKeyEntry {
        table_name: order_table().name(),
        unique: false,
        fields: vec!["age".into(), "id".into()],
        index_values: vec![Value::Int32(1), Value::Uint64(2)],
        primary_key: None,
    });
    let err = codec
        .encode_entry(&other_table)
        .expect_err("entry for another table must fail");
    assert!(matches!(err, CodecError::BadDecodeEntry { table, .. } if table == person_name()));
    assert_eq!(err.class(), ErrorClass::InvariantViolation);

    let row = Entry::Primary(PrimaryKeyEntry {
        table_name: person_name(),
        key: vec![Value::Uint64(2)],
        record: Record::new(),
    });
    assert!(matches!(
        codec.encode_entry(&row),
        Err(CodecError::BadDecodeEntry { .. })
    ));

    let unique = Entry::Index(IndexKeyEntry {
        table_name: person_name(),
        unique: true,
        fields: vec!["age".into()],
        index_values: vec![Value::Int32(1)],
        primary_key: Some(vec![Value::Uint64(2)]),
    });
    assert!(matches!(
        codec.encode_entry(&unique),
        Err(CodecError::BadDecodeEntry { .. })
    ));
}

#[test]
fn index_key_requires_at_least_one_field() {
    let err = IndexKeyCodec::new(Vec::new(), &person_table(), &[] as &[&str])
        .expect_err("empty index must fail");
    assert!(matches!(err, CodecError::EmptyIndex { .. }));

    assert!(matches!(
        UniqueKeyCodec::new(Vec::new(), &person_table(), &[] as &[&str]),
        Err(CodecError::EmptyIndex { .. })
    ));
}

#[test]
fn index_key_construction_surfaces_field_errors() {
    let table = person_table();

    assert!(matches!(
        IndexKeyCodec::new(Vec::new(), &table, &["nickname"]),
        Err(CodecError::UnknownField { .. })
    ));
    assert!(matches!(
        IndexKeyCodec::new(Vec::new(), &table, &["age", "age"]),
        Err(CodecError::DuplicateField { .. })
    ));
    assert!(matches!(
        IndexKeyCodec::new(Vec::new(), &table, &["tags"]),
        Err(CodecError::UnsupportedKeyKind { .. })
    ));
}

#[test]
fn index_key_with_composite_overlap_recovers_primary_key_order() {
    let codec = IndexKeyCodec::new(index_prefix(ORDER_TABLE_ID, 1), &order_table(), &[
        "status", "region",
    ])
    .expect("status index should build");
    assert_eq!(codec.key_codec().field_names(), ["status", "region", "number"]);

    let (key, value) = codec
        .encode_kv_from_record(&order("eu", 12, "ada", 3))
        .expect("record should encode");
    let (values, pk) = codec
        .decode_index_key(&key)
        .expect("index key should decode");

    assert_eq!(
        values,
        vec![Value::Enum(3), Value::Text("eu".into()), Value::Uint64(12)]
    );
    assert_eq!(pk, Some(vec![Value::Text("eu".into()), Value::Uint64(12)]));
    assert_eq!(value, SENTINEL_VALUE.to_vec());
}

#[test]
fn index_key_prefix_holding_primary_key_fields_still_yields_no_primary_key() {
    let codec = IndexKeyCodec::new(index_prefix(ORDER_TABLE_ID, 1), &order_table(), &[
        "status", "region",
    ])
    .expect("status index should build");

    let prefix = [Value::Enum(3), Value::Text("eu".into())];
    let probe = codec
        .key_codec()
        .encode_prefix(&prefix)
        .expect("prefix should encode");
    let (values, pk) = codec.decode_index_key(&probe).expect("prefix is not an error");

    assert_eq!(values, prefix.to_vec());
    assert_eq!(pk, None);
}

#[test]
fn index_key_covering_primary_key_keeps_index_layout() {
    let codec = IndexKeyCodec::new(index_prefix(ORDER_TABLE_ID, 3), &order_table(), &[
        "number", "region",
    ])
    .expect("covering index should build");

    assert_eq!(codec.key_codec().field_names(), ["number", "region"]);
    assert!(codec.primary_key_map().tail_fields().is_empty());

    let (key, value) = codec
        .encode_kv_from_record(&order("us", 4, "bo", 0))
        .expect("record should encode");
    let (_, pk) = codec.decode_index_key(&key).expect("decode");

    assert_eq!(pk, Some(vec![Value::Text("us".into()), Value::Uint64(4)]));
    assert_eq!(value, SENTINEL_VALUE.to_vec());
}

#[test]
fn index_key_rejects_keys_from_other_indexes() {
    let codec = IndexKeyCodec::new(index_prefix(PERSON_TABLE_ID, 1), &person_table(), &["age"])
        .expect("age index should build");
    let (key, _) = email_index()
        .encode_kv_from_record(&person(1, 2, "ada"))
        .expect("record should encode");

    assert!(matches!(
        codec.decode_index_key(&key),
        Err(CodecError::BadPrefix { .. })
    ));
}

// ----------------------------------------------------------------------
// UniqueKeyCodec
// ----------------------------------------------------------------------

#[test]
fn unique_key_stores_primary_key_tail_as_value() {
    let codec = email_index();

    let (key, value) = codec
        .encode_kv_from_record(&person(7, 30, "ada"))
        .expect("record should encode");

    let mut expected_key = index_prefix(PERSON_TABLE_ID, 2).to_bytes().to_vec();
    expected_key.extend_from_slice(b"ada@example.com");
    expected_key.extend_from_slice(&[0x00, 0x00]);
    assert_eq!(key, expected_key);
    assert_eq!(value, 7u64.to_be_bytes().to_vec());

    let entry = codec.decode_entry(&key, &value).expect("entry should decode");
    assert_eq!(
        entry,
        Entry::Index(IndexKeyEntry {
            table_name: person_name(),
            unique: true,
            fields: vec!["email".into()],
            index_values: vec![Value::Text("ada@example.com".into())],
            primary_key: Some(vec![Value::Uint64(7)]),
        })
    );

    assert_eq!(codec.encode_entry(&entry).expect("encode"), (key, value));
}

#[test]
fn unique_key_prefix_only_key_has_no_primary_key() {
    let codec = email_index();
    let probe = index_prefix(PERSON_TABLE_ID, 2).to_bytes();

    let (values, pk) = codec
        .decode_index_key(&probe, &[])
        .expect("bare prefix is not an error");
    assert!(values.is_empty());
    assert_eq!(pk, None);
}

#[test]
fn unique_key_rejects_damaged_values() {
    let codec = email_index();
    let (key, value) = codec
        .encode_kv_from_record(&person(7, 30, "ada"))
        .expect("record should encode");

    match codec.decode_entry(&key, &value[..3]) {
        Err(CodecError::MalformedField { field, source }) => {
            assert_eq!(field, "id");
            assert!(matches!(source, FieldDecodeError::Truncated { .. }));
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let err = codec
        .decode_entry(&key, &[])
        .expect_err("missing tail must fail");
    assert!(matches!(
        err,
        CodecError::IncompleteKey {
            decoded: 0,
            expected: 1
        }
    ));
    assert_eq!(err.class(), ErrorClass::Corruption);
}

#[test]
fn unique_key_encode_entry_needs_primary_key() {
    let codec = email_index();

    let mut entry = IndexKeyEntry {
        table_name: person_name(),
        unique: true,
        fields: vec!["email".into()],
        index_values: vec![Value::Text("x@y".into())],
        primary_key: None,
    };
    assert!(matches!(
        codec.encode_entry(&Entry::Index(entry.clone())),
        Err(CodecError::BadDecodeEntry { .. })
    ));

    entry.unique = false;
    entry.primary_key = Some(vec![Value::Uint64(1)]);
    assert!(matches!(
        codec.encode_entry(&Entry::Index(entry)),
        Err(CodecError::BadDecodeEntry { .. })
    ));
}

#[test]
fn unique_key_rejects_primary_key_that_contradicts_index_values() {
    let codec = UniqueKeyCodec::new(index_prefix(ORDER_TABLE_ID, 6), &order_table(), &["region"])
        .expect("region index should build");

    let mut entry = IndexKeyEntry {
        table_name: order_table().name(),
        unique: true,
        fields: vec!["region".into()],
        index_values: vec![Value::Text("eu".into())],
        primary_key: Some(vec![Value::Text("us".into()), Value::Uint64(5)]),
    };
    let err = codec
        .encode_entry(&Entry::Index(entry.clone()))
        .expect_err("region must agree between key and primary key");
    assert!(matches!(err, CodecError::BadDecodeEntry { .. }));
    assert_eq!(err.class(), ErrorClass::InvariantViolation);

    entry.primary_key = Some(vec![Value::Text("eu".into()), Value::Uint64(5)]);
    let consistent = Entry::Index(entry);
    let (key, value) = codec.encode_entry(&consistent).expect("consistent entry encodes");
    assert_eq!(codec.decode_entry(&key, &value).expect("decode"), consistent);
}

#[test]
fn unique_key_covering_primary_key_has_empty_value() {
    let codec = UniqueKeyCodec::new(index_prefix(ORDER_TABLE_ID, 4), &order_table(), &[
        "number", "region",
    ])
    .expect("covering unique index should build");

    let (key, value) = codec
        .encode_kv_from_record(&order("eu", 8, "al", 1))
        .expect("record should encode");
    assert!(value.is_empty());

    let (_, pk) = codec.decode_index_key(&key, &value).expect("decode");
    assert_eq!(pk, Some(vec![Value::Text("eu".into()), Value::Uint64(8)]));
}

#[test]
fn unique_key_with_partial_overlap_splits_primary_key() {
    let codec = UniqueKeyCodec::new(index_prefix(ORDER_TABLE_ID, 5), &order_table(), &[
        "customer", "region",
    ])
    .expect("customer index should build");
    assert_eq!(codec.value_codec().field_names(), ["number"]);

    let (key, value) = codec
        .encode_kv_from_record(&order("apac", 31, "zed", 2))
        .expect("record should encode");
    let (values, pk) = codec.decode_index_key(&key, &value).expect("decode");

    assert_eq!(
        values,
        vec![Value::Text("zed".into()), Value::Text("apac".into())]
    );
    assert_eq!(pk, Some(vec![Value::Text("apac".into()), Value::Uint64(31)]));
}

// ----------------------------------------------------------------------
// PrimaryKeyCodec
// ----------------------------------------------------------------------

#[test]
fn primary_key_round_trips_whole_records() {
    let codec = person_rows();
    let row = person(7, 30, "ada");

    let (key, value) = codec.encode_kv_from_record(&row).expect("record should encode");
    let payload: Record = deserialize_bounded(&value, 1024).expect("payload is a record");
    assert!(!payload.contains("id"));
    assert_eq!(payload.len(), row.len() - 1);

    let entry = codec.decode_entry(&key, &value).expect("entry should decode");
    assert_eq!(
        entry,
        Entry::Primary(PrimaryKeyEntry {
            table_name: person_name(),
            key: vec![Value::Uint64(7)],
            record: row,
        })
    );

    assert_eq!(codec.encode_entry(&entry).expect("encode"), (key, value));
}

#[test]
fn primary_key_composite_keys_order_rows() {
    let codec = PrimaryKeyCodec::new(KeyPrefix::primary(ORDER_TABLE_ID), &order_table())
        .expect("order primary codec should build");

    let (a, _) = codec
        .encode_kv_from_record(&order("eu", 2, "x", 0))
        .expect("encode");
    let (b, _) = codec
        .encode_kv_from_record(&order("eu", 10, "x", 0))
        .expect("encode");
    let (c, _) = codec
        .encode_kv_from_record(&order("eu-west", 1, "x", 0))
        .expect("encode");

    assert!(a < b);
    assert!(b < c);
}

#[test]
fn primary_key_rejects_prefix_keys_and_bad_payloads() {
    let codec = person_rows();
    let (key, value) = codec
        .encode_kv_from_record(&person(3, 1, "eve"))
        .expect("record should encode");

    let prefix = KeyPrefix::primary(PERSON_TABLE_ID).to_bytes();
    assert!(matches!(
        codec.decode_entry(&prefix, &value),
        Err(CodecError::IncompleteKey {
            decoded: 0,
            expected: 1
        })
    ));

    let (values, pk) = codec
        .decode_index_key(&prefix, &[])
        .expect("probe is not an error");
    assert!(values.is_empty());
    assert_eq!(pk, None);

    let err = codec
        .decode_entry(&key, &[0xFF, 0x00])
        .expect_err("garbage payload must fail");
    assert!(matches!(err, CodecError::ValueDecode(_)));
    assert_eq!(err.class(), ErrorClass::Corruption);
}

#[test]
fn primary_key_bounds_row_payloads() {
    let config = CodecConfig::default().with_max_row_bytes(32);
    let codec =
        PrimaryKeyCodec::with_config(KeyPrefix::primary(PERSON_TABLE_ID), &person_table(), &config)
            .expect("person primary codec should build");

    let (key, value) = codec
        .encode_kv_from_record(&person(1, 2, "a-rather-long-name"))
        .expect("record should encode");
    assert!(value.len() > 32);

    match codec.decode_entry(&key, &value) {
        Err(CodecError::ValueDecode(SerializeError::DeserializeSizeLimitExceeded {
            max_bytes,
            ..
        })) => assert_eq!(max_bytes, 32),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn primary_key_rejects_index_entries() {
    let codec = person_rows();

    let entry = Entry::Index(IndexKeyEntry {
        table_name: person_name(),
        unique: false,
        fields: vec!["id".into()],
        index_values: vec![Value::Uint64(1)],
        primary_key: Some(vec![Value::Uint64(1)]),
    });
    assert!(matches!(
        codec.encode_entry(&entry),
        Err(CodecError::BadDecodeEntry { .. })
    ));

    let foreign = Entry::Primary(PrimaryKeyEntry {
        table_name: order_table().name(),
        key: vec![Value::Uint64(1)],
        record: Record::new(),
    });
    assert!(matches!(
        codec.encode_entry(&foreign),
        Err(CodecError::BadDecodeEntry { .. })
    ));
}

// ----------------------------------------------------------------------
// IndexCodec
// ----------------------------------------------------------------------

#[test]
fn index_codecs_share_one_dynamic_surface() {
    let table = person_table();
    let codecs: Vec<Box<dyn IndexCodec>> = vec![
        Box::new(person_rows()),
        Box::new(email_index()),
        Box::new(
            IndexKeyCodec::new(index_prefix(PERSON_TABLE_ID, 1), &table, &["name"])
                .expect("name index should build"),
        ),
    ];
    let row = person(11, 20, "kim");

    for codec in &codecs {
        let (key, value) = codec.encode_kv_from_record(&row).expect("encode");
        let entry = codec.decode_entry(&key, &value).expect("decode");

        assert_eq!(codec.table_name(), table.name());
        assert_eq!(entry.table_name(), table.name());
        assert!(key.starts_with(codec.key_codec().prefix()));
        assert_eq!(codec.encode_entry(&entry).expect("re-encode"), (key.clone(), value.clone()));

        let (_, pk) = codec.decode_index_key(&key, &value).expect("decode key");
        assert_eq!(pk, Some(vec![Value::Uint64(11)]));
    }
}

#[test]
fn entries_render_for_diagnostics() {
    let codec = age_index();
    let (key, value) = codec
        .encode_kv_from_record(&person(7, 30, "ada"))
        .expect("encode");
    let entry = codec.decode_entry(&key, &value).expect("decode");

    assert_eq!(entry.to_string(), "IDX person age/id : 30/7 -> 7");

    let row = Entry::Primary(PrimaryKeyEntry {
        table_name: person_name(),
        key: vec![Value::Uint64(7)],
        record: Record::new().with("id", 7u64).with("name", "ada"),
    });
    assert_eq!(row.to_string(), "PK person 7 -> {id: 7, name: \"ada\"}");
}

proptest! {
    #[test]
    fn index_key_order_follows_index_then_primary_key(
        a in (any::<i32>(), any::<u64>()),
        b in (any::<i32>(), any::<u64>()),
    ) {
        let codec = age_index();
        let (key_a, _) = codec
            .encode_kv_from_record(&person(a.1, a.0, "a"))
            .expect("encode a");
        let (key_b, _) = codec
            .encode_kv_from_record(&person(b.1, b.0, "b"))
            .expect("encode b");

        prop_assert_eq!(key_a.cmp(&key_b), a.cmp(&b));
    }

    #[test]
    fn index_key_recovers_primary_key_for_any_row(
        region in ".{0,6}",
        number in any::<u64>(),
        status in any::<i32>(),
    ) {
        let codec = IndexKeyCodec::new(index_prefix(ORDER_TABLE_ID, 1), &order_table(), &[
            "status", "number",
        ])
        .expect("index should build");

        let (key, value) = codec
            .encode_kv_from_record(&order(&region, number, "c", status))
            .expect("encode");
        let (_, pk) = codec.decode_index_key(&key).expect("decode");

        prop_assert_eq!(pk, Some(vec![Value::Text(region), Value::Uint64(number)]));
        prop_assert_eq!(value, SENTINEL_VALUE.to_vec());
    }
}
