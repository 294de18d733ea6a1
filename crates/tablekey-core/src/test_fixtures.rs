use crate::{
    model::{FieldKind, FieldModel, TableModel},
    value::{Record, Timestamp, Value},
};

pub(crate) const PERSON_TABLE_ID: u32 = 7;
pub(crate) const ORDER_TABLE_ID: u32 = 9;

/// `person(id)`: single-field primary key plus scalar and list columns.
pub(crate) fn person_table() -> TableModel {
    TableModel::try_new(
        "person",
        vec![
            FieldModel::new("id", FieldKind::Uint64),
            FieldModel::new("age", FieldKind::Int32),
            FieldModel::new("name", FieldKind::Text),
            FieldModel::new("email", FieldKind::Text),
            FieldModel::new("active", FieldKind::Bool),
            FieldModel::new("tags", FieldKind::List(Box::new(FieldKind::Text))),
        ],
        &["id"],
    )
    .expect("person fixture table is valid")
}

/// `order(region, number)`: composite primary key.
pub(crate) fn order_table() -> TableModel {
    TableModel::try_new(
        "order",
        vec![
            FieldModel::new("region", FieldKind::Text),
            FieldModel::new("number", FieldKind::Uint64),
            FieldModel::new("customer", FieldKind::Text),
            FieldModel::new("placed", FieldKind::Timestamp),
            FieldModel::new("status", FieldKind::Enum),
            FieldModel::new("total", FieldKind::Int64),
            FieldModel::new("receipt", FieldKind::Blob),
        ],
        &["region", "number"],
    )
    .expect("order fixture table is valid")
}

pub(crate) fn person(id: u64, age: i32, name: &str) -> Record {
    Record::new()
        .with("id", id)
        .with("age", age)
        .with("name", name)
        .with("email", format!("{name}@example.com"))
        .with("active", true)
}

pub(crate) fn order(region: &str, number: u64, customer: &str, status: i32) -> Record {
    Record::new()
        .with("region", region)
        .with("number", number)
        .with("customer", customer)
        .with("placed", Timestamp::from_seconds(1_700_000_000))
        .with("status", Value::Enum(status))
        .with("total", -250i64)
        .with("receipt", vec![0u8, 1, 0])
}
