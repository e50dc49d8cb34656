//! Core types for the user record store.

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// RecordId: caller-supplied identifier of a record
pub type RecordId = String;

/// A stored user.
///
/// Decoding is lenient: keys match field names regardless of case, absent
/// or null fields keep their zero value, and unknown keys are ignored. When
/// a field appears more than once the last value wins. Field order is fixed
/// for encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: RecordId,
    pub email: String,
    pub age: i64,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, email: impl Into<String>, age: i64) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            age,
        }
    }
}

enum Field {
    Id,
    Email,
    Age,
}

impl Field {
    fn from_key(key: &str) -> Option<Self> {
        if key.eq_ignore_ascii_case("id") {
            Some(Field::Id)
        } else if key.eq_ignore_ascii_case("email") {
            Some(Field::Email)
        } else if key.eq_ignore_ascii_case("age") {
            Some(Field::Age)
        } else {
            None
        }
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a user record object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Record, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut record = Record::default();
        while let Some(key) = map.next_key::<String>()? {
            match Field::from_key(&key) {
                Some(Field::Id) => {
                    if let Some(id) = map.next_value::<Option<String>>()? {
                        record.id = id;
                    }
                }
                Some(Field::Email) => {
                    if let Some(email) = map.next_value::<Option<String>>()? {
                        record.email = email;
                    }
                }
                Some(Field::Age) => {
                    if let Some(age) = map.next_value::<Option<i64>>()? {
                        record.age = age;
                    }
                }
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}
