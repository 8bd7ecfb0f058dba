//! Raw values as held by a store, and the conversion between
//! them and the typed values a `TypedPreference` hands out.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::TryFrom;

/// A value as it sits in a preference store.
///
/// Stores know nothing about the static type a caller expects; they only keep
/// one of these shapes under each key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawValue {
    /// signed integer
    Integer(i64),
    /// floating point number
    #[serde(with = "float_bits")]
    Float(f64),
    /// utf-8 string
    String(String),
    /// boolean flag
    Boolean(bool),
    /// opaque bytes
    Bytes(Vec<u8>),
    /// ordered list of values
    Array(Vec<RawValue>),
    /// string keyed map of values
    Dictionary(BTreeMap<String, RawValue>),
}

impl RawValue {
    /// short name of the variant, used in logs and error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Integer(_) => "integer",
            RawValue::Float(_) => "float",
            RawValue::String(_) => "string",
            RawValue::Boolean(_) => "boolean",
            RawValue::Bytes(_) => "bytes",
            RawValue::Array(_) => "array",
            RawValue::Dictionary(_) => "dictionary",
        }
    }
}

// json has no infinities or NaN, so floats travel as their bit pattern
mod float_bits {
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.to_bits())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        u64::deserialize(deserializer).map(f64::from_bits)
    }
}

/// Types that can live in a preference slot.
///
/// `from_raw` only succeeds when the stored variant matches the representation
/// of `Self`; there is no coercion across variants.
pub trait PrefValue: Sized {
    /// convert into the stored representation
    fn into_raw(self) -> RawValue;

    /// reinterpret a stored value, `None` if it has the wrong shape
    fn from_raw(raw: &RawValue) -> Option<Self>;
}

impl PrefValue for RawValue {
    fn into_raw(self) -> RawValue {
        self
    }

    fn from_raw(raw: &RawValue) -> Option<Self> {
        Some(raw.clone())
    }
}

impl PrefValue for i64 {
    fn into_raw(self) -> RawValue {
        RawValue::Integer(self)
    }

    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl PrefValue for i32 {
    fn into_raw(self) -> RawValue {
        RawValue::Integer(i64::from(self))
    }

    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Integer(i) => i32::try_from(*i).ok(),
            _ => None,
        }
    }
}

impl PrefValue for u32 {
    fn into_raw(self) -> RawValue {
        RawValue::Integer(i64::from(self))
    }

    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Integer(i) => u32::try_from(*i).ok(),
            _ => None,
        }
    }
}

impl PrefValue for f64 {
    fn into_raw(self) -> RawValue {
        RawValue::Float(self)
    }

    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl PrefValue for f32 {
    fn into_raw(self) -> RawValue {
        RawValue::Float(f64::from(self))
    }

    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Float(f) => Some(*f as f32),
            _ => None,
        }
    }
}

impl PrefValue for bool {
    fn into_raw(self) -> RawValue {
        RawValue::Boolean(self)
    }

    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl PrefValue for String {
    fn into_raw(self) -> RawValue {
        RawValue::String(self)
    }

    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl PrefValue for Vec<u8> {
    fn into_raw(self) -> RawValue {
        RawValue::Bytes(self)
    }

    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Bytes(b) => Some(b.clone()),
            _ => None,
        }
    }
}

impl PrefValue for Vec<String> {
    fn into_raw(self) -> RawValue {
        RawValue::Array(self.into_iter().map(RawValue::String).collect())
    }

    // every element has to be a string, otherwise the whole array is rejected
    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Array(items) => items.iter().map(String::from_raw).collect(),
            _ => None,
        }
    }
}

impl PrefValue for BTreeMap<String, String> {
    fn into_raw(self) -> RawValue {
        RawValue::Dictionary(
            self.into_iter()
                .map(|(k, v)| (k, RawValue::String(v)))
                .collect(),
        )
    }

    fn from_raw(raw: &RawValue) -> Option<Self> {
        match raw {
            RawValue::Dictionary(entries) => entries
                .iter()
                .map(|(k, v)| String::from_raw(v).map(|v| (k.clone(), v)))
                .collect(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_variant_is_reinterpreted() {
        assert_eq!(i64::from_raw(&RawValue::Integer(42)), Some(42));
        assert_eq!(bool::from_raw(&RawValue::Boolean(true)), Some(true));
        assert_eq!(
            String::from_raw(&RawValue::String("dark".to_owned())),
            Some("dark".to_owned())
        );
        assert_eq!(
            Vec::<u8>::from_raw(&RawValue::Bytes(vec![1, 2, 3])),
            Some(vec![1, 2, 3])
        );
    }

    #[test]
    fn no_coercion_across_variants() {
        assert_eq!(f64::from_raw(&RawValue::Integer(1)), None);
        assert_eq!(i64::from_raw(&RawValue::Float(1.0)), None);
        assert_eq!(i64::from_raw(&RawValue::String("1".to_owned())), None);
        assert_eq!(bool::from_raw(&RawValue::Integer(1)), None);
        assert_eq!(String::from_raw(&RawValue::Bytes(b"abc".to_vec())), None);
    }

    #[test]
    fn narrow_integers_reject_out_of_range() {
        assert_eq!(i32::from_raw(&RawValue::Integer(-7)), Some(-7));
        assert_eq!(i32::from_raw(&RawValue::Integer(i64::MAX)), None);
        assert_eq!(u32::from_raw(&RawValue::Integer(-1)), None);
        assert_eq!(u32::from_raw(&RawValue::Integer(7)), Some(7));
    }

    #[test]
    fn string_array_requires_every_element_to_be_a_string() {
        let mixed = RawValue::Array(vec![
            RawValue::String("a".to_owned()),
            RawValue::Integer(1),
        ]);
        assert_eq!(Vec::<String>::from_raw(&mixed), None);

        let strings = vec!["a".to_owned(), "b".to_owned()].into_raw();
        assert_eq!(
            Vec::<String>::from_raw(&strings),
            Some(vec!["a".to_owned(), "b".to_owned()])
        );
    }

    #[test]
    fn string_dictionary_rejects_nested_values() {
        let mut entries = BTreeMap::new();
        entries.insert("lang".to_owned(), RawValue::String("en".to_owned()));
        entries.insert("size".to_owned(), RawValue::Integer(12));
        let raw = RawValue::Dictionary(entries);
        assert_eq!(BTreeMap::<String, String>::from_raw(&raw), None);
    }

    #[test]
    fn raw_value_is_read_as_is() {
        let raw = RawValue::Float(0.5);
        assert_eq!(RawValue::from_raw(&raw), Some(raw.clone()));
    }

    #[test]
    fn non_finite_floats_survive_json() {
        for f in &[f64::INFINITY, f64::NEG_INFINITY, -0.0, 1.5e300] {
            let json = serde_json::to_vec(&RawValue::Float(*f)).unwrap();
            let back: RawValue = serde_json::from_slice(&json).unwrap();
            assert_eq!(f64::from_raw(&back).map(f64::to_bits), Some(f.to_bits()));
        }

        let json = serde_json::to_vec(&RawValue::Array(vec![RawValue::Float(f64::NAN)])).unwrap();
        let back: RawValue = serde_json::from_slice(&json).unwrap();
        match back {
            RawValue::Array(items) => assert!(f64::from_raw(&items[0]).unwrap().is_nan()),
            other => panic!("unexpected value {:?}", other),
        }
    }

    #[test]
    fn type_names() {
        assert_eq!(RawValue::Integer(0).type_name(), "integer");
        assert_eq!(RawValue::Dictionary(BTreeMap::new()).type_name(), "dictionary");
    }
}
