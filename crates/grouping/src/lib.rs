//! Partition a sequence of records into groups keyed by a caller-chosen value.
//!
//! Groups are returned in a [`BTreeMap`], so iterating the result visits keys in
//! ascending order. Items inside a group keep their input order.

use std::{cmp::Ordering, collections::BTreeMap, fmt};

use serde_json::{Map, Value};

/// Grouping result that borrows the input items.
pub type Grouped<'a, K, T> = BTreeMap<K, Vec<&'a T>>;

/// Groups `items` by the key returned from `key`.
///
/// Every item lands in exactly one group and no item is cloned.
pub fn group_by<'a, T, K, F>(items: &'a [T], mut key: F) -> Grouped<'a, K, T>
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    let mut groups: Grouped<'a, K, T> = BTreeMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(item);
    }
    groups
}

/// Groups `items` by the value of the named field.
///
/// Items that do not carry the field are grouped under `None`, which sorts
/// ahead of every present value.
pub fn group_by_field<'a, T>(items: &'a [T], field: &str) -> Grouped<'a, Option<T::Value>, T>
where
    T: FieldAccess,
{
    group_by(items, |item| item.field(field))
}

/// Like [`group_by`], but the key selector may fail.
///
/// The first error is returned as-is and no partial grouping is produced.
/// Items after the failing one are not visited.
pub fn try_group_by<'a, T, K, E, F>(items: &'a [T], mut key: F) -> Result<Grouped<'a, K, T>, E>
where
    K: Ord,
    F: FnMut(&T) -> Result<K, E>,
{
    let mut groups: Grouped<'a, K, T> = BTreeMap::new();
    for item in items {
        groups.entry(key(item)?).or_default().push(item);
    }
    Ok(groups)
}

/// Owning variant of [`group_by`] for callers that are done with the input.
pub fn group_into<I, K, F>(items: I, mut key: F) -> BTreeMap<K, Vec<I::Item>>
where
    I: IntoIterator,
    K: Ord,
    F: FnMut(&I::Item) -> K,
{
    let mut groups: BTreeMap<K, Vec<I::Item>> = BTreeMap::new();
    for item in items {
        groups.entry(key(&item)).or_default().push(item);
    }
    groups
}

/// Adds [`group_into`] as a method on every iterator.
pub trait GroupByExt: Iterator + Sized {
    fn group_by_key<K, F>(self, key: F) -> BTreeMap<K, Vec<Self::Item>>
    where
        K: Ord,
        F: FnMut(&Self::Item) -> K,
    {
        group_into(self, key)
    }
}

impl<I: Iterator> GroupByExt for I {}

/// Read access to named fields of a loosely structured record.
pub trait FieldAccess {
    type Value: Ord;

    /// Returns `None` when the record has no field called `name`.
    fn field(&self, name: &str) -> Option<Self::Value>;
}

impl FieldAccess for Map<String, Value> {
    type Value = FieldValue;

    fn field(&self, name: &str) -> Option<FieldValue> {
        self.get(name).map(FieldValue::from)
    }
}

impl FieldAccess for Value {
    type Value = FieldValue;

    fn field(&self, name: &str) -> Option<FieldValue> {
        self.as_object().and_then(|object| object.field(name))
    }
}

/// Totally ordered projection of a JSON value, usable as a grouping key.
///
/// Variants order as declared: `Null < Bool < Number < String < Array < Object`.
/// Arrays and objects are keyed by their serialized text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(String),
    Object(String),
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::Number(Number::from(n)),
            Value::String(s) => Self::String(s.clone()),
            Value::Array(_) => Self::Array(value.to_string()),
            Value::Object(_) => Self::Object(value.to_string()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) | Self::Array(s) | Self::Object(s) => f.write_str(s),
        }
    }
}

/// JSON number usable as a key.
///
/// Integers are kept exact, so distinct integers beyond 2^53 stay distinct.
/// An integer and a float compare by exact numeric value, which makes `1` and
/// `1.0` the same key. Two floats compare with `f64::total_cmp`.
#[derive(Debug, Clone, Copy)]
pub struct Number(Repr);

#[derive(Debug, Clone, Copy)]
enum Repr {
    Int(i128),
    Float(f64),
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self(Repr::Int(i128::from(value)))
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Self(Repr::Int(i128::from(value)))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        // -0.0 and 0.0 must be one key, both equal the integer 0
        Self(Repr::Float(if value == 0.0 { 0.0 } else { value }))
    }
}

impl From<&serde_json::Number> for Number {
    fn from(value: &serde_json::Number) -> Self {
        if let Some(n) = value.as_i64() {
            Self::from(n)
        } else if let Some(n) = value.as_u64() {
            Self::from(n)
        } else {
            Self::from(value.as_f64().unwrap_or(f64::NAN))
        }
    }
}

/// Exact comparison of an integer against a float.
fn cmp_int_float(int: i128, float: f64) -> Ordering {
    const LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0; // 2^127

    if float.is_nan() {
        return if float.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if float >= LIMIT {
        return Ordering::Less;
    }
    if float < -LIMIT {
        return Ordering::Greater;
    }

    let whole = float.trunc();
    match int.cmp(&(whole as i128)) {
        Ordering::Equal => 0.0_f64.total_cmp(&(float - whole)),
        unequal => unequal,
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0, other.0) {
            (Repr::Int(a), Repr::Int(b)) => a.cmp(&b),
            (Repr::Float(a), Repr::Float(b)) => a.total_cmp(&b),
            (Repr::Int(a), Repr::Float(b)) => cmp_int_float(a, b),
            (Repr::Float(a), Repr::Int(b)) => cmp_int_float(b, a).reverse(),
        }
    }
}

impl std::hash::Hash for Number {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self.0 {
            Repr::Int(n) => n.hash(state),
            Repr::Float(f) if f.fract() == 0.0 && f.abs() < 1e38 => (f as i128).hash(state),
            Repr::Float(f) => f.to_bits().hash(state),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::Int(n) => write!(f, "{n}"),
            Repr::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e15 => {
                write!(f, "{}", x as i64)
            }
            Repr::Float(x) => write!(f, "{x}"),
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
