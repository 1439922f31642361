use crate::Number;
use itertools::Itertools;
use serde::{
    de::{Error, MapAccess, SeqAccess, Visitor},
    ser::{SerializeMap, SerializeSeq},
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::{borrow::Borrow, fmt::Formatter, rc::Rc};

pub type PVector<T> = imbl::Vector<T>;
pub type PHashMap<K, V> = imbl::HashMap<K, V>;

pub type Array = PVector<Value>;
pub type Object = PHashMap<Rc<String>, Value>;

/// A JSON value whose arrays and objects share structure on clone.
///
/// Cloning never copies the contents, and mutating a clone leaves every other
/// clone untouched, so a clone is already a deep snapshot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    Null,
    True,
    False,
    Number(Number),
    String(Rc<String>),
    Array(Array),
    Object(Object),
}

impl Value {
    pub fn number(n: impl Into<Number>) -> Self {
        Self::Number(n.into())
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self::String(Rc::new(s.into()))
    }

    pub fn object() -> Self {
        Self::Object(Object::new())
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up `key` if this is an object.
    ///
    /// Keys are `Rc<String>`, which only borrows as `String`, so each lookup
    /// allocates the key once.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object()?.get(&key.to_string())
    }

    /// Set `key` on an object. Returns `false` and leaves `self` alone otherwise.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> bool {
        match self.as_object_mut() {
            Some(map) => {
                map.insert(Rc::new(key.into()), value);
                true
            }
            None => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::True | Value::False => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        if v {
            Value::True
        } else {
            Value::False
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Value::Array(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Value::Object(v)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Object(
            iter.into_iter()
                .map(|(k, v)| (Rc::new(k.into()), v))
                .collect(),
        )
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::True => serializer.serialize_bool(true),
            Value::False => serializer.serialize_bool(false),
            Value::Number(v) => v.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(v) => {
                let mut seq = serializer.serialize_seq(Some(v.len()))?;
                for e in v {
                    seq.serialize_element::<Value>(e.borrow())?;
                }
                seq.end()
            }
            Value::Object(values) => {
                // Hash order is not stable across runs, keep the output stable instead.
                let mut map = serializer.serialize_map(Some(values.len()))?;
                for (k, v) in values.iter().sorted_by(|(a, _), (b, _)| a.cmp(b)) {
                    map.serialize_entry::<String, Value>(k.borrow(), v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = Value;

            fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
                write!(
                    formatter,
                    "null, boolean, number, string, array, or map keyed with string"
                )
            }

            fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(v.into())
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Value::number(v))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Value::number(v))
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Value::number(v))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Value::string(v))
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Value::string(v))
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Value::Null)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: Error,
            {
                Ok(Value::Null)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut v = Array::new();
                while let Some(elem) = seq.next_element::<Value>()? {
                    v.push_back(elem);
                }
                Ok(Value::Array(v))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut m = Object::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    m.insert(Rc::new(key), value);
                }
                Ok(Value::Object(m))
            }
        }
        deserializer.deserialize_any(V)
    }
}
