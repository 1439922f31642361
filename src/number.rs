use cast::i64;
use derive_more::{DebugCustom, Display};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt::Formatter, str::FromStr};

pub(crate) type PrimitiveReal = f64;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, DebugCustom, Display)]
#[debug(fmt = "{}", _0)]
#[display(fmt = "{}", _0)]
pub struct Number(OrderedFloat<PrimitiveReal>);

impl Number {
    pub fn as_f64(self) -> f64 {
        self.0 .0
    }

    /// Integral value if this number has no fractional part and fits in `i64`.
    pub fn as_i64(self) -> Option<i64> {
        #[allow(clippy::float_cmp)]
        if self.0 .0.trunc() == self.0 .0 {
            i64(self.0 .0).ok()
        } else {
            None
        }
    }
}

impl FromStr for Number {
    type Err = <PrimitiveReal as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrimitiveReal::from_str(s).map(|n| Number(OrderedFloat(n)))
    }
}

impl<T> From<T> for Number
where
    PrimitiveReal: cast::From<T, Output = PrimitiveReal>,
{
    fn from(v: T) -> Self {
        use cast::From;
        Self(OrderedFloat(PrimitiveReal::cast(v)))
    }
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.as_i64() {
            Some(v) => serializer.serialize_i64(v),
            None => serializer.serialize_f64(self.0 .0),
        }
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct V;
        impl<'de> serde::de::Visitor<'de> for V {
            type Value = Number;

            fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
                write!(formatter, "number")
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(v.into())
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(v.into())
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(v.into())
            }
        }
        deserializer.deserialize_any(V)
    }
}
