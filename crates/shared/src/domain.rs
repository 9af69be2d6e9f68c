use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(OrderId);

/// Status tag attached to an order by the server.
///
/// The set is open-ended: unknown tags are kept verbatim in [`OrderStatus::Other`]
/// so they round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "PENDING" => Self::Pending,
            "CONFIRMED" => Self::Confirmed,
            "SHIPPED" => Self::Shipped,
            "DELIVERED" => Self::Delivered,
            "CANCELLED" => Self::Cancelled,
            _ => Self::Other(value),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(value: OrderStatus) -> Self {
        match value {
            OrderStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monetary amount carried by an order.
///
/// Amounts that fit a [`Decimal`] are held exactly. Larger ones keep the
/// float the server sent, so a single oversized price never fails a decode.
#[derive(Debug, Clone, Copy)]
pub enum Price {
    Exact(Decimal),
    Float(f64),
}

impl Price {
    pub const ZERO: Self = Self::Exact(Decimal::ZERO);

    /// Parses numeric text, including scientific notation. `None` when the
    /// text is not a finite number.
    pub fn parse(raw: &str) -> Option<Self> {
        Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .map(Self::Exact)
            .ok()
            .or_else(|| {
                raw.parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .map(Self::Float)
            })
    }

    fn from_f64(value: f64) -> Self {
        Decimal::from_str(&value.to_string())
            .map(Self::Exact)
            .unwrap_or(Self::Float(value))
    }
}

impl From<Decimal> for Price {
    fn from(value: Decimal) -> Self {
        Self::Exact(value)
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Exact(a), Self::Exact(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Price {}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(value) => fmt::Display::fmt(value, f),
            Self::Float(value) => fmt::Display::fmt(value, f),
        }
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Exact(value) => rust_decimal::serde::float::serialize(value, serializer),
            Self::Float(value) => serializer.serialize_f64(*value),
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}

struct PriceVisitor;

impl Visitor<'_> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or numeric string")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Price, E> {
        Ok(Price::Exact(Decimal::from(value)))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Price, E> {
        Ok(Price::Exact(Decimal::from(value)))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Price, E> {
        Ok(Price::from_f64(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Price, E> {
        Price::parse(value.trim())
            .ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub item: String,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
