//! Deserializes [`InputValue`]s from self-describing formats such as JSON.
//!
//! Objects, arrays, and strings map directly onto their GraphQL
//! counterparts. Numbers and booleans keep their literal text so that later
//! coercion can still tell `123` apart from `"123"`. `null` maps to
//! [`InputValueKind::Null`]. Deserialized values carry no meaningful
//! position and report [`Pos::default()`].

use crate::ast::InputValue;
use crate::ast::InputValueKind;
use crate::ast::Name;
use crate::ast::ObjectField;
use crate::ast::ScalarKind;
use crate::Pos;
use serde::Deserialize;
use serde::Deserializer;
use serde::de::MapAccess;
use serde::de::SeqAccess;
use serde::de::Visitor;

impl<'de> Deserialize<'de> for InputValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(InputValueVisitor)
    }
}

struct InputValueVisitor;

impl InputValueVisitor {
    fn scalar(kind: ScalarKind, text: String) -> InputValue {
        InputValue::scalar(kind, text, Pos::default())
    }
}

impl<'de> Visitor<'de> for InputValueVisitor {
    type Value = InputValue;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a GraphQL input value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<InputValue, E> {
        Ok(Self::scalar(ScalarKind::Boolean, v.to_string()))
    }

    fn visit_i64<E>(self, v: i64) -> Result<InputValue, E> {
        Ok(Self::scalar(ScalarKind::Int, v.to_string()))
    }

    fn visit_u64<E>(self, v: u64) -> Result<InputValue, E> {
        Ok(Self::scalar(ScalarKind::Int, v.to_string()))
    }

    fn visit_f64<E>(self, v: f64) -> Result<InputValue, E> {
        // `{:?}` keeps a fractional part (`1.0`), so the text still reads as
        // a float literal.
        Ok(Self::scalar(ScalarKind::Float, format!("{v:?}")))
    }

    fn visit_str<E>(self, v: &str) -> Result<InputValue, E> {
        Ok(Self::scalar(ScalarKind::String, v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<InputValue, E> {
        Ok(Self::scalar(ScalarKind::String, v))
    }

    fn visit_unit<E>(self) -> Result<InputValue, E> {
        Ok(InputValue::null(Pos::default()))
    }

    fn visit_none<E>(self) -> Result<InputValue, E> {
        Ok(InputValue::null(Pos::default()))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<InputValue, D::Error> {
        InputValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<InputValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<InputValue>()? {
            items.push(item);
        }
        Ok(InputValue::new(InputValueKind::List(items), Pos::default()))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<InputValue, A::Error> {
        let mut fields = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, InputValue>()? {
            fields.push(ObjectField {
                name: Name::new(key, Pos::default()),
                value,
            });
        }
        Ok(InputValue::new(InputValueKind::Object(fields), Pos::default()))
    }
}
