use std::fmt;
use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::Value;
use tracing::{debug, error};
use crate::domain::error::AutomationError;

/// Collects every string found under a property named `key` (any case), at any depth.
///
/// The document is walked while it is read, so repeated property names inside one
/// object all count.
pub fn extract_keys(json: &str) -> Result<Vec<String>, AutomationError> {
    let mut keys = Vec::new();
    let mut deserializer = serde_json::Deserializer::from_str(json);

    KeyWalker { keys: &mut keys, under_key: false }
        .deserialize(&mut deserializer)
        .and_then(|_| deserializer.end())
        .map_err(|e| {
            error!("Failed to parse box listing JSON: {}", e);
            AutomationError::Parse(e.to_string())
        })?;

    debug!("Extracted {} keys from JSON document", keys.len());
    Ok(keys)
}

struct KeyWalker<'a> {
    keys: &'a mut Vec<String>,
    // Set when the value being read sits directly under a `key` property.
    under_key: bool,
}

impl<'de, 'a> DeserializeSeed<'de> for KeyWalker<'a> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de, 'a> Visitor<'de> for KeyWalker<'a> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<(), E> {
        if self.under_key {
            self.keys.push(v.to_string());
        }
        Ok(())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<(), E> {
        if self.under_key {
            self.keys.push(v);
        }
        Ok(())
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<(), E> {
        Ok(())
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<(), E> {
        Ok(())
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<(), E> {
        Ok(())
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<(), E> {
        Ok(())
    }

    fn visit_unit<E: de::Error>(self) -> Result<(), E> {
        Ok(())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<(), A::Error> {
        while seq
            .next_element_seed(KeyWalker { keys: &mut *self.keys, under_key: false })?
            .is_some()
        {}
        Ok(())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<(), A::Error> {
        while let Some(name) = map.next_key::<String>()? {
            let under_key = name.eq_ignore_ascii_case("key");
            map.next_value_seed(KeyWalker { keys: &mut *self.keys, under_key })?;
        }
        Ok(())
    }
}

/// Top-level string `value` of a field document, or empty for anything else.
pub fn extract_value(json: &str) -> String {
    let document: Value = match serde_json::from_str(json) {
        Ok(document) => document,
        Err(e) => {
            debug!("Field document is not valid JSON: {}", e);
            return String::new();
        }
    };

    match document.get("value") {
        Some(Value::String(s)) => {
            debug!("Url: {}", s);
            s.clone()
        }
        _ => String::new(),
    }
}
