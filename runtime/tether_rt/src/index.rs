//! Indexed access for strings, lists and dictionaries.
//!
//! Lists and strings take numeric indices (floats truncate toward zero) and
//! report `IndexOutOfRange` for misses. Dictionaries convert the key to
//! their key type when possible; a key that does not convert is still looked
//! up as-is on read, but rejected on write.

use crate::capability::Indexable;
use crate::errors::{index_out_of_range, key_not_found, non_numeric_index, ErrorValue};
use crate::factory::wrap;
use crate::invoke::{coerce, convert};
use crate::raw::Raw;
use crate::value::{HostList, HostMap, MapKey, StrValue, Value};

/// Dictionary key for `raw`, converted to the key type of `map`.
pub(crate) fn dict_key(map: &HostMap, raw: &Raw) -> Option<MapKey> {
    convert(raw, map.key_type()).and_then(|converted| MapKey::from_raw(&converted.raw))
}

/// Numeric index, truncated. Errors pass through unchanged.
fn numeric_index(index: &Value) -> Result<i64, Value> {
    if index.is_error() {
        return Err(index.clone());
    }
    index
        .as_numeric()
        .map(|n| n.to_i64())
        .ok_or_else(|| Value::Error(non_numeric_index(&index.type_name())))
}

/// `index` as a position within `len`.
fn position(index: i64, len: usize) -> Result<usize, ErrorValue> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or_else(|| index_out_of_range(index, len))
}

impl Indexable for HostList {
    fn get_at(&self, index: &Value) -> Value {
        let index = match numeric_index(index) {
            Ok(index) => index,
            Err(err) => return err,
        };
        match position(index, self.len()) {
            Ok(i) => self.get(i).map_or(Value::NULL, wrap),
            Err(err) => Value::Error(err),
        }
    }

    fn set_at(&self, index: &Value, value: &Value) -> bool {
        if value.is_error() {
            return false;
        }
        let Ok(index) = numeric_index(index) else {
            return false;
        };
        let Ok(i) = position(index, self.len()) else {
            return false;
        };
        match coerce(value, self.elem_type()) {
            Some(item) => self.set(i, item),
            None => {
                tracing::debug!(
                    value = %value.type_name(),
                    elem = %self.elem_type(),
                    "list element does not convert"
                );
                false
            }
        }
    }
}

impl Indexable for HostMap {
    fn get_at(&self, key: &Value) -> Value {
        if key.is_error() {
            return key.clone();
        }
        let raw = key.raw();
        let lookup = dict_key(self, &raw).or_else(|| MapKey::from_raw(&raw));
        lookup
            .and_then(|k| self.get(&k))
            .map_or_else(|| Value::Error(key_not_found(&key.format())), wrap)
    }

    fn set_at(&self, key: &Value, value: &Value) -> bool {
        if key.is_error() || value.is_error() {
            return false;
        }
        let Some(key) = dict_key(self, &key.raw()) else {
            return false;
        };
        let Some(item) = coerce(value, self.value_type()) else {
            return false;
        };
        self.insert(key, item);
        true
    }
}

/// Strings are read-only; indexing yields a one-character string.
impl Indexable for StrValue {
    fn get_at(&self, index: &Value) -> Value {
        let index = match numeric_index(index) {
            Ok(index) => index,
            Err(err) => return err,
        };
        match position(index, self.char_len()) {
            Ok(i) => self.char_at(i).map_or(Value::NULL, |c| Value::string(c.to_string())),
            Err(err) => Value::Error(err),
        }
    }

    fn set_at(&self, _index: &Value, _value: &Value) -> bool {
        false
    }
}
