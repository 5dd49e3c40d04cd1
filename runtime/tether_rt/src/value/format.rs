//! Preview formatting for console display.
//!
//! Collections are truncated: a list shows its first `list_preview`
//! elements, a dictionary its first `dict_preview` entries, each followed by
//! `...` and a `(N total)` suffix when elements were omitted. Nested
//! collections deeper than `max_depth` collapse to `[...]` / `{...}`, which
//! also bounds output for self-referencing host data.

use crate::config::FormatOptions;
use crate::factory::wrap;

use super::Value;

impl Value {
    /// Preview text with the default limits.
    pub fn format(&self) -> String {
        self.format_with(&FormatOptions::default())
    }

    pub fn format_with(&self, options: &FormatOptions) -> String {
        let mut out = String::new();
        write_value(&mut out, self, options, 0);
        out
    }
}

fn write_value(out: &mut String, value: &Value, options: &FormatOptions, depth: usize) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Void => out.push_str("void"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) if n.is_integer() => out.push_str(&n.as_i64().to_string()),
        Value::Number(n) => out.push_str(&format!("{:?}", n.as_f64())),
        Value::Str(s) => out.push_str(&format!("{:?}", s.as_str())),
        Value::List(list) => {
            if depth >= options.max_depth {
                out.push_str("[...]");
                return;
            }
            let len = list.len();
            let shown = len.min(options.list_preview);
            out.push('[');
            for i in 0..shown {
                if i > 0 {
                    out.push_str(", ");
                }
                if let Some(item) = list.get(i) {
                    write_value(out, &wrap(item), options, depth + 1);
                }
            }
            write_elision(out, shown, len, ']');
        }
        Value::Dict(map) => {
            if depth >= options.max_depth {
                out.push_str("{...}");
                return;
            }
            let entries = map.snapshot();
            let shown = entries.len().min(options.dict_preview);
            out.push('{');
            for (i, (key, item)) in entries.into_iter().take(shown).enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&key.to_string());
                out.push_str(": ");
                write_value(out, &wrap(item), options, depth + 1);
            }
            write_elision(out, shown, map.len(), '}');
        }
        Value::Object(obj) => match obj.display_text() {
            Some(text) => out.push_str(&text),
            None => {
                out.push('<');
                out.push_str(obj.type_info().name());
                out.push('>');
            }
        },
        Value::Type(ty) => out.push_str(&format!("<type {}>", ty.name())),
        Value::Method(group) => match group.overloads() {
            [only] => out.push_str(&format!("<method {}.{}>", group.owner().name(), only.describe())),
            all => out.push_str(&format!(
                "<method {} ({} overloads)>",
                group.qualified_name(),
                all.len()
            )),
        },
        Value::Native(func) => out.push_str(&format!("<native {}>", func.signature().describe())),
        Value::Error(err) => out.push_str(&err.to_string()),
    }
}

/// Close a collection, marking omitted elements.
fn write_elision(out: &mut String, shown: usize, total: usize, close: char) {
    if shown < total {
        if shown > 0 {
            out.push_str(", ");
        }
        out.push_str("...");
    }
    out.push(close);
    if shown < total {
        out.push_str(&format!(" ({total} total)"));
    }
}
