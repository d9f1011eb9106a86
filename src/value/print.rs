//! Printed representation of values.
//!
//! The rendering is JSON shaped: sequences of every kind (vectors, lists,
//! sets and lazy sequences) print as arrays, maps and records print as
//! objects. Printing a lazy sequence realizes it, so an infinite sequence
//! must be bounded with `take` first.

use std::fmt::{self, Write};

use super::Value;

/// Renders every value and concatenates the results.
///
/// # Examples
///
/// ```rust
/// use polycoll::{Value, pr_str, record, vector};
///
/// let rendered = pr_str(&[vector![1, "two"], record! { "a" => Value::Nil }]);
/// assert_eq!(rendered, r#"[1,"two"]{"a":null}"#);
/// ```
pub fn pr_str(values: &[Value]) -> String {
    let mut output = String::new();
    for value in values {
        // Writing into a String cannot fail.
        let _ = write!(output, "{value}");
    }
    output
}

pub(super) fn write_value(formatter: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Nil => formatter.write_str("null"),
        Value::Bool(flag) => write!(formatter, "{flag}"),
        Value::Int(number) => write!(formatter, "{number}"),
        Value::Float(number) if number.is_finite() => write!(formatter, "{number}"),
        Value::Float(_) => formatter.write_str("null"),
        Value::Str(text) => write_quoted(formatter, text),
        Value::Vector(elements) => write_array(formatter, elements.iter()),
        Value::List(elements) => write_array(formatter, elements.iter()),
        Value::Set(elements) => write_array(formatter, elements.iter()),
        Value::Seq(sequence) => write_array(formatter, sequence.iter().collect::<Vec<_>>().iter()),
        Value::Map(entries) => {
            formatter.write_char('{')?;
            for (index, (key, element)) in entries.iter().enumerate() {
                if index > 0 {
                    formatter.write_char(',')?;
                }
                match key {
                    Value::Str(text) => write_quoted(formatter, text)?,
                    other => write_quoted(formatter, &other.to_string())?,
                }
                formatter.write_char(':')?;
                write_value(formatter, element)?;
            }
            formatter.write_char('}')
        }
        Value::Record(entries) => {
            formatter.write_char('{')?;
            for (index, (key, element)) in entries.iter().enumerate() {
                if index > 0 {
                    formatter.write_char(',')?;
                }
                write_quoted(formatter, key)?;
                formatter.write_char(':')?;
                write_value(formatter, element)?;
            }
            formatter.write_char('}')
        }
        Value::Reduced(inner) => {
            formatter.write_str("{\"value\":")?;
            write_value(formatter, inner)?;
            formatter.write_char('}')
        }
    }
}

fn write_array<'a>(
    formatter: &mut fmt::Formatter<'_>,
    elements: impl Iterator<Item = &'a Value>,
) -> fmt::Result {
    formatter.write_char('[')?;
    for (index, element) in elements.enumerate() {
        if index > 0 {
            formatter.write_char(',')?;
        }
        write_value(formatter, element)?;
    }
    formatter.write_char(']')
}

fn write_quoted(formatter: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    formatter.write_char('"')?;
    for character in text.chars() {
        match character {
            '"' => formatter.write_str("\\\"")?,
            '\\' => formatter.write_str("\\\\")?,
            '\n' => formatter.write_str("\\n")?,
            '\r' => formatter.write_str("\\r")?,
            '\t' => formatter.write_str("\\t")?,
            control if control.is_control() => write!(formatter, "\\u{:04x}", control as u32)?,
            other => formatter.write_char(other)?,
        }
    }
    formatter.write_char('"')
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::{SerializeMap, SerializeSeq};

        fn serialize_elements<'a, S: serde::Serializer>(
            serializer: S,
            length: Option<usize>,
            elements: impl Iterator<Item = &'a Value>,
        ) -> Result<S::Ok, S::Error> {
            let mut sequence = serializer.serialize_seq(length)?;
            for element in elements {
                sequence.serialize_element(element)?;
            }
            sequence.end()
        }

        match self {
            Self::Nil => serializer.serialize_unit(),
            Self::Bool(flag) => serializer.serialize_bool(*flag),
            Self::Int(number) => serializer.serialize_i64(*number),
            Self::Float(number) => serializer.serialize_f64(*number),
            Self::Str(text) => serializer.serialize_str(text),
            Self::Vector(elements) => {
                serialize_elements(serializer, Some(elements.len()), elements.iter())
            }
            Self::List(elements) => {
                serialize_elements(serializer, Some(elements.len()), elements.iter())
            }
            Self::Set(elements) => {
                serialize_elements(serializer, Some(elements.len()), elements.iter())
            }
            Self::Seq(sequence) => {
                let elements: Vec<Self> = sequence.iter().collect();
                serialize_elements(serializer, Some(elements.len()), elements.iter())
            }
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, element) in entries {
                    match key {
                        Self::Str(text) => map.serialize_entry(&**text, element)?,
                        other => map.serialize_entry(&other.to_string(), element)?,
                    }
                }
                map.end()
            }
            Self::Record(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, element) in entries {
                    map.serialize_entry(&**key, element)?;
                }
                map.end()
            }
            Self::Reduced(inner) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("value", inner)?;
                map.end()
            }
        }
    }
}
