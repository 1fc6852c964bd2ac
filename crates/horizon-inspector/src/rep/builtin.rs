//! Built-in reps.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use super::{Rep, RepMode, RepOutput};
use crate::model::{Grip, ObjectGrip};

const TINY_STRING_LIMIT: usize = 50;

fn object_of_kind<'a>(grip: &'a Grip, kind: &str) -> Option<&'a ObjectGrip> {
    grip.as_object().filter(|object| object.kind == kind)
}

/// `undefined`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UndefinedRep;

impl Rep for UndefinedRep {
    fn name(&self) -> &'static str {
        "undefined"
    }

    fn supports(&self, grip: &Grip) -> bool {
        object_of_kind(grip, "undefined").is_some()
    }

    fn render(&self, _grip: &Grip, _mode: RepMode) -> RepOutput {
        RepOutput::new("objectBox-undefined", "undefined")
    }
}

/// `null`, as a grip or a bare JSON null.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRep;

impl Rep for NullRep {
    fn name(&self) -> &'static str {
        "null"
    }

    fn supports(&self, grip: &Grip) -> bool {
        grip.kind() == "null"
    }

    fn render(&self, _grip: &Grip, _mode: RepMode) -> RepOutput {
        RepOutput::new("objectBox-null", "null")
    }
}

/// Quoted strings, cropped outside [`RepMode::Long`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StringRep;

impl Rep for StringRep {
    fn name(&self) -> &'static str {
        "string"
    }

    fn supports(&self, grip: &Grip) -> bool {
        matches!(grip, Grip::Primitive(Value::String(_)))
    }

    fn render(&self, grip: &Grip, mode: RepMode) -> RepOutput {
        let Grip::Primitive(Value::String(text)) = grip else {
            return RepOutput::new("objectBox-string", "");
        };
        let shown = if mode != RepMode::Long && text.chars().count() > TINY_STRING_LIMIT {
            let cropped: String = text.chars().take(TINY_STRING_LIMIT).collect();
            format!("{}\u{2026}", cropped)
        } else {
            text.clone()
        };
        // JSON string encoding gives us quoting and escapes.
        RepOutput::new("objectBox-string", Value::String(shown).to_string())
    }
}

/// Numbers, including the special values the protocol sends as grips.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberRep;

impl NumberRep {
    const SPECIAL: [&'static str; 4] = ["NaN", "Infinity", "-Infinity", "-0"];
}

impl Rep for NumberRep {
    fn name(&self) -> &'static str {
        "number"
    }

    fn supports(&self, grip: &Grip) -> bool {
        match grip {
            Grip::Primitive(Value::Number(_)) => true,
            Grip::Object(object) => Self::SPECIAL.contains(&object.kind.as_str()),
            Grip::Primitive(_) => false,
        }
    }

    fn render(&self, grip: &Grip, _mode: RepMode) -> RepOutput {
        let text = match grip {
            Grip::Primitive(value) => value.to_string(),
            Grip::Object(object) => object.kind.clone(),
        };
        RepOutput::new("objectBox-number", text)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanRep;

impl Rep for BooleanRep {
    fn name(&self) -> &'static str {
        "boolean"
    }

    fn supports(&self, grip: &Grip) -> bool {
        matches!(grip, Grip::Primitive(Value::Bool(_)))
    }

    fn render(&self, grip: &Grip, _mode: RepMode) -> RepOutput {
        let text = match grip {
            Grip::Primitive(Value::Bool(true)) => "true",
            _ => "false",
        };
        RepOutput::new("objectBox-boolean", text)
    }
}

/// `Symbol(description)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolRep;

impl Rep for SymbolRep {
    fn name(&self) -> &'static str {
        "symbol"
    }

    fn supports(&self, grip: &Grip) -> bool {
        object_of_kind(grip, "symbol").is_some()
    }

    fn render(&self, grip: &Grip, _mode: RepMode) -> RepOutput {
        let name = grip
            .as_object()
            .and_then(|object| object.name.as_deref())
            .unwrap_or("");
        RepOutput::new("objectBox-symbol", format!("Symbol({})", name))
    }
}

/// `Date` objects, shown as their class and ISO-8601 timestamp.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeRep;

impl Rep for DateTimeRep {
    fn name(&self) -> &'static str {
        "date-time"
    }

    fn supports(&self, grip: &Grip) -> bool {
        grip.as_object()
            .is_some_and(|object| object.class.as_deref() == Some("Date") && object.preview.is_some())
    }

    fn render(&self, grip: &Grip, _mode: RepMode) -> RepOutput {
        let Some(object) = grip.as_object() else {
            return RepOutput::new("objectBox", "Invalid Date");
        };
        let timestamp = object
            .preview
            .as_ref()
            .and_then(|preview| preview.get("timestamp"))
            .and_then(Value::as_f64)
            .filter(|millis| millis.is_finite())
            .and_then(|millis| DateTime::<Utc>::from_timestamp_millis(millis as i64));

        match timestamp {
            Some(date) => RepOutput::new(
                "objectBox",
                format!(
                    "{} {}",
                    object.display_class_name(),
                    date.to_rfc3339_opts(SecondsFormat::Millis, true)
                ),
            ),
            None => RepOutput::new("objectBox", "Invalid Date"),
        }
    }
}

/// Fallback for any grip: the class name, plus a property preview in
/// [`RepMode::Short`] and [`RepMode::Long`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GripRep;

impl GripRep {
    fn max_props(mode: RepMode) -> usize {
        match mode {
            RepMode::Tiny => 0,
            RepMode::Short => 3,
            RepMode::Long => 10,
        }
    }

    /// One-word rendering used inside previews.
    fn brief(value: &Value) -> String {
        let grip = match value.get("value") {
            Some(inner) => Grip::from(inner.clone()),
            None => Grip::from(value.clone()),
        };
        match &grip {
            Grip::Primitive(primitive) => primitive.to_string(),
            Grip::Object(object) if object.kind == "object" => {
                object.display_class_name().to_string()
            }
            Grip::Object(object) => match object.kind.as_str() {
                "symbol" => format!("Symbol({})", object.name.as_deref().unwrap_or("")),
                kind => kind.to_string(),
            },
        }
    }

    fn render_object(object: &ObjectGrip, mode: RepMode) -> String {
        let class = object.display_class_name();
        let Some(preview) = object.preview.as_ref() else {
            return class.to_string();
        };

        if preview.get("kind").and_then(Value::as_str) == Some("ArrayLike") {
            let length = preview.get("length").and_then(Value::as_u64).unwrap_or(0);
            if mode == RepMode::Tiny {
                return format!("{}[{}]", class, length);
            }
            let items: Vec<String> = preview
                .get("items")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .take(Self::max_props(mode))
                        .map(Self::brief)
                        .collect()
                })
                .unwrap_or_default();
            let more = (length as usize) > items.len();
            return format!(
                "{} [ {}{} ]",
                class,
                items.join(", "),
                if more { ", \u{2026}" } else { "" }
            );
        }

        if mode == RepMode::Tiny {
            return class.to_string();
        }

        let Some(own) = preview.get("ownProperties").and_then(Value::as_object) else {
            return class.to_string();
        };
        let total = preview
            .get("ownPropertiesLength")
            .and_then(Value::as_u64)
            .map(|length| length as usize)
            .unwrap_or(own.len());
        let shown: Vec<String> = own
            .iter()
            .take(Self::max_props(mode))
            .map(|(name, descriptor)| format!("{}: {}", name, Self::brief(descriptor)))
            .collect();
        let more = total > shown.len();
        format!(
            "{} {{ {}{} }}",
            class,
            shown.join(", "),
            if more { ", \u{2026}" } else { "" }
        )
    }
}

impl Rep for GripRep {
    fn name(&self) -> &'static str {
        "grip"
    }

    fn supports(&self, _grip: &Grip) -> bool {
        true
    }

    fn render(&self, grip: &Grip, mode: RepMode) -> RepOutput {
        match grip {
            Grip::Object(object) if object.kind == "object" => {
                RepOutput::new("objectBox-object", Self::render_object(object, mode))
            }
            Grip::Object(object) => RepOutput::new("objectBox", object.kind.clone()),
            Grip::Primitive(value) => RepOutput::new("objectBox", value.to_string()),
        }
    }
}
