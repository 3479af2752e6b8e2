//! Turns loosely typed json items into [Instruction](crate::Instruction)s
//!
//! Decoding is all or nothing: the first item that fails stops the process and the whole list is rejected.

use serde_json::{Map, Value};
use std::convert::TryFrom;
use crate::{
    DecodeError,
    command::{Font, BarcodeSystem}
};
use super::{Instruction, Justification, DitherMode, coerce};

/// Older payloads spelled some keys with underscores. They are read when the hyphenated key is absent.
const ALIASES: &[(&str, &str)] = &[
    ("font-size", "font_size"),
    ("barcode-type", "barcode_type"),
    ("dither-mode", "dither_mode")
];

/// Decodes every item of a receipt, in order.
///
/// ```rust
/// use escpos_receipt::{decode::decode_items, Instruction};
/// use serde_json::json;
///
/// let items = vec![json!({"type": "feed", "lines": 3})];
/// assert_eq!(vec![Instruction::feed(3)], decode_items(&items).unwrap());
///
/// let items = vec![json!({"type": "feed", "lines": 3}), json!({"type": "poem"})];
/// assert_eq!(Some(1), decode_items(&items).unwrap_err().index());
/// ```
pub fn decode_items(items: &[Value]) -> Result<Vec<Instruction>, DecodeError> {
    items.iter().enumerate().map(|(index, item)| decode_item(index, item)).collect()
}

/// Decodes the item found at position `index` of the receipt
pub fn decode_item(index: usize, item: &Value) -> Result<Instruction, DecodeError> {
    let object = item.as_object().ok_or_else(|| DecodeError::item(
        index, None, "type", format!("expected an object, found {}", coerce::type_name(item))
    ))?;
    let kind = match object.get("type") {
        Some(Value::String(kind)) => kind.as_str(),
        Some(other) => return Err(DecodeError::item(index, None, "type", format!("expected a string, found {}", coerce::type_name(other)))),
        None => return Err(DecodeError::item(index, None, "type", "missing"))
    };
    let item = Item {index, kind, object};

    match kind {
        "line" | "text" => {
            let content = item.string("content")?;
            let font_size = item.read("font-size", coerce::font_size)?;
            let font = item.named("font", Font::from_name, "A, B, C")?;
            let justification = item.named("alignment", Justification::from_name, "left, right, center")?;
            let underline = item.read("underline", coerce::underline)?;
            if kind == "line" {
                Ok(Instruction::Line{content, font_size, font, justification, underline})
            } else {
                Ok(Instruction::Text{content, font_size, font, justification, underline})
            }
        },
        "feed" => {
            let lines = item.read("lines", coerce::integer)?;
            let lines = u32::try_from(lines).map_err(|_| item.fail("lines", format!("{} is not a valid number of lines", lines)))?;
            Ok(Instruction::Feed{lines})
        },
        "barcode" => {
            // Barcodes carry no alignment, one sent along is ignored like any other extra field
            let code = item.string("code")?;
            let system = item.named("barcode-type", BarcodeSystem::from_name, "UPCA, UPCE, EAN13, EAN8, CODE39, CODE128")?;
            Ok(Instruction::Barcode{code, system})
        },
        "qr" => {
            let code = item.string("code")?;
            let size = item.read("size", coerce::integer)?;
            Ok(Instruction::QrCode{code, size})
        },
        "image" => {
            let data = item.string("data")?;
            let justification = item.named("alignment", Justification::from_name, "left, right, center")?;
            let dither = item.named("dither-mode", DitherMode::from_name, "none, floydsteinberg")?;
            Ok(Instruction::Image{data, justification, dither})
        },
        other => Err(item.fail("type", format!("unknown receipt item type {:?}", other)))
    }
}

/// Single receipt item being decoded
struct Item<'a> {
    index: usize,
    kind: &'a str,
    object: &'a Map<String, Value>
}

impl<'a> Item<'a> {
    fn fail<A: Into<String>>(&self, field: &str, reason: A) -> DecodeError {
        DecodeError::item(self.index, Some(self.kind), field, reason)
    }

    fn field(&self, name: &str) -> Result<&'a Value, DecodeError> {
        if let Some(value) = self.object.get(name) {
            return Ok(value);
        }
        ALIASES.iter()
            .find(|(canonical, _)| *canonical == name)
            .and_then(|(_, alias)| self.object.get(*alias))
            .ok_or_else(|| self.fail(name, "missing"))
    }

    fn read<T, F: Fn(&Value) -> Result<T, String>>(&self, name: &str, coerce: F) -> Result<T, DecodeError> {
        coerce(self.field(name)?).map_err(|reason| self.fail(name, reason))
    }

    fn string(&self, name: &str) -> Result<String, DecodeError> {
        self.read(name, |value| coerce::string(value).map(String::from))
    }

    fn named<T, F: Fn(&str) -> Option<T>>(&self, name: &str, parse: F, expected: &str) -> Result<T, DecodeError> {
        let value = self.read(name, |value| coerce::string(value).map(String::from))?;
        parse(&value).ok_or_else(|| self.fail(name, format!("{:?} is not one of {}", value, expected)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn line(font_size: Value, underline: Value) -> Value {
        json!({
            "type": "line",
            "content": "Hello, World!",
            "font-size": font_size,
            "font": "A",
            "alignment": "center",
            "underline": underline
        })
    }

    #[test]
    fn test_font_size_string_and_number_agree() {
        assert_eq!(
            decode_item(0, &line(json!(3), json!(false))).unwrap(),
            decode_item(0, &line(json!("3"), json!(false))).unwrap()
        );
    }

    #[test]
    fn test_underline_quirk() {
        match decode_item(0, &line(json!(1), json!("true"))).unwrap() {
            Instruction::Line{underline, ..} => assert!(underline),
            other => panic!("unexpected {:?}", other)
        }
        match decode_item(0, &line(json!(1), json!("banana"))).unwrap() {
            Instruction::Line{underline, ..} => assert!(!underline),
            other => panic!("unexpected {:?}", other)
        }
    }

    #[test]
    fn test_bad_font_size_is_an_error() {
        let error = decode_item(4, &line(json!("huge"), json!(false))).unwrap_err();
        assert_eq!(Some(4), error.index());
        assert_eq!(Some("line"), error.kind());
        assert_eq!("font-size", error.field());
    }

    #[test]
    fn test_text_keeps_line_breaks() {
        let item = json!({
            "type": "text",
            "content": "Multi-line text\nwith newlines",
            "font-size": 1,
            "font": "B",
            "alignment": "left",
            "underline": false
        });
        assert_eq!(Instruction::Text {
            content: "Multi-line text\nwith newlines".into(),
            font_size: 1,
            font: Font::FontB,
            justification: Justification::Left,
            underline: false
        }, decode_item(0, &item).unwrap());
    }

    #[test]
    fn test_enums_are_case_sensitive() {
        let mut item = line(json!(1), json!(false));
        item["alignment"] = json!("Center");
        assert_eq!("alignment", decode_item(0, &item).unwrap_err().field());

        let item = json!({"type": "barcode", "code": "123456789012", "barcode-type": "code128"});
        assert_eq!("barcode-type", decode_item(0, &item).unwrap_err().field());

        let item = json!({"type": "image", "data": "", "alignment": "left", "dither-mode": "floyd-steinberg"});
        assert_eq!("dither-mode", decode_item(0, &item).unwrap_err().field());
    }

    #[test]
    fn test_barcode_ignores_alignment() {
        let item = json!({"type": "barcode", "code": "123456789012", "barcode-type": "CODE128", "alignment": "left"});
        assert_eq!(Instruction::barcode("123456789012", BarcodeSystem::CODE128), decode_item(0, &item).unwrap());
    }

    #[test]
    fn test_underscore_aliases() {
        let item = json!({"type": "barcode", "code": "123456789012", "barcode_type": "CODE128"});
        assert_eq!(Instruction::barcode("123456789012", BarcodeSystem::CODE128), decode_item(0, &item).unwrap());
        let item = json!({"type": "line", "content": "x", "font_size": 2, "font": "A", "alignment": "left", "underline": false});
        assert!(decode_item(0, &item).is_ok());
    }

    #[test]
    fn test_feed_lines() {
        assert_eq!(Instruction::feed(0), decode_item(0, &json!({"type": "feed", "lines": 0})).unwrap());
        assert_eq!("lines", decode_item(0, &json!({"type": "feed", "lines": -1})).unwrap_err().field());
        assert_eq!("lines", decode_item(0, &json!({"type": "feed", "lines": "2"})).unwrap_err().field());
        assert_eq!("lines", decode_item(0, &json!({"type": "feed"})).unwrap_err().field());
    }

    #[test]
    fn test_qr_size_is_not_range_checked() {
        assert_eq!(Instruction::qr_code("x", 40), decode_item(0, &json!({"type": "qr", "code": "x", "size": 40})).unwrap());
    }

    #[test]
    fn test_discriminator_errors() {
        let error = decode_item(1, &json!({"type": "poem"})).unwrap_err();
        assert_eq!((Some(1), Some("poem"), "type"), (error.index(), error.kind(), error.field()));
        assert_eq!("type", decode_item(0, &json!({"content": "x"})).unwrap_err().field());
        assert_eq!("type", decode_item(0, &json!({"type": 3})).unwrap_err().field());
        assert_eq!("type", decode_item(0, &json!("line")).unwrap_err().field());
    }

    #[test]
    fn test_one_bad_item_rejects_all() {
        let items = vec![
            json!({"type": "feed", "lines": 1}),
            json!({"type": "unknown"}),
            json!({"type": "feed", "lines": 1})
        ];
        assert_eq!(Some(1), decode_items(&items).unwrap_err().index());
    }
}
