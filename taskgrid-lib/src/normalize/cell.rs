//! Conversion of native `cell_data` values into [`CellValue`]s.

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Utc;
use log::warn;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value as Json;

use super::payload::NativeColumnType;
use crate::model::CellValue;
use crate::model::NativeId;
use crate::model::types::DEFAULT_OPTION_COLOR;
use crate::model::types::FileAttachment;
use crate::model::types::OptionTag;
use crate::model::types::UserList;

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Converts one native cell according to its column's native type.
///
/// Falsy values (`null`, `false`, `0`, `""`) are treated as absent.
pub fn convert(native: NativeColumnType, raw: &Json) -> CellValue {
    if !is_truthy(raw) {
        return match native {
            NativeColumnType::MultiDropdown => CellValue::Choices(Vec::new()),
            _ => CellValue::Empty,
        };
    }

    match native {
        NativeColumnType::Fixed | NativeColumnType::Text => match raw {
            Json::String(s) => CellValue::Text(s.clone()),
            other => CellValue::Raw(other.clone()),
        },
        NativeColumnType::Date => match parse_date(raw) {
            Some(date) => CellValue::Date(date),
            None => {
                warn!("Invalid date encountered: {}", raw);
                CellValue::Empty
            }
        },
        NativeColumnType::Users => match raw {
            Json::Array(users) if !users.is_empty() => {
                CellValue::Users(UserList::from_records(users.clone()))
            }
            _ => CellValue::Empty,
        },
        NativeColumnType::Dropdown => match status_tag(raw) {
            Some(tag) => CellValue::Choice(tag),
            None => CellValue::Empty,
        },
        NativeColumnType::MultiDropdown => match raw {
            Json::Array(items) => CellValue::Choices(
                items
                    .iter()
                    .map(|item| {
                        status_tag(item).unwrap_or_else(|| OptionTag {
                            text: String::new(),
                            color: Some(status_color(item)),
                            id: item.get("id").and_then(native_id),
                        })
                    })
                    .collect(),
            ),
            _ => CellValue::Choices(Vec::new()),
        },
        NativeColumnType::File => files(raw),
        NativeColumnType::Other => match raw {
            Json::String(s) => CellValue::Text(s.clone()),
            Json::Number(_) | Json::Bool(_) => CellValue::Raw(raw.clone()),
            _ => CellValue::Empty,
        },
    }
}

/// Reads a `{status_text, status_color, id}` object as an option.
///
/// Returns `None` when there is no usable `status_text`.
pub fn status_tag(raw: &Json) -> Option<OptionTag> {
    let text = match raw.get("status_text")? {
        Json::String(s) if !s.is_empty() => s.clone(),
        Json::Number(n) => n.to_string(),
        _ => return None,
    };
    let id = raw
        .get("id")
        .and_then(native_id)
        .or_else(|| raw.get("status_id").and_then(native_id));
    Some(OptionTag {
        text,
        color: Some(status_color(raw)),
        id,
    })
}

fn status_color(raw: &Json) -> String {
    match raw.get("status_color") {
        Some(Json::String(color)) if !color.is_empty() => color.clone(),
        _ => DEFAULT_OPTION_COLOR.to_string(),
    }
}

fn native_id(raw: &Json) -> Option<NativeId> {
    match raw {
        Json::Number(n) => n.as_i64().map(NativeId::Int),
        Json::String(s) => Some(NativeId::Str(s.clone())),
        _ => None,
    }
}

/// File cells are opaque on the wire. Values already shaped like attachments
/// are lifted into [`CellValue::Files`]; anything else is kept raw.
fn files(raw: &Json) -> CellValue {
    match raw {
        Json::Array(_) => match decode::<Vec<FileAttachment>>(raw) {
            Some(files) => CellValue::Files(files),
            None => CellValue::Raw(raw.clone()),
        },
        Json::Object(_) => match decode::<FileAttachment>(raw) {
            Some(file) => CellValue::Files(vec![file]),
            None => CellValue::Raw(raw.clone()),
        },
        _ => CellValue::Raw(raw.clone()),
    }
}

fn decode<T: DeserializeOwned>(raw: &Json) -> Option<T> {
    <T as Deserialize>::deserialize(raw).ok()
}

/// Parses a remote date into a calendar date (UTC for timestamps with an offset).
///
/// Accepts RFC 3339, naive date-times, `YYYY-MM-DD`, `MM/DD/YYYY`,
/// `YYYY/MM/DD`, and epoch milliseconds.
pub fn parse_date(raw: &Json) -> Option<NaiveDate> {
    match raw {
        Json::String(s) => parse_date_str(s.trim()),
        Json::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.date_naive()),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Some(dt) = DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.date());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

fn is_truthy(raw: &Json) -> bool {
    match raw {
        Json::Null => false,
        Json::Bool(b) => *b,
        Json::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Json::String(s) => !s.is_empty(),
        Json::Array(_) | Json::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CellValue {
        CellValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_date_formats() {
        let native = NativeColumnType::Date;
        assert_eq!(convert(native, &json!("2024-03-01T00:00:00Z")), date(2024, 3, 1));
        assert_eq!(convert(native, &json!("2024-03-01T23:30:00-02:00")), date(2024, 3, 2));
        assert_eq!(convert(native, &json!("2024-03-01T10:00:00.250")), date(2024, 3, 1));
        assert_eq!(convert(native, &json!("2024-03-01")), date(2024, 3, 1));
        assert_eq!(convert(native, &json!("03/01/2024")), date(2024, 3, 1));
        assert_eq!(convert(native, &json!(1709251200000i64)), date(2024, 3, 1));
    }

    #[test]
    fn test_bad_date_degrades_to_empty() {
        assert_eq!(convert(NativeColumnType::Date, &json!("not a date")), CellValue::Empty);
        assert_eq!(convert(NativeColumnType::Date, &json!({"x": 1})), CellValue::Empty);
        assert_eq!(convert(NativeColumnType::Date, &Json::Null), CellValue::Empty);
    }

    #[test]
    fn test_text_passes_through() {
        assert_eq!(convert(NativeColumnType::Fixed, &json!("Task A")), CellValue::from("Task A"));
        assert_eq!(convert(NativeColumnType::Text, &json!("")), CellValue::Empty);
        assert_eq!(convert(NativeColumnType::Text, &json!(12)), CellValue::Raw(json!(12)));
    }

    #[test]
    fn test_users() {
        let value = convert(
            NativeColumnType::Users,
            &json!([{"user": "Ann"}, {"user": "Bo"}]),
        );
        let CellValue::Users(users) = value else {
            panic!("expected users, got {:?}", value);
        };
        assert_eq!(users.text, "Ann, Bo");
        assert_eq!(convert(NativeColumnType::Users, &json!([])), CellValue::Empty);
    }

    #[test]
    fn test_dropdown_default_color() {
        let value = convert(
            NativeColumnType::Dropdown,
            &json!({"status_text": "Open", "id": 3}),
        );
        assert_eq!(
            value,
            CellValue::Choice(OptionTag::with_color("Open", DEFAULT_OPTION_COLOR).id(3))
        );
        assert_eq!(
            convert(NativeColumnType::Dropdown, &json!({"status_color": "#fff"})),
            CellValue::Empty
        );
    }

    #[test]
    fn test_multi_dropdown() {
        let value = convert(
            NativeColumnType::MultiDropdown,
            &json!([
                {"status_text": "A", "status_color": "#111", "id": 1},
                {"status_text": "B", "id": 2}
            ]),
        );
        assert_eq!(
            value,
            CellValue::Choices(vec![
                OptionTag::with_color("A", "#111").id(1),
                OptionTag::with_color("B", DEFAULT_OPTION_COLOR).id(2),
            ])
        );
        assert_eq!(
            convert(NativeColumnType::MultiDropdown, &Json::Null),
            CellValue::Choices(Vec::new())
        );
        assert_eq!(
            convert(NativeColumnType::MultiDropdown, &json!({"status_text": "A"})),
            CellValue::Choices(Vec::new())
        );
    }

    #[test]
    fn test_files() {
        let single = json!({"name": "a.png", "type": "image/png", "preview": "blob:1"});
        assert_eq!(
            convert(NativeColumnType::File, &single),
            CellValue::Files(vec![FileAttachment::new("a.png", "image/png", "blob:1")])
        );

        let url = json!("https://example.com/a.pdf");
        assert_eq!(convert(NativeColumnType::File, &url), CellValue::Raw(url.clone()));
    }

    #[test]
    fn test_other_types_drop_objects() {
        assert_eq!(convert(NativeColumnType::Other, &json!({"a": 1})), CellValue::Empty);
        assert_eq!(convert(NativeColumnType::Other, &json!("x")), CellValue::from("x"));
        assert_eq!(convert(NativeColumnType::Other, &json!(true)), CellValue::Raw(json!(true)));
    }
}
