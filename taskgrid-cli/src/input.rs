//! Turning command-line text into cell values.

use std::path::Path;

use chrono::NaiveDate;
use taskgrid_lib::model::types::{ColumnOption, FileAttachment, OptionTag};
use taskgrid_lib::model::{CellValue, Column, ColumnType};

use crate::error::CliError;

/// Parses the values given for one cell of `column`.
///
/// No values (or a single empty one) clear the cell.
pub fn parse_cell(column: &Column, values: &[String]) -> Result<CellValue, CliError> {
    if values.iter().all(|v| v.trim().is_empty()) {
        return Ok(CellValue::empty_for(column.kind));
    }

    match column.kind {
        ColumnType::Text => Ok(CellValue::Text(values.join(" "))),
        ColumnType::Number => {
            let text = values.join("");
            let text = text.trim();
            text.parse::<f64>()
                .map_err(|_| CliError::input(format!("'{}' is not a number", text)))?;
            Ok(CellValue::Text(text.to_string()))
        }
        ColumnType::Date => {
            let text = values.join(" ");
            NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
                .map(CellValue::Date)
                .map_err(|_| CliError::input(format!("'{}' is not a YYYY-MM-DD date", text)))
        }
        ColumnType::File => Ok(CellValue::Files(
            values
                .iter()
                .filter(|v| !v.trim().is_empty())
                .map(|v| attachment(v))
                .collect(),
        )),
        ColumnType::SingleSelect => {
            let text = values.join(" ");
            find_option(column, text.trim()).map(CellValue::Choice)
        }
        ColumnType::MultiSelect => {
            let mut choices: Vec<OptionTag> = Vec::with_capacity(values.len());
            for value in values.iter().filter(|v| !v.trim().is_empty()) {
                let tag = find_option(column, value.trim())?;
                if !choices.iter().any(|c| c.text == tag.text) {
                    choices.push(tag);
                }
            }
            Ok(CellValue::Choices(choices))
        }
    }
}

/// Turns `--option` arguments into column options.
///
/// `TEXT` makes a plain option, `TEXT=#COLOR` a colored one.
pub fn parse_options(raw: &[String]) -> Vec<ColumnOption> {
    raw.iter()
        .filter(|r| !r.trim().is_empty())
        .map(|r| match r.rsplit_once("=#") {
            Some((text, color)) => {
                ColumnOption::Tagged(OptionTag::with_color(text.trim(), format!("#{}", color.trim())))
            }
            None => ColumnOption::Plain(r.trim().to_string()),
        })
        .collect()
}

fn find_option(column: &Column, text: &str) -> Result<OptionTag, CliError> {
    column
        .options
        .iter()
        .find(|option| option.text() == text)
        .map(ColumnOption::to_tag)
        .ok_or_else(|| {
            let known: Vec<&str> = column.options.iter().map(ColumnOption::text).collect();
            CliError::input(format!(
                "'{}' is not an option of {} (options: {})",
                text,
                column.name,
                known.join(", ")
            ))
        })
}

fn attachment(path: &str) -> FileAttachment {
    let path = Path::new(path.trim());
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    FileAttachment::new(name, mime.essence_str(), path.display().to_string())
}
