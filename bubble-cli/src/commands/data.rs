//! Data type commands: fetch, create, update, replace, delete.

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use console::style;
use serde_json::Value;

use bubble_api::{Constraint, SortOption, SortOrder};
use bubble_core::config::AppConfig;
use bubble_core::error::{BubbleError, BubbleResult};

use crate::OutputFormat;

/// Maximum number of columns shown in table output.
const MAX_COLUMNS: usize = 6;

/// Maximum cell width before truncation.
const MAX_CELL_WIDTH: usize = 40;

pub async fn get(
    config: &AppConfig,
    object: &str,
    filters: &[String],
    sort_by: Option<String>,
    desc: bool,
    limit: Option<usize>,
    format: OutputFormat,
) -> BubbleResult<()> {
    let client = super::create_client(config)?;

    let constraints = filters
        .iter()
        .map(|f| parse_filter(f))
        .collect::<BubbleResult<Vec<_>>>()?;
    let sort = sort_by.map(|key| SortOption {
        key,
        order: if desc { SortOrder::Desc } else { SortOrder::Asc },
    });

    let mut records = client
        .fetch_all_filtered(object, &constraints, sort.as_ref())
        .await?;
    let total = records.len();
    if let Some(limit) = limit {
        records.truncate(limit);
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        OutputFormat::Text => {
            if records.is_empty() {
                println!("No {object} records.");
            } else {
                let columns = table_columns(&records);
                if columns.is_empty() {
                    println!("{}", serde_json::to_string_pretty(&records)?);
                } else {
                    println!("{}", render_table(&records, &columns));
                }
                if records.len() < total {
                    println!("\n{} of {} record(s) shown", records.len(), total);
                } else {
                    println!("\n{} record(s)", total);
                }
            }
        }
    }
    Ok(())
}

pub async fn create(
    config: &AppConfig,
    object: &str,
    data: &str,
    format: OutputFormat,
) -> BubbleResult<()> {
    let client = super::create_client(config)?;
    let body = parse_body(data)?;
    let response = client.create(object, &body).await?;
    print_write_result("Created", object, &response, format)
}

pub async fn update(
    config: &AppConfig,
    object: &str,
    data: &str,
    format: OutputFormat,
) -> BubbleResult<()> {
    let client = super::create_client(config)?;
    let body = parse_body(data)?;
    let response = client.update(object, &body).await?;
    print_write_result("Updated", object, &response, format)
}

pub async fn replace(
    config: &AppConfig,
    object: &str,
    data: &str,
    format: OutputFormat,
) -> BubbleResult<()> {
    let client = super::create_client(config)?;
    let body = parse_body(data)?;
    let response = client.replace(object, &body).await?;
    print_write_result("Replaced", object, &response, format)
}

pub async fn delete(config: &AppConfig, object: &str, format: OutputFormat) -> BubbleResult<()> {
    let client = super::create_client(config)?;
    let response = client.remove(object).await?;
    print_write_result("Deleted", object, &response, format)
}

fn print_write_result(
    verb: &str,
    object: &str,
    response: &Value,
    format: OutputFormat,
) -> BubbleResult<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(response)?);
        }
        OutputFormat::Text => {
            println!("  {} {verb} {object}.", style("OK").green().bold());
            if !response.is_null() {
                println!("{}", serde_json::to_string_pretty(response)?);
            }
        }
    }
    Ok(())
}

/// Parse a `field=value` or `field!=value` filter into a constraint.
fn parse_filter(raw: &str) -> BubbleResult<Constraint> {
    if let Some((key, value)) = raw.split_once("!=") {
        Ok(Constraint::not_equal(key.trim(), parse_scalar(value)))
    } else if let Some((key, value)) = raw.split_once('=') {
        Ok(Constraint::equals(key.trim(), parse_scalar(value)))
    } else {
        Err(BubbleError::Config(format!(
            "invalid filter '{raw}', expected field=value or field!=value"
        )))
    }
}

/// Interpret `true`/`false` as booleans, everything else as a string.
fn parse_scalar(raw: &str) -> Value {
    match raw.trim() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        other => Value::String(other.to_string()),
    }
}

fn parse_body(data: &str) -> BubbleResult<Value> {
    serde_json::from_str(data)
        .map_err(|e| BubbleError::Config(format!("invalid JSON body: {e}")))
}

/// Derive table columns from the first record's fields, `_id` leading.
fn table_columns(records: &[Value]) -> Vec<String> {
    let mut columns: Vec<String> = match records.first() {
        Some(Value::Object(map)) => map.keys().cloned().collect(),
        _ => return Vec::new(),
    };
    if let Some(pos) = columns.iter().position(|c| c == "_id") {
        let id = columns.remove(pos);
        columns.insert(0, id);
    }
    columns.truncate(MAX_COLUMNS);
    columns
}

fn render_table(records: &[Value], columns: &[String]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(columns.to_vec());
    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|c| cell_text(record.get(c.as_str())))
            .collect();
        table.add_row(row);
    }
    table
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => super::truncate(s, MAX_CELL_WIDTH),
        Some(other) => super::truncate(&other.to_string(), MAX_CELL_WIDTH),
    }
}
