use std::collections::HashSet;
use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, FieldRef, Schema};
use arrow::error::ArrowError;
use arrow::json::reader::infer_json_schema_from_iterator;
use arrow::json::ReaderBuilder;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use serde_json::{Map, Value};
use tracing::debug;

static MISSING: Value = Value::Null;

/// Builds a [`RecordBatch`] from JSON row objects.
///
/// Columns appear in the order their keys are first seen, so the first
/// record's fields lead. Each column's type is inferred from its own values;
/// a column mixing numbers and strings becomes `Utf8`. A column whose values
/// cannot share one Arrow type (objects next to scalars, say) becomes `Utf8`
/// too: strings are kept as they are and every other value is stored as its
/// JSON text. No records gives an empty batch with no columns.
pub fn records_to_batch(records: &[Value]) -> Result<RecordBatch, ArrowError> {
    let rows = records
        .iter()
        .map(|record| match record {
            Value::Object(row) => Ok(row),
            other => Err(ArrowError::JsonError(format!(
                "Expected JSON record to be an object, found {other}"
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut fields: Vec<FieldRef> = Vec::new();
    let mut columns: Vec<ArrayRef> = Vec::new();
    for name in column_names(&rows) {
        let values: Vec<&Value> = rows
            .iter()
            .map(|row| row.get(&name).unwrap_or(&MISSING))
            .collect();
        let (field, column) = match decode_column(&name, &values) {
            Ok(decoded) => decoded,
            Err(e) => {
                debug!(column = %name, error = %e, "storing column as JSON text");
                json_text_column(&name, &values)
            }
        };
        fields.push(field);
        columns.push(column);
    }

    let options = RecordBatchOptions::new().with_row_count(Some(rows.len()));
    RecordBatch::try_new_with_options(Arc::new(Schema::new(fields)), columns, &options)
}

fn column_names(rows: &[&Map<String, Value>]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for key in rows.iter().flat_map(|row| row.keys()) {
        if seen.insert(key.as_str()) {
            names.push(key.clone());
        }
    }
    names
}

/// Infers and decodes one column with the Arrow JSON reader.
fn decode_column(name: &str, values: &[&Value]) -> Result<(FieldRef, ArrayRef), ArrowError> {
    let cells: Vec<Value> = values
        .iter()
        .map(|value| {
            let mut cell = Map::new();
            cell.insert(name.to_string(), (*value).clone());
            Value::Object(cell)
        })
        .collect();

    let schema = Arc::new(infer_json_schema_from_iterator(
        cells.iter().map(Ok::<_, ArrowError>),
    )?);
    let mut decoder = ReaderBuilder::new(Arc::clone(&schema))
        .with_batch_size(cells.len().max(1))
        .with_coerce_primitive(true)
        .build_decoder()?;
    decoder.serialize(&cells)?;

    let batch = decoder
        .flush()?
        .unwrap_or_else(|| RecordBatch::new_empty(Arc::clone(&schema)));
    Ok((Arc::clone(&schema.fields()[0]), Arc::clone(batch.column(0))))
}

fn json_text_column(name: &str, values: &[&Value]) -> (FieldRef, ArrayRef) {
    let text: StringArray = values
        .iter()
        .map(|value| match value {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
        .collect();
    (
        Arc::new(Field::new(name, DataType::Utf8, true)),
        Arc::new(text),
    )
}
