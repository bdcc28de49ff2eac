use rusqlite::types::Value;
use tabled::{builder::Builder, settings::Style, Table, Tabled};

use crate::storage::TableDump;

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub fn stats_table(stats: &[(&str, String)]) -> String {
    if stats.is_empty() {
        return String::new();
    }

    let rows: Vec<TableRow> = stats
        .iter()
        .map(|(label, value)| TableRow {
            metric: label.to_string(),
            value: value.clone(),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Render every row of a table with its column names as header
pub fn render_dump(dump: &TableDump) -> String {
    let mut builder = Builder::default();
    builder.push_record(dump.columns.iter().cloned());
    for row in &dump.rows {
        builder.push_record(row.iter().map(render_value));
    }
    builder.build().with(Style::rounded()).to_string()
}

pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_dump_includes_header_and_rows() {
        let dump = TableDump {
            name: "word_frequencies".into(),
            columns: vec!["id".into(), "word".into(), "frequency".into()],
            rows: vec![vec![
                Value::Text("1234567".into()),
                Value::Text("hello".into()),
                Value::Integer(2),
            ]],
        };

        let rendered = render_dump(&dump);
        assert!(rendered.contains("frequency"));
        assert!(rendered.contains("hello"));
        assert!(rendered.contains('2'));
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&Value::Null), "NULL");
        assert_eq!(render_value(&Value::Blob(vec![1, 2, 3])), "<3 bytes>");
    }

    #[test]
    fn test_stats_table() {
        assert!(stats_table(&[]).is_empty());
        let rendered = stats_table(&[("Entries", "2".to_string())]);
        assert!(rendered.contains("Metric"));
        assert!(rendered.contains("Entries"));
    }
}
