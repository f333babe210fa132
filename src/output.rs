use crate::core::types::ExtractionResult;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub const HEADER: [&str; 5] = [
    "Company Name",
    "Stock Name",
    "Filing Time",
    "New Product",
    "Product Description",
];

/// Writes the header and every row, `|`-delimited. The header is always written, even
/// for an empty table.
pub fn write_table<W: Write>(writer: W, rows: &[ExtractionResult]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_results(path: &Path, rows: &[ExtractionResult]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {:?}", parent))?;
    }

    let file =
        File::create(path).with_context(|| format!("Failed to create output file {:?}", path))?;
    write_table(file, rows)?;
    log::info!("Saved {} rows to {:?}", rows.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(product: &str, description: &str) -> ExtractionResult {
        ExtractionResult {
            company_name: "AAPL".to_string(),
            stock_name: "AAPL".to_string(),
            filing_time: "2024-10-31T16:06:16-04:00".to_string(),
            product_name: product.to_string(),
            product_description: description.to_string(),
        }
    }

    fn render(rows: &[ExtractionResult]) -> String {
        let mut buf = Vec::new();
        write_table(&mut buf, rows).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_table_has_header_only() {
        assert_eq!(
            render(&[]),
            "Company Name|Stock Name|Filing Time|New Product|Product Description\n"
        );
    }

    #[test]
    fn test_rows_are_pipe_delimited() {
        let text = render(&[row("iPhone 16", "A phone.")]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "AAPL|AAPL|2024-10-31T16:06:16-04:00|iPhone 16|A phone."
        );
    }

    #[test]
    fn test_fields_with_quotes_are_quoted() {
        let text = render(&[row("The \"Pro\" model", "Fast.")]);
        assert!(text.contains("|\"The \"\"Pro\"\" model\"|"));
    }
}
