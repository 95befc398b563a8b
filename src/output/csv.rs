use std::borrow::Cow;
use std::fs;
use std::path::Path;

use chrono::Local;

use crate::analyzer::PageRecord;
use crate::error::Result;

const CSV_HEADER: &str = "page,width,height,size";

/// Suggested export filename, e.g. `pdf_analysis_20250131_142502.csv`.
pub fn default_filename() -> String {
    format!("pdf_analysis_{}.csv", Local::now().format("%Y%m%d_%H%M%S"))
}

/// Write the record sequence to `path` as UTF-8 CSV, one row per page in
/// page order.
pub fn write_csv(records: &[PageRecord], path: &Path) -> Result<()> {
    fs::write(path, render_csv(records))?;
    Ok(())
}

fn render_csv(records: &[PageRecord]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + records.len() * 48);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for record in records {
        out.push_str(&format!(
            "{},{:.1},{:.1},{}\n",
            record.page,
            record.width_mm,
            record.height_mm,
            escape_field(&record.label)
        ));
    }
    out
}

/// Quote a field only when its content requires it; embedded quotes are
/// doubled.
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze_pages;
    use crate::pdf::PageBox;

    fn record(page: usize, width_mm: f64, height_mm: f64, label: &str) -> PageRecord {
        PageRecord {
            page,
            width_mm,
            height_mm,
            label: label.to_string(),
        }
    }

    #[test]
    fn header_and_row_shape() {
        let records = vec![
            record(1, 209.9, 297.0, "A4 (Print on: A4)"),
            record(2, 215.9, 279.4, "Letter (Print on: Letter)"),
        ];
        let csv = render_csv(&records);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "page,width,height,size");
        assert_eq!(lines[1], "1,209.9,297.0,A4 (Print on: A4)");
        assert_eq!(lines[2], "2,215.9,279.4,Letter (Print on: Letter)");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn numeric_fields_always_carry_one_decimal() {
        let csv = render_csv(&[record(1, 210.0, 297.0, "A4 (Print on: A4)")]);
        assert!(csv.contains("1,210.0,297.0,"));
    }

    #[test]
    fn fields_quoted_only_when_needed() {
        assert_eq!(escape_field("A4 (Print on: A4)"), "A4 (Print on: A4)");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn round_trip_through_disk() {
        let boxes = [
            PageBox {
                width_pt: 595.0,
                height_pt: 842.0,
            },
            PageBox {
                width_pt: 612.0,
                height_pt: 792.0,
            },
            PageBox {
                width_pt: 2835.0,
                height_pt: 2835.0,
            },
        ];
        let (records, _) = analyze_pages(&boxes).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&records, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("page,width,height,size"));

        for (line, expected) in lines.zip(&records) {
            let mut fields = line.splitn(4, ',');
            assert_eq!(
                fields.next().unwrap().parse::<usize>().unwrap(),
                expected.page
            );
            assert_eq!(
                fields.next().unwrap().parse::<f64>().unwrap(),
                expected.width_mm
            );
            assert_eq!(
                fields.next().unwrap().parse::<f64>().unwrap(),
                expected.height_mm
            );
            assert_eq!(fields.next().unwrap(), expected.label);
        }
        assert_eq!(content.lines().count(), records.len() + 1);
    }

    #[test]
    fn default_filename_is_timestamped() {
        let name = default_filename();
        assert!(name.starts_with("pdf_analysis_"));
        assert!(name.ends_with(".csv"));
        // pdf_analysis_YYYYMMDD_HHMMSS.csv
        let stamp = &name["pdf_analysis_".len()..name.len() - ".csv".len()];
        assert_eq!(stamp.len(), 15);
        assert_eq!(stamp.as_bytes()[8], b'_');
        assert!(stamp
            .chars()
            .enumerate()
            .all(|(i, c)| if i == 8 { c == '_' } else { c.is_ascii_digit() }));
    }
}
