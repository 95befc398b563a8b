use indexmap::IndexMap;

use crate::error::{AppError, Result};
use crate::pdf::PageBox;

pub mod page_size;

pub use page_size::{classify, points_to_mm};

/// One analyzed page, in source page order. Width and height keep the page's
/// own orientation; only the label is orientation-normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRecord {
    /// 1-based page number.
    pub page: usize,
    pub width_mm: f64,
    pub height_mm: f64,
    pub label: String,
}

/// Occurrence count per label, in first-seen order.
pub type SizeSummary = IndexMap<String, usize>;

/// Everything the worker hands back for one document.
#[derive(Debug, Clone)]
pub struct DocumentAnalysis {
    pub filename: String,
    pub path: String,
    pub records: Vec<PageRecord>,
    pub summary: SizeSummary,
}

/// Run the per-page pipeline over a document's page boxes: validate, convert
/// points to millimeters, classify, and accumulate the label counts.
///
/// Any invalid page box aborts the whole analysis; no partial record
/// sequence is ever returned.
pub fn analyze_pages(boxes: &[PageBox]) -> Result<(Vec<PageRecord>, SizeSummary)> {
    let mut records = Vec::with_capacity(boxes.len());
    let mut summary = SizeSummary::new();

    for (index, page_box) in boxes.iter().enumerate() {
        let page = index + 1;
        if !is_valid_dimension(page_box.width_pt) || !is_valid_dimension(page_box.height_pt) {
            return Err(AppError::PageBox {
                page,
                reason: format!(
                    "invalid dimensions {}×{} pt",
                    page_box.width_pt, page_box.height_pt
                ),
            });
        }

        let width_mm = points_to_mm(page_box.width_pt);
        let height_mm = points_to_mm(page_box.height_pt);
        let label = classify(width_mm, height_mm);

        *summary.entry(label.clone()).or_insert(0) += 1;
        records.push(PageRecord {
            page,
            width_mm,
            height_mm,
            label,
        });
    }

    Ok((records, summary))
}

fn is_valid_dimension(points: f32) -> bool {
    points.is_finite() && points > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const A4_PT: PageBox = PageBox {
        width_pt: 595.0,
        height_pt: 842.0,
    };
    const LETTER_PT: PageBox = PageBox {
        width_pt: 612.0,
        height_pt: 792.0,
    };

    #[test]
    fn records_keep_page_order_and_orientation() {
        let landscape_a4 = PageBox {
            width_pt: 842.0,
            height_pt: 595.0,
        };
        let (records, _) = analyze_pages(&[A4_PT, landscape_a4]).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].page, 1);
        assert_eq!(records[1].page, 2);
        // Orientation survives in the record even though the label does not.
        assert_eq!((records[0].width_mm, records[0].height_mm), (209.9, 297.0));
        assert_eq!((records[1].width_mm, records[1].height_mm), (297.0, 209.9));
        assert_eq!(records[0].label, records[1].label);
        assert_eq!(records[0].label, "A4 (Print on: A4)");
    }

    #[test]
    fn summary_counts_sum_to_page_count() {
        let boxes = [A4_PT, A4_PT, LETTER_PT, A4_PT];
        let (records, summary) = analyze_pages(&boxes).unwrap();

        assert_eq!(records.len(), boxes.len());
        assert_eq!(summary.values().sum::<usize>(), boxes.len());
        assert_eq!(summary["A4 (Print on: A4)"], 3);
        assert_eq!(summary["Letter (Print on: Letter)"], 1);
    }

    #[test]
    fn summary_preserves_first_seen_order() {
        let (_, summary) = analyze_pages(&[LETTER_PT, A4_PT, LETTER_PT]).unwrap();
        let labels: Vec<_> = summary.keys().cloned().collect();
        assert_eq!(
            labels,
            vec!["Letter (Print on: Letter)", "A4 (Print on: A4)"]
        );
    }

    #[test]
    fn invalid_second_page_aborts_with_nothing() {
        let bad = PageBox {
            width_pt: 0.0,
            height_pt: 842.0,
        };
        let err = analyze_pages(&[A4_PT, bad]).unwrap_err();
        match err {
            AppError::PageBox { page, .. } => assert_eq!(page, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn negative_and_non_finite_dimensions_rejected() {
        let negative = PageBox {
            width_pt: 595.0,
            height_pt: -842.0,
        };
        assert!(analyze_pages(&[negative]).is_err());

        let nan = PageBox {
            width_pt: f32::NAN,
            height_pt: 842.0,
        };
        assert!(analyze_pages(&[nan]).is_err());
    }

    #[test]
    fn empty_document_yields_empty_analysis() {
        let (records, summary) = analyze_pages(&[]).unwrap();
        assert!(records.is_empty());
        assert!(summary.is_empty());
    }
}
