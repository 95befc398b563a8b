use once_cell::sync::Lazy;

/// One PDF point (1/72 inch) in millimeters.
pub const MM_PER_POINT: f64 = 0.352778;

/// Slack allowed when matching a page against a reference size, in mm.
const TOLERANCE_MM: f64 = 5.0;

/// A named reference paper size, portrait orientation (short edge first).
#[derive(Debug, Clone, Copy)]
pub struct StandardSize {
    pub name: &'static str,
    pub short_mm: f64,
    pub long_mm: f64,
}

impl StandardSize {
    fn area(&self) -> f64 {
        self.short_mm * self.long_mm
    }
}

/// Declaration order doubles as the tie-break for the exact-match pass.
pub const STANDARD_SIZES: [StandardSize; 8] = [
    StandardSize { name: "A0", short_mm: 841.0, long_mm: 1189.0 },
    StandardSize { name: "A1", short_mm: 594.0, long_mm: 841.0 },
    StandardSize { name: "A2", short_mm: 420.0, long_mm: 594.0 },
    StandardSize { name: "A3", short_mm: 297.0, long_mm: 420.0 },
    StandardSize { name: "A4", short_mm: 210.0, long_mm: 297.0 },
    StandardSize { name: "A5", short_mm: 148.0, long_mm: 210.0 },
    StandardSize { name: "Letter", short_mm: 215.9, long_mm: 279.4 },
    StandardSize { name: "Legal", short_mm: 215.9, long_mm: 355.6 },
];

/// The same table ordered by sheet area, smallest first, for the
/// recommendation pass.
static SIZES_BY_AREA: Lazy<Vec<&'static StandardSize>> = Lazy::new(|| {
    let mut sizes: Vec<_> = STANDARD_SIZES.iter().collect();
    sizes.sort_by(|a, b| a.area().total_cmp(&b.area()));
    sizes
});

/// Convert a page-box dimension from points to millimeters, rounded to one
/// decimal place.
pub fn points_to_mm(points: f32) -> f64 {
    round_mm(points as f64 * MM_PER_POINT)
}

fn round_mm(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Classify a page by its dimensions in millimeters.
///
/// Orientation independent: the page and every reference size are compared
/// long edge against long edge, short edge against short edge. The label
/// combines the detected size (or `Custom (L×Smm)`) with the smallest
/// standard paper that can contain the page within the same tolerance.
pub fn classify(width_mm: f64, height_mm: f64) -> String {
    let long = width_mm.max(height_mm);
    let short = width_mm.min(height_mm);

    let actual = STANDARD_SIZES
        .iter()
        .find(|size| {
            (long - size.long_mm).abs() <= TOLERANCE_MM
                && (short - size.short_mm).abs() <= TOLERANCE_MM
        })
        .map(|size| size.name.to_string())
        .unwrap_or_else(|| format!("Custom ({:.1}×{:.1}mm)", long, short));

    // Smallest sheet that contains the page. There is deliberately no lower
    // bound: a page smaller than every standard still recommends the
    // smallest one that fits it.
    let recommended = SIZES_BY_AREA
        .iter()
        .find(|size| long <= size.long_mm + TOLERANCE_MM && short <= size.short_mm + TOLERANCE_MM)
        .map(|size| size.name.to_string())
        .unwrap_or_else(|| "Custom (Too large for standard sizes)".to_string());

    format!("{} (Print on: {})", actual, recommended)
}
