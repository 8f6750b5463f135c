/// Normalize a human-formatted sheet cell into a numeric value.
///
/// The daily sheets write numbers with thousands separators and mark absent
/// values with a dash or an empty cell. Mapping:
/// - missing, empty, or `"-"` cells become `None` (no data, distinct from 0),
/// - otherwise commas are stripped and the cell is parsed as `f64`,
/// - a cell that still fails to parse becomes `Some(f64::NAN)`, so malformed
///   input stays visible in the stored row instead of masquerading as
///   missing data.
#[must_use]
pub fn clean_number(cell: Option<&str>) -> Option<f64> {
    let raw = cell?.trim();
    if raw.is_empty() || raw == "-" {
        return None;
    }
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    Some(cleaned.parse::<f64>().unwrap_or(f64::NAN))
}
