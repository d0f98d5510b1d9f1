use crate::assets::font::LegendFont;
use crate::config::model::LegendConfig;
use crate::foundation::core::Position;
use crate::foundation::error::{HuntmapError, HuntmapResult};
use crate::marks::model::RankLabel;
use crate::marks::remap::ResolvedMark;

/// Gap between the legend dot and its label, relative to the dot diameter.
pub const LABEL_GAP_SCALE: f64 = 1.75;

/// Text measured to size the legend dot.
const CAP_SAMPLE: &str = "a";

/// Outline width used when measuring the dot and label widths. Only the row height follows
/// the configured `font_stroke`.
pub const METRIC_STROKE: f64 = 1.0;

/// One line of the legend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegendEntry {
    pub name: String,
    pub label: RankLabel,
}

impl LegendEntry {
    pub fn new(name: impl Into<String>, label: RankLabel) -> Self {
        Self {
            name: name.into(),
            label,
        }
    }

    /// `"{name} ({abbrev})"`, the text drawn next to the dot.
    pub fn text(&self) -> String {
        format!("{} ({})", self.name, self.label.display_abbrev())
    }
}

impl From<&ResolvedMark<'_>> for LegendEntry {
    fn from(m: &ResolvedMark<'_>) -> Self {
        Self::new(m.name, m.label)
    }
}

/// Grid shape `(rows, columns)` for `n_items` with at most `rows` rows.
pub fn compute_columns(n_items: i64, rows: i64) -> HuntmapResult<(usize, usize)> {
    if n_items <= 0 {
        return Err(HuntmapError::input(format!(
            "legend item count must be > 0, got {n_items}"
        )));
    }
    if rows <= 0 {
        return Err(HuntmapError::input(format!(
            "legend row count must be > 0, got {rows}"
        )));
    }
    let (n, r) = (n_items as usize, rows as usize);
    if r > n {
        return Ok((n, 1));
    }
    Ok((r, n.div_ceil(r)))
}

/// Where one entry goes, relative to the legend's inner origin.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendCell {
    /// Index into the entries the plan was built from.
    pub entry: usize,
    pub row: usize,
    pub column: usize,
    pub offset: Position,
    /// Dot plus label width; zero for entries with an empty name.
    pub width: f64,
}

/// Measured legend grid.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendPlan {
    pub rows: usize,
    pub columns: usize,
    /// Shared height of every row.
    pub row_height: f64,
    /// Height of a lowercase letter; sizes the legend dot.
    pub cap_height: f64,
    pub column_widths: Vec<f64>,
    /// Column-major: down the first column, then the next.
    pub cells: Vec<LegendCell>,
    /// Content size, without the inner offset.
    pub size: Position,
}

impl LegendPlan {
    pub fn dot_diameter(&self, mark_scale: f64) -> f64 {
        mark_scale * self.cap_height
    }

    /// Size of the bordered panel around the content.
    pub fn panel_size(&self, inner_offset: Position) -> Position {
        self.size + inner_offset * 2.0
    }
}

/// Measure every entry and lay the legend out in `rows` rows, filled column-major.
///
/// Entries with an empty name take up their grid cell but are neither measured nor drawn.
pub fn plan_legend(
    entries: &[LegendEntry],
    rows: i64,
    style: &LegendConfig,
    font: &mut dyn LegendFont,
) -> HuntmapResult<LegendPlan> {
    let (rows, columns) = compute_columns(entries.len() as i64, rows)?;

    let mut row_height: f64 = 0.0;
    for entry in entries.iter().filter(|e| !e.name.is_empty()) {
        row_height = row_height.max(font.measure(&entry.name, style.font_stroke)?.height);
    }
    let cap_height = font.measure(CAP_SAMPLE, METRIC_STROKE)?.height;
    let dot_advance = cap_height * style.mark_scale * LABEL_GAP_SCALE;

    let mut cells = Vec::with_capacity(entries.len());
    let mut column_widths = vec![0.0_f64; columns];
    for (i, entry) in entries.iter().enumerate() {
        let (row, column) = (i % rows, i / rows);
        let width = if entry.name.is_empty() {
            0.0
        } else {
            dot_advance + font.measure(&entry.text(), METRIC_STROKE)?.width
        };
        column_widths[column] = column_widths[column].max(width);
        cells.push(LegendCell {
            entry: i,
            row,
            column,
            offset: Position::ORIGIN,
            width,
        });
    }

    let mut column_x = Vec::with_capacity(columns);
    let mut x = 0.0;
    for w in &column_widths {
        column_x.push(x);
        x += w + style.column_spacing;
    }
    for cell in &mut cells {
        cell.offset = Position::new(
            column_x[cell.column],
            cell.row as f64 * (row_height + style.line_spacing),
        );
    }

    let size = Position::new(
        (columns - 1) as f64 * style.column_spacing + column_widths.iter().sum::<f64>(),
        rows as f64 * row_height + (rows - 1) as f64 * style.line_spacing,
    );

    tracing::debug!(rows, columns, width = size.x, height = size.y, "legend planned");

    Ok(LegendPlan {
        rows,
        columns,
        row_height,
        cap_height,
        column_widths,
        cells,
        size,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/legend/layout.rs"]
mod tests;
