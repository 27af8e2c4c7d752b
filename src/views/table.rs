use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::data::filter::FilteredView;
use crate::data::model::Record;

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Species,
    Island,
    BillLengthMm,
    BillDepthMm,
    FlipperLengthMm,
    BodyMassG,
    Sex,
    Year,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Species,
        Column::Island,
        Column::BillLengthMm,
        Column::BillDepthMm,
        Column::FlipperLengthMm,
        Column::BodyMassG,
        Column::Sex,
        Column::Year,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Species => "species",
            Column::Island => "island",
            Column::BillLengthMm => "bill_length_mm",
            Column::BillDepthMm => "bill_depth_mm",
            Column::FlipperLengthMm => "flipper_length_mm",
            Column::BodyMassG => "body_mass_g",
            Column::Sex => "sex",
            Column::Year => "year",
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, Column::Species | Column::Island | Column::Sex)
    }

    pub fn numeric(self, rec: &Record) -> Option<f64> {
        match self {
            Column::BillLengthMm => rec.bill_length_mm,
            Column::BillDepthMm => rec.bill_depth_mm,
            Column::FlipperLengthMm => rec.flipper_length_mm,
            Column::BodyMassG => rec.body_mass_g,
            Column::Year => rec.year.map(|y| y as f64),
            Column::Species | Column::Island | Column::Sex => None,
        }
    }

    /// Cell text; missing values render as `NA`.
    pub fn cell(self, rec: &Record) -> String {
        match self {
            Column::Species => rec.species.to_string(),
            Column::Island => rec.island.clone(),
            Column::Sex => rec.sex.clone().unwrap_or_else(|| "NA".to_string()),
            Column::Year => rec.year.map_or_else(|| "NA".to_string(), |y| y.to_string()),
            _ => self
                .numeric(rec)
                .map_or_else(|| "NA".to_string(), |v| format!("{v:.1}")),
        }
    }

    fn compare(self, a: &Record, b: &Record) -> Ordering {
        if self.is_numeric() {
            // Missing values sort last.
            match (self.numeric(a), self.numeric(b)) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        } else {
            self.cell(a).cmp(&self.cell(b))
        }
    }
}

// ---------------------------------------------------------------------------
// Data table – the filtered view as-is
// ---------------------------------------------------------------------------

/// Plain table over the filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    pub view: FilteredView,
}

impl DataTable {
    pub fn row(&self, position: usize) -> Option<&Record> {
        self.view.get(position)
    }

    pub fn len(&self) -> usize {
        self.view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }
}

pub fn data_table(view: &FilteredView) -> DataTable {
    DataTable { view: view.clone() }
}

// ---------------------------------------------------------------------------
// Data grid – table with per-column filters and sorting
// ---------------------------------------------------------------------------

/// A filter typed into one grid column header.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnFilter {
    /// Case-insensitive substring match on the cell text.
    Text(String),
    /// Inclusive bounds; a missing value never matches a set bound.
    Range { min: Option<f64>, max: Option<f64> },
}

impl ColumnFilter {
    /// Parse what the user typed into a column's filter box. Numeric columns
    /// take `lo..hi`, `lo..`, `..hi` or a single value; anything unparsable
    /// falls back to a text match.
    pub fn from_input(column: Column, input: &str) -> Self {
        let text = input.trim();
        if !column.is_numeric() || text.is_empty() {
            return ColumnFilter::Text(text.to_string());
        }
        let bound = |s: &str| -> Result<Option<f64>, ()> {
            let s = s.trim();
            if s.is_empty() {
                Ok(None)
            } else {
                s.parse::<f64>().map(Some).map_err(|_| ())
            }
        };
        let parsed = match text.split_once("..") {
            Some((lo, hi)) => bound(lo).and_then(|min| Ok((min, bound(hi)?))),
            None => bound(text).map(|v| (v, v)),
        };
        match parsed {
            Ok((min, max)) => ColumnFilter::Range { min, max },
            Err(()) => ColumnFilter::Text(text.to_string()),
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            ColumnFilter::Text(q) => !q.trim().is_empty(),
            ColumnFilter::Range { min, max } => min.is_some() || max.is_some(),
        }
    }

    pub fn matches(&self, column: Column, rec: &Record) -> bool {
        match self {
            ColumnFilter::Text(q) => {
                let q = q.trim().to_lowercase();
                q.is_empty() || column.cell(rec).to_lowercase().contains(&q)
            }
            ColumnFilter::Range { min, max } => {
                if min.is_none() && max.is_none() {
                    return true;
                }
                let Some(v) = column.numeric(rec) else {
                    return false;
                };
                min.map_or(true, |lo| v >= lo) && max.map_or(true, |hi| v <= hi)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column: Column,
    pub descending: bool,
}

/// Grid UI state: filters and sort order. Never touches the filtered view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridState {
    pub filters: BTreeMap<Column, ColumnFilter>,
    /// Raw filter box contents, kept so the text survives between frames.
    inputs: BTreeMap<Column, String>,
    pub sort: Option<SortKey>,
}

impl GridState {
    pub fn input(&self, column: Column) -> &str {
        self.inputs.get(&column).map_or("", String::as_str)
    }

    /// Store the filter box text for `column` and apply the parsed filter.
    pub fn set_input(&mut self, column: Column, text: String) {
        self.set_filter(column, ColumnFilter::from_input(column, &text));
        if text.is_empty() {
            self.inputs.remove(&column);
        } else {
            self.inputs.insert(column, text);
        }
    }

    pub fn set_filter(&mut self, column: Column, filter: ColumnFilter) {
        if filter.is_active() {
            self.filters.insert(column, filter);
        } else {
            self.filters.remove(&column);
        }
    }

    /// Header click: ascending, then descending, then unsorted.
    pub fn cycle_sort(&mut self, column: Column) {
        self.sort = match self.sort {
            Some(SortKey { column: c, descending: false }) if c == column => Some(SortKey {
                column,
                descending: true,
            }),
            Some(SortKey { column: c, descending: true }) if c == column => None,
            _ => Some(SortKey {
                column,
                descending: false,
            }),
        };
    }

    pub fn clear(&mut self) {
        self.filters.clear();
        self.inputs.clear();
        self.sort = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataGrid {
    pub view: FilteredView,
    /// Positions into `view` that pass the grid filters, in display order.
    pub rows: Vec<usize>,
}

impl DataGrid {
    pub fn row(&self, display_index: usize) -> Option<&Record> {
        self.rows
            .get(display_index)
            .and_then(|&pos| self.view.get(pos))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn data_grid(view: &FilteredView, grid: &GridState) -> DataGrid {
    let mut rows: Vec<usize> = (0..view.len())
        .filter(|&pos| {
            view.get(pos).is_some_and(|rec| {
                grid.filters
                    .iter()
                    .all(|(col, filter)| filter.matches(*col, rec))
            })
        })
        .collect();

    if let (Some(key), true) = (grid.sort, rows.len() > 1) {
        // Stable sort keeps dataset order among ties.
        rows.sort_by(|&a, &b| match (view.get(a), view.get(b)) {
            (Some(ra), Some(rb)) => {
                let ord = key.column.compare(ra, rb);
                if key.descending { ord.reverse() } else { ord }
            }
            _ => Ordering::Equal,
        });
    }

    DataGrid {
        view: view.clone(),
        rows,
    }
}
