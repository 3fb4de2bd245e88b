//! Column sorting.
//!
//! Cell text is turned into a [`SortValue`] according to the column's
//! declared type, then the visible rows are stably reordered. Rows that are
//! hidden or malformed keep their relative order and stay ahead of the
//! sorted block, which is where re-appending the sorted rows leaves them.

use std::cmp::Ordering;
use std::sync::LazyLock;

use chrono::{Duration, NaiveDate};
use regex::Regex;

use crate::model::TableModel;
use crate::types::{Column, ColumnType, HeaderRef, Row, SortDirection, SortState};

pub const ASC_GLYPH: &str = "↑";
pub const DESC_GLYPH: &str = "↓";
pub const ASC_CLASS: &str = "sorted-asc";
pub const DESC_CLASS: &str = "sorted-desc";

/// Leading float syntax accepted by JavaScript's `parseFloat`.
static FLOAT_PREFIX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)").ok()
});

/// `MM/DD/YYYY` anywhere in the cell.
static US_DATE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"([0-9]{2})/([0-9]{2})/([0-9]{4})").ok());

/// Date that missing or unreadable dates sort as.
pub fn sentinel_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2999, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Comparable form of a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

impl SortValue {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Extract the sort key of a cell. `None` in, `None` out: a missing cell
/// has no key at all.
pub fn sort_value(cell: Option<&str>, kind: ColumnType) -> Option<SortValue> {
    let text = cell?.trim();

    if text.is_empty() || text.eq_ignore_ascii_case("n/a") {
        return Some(match kind {
            ColumnType::Numeric => SortValue::Number(f64::NEG_INFINITY),
            ColumnType::Date => SortValue::Date(sentinel_date()),
            ColumnType::String => SortValue::Text(String::new()),
        });
    }

    Some(match kind {
        ColumnType::Numeric => SortValue::Number(parse_number(text)),
        ColumnType::Date => SortValue::Date(parse_us_date(text).unwrap_or_else(sentinel_date)),
        ColumnType::String => SortValue::Text(text.to_lowercase()),
    })
}

/// Strip thousands separators and parse the leading number; anything
/// unreadable is 0.
pub fn parse_number(text: &str) -> f64 {
    let cleaned = text.replace(',', "");
    let Some(re) = FLOAT_PREFIX.as_ref() else {
        return 0.0;
    };
    let value = re
        .find(cleaned.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0);
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// First `MM/DD/YYYY` in `text`, with out-of-range months and days rolling
/// over into neighbouring months.
pub fn parse_us_date(text: &str) -> Option<NaiveDate> {
    let caps = US_DATE.as_ref()?.captures(text)?;
    let month: i64 = caps.get(1)?.as_str().parse().ok()?;
    let day: i64 = caps.get(2)?.as_str().parse().ok()?;
    let mut year: i64 = caps.get(3)?.as_str().parse().ok()?;
    // Years 0..=99 land in the 1900s.
    if year <= 99 {
        year += 1900;
    }
    calendar_date(year, month, day)
}

fn calendar_date(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    let month0 = month - 1;
    let year = i32::try_from(year + month0.div_euclid(12)).ok()?;
    let month = u32::try_from(month0.rem_euclid(12) + 1).ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_signed(Duration::days(day - 1))
}

/// Order two keys. Missing keys come first whichever way the column is
/// sorted; everything else flips with the direction.
pub fn compare_sort_values(
    a: Option<&SortValue>,
    b: Option<&SortValue>,
    direction: SortDirection,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => {
            let ord = a.compare(b);
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        }
    }
}

/// Reorder the visible well-formed rows by `state`.
pub fn sort_rows(model: &mut TableModel, state: &SortState, min_cells: usize) {
    if state.column.is_empty() {
        tracing::debug!("skipping sort, no column selected");
        return;
    }

    let rows = std::mem::take(model.rows_mut());
    let mut stationary = Vec::new();
    let mut sorted = Vec::new();
    let mut keys = Vec::new();

    for row in rows {
        if row.hidden || !row.is_well_formed(min_cells) {
            stationary.push(row);
        } else {
            keys.push(sort_value(row.cell(state.column_index), state.column_type));
            sorted.push(row);
        }
    }

    let mut keyed: Vec<(Option<SortValue>, Row)> = keys.into_iter().zip(sorted).collect();
    keyed.sort_by(|(a, _), (b, _)| compare_sort_values(a.as_ref(), b.as_ref(), state.direction));

    tracing::debug!(
        column = %state.column,
        direction = ?state.direction,
        rows = keyed.len(),
        "sorted rows"
    );

    stationary.extend(keyed.into_iter().map(|(_, row)| row));
    *model.rows_mut() = stationary;
}

impl SortState {
    /// Sort state for `header`, ascending.
    pub fn ascending(header: &HeaderRef) -> Self {
        Self {
            column: header.column_id.clone(),
            direction: SortDirection::Asc,
            column_index: header.index,
            column_type: header.kind,
        }
    }

    /// Default sort: `default_column` ascending, or the first column as
    /// text when that header is gone.
    pub fn default_for(model: &TableModel, default_column: &str) -> Self {
        match model.sortable_header(default_column) {
            Some(header) => Self::ascending(&header),
            None => Self {
                column: default_column.to_string(),
                direction: SortDirection::Asc,
                column_index: 0,
                column_type: ColumnType::String,
            },
        }
    }

    /// State after the user clicks `header`: a new column starts ascending,
    /// the active column flips. Position and type always come from the
    /// clicked header.
    #[must_use]
    pub fn clicked(&self, header: &HeaderRef) -> Self {
        let direction = if self.column == header.column_id {
            self.direction.flipped()
        } else {
            SortDirection::Asc
        };
        Self {
            direction,
            ..Self::ascending(header)
        }
    }

    /// Re-derive the cached position and type from the live headers.
    /// `None` when no sortable header carries the column any more.
    #[must_use]
    pub fn resolved(&self, model: &TableModel) -> Option<Self> {
        let header = model.sortable_header(&self.column)?;
        Some(Self {
            direction: self.direction,
            ..Self::ascending(&header)
        })
    }
}

/// Glyph and state class of one sortable header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderIndicator {
    pub column_id: String,
    pub glyph: &'static str,
    pub class: Option<&'static str>,
}

/// Indicators for every sortable header; only the active one is marked.
pub fn header_indicators(columns: &[Column], state: &SortState) -> Vec<HeaderIndicator> {
    columns
        .iter()
        .filter(|c| c.sortable)
        .map(|c| {
            let (glyph, class) = if c.id == state.column {
                match state.direction {
                    SortDirection::Asc => (ASC_GLYPH, Some(ASC_CLASS)),
                    SortDirection::Desc => (DESC_GLYPH, Some(DESC_CLASS)),
                }
            } else {
                ("", None)
            };
            HeaderIndicator {
                column_id: c.id.clone(),
                glyph,
                class,
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_number_prefix() {
        assert_eq!(parse_number("1,234"), 1234.0);
        assert_eq!(parse_number("12.5 kg"), 12.5);
        assert_eq!(parse_number("-3e2"), -300.0);
        assert_eq!(parse_number(".5"), 0.5);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number("Infinity"), f64::INFINITY);
    }

    #[test]
    fn test_parse_us_date() {
        assert_eq!(parse_us_date("01/15/2024"), Some(date(2024, 1, 15)));
        assert_eq!(parse_us_date("exp 12/31/2025 lot"), Some(date(2025, 12, 31)));
        assert_eq!(parse_us_date("2024-01-15"), None);
        assert_eq!(parse_us_date("1/5/2024"), None);
    }

    #[test]
    fn test_parse_us_date_rolls_over() {
        assert_eq!(parse_us_date("13/01/2024"), Some(date(2025, 1, 1)));
        assert_eq!(parse_us_date("02/30/2024"), Some(date(2024, 3, 1)));
        assert_eq!(parse_us_date("03/00/2024"), Some(date(2024, 2, 29)));
        assert_eq!(parse_us_date("00/10/2024"), Some(date(2023, 12, 10)));
    }

    #[test]
    fn test_blank_values() {
        assert_eq!(
            sort_value(Some(" N/A "), ColumnType::Numeric),
            Some(SortValue::Number(f64::NEG_INFINITY))
        );
        assert_eq!(
            sort_value(Some(""), ColumnType::Date),
            Some(SortValue::Date(sentinel_date()))
        );
        assert_eq!(
            sort_value(Some("n/a"), ColumnType::String),
            Some(SortValue::Text(String::new()))
        );
        assert_eq!(sort_value(None, ColumnType::String), None);
    }

    #[test]
    fn test_missing_keys_first_in_both_directions() {
        let v = SortValue::Text("a".into());
        assert_eq!(
            compare_sort_values(None, Some(&v), SortDirection::Asc),
            Ordering::Less
        );
        assert_eq!(
            compare_sort_values(None, Some(&v), SortDirection::Desc),
            Ordering::Less
        );
    }

    #[test]
    fn test_clicked_transitions() {
        let part = HeaderRef {
            column_id: "Part".into(),
            index: 0,
            kind: ColumnType::String,
        };
        let qty = HeaderRef {
            column_id: "Qty".into(),
            index: 3,
            kind: ColumnType::Numeric,
        };
        let state = SortState::ascending(&part);
        let flipped = state.clicked(&part);
        assert_eq!(flipped.direction, SortDirection::Desc);
        assert_eq!(flipped.clicked(&part).direction, SortDirection::Asc);

        let other = flipped.clicked(&qty);
        assert_eq!(other.column, "Qty");
        assert_eq!(other.direction, SortDirection::Asc);
        assert_eq!(other.column_index, 3);
        assert_eq!(other.column_type, ColumnType::Numeric);
    }
}
