use serde::{Deserialize, Serialize};

/// How a column's cell text is interpreted for sorting.
///
/// Declared per header through its `data-type` attribute; anything
/// unrecognized sorts as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    String,
    Numeric,
    Date,
}

impl ColumnType {
    /// Parse a `data-type` attribute value, defaulting to `String`.
    pub fn from_attr(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("numeric") => Self::Numeric,
            Some("date") => Self::Date,
            _ => Self::String,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Numeric => "numeric",
            Self::Date => "date",
        }
    }
}

/// A header cell of the inventory table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Stable identifier (`data-column-id`), independent of position
    pub id: String,
    /// Header text as rendered, possibly including a sort glyph
    #[serde(default)]
    pub label: String,
    #[serde(default, rename = "type")]
    pub kind: ColumnType,
    /// Carries the `.sortable` marker
    #[serde(default = "default_true")]
    pub sortable: bool,
    /// False when the header is styled `display: none`
    #[serde(default = "default_true")]
    pub displayed: bool,
}

fn default_true() -> bool {
    true
}

impl Column {
    /// A displayed, sortable column whose label equals its id.
    pub fn new(id: impl Into<String>, kind: ColumnType) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            kind,
            sortable: true,
            displayed: true,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    #[must_use]
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }
}

/// A clicked (or looked-up) header as it stands in the live table:
/// identifier, current position and declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRef {
    pub column_id: String,
    pub index: usize,
    pub kind: ColumnType,
}
