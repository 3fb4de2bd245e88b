use serde::{Deserialize, Serialize};

use super::ColumnType;

/// The exact-match filter dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterDimension {
    Part,
    Bin,
    Status,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 3] = [Self::Part, Self::Bin, Self::Status];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Part => "part",
            Self::Bin => "bin",
            Self::Status => "status",
        }
    }
}

/// Values of the filter controls.
///
/// Empty strings mean "no filter". `status` is only present for tables that
/// carry a status dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub part: String,
    #[serde(default)]
    pub bin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub text: String,
}

impl FilterState {
    /// Selected value for a dimension, empty when unset.
    pub fn value(&self, dimension: FilterDimension) -> &str {
        match dimension {
            FilterDimension::Part => &self.part,
            FilterDimension::Bin => &self.bin,
            FilterDimension::Status => self.status.as_deref().unwrap_or(""),
        }
    }

    pub fn set_value(&mut self, dimension: FilterDimension, value: impl Into<String>) {
        let value = value.into();
        match dimension {
            FilterDimension::Part => self.part = value,
            FilterDimension::Bin => self.bin = value,
            FilterDimension::Status => self.status = Some(value),
        }
    }

    /// Clear every control, keeping the status slot when the table has one.
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self {
            status: self.status.as_ref().map(|_| String::new()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Current sort column and direction.
///
/// `column_index` and `column_type` are caches of the live header for
/// `column`; they are re-derived whenever the state is restored or a header
/// is clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    pub column: String,
    pub direction: SortDirection,
    #[serde(default)]
    pub column_index: usize,
    #[serde(default)]
    pub column_type: ColumnType,
}
