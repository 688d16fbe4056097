//! Column access for the estimator.

/// A borrowed column: continuous values or a binary indicator.
#[derive(Debug, Clone, Copy)]
pub enum ColumnRef<'a> {
    Numeric(&'a [f64]),
    Indicator(&'a [bool]),
}

impl<'a> ColumnRef<'a> {
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(v) => v.len(),
            Self::Indicator(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values as floats; indicators become 0.0 / 1.0.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            Self::Numeric(v) => v.to_vec(),
            Self::Indicator(v) => v.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect(),
        }
    }
}

/// Anything the estimator can read named columns from.
pub trait Dataset {
    fn n_rows(&self) -> usize;
    fn column(&self, name: &str) -> Option<ColumnRef<'_>>;
}

/// Owned named columns. Handy for ad-hoc estimation outside the hub runner.
#[derive(Debug, Clone, Default)]
pub struct ColumnTable {
    columns: Vec<(String, OwnedColumn)>,
}

#[derive(Debug, Clone)]
enum OwnedColumn {
    Numeric(Vec<f64>),
    Indicator(Vec<bool>),
}

impl ColumnTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_numeric(mut self, name: &str, values: Vec<f64>) -> Self {
        self.columns
            .push((name.to_string(), OwnedColumn::Numeric(values)));
        self
    }

    pub fn with_indicator(mut self, name: &str, values: Vec<bool>) -> Self {
        self.columns
            .push((name.to_string(), OwnedColumn::Indicator(values)));
        self
    }
}

impl Dataset for ColumnTable {
    fn n_rows(&self) -> usize {
        self.columns
            .first()
            .map(|(_, c)| match c {
                OwnedColumn::Numeric(v) => v.len(),
                OwnedColumn::Indicator(v) => v.len(),
            })
            .unwrap_or(0)
    }

    fn column(&self, name: &str) -> Option<ColumnRef<'_>> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| match c {
                OwnedColumn::Numeric(v) => ColumnRef::Numeric(v),
                OwnedColumn::Indicator(v) => ColumnRef::Indicator(v),
            })
    }
}
