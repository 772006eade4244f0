use std::fmt;

/// Numeric schema version carried by a flow snapshot.
///
/// Version tags are strings on the wire (`"5"`, `"6"`, `"6.1"`). A missing or
/// unparseable tag is treated as a legacy flow.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct SchemaVersion(Option<f64>);

impl SchemaVersion {
    /// First version that declares explicit start events and makes result
    /// merging opt-in.
    pub const V6: f64 = 6.0;

    pub fn parse(tag: Option<&str>) -> Self {
        Self(tag.and_then(|t| t.trim().parse::<f64>().ok()))
    }

    pub fn is_at_least(&self, threshold: f64) -> bool {
        matches!(self.0, Some(v) if v >= threshold)
    }

    pub fn is_at_least_v6(&self) -> bool {
        self.is_at_least(Self::V6)
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "legacy"),
        }
    }
}
