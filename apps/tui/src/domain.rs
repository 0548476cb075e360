/// Column the incident table is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Time,
    Type,
    Location,
}

impl SortKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Type => "type",
            Self::Location => "location",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "time" => Some(Self::Time),
            "type" => Some(Self::Type),
            "location" => Some(Self::Location),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Time => "Time",
            Self::Type => "Type",
            Self::Location => "Location",
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Time => Self::Type,
            Self::Type => Self::Location,
            Self::Location => Self::Time,
        }
    }
}

/// Which of the two incident sequences a view reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IncidentScope {
    /// Incidents the upstream feed classifies as high-severity.
    #[default]
    Priority,
    /// Every incident the feed returned, unfiltered.
    Full,
}

impl IncidentScope {
    /// Rows shown when "show all history" is off.
    pub const fn display_bound(self) -> usize {
        match self {
            Self::Priority => 50,
            Self::Full => 100,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Priority => "Priority",
            Self::Full => "All",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_cycles_through_every_column() {
        let mut key = SortKey::default();
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(key);
            key = key.next();
        }
        assert_eq!(key, SortKey::Time);
        assert_eq!(seen, vec![SortKey::Time, SortKey::Type, SortKey::Location]);
    }

    #[test]
    fn sort_key_parse_is_case_insensitive() {
        assert_eq!(SortKey::parse(" Location "), Some(SortKey::Location));
        assert_eq!(SortKey::parse("agency"), None);
    }

    #[test]
    fn scopes_have_distinct_bounds() {
        assert_eq!(IncidentScope::Priority.display_bound(), 50);
        assert_eq!(IncidentScope::Full.display_bound(), 100);
    }
}
