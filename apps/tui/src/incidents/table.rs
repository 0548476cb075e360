use std::cmp::Ordering;

use crate::domain::{IncidentScope, SortKey};
use crate::incidents::record::{IncidentKey, IncidentRecord};
use crate::incidents::store::IncidentSequence;

/// Type keywords that mark a row as industrial. Presentation only.
pub const INDUSTRIAL_KEYWORDS: [&str; 7] = [
    "FIRE",
    "EXPLOSION",
    "CHEMICAL",
    "HAZMAT",
    "INDUSTRIAL",
    "REFINERY",
    "PLANT",
];

/// How the incident table is currently configured.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableView {
    pub sort_key: SortKey,
    /// Lift the display bound and show the whole sequence.
    pub show_all_history: bool,
    /// Read the full sequence instead of the priority one.
    pub show_all_incidents: bool,
    pub filter: String,
}

impl TableView {
    pub const fn scope(&self) -> IncidentScope {
        if self.show_all_incidents {
            IncidentScope::Full
        } else {
            IncidentScope::Priority
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncidentRow<'a> {
    pub record: &'a IncidentRecord,
    pub industrial: bool,
}

/// A map marker for one displayed row.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentMarker {
    pub key: IncidentKey,
    pub lat: f64,
    pub lon: f64,
    pub industrial: bool,
}

pub fn is_industrial(record: &IncidentRecord) -> bool {
    record.incident_type.as_deref().is_some_and(|kind| {
        let upper = kind.to_uppercase();
        INDUSTRIAL_KEYWORDS
            .iter()
            .any(|keyword| upper.contains(keyword))
    })
}

/// Sorted view over the head of `sequence` (or all of it with `show_all`).
/// The sequence itself is never reordered.
pub fn render<'a>(
    sequence: &'a IncidentSequence,
    scope: IncidentScope,
    sort_key: SortKey,
    show_all: bool,
) -> Vec<IncidentRow<'a>> {
    render_filtered(sequence, scope, sort_key, show_all, "")
}

/// [`render`] with a case-insensitive substring filter applied to the bounded
/// slice. An empty filter keeps every row.
pub fn render_filtered<'a>(
    sequence: &'a IncidentSequence,
    scope: IncidentScope,
    sort_key: SortKey,
    show_all: bool,
    filter: &str,
) -> Vec<IncidentRow<'a>> {
    let bound = if show_all {
        usize::MAX
    } else {
        scope.display_bound()
    };
    let needle = filter.trim().to_lowercase();

    let mut rows = sequence
        .iter()
        .take(bound)
        .filter(|record| needle.is_empty() || matches_filter(record, &needle))
        .map(|record| IncidentRow {
            record,
            industrial: is_industrial(record),
        })
        .collect::<Vec<_>>();

    sort_rows(&mut rows, sort_key);
    rows
}

pub fn render_view<'a>(sequence: &'a IncidentSequence, view: &TableView) -> Vec<IncidentRow<'a>> {
    render_filtered(
        sequence,
        view.scope(),
        view.sort_key,
        view.show_all_history,
        &view.filter,
    )
}

pub fn sort_rows(rows: &mut [IncidentRow<'_>], sort_key: SortKey) {
    rows.sort_by(|a, b| compare(a.record, b.record, sort_key));
}

fn compare(a: &IncidentRecord, b: &IncidentRecord, sort_key: SortKey) -> Ordering {
    match sort_key {
        // Descending, so records without a time sink to the bottom.
        SortKey::Time => sort_text(b.time.as_deref()).cmp(sort_text(a.time.as_deref())),
        SortKey::Type => {
            sort_text(a.incident_type.as_deref()).cmp(sort_text(b.incident_type.as_deref()))
        }
        SortKey::Location => {
            sort_text(a.location.as_deref()).cmp(sort_text(b.location.as_deref()))
        }
    }
}

fn sort_text(field: Option<&str>) -> &str {
    field.unwrap_or("")
}

fn matches_filter(record: &IncidentRecord, needle: &str) -> bool {
    [
        &record.time,
        &record.agency,
        &record.incident_type,
        &record.location,
    ]
    .into_iter()
    .flatten()
    .any(|value| value.to_lowercase().contains(needle))
}

/// Markers for the rows currently on screen, skipping rows without trusted
/// coordinates.
pub fn incident_markers(rows: &[IncidentRow<'_>]) -> Vec<IncidentMarker> {
    rows.iter()
        .filter_map(|row| {
            let (lat, lon) = row.record.coordinates()?;
            Some(IncidentMarker {
                key: row.record.key(),
                lat,
                lon,
                industrial: row.industrial,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(time: Option<&str>, kind: &str, location: &str) -> IncidentRecord {
        IncidentRecord {
            time: time.map(str::to_string),
            incident_type: Some(kind.to_string()),
            location: Some(location.to_string()),
            ..IncidentRecord::default()
        }
    }

    fn sequence_of(records: Vec<IncidentRecord>) -> IncidentSequence {
        let mut sequence = IncidentSequence::new();
        // merge prepends, so feed in reverse to keep the listed order
        sequence.merge(records.into_iter().rev());
        sequence
    }

    #[test]
    fn time_sort_is_descending_with_missing_last() {
        let sequence = sequence_of(vec![
            record(Some("08:00"), "A", "x"),
            record(None, "B", "y"),
            record(Some("09:15"), "C", "z"),
        ]);

        let rows = render(&sequence, IncidentScope::Priority, SortKey::Time, false);
        let times = rows.iter().map(|row| row.record.time.as_deref()).collect::<Vec<_>>();

        assert_eq!(times, vec![Some("09:15"), Some("08:00"), None]);
    }

    #[test]
    fn empty_time_string_sorts_like_missing() {
        let sequence = sequence_of(vec![
            record(Some("08:00"), "A", "x"),
            record(Some(""), "B", "y"),
            record(Some("09:15"), "C", "z"),
        ]);

        let rows = render(&sequence, IncidentScope::Priority, SortKey::Time, false);
        let times = rows.iter().map(|row| row.record.time_text()).collect::<Vec<_>>();

        assert_eq!(times, vec!["09:15", "08:00", ""]);
    }

    #[test]
    fn type_and_location_sort_ascending() {
        let sequence = sequence_of(vec![
            record(Some("1"), "Medical", "B St"),
            record(Some("2"), "Alarm", "C St"),
            record(Some("3"), "Fire", "A St"),
        ]);

        let by_type = render(&sequence, IncidentScope::Full, SortKey::Type, false);
        assert_eq!(
            by_type.iter().map(|r| r.record.type_text()).collect::<Vec<_>>(),
            vec!["Alarm", "Fire", "Medical"]
        );

        let by_location = render(&sequence, IncidentScope::Full, SortKey::Location, false);
        assert_eq!(
            by_location
                .iter()
                .map(|r| r.record.location_text())
                .collect::<Vec<_>>(),
            vec!["A St", "B St", "C St"]
        );
    }

    #[test]
    fn industrial_classification_matches_keywords() {
        assert!(is_industrial(&record(None, "Structure Fire", "x")));
        assert!(is_industrial(&record(None, "hazmat spill", "x")));
        assert!(!is_industrial(&record(None, "Medical Call", "x")));
        assert!(!is_industrial(&IncidentRecord::default()));
    }

    #[test]
    fn bounds_apply_per_scope_unless_show_all() {
        let records = (0..150)
            .map(|i| record(Some(&format!("{i:03}")), "Alarm", &format!("{i} Main")))
            .collect::<Vec<_>>();
        let sequence = sequence_of(records);

        assert_eq!(
            render(&sequence, IncidentScope::Priority, SortKey::Time, false).len(),
            50
        );
        assert_eq!(
            render(&sequence, IncidentScope::Full, SortKey::Time, false).len(),
            100
        );
        assert_eq!(
            render(&sequence, IncidentScope::Full, SortKey::Time, true).len(),
            150
        );
    }

    #[test]
    fn bound_takes_newest_entries() {
        let records = (0..60)
            .map(|i| record(Some(&format!("{i:03}")), "Alarm", &format!("{i} Main")))
            .collect::<Vec<_>>();
        // head of the sequence is "000"
        let sequence = sequence_of(records);
        let rows = render(&sequence, IncidentScope::Priority, SortKey::Time, false);

        assert_eq!(rows.first().map(|r| r.record.time_text()), Some("049"));
        assert_eq!(rows.last().map(|r| r.record.time_text()), Some("000"));
    }

    #[test]
    fn filter_narrows_without_touching_sequence() {
        let sequence = sequence_of(vec![
            record(Some("1"), "Fire", "Channelview Dr"),
            record(Some("2"), "Medical", "Main St"),
        ]);
        let before = sequence.iter().cloned().collect::<Vec<_>>();

        let rows = render_filtered(
            &sequence,
            IncidentScope::Priority,
            SortKey::Time,
            false,
            "CHANNELVIEW",
        );

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].record.location_text(), "Channelview Dr");
        assert_eq!(sequence.iter().cloned().collect::<Vec<_>>(), before);
    }

    #[test]
    fn markers_follow_displayed_rows() {
        let mut located = record(Some("1"), "Fire", "A");
        located.lat = Some(29.8);
        located.lon = Some(-95.1);
        located.has_location = true;
        let mut unlocated = record(Some("2"), "Fire", "B");
        unlocated.lat = Some(29.8);
        unlocated.lon = Some(-95.1);

        let sequence = sequence_of(vec![located, unlocated]);
        let rows = render(&sequence, IncidentScope::Priority, SortKey::Time, false);
        let markers = incident_markers(&rows);

        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].key.location.as_deref(), Some("A"));
        assert!(markers[0].industrial);

        let filtered = render_filtered(&sequence, IncidentScope::Priority, SortKey::Time, false, "B");
        assert!(incident_markers(&filtered).is_empty());
    }

    #[test]
    fn view_scope_follows_toggle() {
        let mut view = TableView::default();
        assert_eq!(view.scope(), IncidentScope::Priority);
        view.show_all_incidents = true;
        assert_eq!(view.scope(), IncidentScope::Full);
    }
}
