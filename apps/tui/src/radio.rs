//! Scanner channel selection.
//!
//! Picking a channel is a fixed decision table over the incident's location,
//! agency and type. The channel ids refer to entries in the radio directory
//! served by `/radio-feeds`.

use crate::feeds::RadioFeed;
use crate::incidents::IncidentRecord;

/// East Harris County fire/EMS: Channelview, Sheldon and the ship-channel plants.
pub const AREA_CHANNEL_ID: i64 = 34687;
/// Houston Fire Department dispatch.
pub const FIRE_CHANNEL_ID: i64 = 30735;
/// Houston Police Department dispatch.
pub const POLICE_CHANNEL_ID: i64 = 33476;

/// Place names inside the area channel's coverage.
pub const AREA_KEYWORDS: [&str; 4] = ["CHANNELVIEW", "SHELDON", "BAYWAY", "DECKER"];
pub const FIRE_AGENCIES: [&str; 3] = ["FD", "EMS", "FIRE"];
pub const POLICE_AGENCIES: [&str; 3] = ["PD", "SO", "POLICE"];
pub const HAZARD_KEYWORDS: [&str; 9] = [
    "FIRE",
    "HAZMAT",
    "EXPLOSION",
    "CHEMICAL",
    "SMOKE",
    "LEAK",
    "ODOR",
    "RESCUE",
    "MEDICAL",
];

/// Best channel for `incident`, checked in order:
/// 1. location inside the area channel's coverage,
/// 2. fire/EMS agency or a hazard keyword in the type,
/// 3. police agency,
/// 4. fire channel, then the first directory entry.
///
/// A rule whose channel is missing from `directory` falls through to the next.
pub fn select_channel<'a>(
    incident: &IncidentRecord,
    directory: &'a [RadioFeed],
) -> Option<&'a RadioFeed> {
    let location = upper(incident.location.as_deref());
    let agency = upper(incident.agency.as_deref());
    let kind = upper(incident.incident_type.as_deref());

    let find = |id: i64| directory.iter().find(|feed| feed.id == id);

    let in_area = AREA_KEYWORDS.iter().any(|place| location.contains(place));
    let fire_like = FIRE_AGENCIES.contains(&agency.as_str())
        || HAZARD_KEYWORDS.iter().any(|keyword| kind.contains(keyword));
    let police = POLICE_AGENCIES.contains(&agency.as_str());

    in_area
        .then(|| find(AREA_CHANNEL_ID))
        .flatten()
        .or_else(|| fire_like.then(|| find(FIRE_CHANNEL_ID)).flatten())
        .or_else(|| police.then(|| find(POLICE_CHANNEL_ID)).flatten())
        .or_else(|| find(FIRE_CHANNEL_ID))
        .or_else(|| directory.first())
}

fn upper(value: Option<&str>) -> String {
    value.unwrap_or_default().trim().to_uppercase()
}

/// The radio pane: directory, current channel and the auto-switch toggle.
#[derive(Debug, Clone)]
pub struct RadioState {
    pub feeds: Vec<RadioFeed>,
    pub current: Option<RadioFeed>,
    pub auto_switch: bool,
}

impl Default for RadioState {
    fn default() -> Self {
        Self {
            feeds: Vec::new(),
            current: None,
            auto_switch: true,
        }
    }
}

impl RadioState {
    /// Installs the directory. If nothing is tuned yet, tunes the default
    /// channel (fire, else the first feed).
    pub fn load(&mut self, feeds: Vec<RadioFeed>) {
        self.feeds = feeds;
        let still_listed = self
            .current
            .as_ref()
            .is_some_and(|current| self.feeds.iter().any(|feed| feed.id == current.id));

        if !still_listed {
            self.current = self
                .feeds
                .iter()
                .find(|feed| feed.id == FIRE_CHANNEL_ID)
                .or_else(|| self.feeds.first())
                .cloned();
        }
    }

    pub fn select_by_id(&mut self, id: i64) -> Option<&RadioFeed> {
        let feed = self.feeds.iter().find(|feed| feed.id == id)?.clone();
        self.current = Some(feed);
        self.current.as_ref()
    }

    fn current_index(&self) -> Option<usize> {
        let current = self.current.as_ref()?;
        self.feeds.iter().position(|feed| feed.id == current.id)
    }

    pub fn select_next(&mut self) -> Option<&RadioFeed> {
        if self.feeds.is_empty() {
            return None;
        }
        let index = self
            .current_index()
            .map_or(0, |index| (index + 1) % self.feeds.len());
        self.current = self.feeds.get(index).cloned();
        self.current.as_ref()
    }

    pub fn select_prev(&mut self) -> Option<&RadioFeed> {
        if self.feeds.is_empty() {
            return None;
        }
        let len = self.feeds.len();
        let index = self
            .current_index()
            .map_or(len - 1, |index| (index + len - 1) % len);
        self.current = self.feeds.get(index).cloned();
        self.current.as_ref()
    }

    pub fn toggle_auto_switch(&mut self) -> bool {
        self.auto_switch = !self.auto_switch;
        self.auto_switch
    }

    /// Retunes to the incident's best channel when auto-switch is on. Returns
    /// the new channel if it changed.
    pub fn on_incident_highlighted(&mut self, incident: &IncidentRecord) -> Option<&RadioFeed> {
        if !self.auto_switch {
            return None;
        }

        let chosen = select_channel(incident, &self.feeds)?.clone();
        if self.current.as_ref() == Some(&chosen) {
            return None;
        }

        log::debug!("auto-switching radio to {} ({})", chosen.name, chosen.id);
        self.current = Some(chosen);
        self.current.as_ref()
    }
}
