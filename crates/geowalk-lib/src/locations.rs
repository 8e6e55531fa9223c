//! Saved travel locations.
//!
//! [`LocationList`] keeps locations in insertion order in a doubly linked list
//! whose links are arena indices, so removal from the middle is O(1) once the
//! entry is found and iteration never reorders survivors.

use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::Coordinate;
use crate::search::{self, Named, PatternMatcher, SearchAlgorithm};
use crate::sort::{sort_by, SortAlgorithm};

/// Number of "did you mean" hints attached to an unknown-name error.
const MAX_SUGGESTIONS: usize = 3;

/// A tag attached to a saved location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub id: i64,
    pub label: String,
}

impl Named for Preference {
    fn name(&self) -> &str {
        &self.label
    }
}

/// A named point a user has saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferences: Vec<Preference>,
}

impl TravelLocation {
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            created_at,
            owner: None,
            preferences: Vec::new(),
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    pub fn has_preference(&self, label: &str) -> bool {
        self.preferences
            .iter()
            .any(|preference| preference.label.eq_ignore_ascii_case(label))
    }
}

impl Named for TravelLocation {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Field used to order locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Name,
    Created,
}

impl SortKey {
    /// Ascending comparison on this key.
    ///
    /// Names compare case-insensitively first so "alpha" and "Alpha" sit
    /// together; the case-sensitive order only breaks exact folds.
    pub fn compare(self, a: &TravelLocation, b: &TravelLocation) -> Ordering {
        match self {
            SortKey::Name => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
            SortKey::Created => a.created_at.cmp(&b.created_at),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Name => f.write_str("name"),
            SortKey::Created => f.write_str("created"),
        }
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "created" | "created_at" | "date" => Ok(SortKey::Created),
            _ => Err(Error::UnsupportedAlgorithm {
                kind: "sort key",
                name: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    location: TravelLocation,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Insertion-ordered collection of saved locations.
#[derive(Clone, Default)]
pub struct LocationList {
    slots: Vec<Option<Slot>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl LocationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append a location at the end of the list.
    pub fn add(&mut self, location: TravelLocation) {
        let slot = Slot {
            location,
            prev: self.tail,
            next: None,
        };
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(slot);
                index
            }
            None => {
                self.slots.push(Some(slot));
                self.slots.len() - 1
            }
        };

        match self.tail {
            Some(tail) => self.slot_mut(tail).next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;
    }

    /// Build a location from its parts and append it.
    pub fn add_location(
        &mut self,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        created_at: DateTime<Utc>,
    ) {
        self.add(TravelLocation::new(name, latitude, longitude, created_at));
    }

    /// Unlink the first location whose name matches, ignoring case.
    ///
    /// Returns `false` when nothing matched. The order of the remaining
    /// locations is unchanged.
    pub fn remove_location(&mut self, name: &str) -> bool {
        let Some(index) = self.position(name) else {
            return false;
        };

        let Some(removed) = self.slots[index].take() else {
            return false;
        };
        match removed.prev {
            Some(prev) => self.slot_mut(prev).next = removed.next,
            None => self.head = removed.next,
        }
        match removed.next {
            Some(next) => self.slot_mut(next).prev = removed.prev,
            None => self.tail = removed.prev,
        }

        self.free.push(index);
        self.len -= 1;
        tracing::debug!(name = %removed.location.name, "removed location");
        true
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Locations from first added to last.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    pub fn first(&self) -> Option<&TravelLocation> {
        self.head.map(|index| &self.slot(index).location)
    }

    pub fn last(&self) -> Option<&TravelLocation> {
        self.tail.map(|index| &self.slot(index).location)
    }

    /// First location matching `name` under the selected algorithm.
    ///
    /// A blank or whitespace-only query never matches.
    pub fn search(&self, name: &str, algorithm: SearchAlgorithm) -> Option<&TravelLocation> {
        if name.trim().is_empty() {
            return None;
        }
        search::search(self.iter(), name, algorithm)
    }

    /// Like [`LocationList::search`] with a preconfigured matcher.
    pub fn search_with(&self, matcher: &PatternMatcher) -> Option<&TravelLocation> {
        matcher.find_first(self.iter())
    }

    /// Exact, case-insensitive name lookup.
    pub fn find(&self, name: &str) -> Option<&TravelLocation> {
        let folded = name.to_lowercase();
        self.iter()
            .find(|location| location.name.to_lowercase() == folded)
    }

    /// Exact lookup that reports close names when the lookup fails.
    pub fn resolve(&self, name: &str) -> Result<&TravelLocation> {
        self.find(name).ok_or_else(|| Error::UnknownLocation {
            name: name.to_string(),
            suggestions: search::suggest(self.iter(), name, MAX_SUGGESTIONS),
        })
    }

    /// Locations saved by `owner`, in insertion order.
    pub fn owned_by<'a>(&'a self, owner: &'a str) -> impl Iterator<Item = &'a TravelLocation> + 'a {
        self.iter()
            .filter(move |location| location.owner.as_deref() == Some(owner))
    }

    /// A sorted view of the list; the list itself keeps insertion order.
    pub fn sorted<F>(&self, algorithm: SortAlgorithm, mut compare: F) -> Vec<&TravelLocation>
    where
        F: FnMut(&TravelLocation, &TravelLocation) -> Ordering,
    {
        let mut view: Vec<&TravelLocation> = self.iter().collect();
        sort_by(&mut view, algorithm, |a, b| compare(*a, *b));
        view
    }

    fn position(&self, name: &str) -> Option<usize> {
        let folded = name.to_lowercase();
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let slot = self.slot(index);
            if slot.location.name.to_lowercase() == folded {
                return Some(index);
            }
            cursor = slot.next;
        }
        None
    }

    fn slot(&self, index: usize) -> &Slot {
        match &self.slots[index] {
            Some(slot) => slot,
            None => unreachable!("linked index {index} points at a free slot"),
        }
    }

    fn slot_mut(&mut self, index: usize) -> &mut Slot {
        match &mut self.slots[index] {
            Some(slot) => slot,
            None => unreachable!("linked index {index} points at a free slot"),
        }
    }
}

impl fmt::Debug for LocationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl FromIterator<TravelLocation> for LocationList {
    fn from_iter<I: IntoIterator<Item = TravelLocation>>(iter: I) -> Self {
        let mut list = LocationList::new();
        list.extend(iter);
        list
    }
}

impl Extend<TravelLocation> for LocationList {
    fn extend<I: IntoIterator<Item = TravelLocation>>(&mut self, iter: I) {
        for location in iter {
            self.add(location);
        }
    }
}

impl<'a> IntoIterator for &'a LocationList {
    type Item = &'a TravelLocation;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over a [`LocationList`].
pub struct Iter<'a> {
    list: &'a LocationList,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a TravelLocation;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let slot = self.list.slot(index);
        self.cursor = slot.next;
        self.remaining -= 1;
        Some(&slot.location)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// Load saved locations from a JSON array.
pub fn load_locations(path: &Path) -> Result<LocationList> {
    let raw = fs::read_to_string(path)?;
    let locations: Vec<TravelLocation> =
        serde_json::from_str(&raw).map_err(|source| Error::LocationsParse {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(path = %path.display(), count = locations.len(), "loaded locations");
    Ok(locations.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap()
    }

    fn sample() -> LocationList {
        let mut list = LocationList::new();
        list.add_location("Galle Fort", 6.0269, 80.2170, at(3));
        list.add_location("Kandy", 7.2906, 80.6337, at(1));
        list.add_location("Ella", 6.8667, 81.0466, at(2));
        list
    }

    fn names(list: &LocationList) -> Vec<&str> {
        list.iter().map(|l| l.name.as_str()).collect()
    }

    #[test]
    fn removal_from_the_middle_keeps_order() {
        let mut list = sample();
        assert!(list.remove_location("kandy"));
        assert_eq!(names(&list), vec!["Galle Fort", "Ella"]);
        assert_eq!(list.len(), 2);
        assert!(!list.remove_location("Kandy"));
    }

    #[test]
    fn removing_head_and_tail_relinks_ends() {
        let mut list = sample();
        assert!(list.remove_location("Galle Fort"));
        assert!(list.remove_location("ELLA"));
        assert_eq!(list.first().map(|l| l.name.as_str()), Some("Kandy"));
        assert_eq!(list.last().map(|l| l.name.as_str()), Some("Kandy"));

        assert!(list.remove_location("Kandy"));
        assert!(list.is_empty());
        assert!(list.first().is_none());
        assert_eq!(list.iter().count(), 0);
    }

    #[test]
    fn freed_slots_are_reused_at_the_tail() {
        let mut list = sample();
        list.remove_location("Galle Fort");
        list.add_location("Jaffna", 9.6615, 80.0255, at(4));
        assert_eq!(names(&list), vec!["Kandy", "Ella", "Jaffna"]);
        assert_eq!(list.slots.len(), 3);
    }

    #[test]
    fn blank_search_never_matches() {
        let list = sample();
        assert!(list.search("   ", SearchAlgorithm::Kmp).is_none());
        assert!(list.search("", SearchAlgorithm::Fuzzy).is_none());
    }

    #[test]
    fn search_returns_first_in_order() {
        let list = sample();
        let hit = list.search("l", SearchAlgorithm::BoyerMoore).expect("match");
        assert_eq!(hit.name, "Galle Fort");
    }

    #[test]
    fn resolve_reports_suggestions() {
        let list = sample();
        assert_eq!(list.resolve("kandy").unwrap().name, "Kandy");
        match list.resolve("Kandyy") {
            Err(Error::UnknownLocation { suggestions, .. }) => {
                assert_eq!(suggestions, vec!["Kandy".to_string()]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn owned_by_filters_without_ambient_user() {
        let mut list = sample();
        list.add(TravelLocation::new("Sigiriya", 7.957, 80.7603, at(5)).with_owner("amaya"));
        let owned: Vec<_> = list.owned_by("amaya").map(|l| l.name.as_str()).collect();
        assert_eq!(owned, vec!["Sigiriya"]);
        assert_eq!(list.owned_by("nobody").count(), 0);
    }

    #[test]
    fn sorted_view_leaves_list_untouched() {
        let list = sample();
        let by_created = list.sorted(SortAlgorithm::Heap, |a, b| SortKey::Created.compare(a, b));
        let view: Vec<_> = by_created.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(view, vec!["Kandy", "Ella", "Galle Fort"]);
        assert_eq!(names(&list), vec!["Galle Fort", "Kandy", "Ella"]);
    }

    #[test]
    fn name_key_ignores_case() {
        let list: LocationList = ["beta", "Alpha", "alpha"]
            .into_iter()
            .map(|name| TravelLocation::new(name, 0.0, 0.0, at(1)))
            .collect();
        let sorted = list.sorted(SortAlgorithm::Quick, |a, b| SortKey::Name.compare(a, b));
        let view: Vec<_> = sorted.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(view, vec!["Alpha", "alpha", "beta"]);
    }

    #[test]
    fn preference_lookup_ignores_case() {
        let mut location = TravelLocation::new("Ella", 6.8667, 81.0466, at(2));
        location.preferences.push(Preference {
            id: 1,
            label: "Hiking".to_string(),
        });
        assert!(location.has_preference("hiking"));
        assert!(!location.has_preference("beach"));

        let hit = search::search(&location.preferences, "HIK", SearchAlgorithm::Kmp);
        assert_eq!(hit.map(|p| p.id), Some(1));
    }
}
