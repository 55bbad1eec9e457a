use std::collections::BTreeMap;

use serde::Serialize;

use crate::atom::Glosses;

/// Key of the primary sense in a disambiguation source entry.
pub const PRIMARY_KEY: &str = "primary";

/// Closed set of disambiguation markers.
///
/// Apostrophe tags (`de'E`, `tr'V`) and a trailing minus (`lo-`) select an
/// alternate sense of an overloaded two-letter atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Marker {
    /// `'E`
    Emotive,
    /// `'V`
    Verbal,
    /// `'S`
    State,
    /// `'2`
    Second,
    /// `'3`
    Third,
    /// trailing `-`
    Negated,
}

impl Marker {
    pub const ALL: [Marker; 6] = [
        Marker::Emotive,
        Marker::Verbal,
        Marker::State,
        Marker::Second,
        Marker::Third,
        Marker::Negated,
    ];

    /// Marker for an apostrophe tag character.
    #[must_use]
    pub const fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'E' => Some(Marker::Emotive),
            'V' => Some(Marker::Verbal),
            'S' => Some(Marker::State),
            '2' => Some(Marker::Second),
            '3' => Some(Marker::Third),
            _ => None,
        }
    }

    /// Marker for its key in a vocabulary source (`"E"`, `"-"`, ...).
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "-" => Some(Marker::Negated),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(tag), None) => Self::from_tag(tag),
                    _ => None,
                }
            }
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Marker::Emotive => "E",
            Marker::Verbal => "V",
            Marker::State => "S",
            Marker::Second => "2",
            Marker::Third => "3",
            Marker::Negated => "-",
        }
    }

    /// Suffix as written after the atom.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Marker::Emotive => "'E",
            Marker::Verbal => "'V",
            Marker::State => "'S",
            Marker::Second => "'2",
            Marker::Third => "'3",
            Marker::Negated => "-",
        }
    }

    /// Splits a token into its base spelling and marker.
    ///
    /// An apostrophe tag outside the closed set is stripped and yields no marker,
    /// so the caller falls back to the primary sense.
    #[must_use]
    pub fn split(token: &str) -> (&str, Option<Self>) {
        if let Some((base, tag)) = token.split_once('\'') {
            let mut chars = tag.chars();
            let marker = match (chars.next(), chars.next()) {
                (Some(tag), None) => Self::from_tag(tag),
                _ => None,
            };
            return (base, marker);
        }
        match token.strip_suffix('-') {
            Some(base) if !base.is_empty() => (base, Some(Marker::Negated)),
            _ => (token, None),
        }
    }
}

/// Primary sense plus marker-specific alternates for one atom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisambiguationEntry {
    primary: Glosses,
    alternates: BTreeMap<Marker, Glosses>,
}

impl DisambiguationEntry {
    pub(crate) fn new(primary: Glosses, alternates: BTreeMap<Marker, Glosses>) -> Self {
        Self {
            primary,
            alternates,
        }
    }

    #[must_use]
    pub fn primary(&self) -> &Glosses {
        &self.primary
    }

    pub fn alternates(&self) -> impl Iterator<Item = (Marker, &Glosses)> {
        self.alternates
            .iter()
            .map(|(marker, glosses)| (*marker, glosses))
    }

    /// Alternate for `marker` when recognized for this atom, primary otherwise.
    #[must_use]
    pub fn select(&self, marker: Option<Marker>) -> &Glosses {
        marker
            .and_then(|marker| self.alternates.get(&marker))
            .unwrap_or(&self.primary)
    }
}

/// Marker-sensitive alternate meanings for overloaded two-letter atoms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisambiguationTable {
    entries: BTreeMap<String, DisambiguationEntry>,
}

impl DisambiguationTable {
    pub(crate) fn insert(&mut self, atom: String, entry: DisambiguationEntry) {
        self.entries.insert(atom, entry);
    }

    /// Sense selected by `marker`, or `None` when the atom is not handled here.
    #[must_use]
    pub fn lookup(&self, atom: &str, marker: Option<Marker>) -> Option<&Glosses> {
        self.entries.get(atom).map(|entry| entry.select(marker))
    }

    #[must_use]
    pub fn contains(&self, atom: &str) -> bool {
        self.entries.contains_key(atom)
    }

    #[must_use]
    pub fn entry(&self, atom: &str) -> Option<&DisambiguationEntry> {
        self.entries.get(atom)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DisambiguationEntry)> {
        self.entries
            .iter()
            .map(|(atom, entry)| (atom.as_str(), entry))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn glosses(sense: &str) -> Glosses {
        let raw = [("en".to_string(), sense.to_string())].into_iter().collect();
        Glosses::from_sense_strings(&raw)
    }

    fn table() -> DisambiguationTable {
        let mut table = DisambiguationTable::default();
        let alternates = [(Marker::Emotive, glosses("death"))].into_iter().collect();
        table.insert(
            "de".to_string(),
            DisambiguationEntry::new(glosses("decide"), alternates),
        );
        let alternates = [(Marker::Negated, glosses("lose"))].into_iter().collect();
        table.insert(
            "lo".to_string(),
            DisambiguationEntry::new(glosses("love"), alternates),
        );
        table
    }

    fn primary(table: &DisambiguationTable, atom: &str, marker: Option<Marker>) -> Option<String> {
        table
            .lookup(atom, marker)
            .and_then(|g| g.primary("en", "en"))
            .map(str::to_string)
    }

    #[test]
    fn splits_markers() {
        assert_eq!(Marker::split("de'E"), ("de", Some(Marker::Emotive)));
        assert_eq!(Marker::split("lo-"), ("lo", Some(Marker::Negated)));
        assert_eq!(Marker::split("tr'V"), ("tr", Some(Marker::Verbal)));
        assert_eq!(Marker::split("de'Q"), ("de", None));
        assert_eq!(Marker::split("de"), ("de", None));
        assert_eq!(Marker::split("-"), ("-", None));
    }

    #[test]
    fn marker_selects_alternate_and_absence_selects_primary() {
        let table = table();
        assert_eq!(primary(&table, "de", None).as_deref(), Some("decide"));
        assert_eq!(primary(&table, "de", Some(Marker::Emotive)).as_deref(), Some("death"));
        assert_eq!(primary(&table, "lo", Some(Marker::Negated)).as_deref(), Some("lose"));
    }

    #[test]
    fn unrecognized_marker_falls_back_to_primary() {
        let table = table();
        assert_eq!(primary(&table, "lo", Some(Marker::Verbal)).as_deref(), Some("love"));
    }

    #[test]
    fn unknown_atom_is_not_handled() {
        assert!(table().lookup("co", None).is_none());
    }

    #[test]
    fn source_keys_round_trip() {
        for marker in Marker::ALL {
            assert_eq!(Marker::from_key(marker.key()), Some(marker));
        }
        assert_eq!(Marker::from_key("primary"), None);
        assert_eq!(Marker::from_key("Q"), None);
    }
}
