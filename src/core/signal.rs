//! Signals and the catalog they are drawn from.
//!
//! A `Signal` is an opaque index into a `SignalCatalog`. The catalog is fixed
//! at startup; the engine never adds or removes signals during a game.

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// One discrete game token (a colored pad in the classic game).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Signal(pub u8);

impl Signal {
    /// Create a signal from its catalog index.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the catalog index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signal({})", self.0)
    }
}

/// The fixed, ordered set of signals a game can emit and accept.
///
/// ```
/// use simon_says::core::{Signal, SignalCatalog};
///
/// let catalog = SignalCatalog::classic();
/// assert_eq!(catalog.len(), 4);
/// assert_eq!(catalog.name(Signal::new(0)), Some("red"));
/// assert_eq!(catalog.find("Blue"), Some(Signal::new(2)));
/// assert_eq!(catalog.find("y"), Some(Signal::new(3)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SignalCatalog {
    names: Vec<String>,
}

impl SignalCatalog {
    /// Minimum number of signals for a playable game.
    pub const MIN_SIGNALS: usize = 2;

    /// Every id must fit in a `Signal`.
    pub const MAX_SIGNALS: usize = u8::MAX as usize;

    /// Build a catalog from display names, in order.
    ///
    /// Signal ids are assigned by position.
    pub fn new<I, S>(names: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        if !(Self::MIN_SIGNALS..=Self::MAX_SIGNALS).contains(&names.len()) {
            return Err(GameError::InvalidCatalogSize(names.len()));
        }

        for (i, name) in names.iter().enumerate() {
            if names[..i].iter().any(|prior| prior.eq_ignore_ascii_case(name)) {
                return Err(GameError::DuplicateSignal(name.clone()));
            }
        }

        Ok(Self { names })
    }

    /// The four pads of the classic game: red, green, blue, yellow.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            names: ["red", "green", "blue", "yellow"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Number of signals (the cardinality C).
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false for a validated catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Check that a signal belongs to this catalog.
    #[must_use]
    pub fn contains(&self, signal: Signal) -> bool {
        signal.index() < self.names.len()
    }

    /// Signal at a catalog position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Signal> {
        (index < self.names.len()).then(|| Signal(index as u8))
    }

    /// Display name of a signal.
    #[must_use]
    pub fn name(&self, signal: Signal) -> Option<&str> {
        self.names.get(signal.index()).map(String::as_str)
    }

    /// Display name, falling back to the signal's debug form.
    #[must_use]
    pub fn label(&self, signal: Signal) -> String {
        self.name(signal)
            .map(str::to_string)
            .unwrap_or_else(|| signal.to_string())
    }

    /// Look up a signal by name, ignoring case.
    ///
    /// A single character also matches when exactly one name starts with it.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<Signal> {
        let name = name.trim();
        if let Some(i) = self.names.iter().position(|n| n.eq_ignore_ascii_case(name)) {
            return Some(Signal(i as u8));
        }

        let mut chars = name.chars();
        let (Some(first), None) = (chars.next(), chars.next()) else {
            return None;
        };
        let first = first.to_ascii_lowercase();

        let mut matches = self
            .names
            .iter()
            .enumerate()
            .filter(|(_, n)| n.chars().next().map(|c| c.to_ascii_lowercase()) == Some(first));

        match (matches.next(), matches.next()) {
            (Some((i, _)), None) => Some(Signal(i as u8)),
            _ => None,
        }
    }

    /// Like `find`, but reports what was not found.
    pub fn parse(&self, name: &str) -> Result<Signal, GameError> {
        self.find(name)
            .ok_or_else(|| GameError::UnknownSignal(name.trim().to_string()))
    }

    /// Iterate over all signals in catalog order.
    pub fn signals(&self) -> impl Iterator<Item = Signal> + '_ {
        (0..self.names.len()).map(|i| Signal(i as u8))
    }

    /// Render a sequence using display names.
    #[must_use]
    pub fn describe(&self, sequence: &[Signal]) -> String {
        sequence
            .iter()
            .map(|&s| self.label(s))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl TryFrom<Vec<String>> for SignalCatalog {
    type Error = GameError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<SignalCatalog> for Vec<String> {
    fn from(catalog: SignalCatalog) -> Self {
        catalog.names
    }
}

impl Default for SignalCatalog {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_basics() {
        let s = Signal::new(3);
        assert_eq!(s.index(), 3);
        assert_eq!(format!("{}", s), "Signal(3)");
    }

    #[test]
    fn test_classic_order() {
        let catalog = SignalCatalog::classic();
        let names: Vec<_> = catalog.signals().filter_map(|s| catalog.name(s)).collect();
        assert_eq!(names, vec!["red", "green", "blue", "yellow"]);
    }

    #[test]
    fn test_contains_and_get() {
        let catalog = SignalCatalog::classic();
        assert!(catalog.contains(Signal::new(3)));
        assert!(!catalog.contains(Signal::new(4)));
        assert_eq!(catalog.get(1), Some(Signal::new(1)));
        assert_eq!(catalog.get(4), None);
    }

    #[test]
    fn test_find_by_name_and_initial() {
        let catalog = SignalCatalog::classic();
        assert_eq!(catalog.find("GREEN"), Some(Signal::new(1)));
        assert_eq!(catalog.find(" r "), Some(Signal::new(0)));
        assert_eq!(catalog.find("purple"), None);
        assert_eq!(catalog.find(""), None);
    }

    #[test]
    fn test_parse_reports_unknown() {
        let catalog = SignalCatalog::classic();
        assert_eq!(catalog.parse("Yellow"), Ok(Signal::new(3)));
        let err = catalog.parse(" purple ").unwrap_err();
        assert_eq!(err, GameError::UnknownSignal("purple".to_string()));
        assert_eq!(err.to_string(), "unknown signal 'purple'");
    }

    #[test]
    fn test_ambiguous_initial() {
        let catalog = SignalCatalog::new(["blue", "black", "red"]).unwrap();
        assert_eq!(catalog.find("b"), None);
        assert_eq!(catalog.find("r"), Some(Signal::new(2)));
    }

    #[test]
    fn test_too_small() {
        assert_eq!(
            SignalCatalog::new(Vec::<String>::new()),
            Err(GameError::InvalidCatalogSize(0))
        );
        assert_eq!(SignalCatalog::new(["red"]), Err(GameError::InvalidCatalogSize(1)));
    }

    #[test]
    fn test_serde_goes_through_validation() {
        let catalog = SignalCatalog::classic();
        let json = serde_json::to_string(&catalog).unwrap();
        assert_eq!(json, r#"["red","green","blue","yellow"]"#);
        assert_eq!(serde_json::from_str::<SignalCatalog>(&json).unwrap(), catalog);

        let huge: Vec<String> = (0..300).map(|i| format!("s{}", i)).collect();
        let json = serde_json::to_string(&huge).unwrap();
        let err = serde_json::from_str::<SignalCatalog>(&json).unwrap_err();
        assert!(err.to_string().contains("got 300"), "{}", err);

        assert!(serde_json::from_str::<SignalCatalog>(r#"["solo"]"#).is_err());
        assert!(serde_json::from_str::<SignalCatalog>(r#"["red","RED"]"#).is_err());
    }

    #[test]
    fn test_largest_catalog_keeps_ids_distinct() {
        let names: Vec<String> = (0..SignalCatalog::MAX_SIGNALS)
            .map(|i| format!("s{}", i))
            .collect();
        let catalog = SignalCatalog::new(names).unwrap();
        assert_eq!(catalog.get(254), Some(Signal::new(254)));
        assert_eq!(catalog.get(255), None);
        assert_eq!(catalog.signals().last(), Some(Signal::new(254)));
    }

    #[test]
    fn test_duplicates_rejected() {
        assert_eq!(
            SignalCatalog::new(["red", "Red"]),
            Err(GameError::DuplicateSignal("Red".to_string()))
        );
    }

    #[test]
    fn test_describe() {
        let catalog = SignalCatalog::classic();
        let seq = [Signal::new(0), Signal::new(3), Signal::new(7)];
        assert_eq!(catalog.describe(&seq), "red yellow Signal(7)");
    }
}
