//! The pair of nets chosen for the combined-drop view.

/// State of the two net selectors.
///
/// Only a [`NetSelection::Pair`] of two distinct nets produces statistics.
/// An unset selector or the same net chosen twice are valid intermediate
/// states that simply suppress aggregation until the user resolves them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NetSelection {
    /// At least one selector is unset.
    #[default]
    Incomplete,
    /// Both selectors name the same net.
    Duplicate(String),
    /// Two distinct nets.
    Pair {
        /// First selected net.
        first: String,
        /// Second selected net.
        second: String,
    },
}

impl NetSelection {
    /// Classifies the values of the two selectors. Empty names count as unset.
    pub fn new(first: Option<String>, second: Option<String>) -> Self {
        let first = first.filter(|n| !n.is_empty());
        let second = second.filter(|n| !n.is_empty());
        match (first, second) {
            (Some(a), Some(b)) if a == b => NetSelection::Duplicate(a),
            (Some(first), Some(second)) => NetSelection::Pair { first, second },
            _ => NetSelection::Incomplete,
        }
    }

    /// Returns the two nets if the selection is a valid pair.
    pub fn pair(&self) -> Option<(&str, &str)> {
        match self {
            NetSelection::Pair { first, second } => Some((first, second)),
            _ => None,
        }
    }

    /// Returns `true` for a valid pair.
    pub fn is_pair(&self) -> bool {
        matches!(self, NetSelection::Pair { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_is_incomplete() {
        assert_eq!(NetSelection::new(None, None), NetSelection::Incomplete);
        assert_eq!(
            NetSelection::new(Some("VCC".into()), None),
            NetSelection::Incomplete
        );
        assert_eq!(
            NetSelection::new(Some(String::new()), Some("VSS".into())),
            NetSelection::Incomplete
        );
    }

    #[test]
    fn same_net_twice_is_duplicate() {
        let sel = NetSelection::new(Some("VCC".into()), Some("VCC".into()));
        assert_eq!(sel, NetSelection::Duplicate("VCC".into()));
        assert!(sel.pair().is_none());
        assert!(!sel.is_pair());
    }

    #[test]
    fn distinct_nets_pair() {
        let sel = NetSelection::new(Some("VCC".into()), Some("VSS".into()));
        assert_eq!(sel.pair(), Some(("VCC", "VSS")));
        assert!(sel.is_pair());
    }
}
