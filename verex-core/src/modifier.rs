//! Modifier flags
//!
//! Modifiers change how an expression is evaluated without touching its
//! pattern text: `g` switches `test` from a full match to a search, `m`
//! disables line reduction, and `i` compiles the pattern case-insensitively.

use std::fmt;

/// A single modifier flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Search anywhere in the input instead of matching all of it
    Global,
    /// Examine the whole input instead of only its first line
    Multiline,
    /// Ignore case when matching
    CaseInsensitive,
}

impl Modifier {
    /// All modifiers, in display order
    pub const ALL: [Modifier; 3] = [
        Modifier::Global,
        Modifier::Multiline,
        Modifier::CaseInsensitive,
    ];

    /// Map a flag letter to its modifier
    ///
    /// Returns `None` for anything other than `g`, `m` or `i`.
    pub fn from_char(c: char) -> Option<Modifier> {
        match c {
            'g' => Some(Modifier::Global),
            'm' => Some(Modifier::Multiline),
            'i' => Some(Modifier::CaseInsensitive),
            _ => None,
        }
    }

    /// The flag letter for this modifier
    pub fn as_char(self) -> char {
        match self {
            Modifier::Global => 'g',
            Modifier::Multiline => 'm',
            Modifier::CaseInsensitive => 'i',
        }
    }

    fn bit(self) -> u8 {
        match self {
            Modifier::Global => 1,
            Modifier::Multiline => 1 << 1,
            Modifier::CaseInsensitive => 1 << 2,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A set of modifier flags
///
/// Insert and remove are idempotent: adding a flag twice leaves it set once,
/// removing an absent flag leaves it absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    /// An empty set
    pub fn new() -> Self {
        Modifiers::default()
    }

    /// Set a flag
    pub fn insert(&mut self, modifier: Modifier) {
        self.bits |= modifier.bit();
    }

    /// Clear a flag
    pub fn remove(&mut self, modifier: Modifier) {
        self.bits &= !modifier.bit();
    }

    /// Set or clear a flag
    pub fn set(&mut self, modifier: Modifier, enable: bool) {
        if enable {
            self.insert(modifier);
        } else {
            self.remove(modifier);
        }
    }

    /// Check whether a flag is set
    pub fn contains(&self, modifier: Modifier) -> bool {
        self.bits & modifier.bit() != 0
    }

    /// Check whether no flag is set
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterate over the set flags in `gmi` order
    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        Modifier::ALL.into_iter().filter(|m| self.contains(*m))
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut modifiers = Modifiers::new();
        for modifier in iter {
            modifiers.insert(modifier);
        }
        modifiers
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in self.iter() {
            write!(f, "{}", modifier)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_char() {
        assert_eq!(Modifier::from_char('g'), Some(Modifier::Global));
        assert_eq!(Modifier::from_char('m'), Some(Modifier::Multiline));
        assert_eq!(Modifier::from_char('i'), Some(Modifier::CaseInsensitive));
        assert_eq!(Modifier::from_char('x'), None);
        assert_eq!(Modifier::from_char('I'), None);
    }

    #[test]
    fn test_char_round_trip() {
        for modifier in Modifier::ALL {
            assert_eq!(Modifier::from_char(modifier.as_char()), Some(modifier));
        }
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut modifiers = Modifiers::new();
        modifiers.insert(Modifier::CaseInsensitive);
        modifiers.insert(Modifier::CaseInsensitive);
        assert!(modifiers.contains(Modifier::CaseInsensitive));
        assert!(!modifiers.contains(Modifier::Global));
    }

    #[test]
    fn test_remove_absent_flag_stays_absent() {
        let mut modifiers = Modifiers::new();
        modifiers.remove(Modifier::Multiline);
        modifiers.remove(Modifier::Multiline);
        assert!(!modifiers.contains(Modifier::Multiline));
        assert!(modifiers.is_empty());
    }

    #[test]
    fn test_set() {
        let mut modifiers = Modifiers::new();
        modifiers.set(Modifier::Global, true);
        assert!(modifiers.contains(Modifier::Global));
        modifiers.set(Modifier::Global, false);
        assert!(!modifiers.contains(Modifier::Global));
    }

    #[test]
    fn test_display_order() {
        let modifiers: Modifiers = [Modifier::CaseInsensitive, Modifier::Global]
            .into_iter()
            .collect();
        assert_eq!(modifiers.to_string(), "gi");
        assert_eq!(Modifiers::new().to_string(), "");
    }
}
