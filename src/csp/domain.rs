#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use std::fmt;

/// A candidate-value set for one cell, packed into the low nine bits of a
/// `u16` (bit `v - 1` set means value `v` is still possible).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Domain(u16);

const FULL: u16 = 0b1_1111_1111;

impl Domain {
    /// All of 1..=9.
    #[must_use]
    pub const fn full() -> Self {
        Self(FULL)
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn singleton(value: u8) -> Self {
        debug_assert!(value >= 1 && value <= 9);
        Self(1 << (value - 1))
    }

    #[must_use]
    pub const fn contains(self, value: u8) -> bool {
        value >= 1 && value <= 9 && self.0 & (1 << (value - 1)) != 0
    }

    /// Removes `value`, returning whether it was present.
    pub const fn remove(&mut self, value: u8) -> bool {
        let present = self.contains(value);
        if present {
            self.0 &= !(1 << (value - 1));
        }
        present
    }

    pub const fn insert(&mut self, value: u8) {
        debug_assert!(value >= 1 && value <= 9);
        self.0 |= 1 << (value - 1);
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The sole remaining value, if exactly one is left.
    #[must_use]
    pub const fn single(self) -> Option<u8> {
        if self.0.count_ones() == 1 {
            Some(self.0.trailing_zeros() as u8 + 1)
        } else {
            None
        }
    }

    /// Candidate values in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (1..=9).filter(move |&v| self.contains(v))
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_and_empty() {
        assert_eq!(Domain::full().len(), 9);
        assert!(Domain::empty().is_empty());
        assert!(!Domain::full().is_empty());
    }

    #[test]
    fn test_remove_insert() {
        let mut d = Domain::full();
        assert!(d.remove(5));
        assert!(!d.remove(5));
        assert_eq!(d.len(), 8);
        assert!(!d.contains(5));
        d.insert(5);
        assert!(d.contains(5));
    }

    #[test]
    fn test_singleton() {
        let d = Domain::singleton(7);
        assert_eq!(d.len(), 1);
        assert_eq!(d.single(), Some(7));
        assert_eq!(Domain::full().single(), None);
        assert_eq!(Domain::empty().single(), None);
    }

    #[test]
    fn test_iter_ascending() {
        let mut d = Domain::empty();
        d.insert(9);
        d.insert(2);
        d.insert(4);
        assert_eq!(d.iter().collect::<Vec<_>>(), vec![2, 4, 9]);
    }

    #[test]
    fn test_display() {
        let mut d = Domain::empty();
        d.insert(1);
        d.insert(3);
        assert_eq!(d.to_string(), "{1,3}");
    }
}
