use std::collections::HashSet;
use std::hash::Hash;

/// Insertion-ordered set: keeps the first occurrence of each value and
/// remembers the order values were first seen in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedSet<T: Eq + Hash + Clone> {
    seen: HashSet<T>,
    items: Vec<T>,
}

impl<T: Eq + Hash + Clone> Default for OrderedSet<T> {
    fn default() -> Self {
        Self {
            seen: HashSet::new(),
            items: Vec::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> OrderedSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, returning false if it was already present
    pub fn insert(&mut self, value: T) -> bool {
        if self.seen.contains(&value) {
            return false;
        }
        self.seen.insert(value.clone());
        self.items.push(value);
        true
    }

    pub fn contains(&self, value: &T) -> bool {
        self.seen.contains(value)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_first_seen_order() {
        let set: OrderedSet<&str> = ["b", "a", "b", "c", "a"].into_iter().collect();
        assert_eq!(set.as_slice(), &["b", "a", "c"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_insert_reports_duplicates() {
        let mut set = OrderedSet::new();
        assert!(set.insert("/about".to_string()));
        assert!(!set.insert("/about".to_string()));
        assert!(set.contains(&"/about".to_string()));
        assert_eq!(set.into_vec(), vec!["/about".to_string()]);
    }
}
