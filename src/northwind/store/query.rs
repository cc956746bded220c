/// An ordered, filterable view over rows loaded from the store.
///
/// Views are materialised: every combinator works on the rows already in hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Query<T> {
    rows: Vec<T>,
}

impl<T> Query<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows }
    }

    pub fn order_by<K, F>(mut self, key: F) -> Self
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.rows.sort_by_cached_key(key);
        self
    }

    pub fn filter<P>(mut self, predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        self.rows.retain(predicate);
        self
    }

    pub fn find<P>(self, mut predicate: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        self.rows.into_iter().find(|row| predicate(row))
    }

    pub fn any<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.rows.iter().any(predicate)
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    pub fn to_vec(self) -> Vec<T> {
        self.rows
    }
}

impl<T> IntoIterator for Query<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Query<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
