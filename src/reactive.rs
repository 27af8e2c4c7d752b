/// Memoized derivation: keeps the last input signature next to the last
/// result and only recomputes when a new signature differs from it.
#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    cached: Option<(K, V)>,
    recomputations: u64,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            cached: None,
            recomputations: 0,
        }
    }
}

impl<K: PartialEq + Clone, V> Memo<K, V> {
    /// Return the cached value for `key`, running `compute` first if the
    /// cache is empty or was filled under a different key.
    pub fn get_or_compute(&mut self, key: &K, compute: impl FnOnce(&K) -> V) -> &V {
        if !self.is_fresh(key) {
            self.cached = None;
            self.recomputations += 1;
        }
        let (_, value) = self
            .cached
            .get_or_insert_with(|| (key.clone(), compute(key)));
        value
    }

    /// Whether a read with `key` would be served from the cache.
    pub fn is_fresh(&self, key: &K) -> bool {
        matches!(&self.cached, Some((cached_key, _)) if cached_key == key)
    }

    /// Drop the cached value; the next read recomputes.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// How many times the value has been computed so far.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_hits_cache() {
        let mut memo: Memo<u32, String> = Memo::default();
        let mut calls = 0;
        let first = memo
            .get_or_compute(&7, |k| {
                calls += 1;
                format!("v{k}")
            })
            .clone();
        let second = memo
            .get_or_compute(&7, |k| {
                calls += 1;
                format!("v{k}")
            })
            .clone();
        assert_eq!(first, second);
        assert_eq!(calls, 1);
        assert_eq!(memo.recomputations(), 1);
    }

    #[test]
    fn changed_key_recomputes_once() {
        let mut memo: Memo<u32, u32> = Memo::default();
        assert_eq!(*memo.get_or_compute(&1, |k| k * 10), 10);
        assert!(!memo.is_fresh(&2));
        assert_eq!(*memo.get_or_compute(&2, |k| k * 10), 20);
        assert_eq!(*memo.get_or_compute(&2, |_| unreachable!()), 20);
        assert_eq!(memo.recomputations(), 2);
    }

    #[test]
    fn invalidate_forces_recompute() {
        let mut memo: Memo<&str, usize> = Memo::default();
        memo.get_or_compute(&"a", |k| k.len());
        memo.invalidate();
        assert!(!memo.is_fresh(&"a"));
        memo.get_or_compute(&"a", |k| k.len());
        assert_eq!(memo.recomputations(), 2);
    }
}
