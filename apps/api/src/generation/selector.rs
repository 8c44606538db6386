//! Template variety: decides which title prefix and company name the synthesizer uses.
//!
//! Production wires an `StdRng`; tests pin the choice with `FixedSelector`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait TemplateSelector: Send + Sync {
    /// Returns an index in `0..len`, or 0 when `len` is 0.
    fn pick(&mut self, len: usize) -> usize;
}

/// Picks uniformly with any `rand` generator.
pub struct RngSelector<R>(R);

impl RngSelector<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        RngSelector(StdRng::seed_from_u64(seed))
    }

    pub fn from_os_rng() -> Self {
        RngSelector(StdRng::from_os_rng())
    }

    /// Seeded when a seed is configured, OS entropy otherwise.
    pub fn for_request(seed: Option<u64>) -> Self {
        seed.map(Self::seeded).unwrap_or_else(Self::from_os_rng)
    }
}

impl<R: Rng + Send + Sync> TemplateSelector for RngSelector<R> {
    fn pick(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.0.random_range(0..len)
    }
}

/// Always picks the same position (clamped to the list length).
pub struct FixedSelector(pub usize);

impl TemplateSelector for FixedSelector {
    fn pick(&mut self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}

/// Picks one option from a non-empty list.
pub fn choose<'a>(selector: &mut dyn TemplateSelector, options: &[&'a str]) -> &'a str {
    options
        .get(selector.pick(options.len()))
        .copied()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_selector_is_reproducible() {
        let mut a = RngSelector::seeded(42);
        let mut b = RngSelector::seeded(42);
        let first: Vec<usize> = (0..20).map(|_| a.pick(4)).collect();
        let second: Vec<usize> = (0..20).map(|_| b.pick(4)).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(|i| *i < 4));
    }

    #[test]
    fn test_fixed_selector_clamps() {
        let mut selector = FixedSelector(7);
        assert_eq!(selector.pick(3), 2);
        assert_eq!(choose(&mut selector, &["a", "b"]), "b");
    }

    #[test]
    fn test_choose_on_empty_list() {
        let mut selector = RngSelector::seeded(1);
        assert_eq!(choose(&mut selector, &[]), "");
    }
}
