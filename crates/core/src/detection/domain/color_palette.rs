use std::collections::HashSet;

use rand::Rng;

use crate::shared::color::Color;

/// Draws `count` random, pairwise distinct colors from the thread RNG.
pub fn random_colors(count: usize) -> Vec<Color> {
    random_colors_with(&mut rand::rng(), count)
}

/// Draws `count` random colors from `rng`, re-drawing on collision.
pub fn random_colors_with<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Color> {
    let mut seen = HashSet::with_capacity(count);
    let mut colors = Vec::with_capacity(count);
    while colors.len() < count {
        let color = Color::new(rng.random(), rng.random(), rng.random());
        if seen.insert(color) {
            colors.push(color);
        }
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_returns_requested_count() {
        assert_eq!(random_colors(0).len(), 0);
        assert_eq!(random_colors(1).len(), 1);
        assert_eq!(random_colors(5).len(), 5);
    }

    #[test]
    fn test_colors_are_distinct() {
        let colors = random_colors(256);
        let unique: HashSet<_> = colors.iter().collect();
        assert_eq!(unique.len(), colors.len());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let a = random_colors_with(&mut StdRng::seed_from_u64(7), 4);
        let b = random_colors_with(&mut StdRng::seed_from_u64(7), 4);
        assert_eq!(a, b);
    }
}
