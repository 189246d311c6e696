//! Animal definitions

use serde::{Deserialize, Serialize};

/// Combat strength, 1 (Rat) to 8 (Elephant)
pub type Rank = u8;

pub const MIN_RANK: Rank = 1;
pub const MAX_RANK: Rank = 8;

/// Glyphs by rank, lowercase for White
const GLYPHS: &[u8; 8] = b"abcdefgh";

/// Movement capability
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Movement {
    Walk,  // Ground only
    Swim,  // Ground and water
    Jump,  // Ground, plus leaps across a lake
}

/// Animal definition
#[derive(Clone, Debug)]
pub struct Animal {
    pub name: &'static str,
    pub rank: Rank,
    pub movement: Movement,
}

impl Animal {
    const fn new(name: &'static str, rank: Rank, movement: Movement) -> Self {
        Self { name, rank, movement }
    }
}

/// All animals, indexed by rank - 1
pub static ANIMALS: [Animal; 8] = [
    Animal::new("Rat", 1, Movement::Swim),
    Animal::new("Cat", 2, Movement::Walk),
    Animal::new("Dog", 3, Movement::Walk),
    Animal::new("Wolf", 4, Movement::Walk),
    Animal::new("Leopard", 5, Movement::Walk),
    Animal::new("Tiger", 6, Movement::Jump),
    Animal::new("Lion", 7, Movement::Jump),
    Animal::new("Elephant", 8, Movement::Walk),
];

pub fn is_valid_rank(rank: Rank) -> bool {
    (MIN_RANK..=MAX_RANK).contains(&rank)
}

/// Get animal by rank
///
/// Panics on a rank outside 1..=8; pieces are only built from checked ranks.
pub fn get_animal(rank: Rank) -> &'static Animal {
    &ANIMALS[(rank - 1) as usize]
}

/// Lowercase glyph for a rank
pub fn rank_glyph(rank: Rank) -> char {
    GLYPHS[(rank - 1) as usize] as char
}

/// Rank for a glyph of either case
pub fn glyph_rank(glyph: char) -> Option<Rank> {
    let lower = glyph.to_ascii_lowercase() as u8;
    GLYPHS.iter().position(|&g| g == lower).map(|i| i as Rank + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animal_table() {
        for (i, animal) in ANIMALS.iter().enumerate() {
            assert_eq!(animal.rank as usize, i + 1);
        }
        assert_eq!(get_animal(1).movement, Movement::Swim);
        assert_eq!(get_animal(6).movement, Movement::Jump);
        assert_eq!(get_animal(7).movement, Movement::Jump);
        for rank in [2, 3, 4, 5, 8] {
            assert_eq!(get_animal(rank).movement, Movement::Walk, "{}", get_animal(rank).name);
        }
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(rank_glyph(1), 'a');
        assert_eq!(rank_glyph(8), 'h');
        assert_eq!(glyph_rank('c'), Some(3));
        assert_eq!(glyph_rank('H'), Some(8));
        assert_eq!(glyph_rank('i'), None);
        assert_eq!(glyph_rank('~'), None);
    }

    #[test]
    fn test_rank_bounds() {
        assert!(!is_valid_rank(0));
        assert!(is_valid_rank(1));
        assert!(is_valid_rank(8));
        assert!(!is_valid_rank(9));
    }
}
