use serde::{Deserialize, Serialize};

use crate::dice::{DICE_PER_TURN, DiceCounts, Face, MAX_FACE, MIN_FACE};

/// A scoring combination a player may take from the current roll.
///
/// The variant carries the face where one applies; whole-roll combinations
/// (straight, three pairs, double triplets, four of a kind plus a pair)
/// consume every die in the roll.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Combo {
    /// A single 1 (exactly one die, even when more are showing).
    SingleOne,
    /// A single 5.
    SingleFive,
    ThreeOfAKind(Face),
    FourOfAKind(Face),
    FiveOfAKind(Face),
    SixOfAKind(Face),
    /// All six faces, one of each.
    Straight,
    /// Exactly three distinct pairs across six dice.
    ThreePairs,
    /// Exactly two distinct triplets across six dice.
    DoubleTriplets,
    /// A four of a kind together with a pair across six dice.
    FourOfAKindPlusPair,
}

impl Combo {
    /// Point value of this combination.
    pub fn points(&self) -> u32 {
        match *self {
            Combo::SingleOne => 100,
            Combo::SingleFive => 50,
            Combo::ThreeOfAKind(face) => {
                if face == 1 {
                    300
                } else {
                    u32::from(face) * 100
                }
            }
            Combo::FourOfAKind(_) => 1_000,
            Combo::FiveOfAKind(_) => 2_000,
            Combo::SixOfAKind(_) => 3_000,
            Combo::Straight => 1_500,
            Combo::ThreePairs => 1_500,
            Combo::DoubleTriplets => 2_500,
            Combo::FourOfAKindPlusPair => 1_500,
        }
    }

    /// Checks whether the roll currently offers this combination.
    pub fn is_available_in(&self, roll: &[Face]) -> bool {
        let counts = DiceCounts::from_faces(roll);
        let whole = roll.len() == DICE_PER_TURN;
        match *self {
            Combo::SingleOne => counts.of(1) >= 1,
            Combo::SingleFive => counts.of(5) >= 1,
            Combo::ThreeOfAKind(face) => counts.of(face) >= 3,
            Combo::FourOfAKind(face) => counts.of(face) >= 4,
            Combo::FiveOfAKind(face) => counts.of(face) >= 5,
            Combo::SixOfAKind(face) => counts.of(face) == 6,
            Combo::Straight => whole && counts.is_straight(),
            Combo::ThreePairs => whole && counts.exact_pairs() == 3,
            Combo::DoubleTriplets => whole && counts.exact_triplets() == 2,
            Combo::FourOfAKindPlusPair => whole && counts.has_exact(4) && counts.has_exact(2),
        }
    }

    /// Exact dice this combination removes from the roll, or `None` when the
    /// roll does not offer it. Single-face combinations take exactly that many
    /// dice of that face; whole-roll combinations take everything.
    pub fn dice_for(&self, roll: &[Face]) -> Option<Vec<Face>> {
        if !self.is_available_in(roll) {
            return None;
        }
        let taken = match *self {
            Combo::SingleOne => vec![1],
            Combo::SingleFive => vec![5],
            Combo::ThreeOfAKind(face) => vec![face; 3],
            Combo::FourOfAKind(face) => vec![face; 4],
            Combo::FiveOfAKind(face) => vec![face; 5],
            Combo::SixOfAKind(face) => vec![face; 6],
            Combo::Straight
            | Combo::ThreePairs
            | Combo::DoubleTriplets
            | Combo::FourOfAKindPlusPair => roll.to_vec(),
        };
        Some(taken)
    }

    /// Short English name used in announcements and menus.
    pub fn describe(&self) -> String {
        match *self {
            Combo::SingleOne => String::from("a single 1"),
            Combo::SingleFive => String::from("a single 5"),
            Combo::ThreeOfAKind(face) => format!("three {face}s"),
            Combo::FourOfAKind(face) => format!("four {face}s"),
            Combo::FiveOfAKind(face) => format!("five {face}s"),
            Combo::SixOfAKind(face) => format!("six {face}s"),
            Combo::Straight => String::from("a straight"),
            Combo::ThreePairs => String::from("three pairs"),
            Combo::DoubleTriplets => String::from("double triplets"),
            Combo::FourOfAKindPlusPair => String::from("four of a kind plus a pair"),
        }
    }
}

/// All combinations the roll currently offers, ranked by descending point
/// value. Ties keep the fixed catalog precedence: N-of-a-kind (largest first),
/// double triplets, straight, four of a kind plus a pair, three pairs,
/// three of a kind, then singles.
pub fn available_combinations(roll: &[Face]) -> Vec<Combo> {
    if roll.is_empty() {
        return Vec::new();
    }
    let mut combos = Vec::new();
    for face in MIN_FACE..=MAX_FACE {
        if Combo::SixOfAKind(face).is_available_in(roll) {
            combos.push(Combo::SixOfAKind(face));
        }
    }
    for face in MIN_FACE..=MAX_FACE {
        if Combo::FiveOfAKind(face).is_available_in(roll) {
            combos.push(Combo::FiveOfAKind(face));
        }
    }
    for face in MIN_FACE..=MAX_FACE {
        if Combo::FourOfAKind(face).is_available_in(roll) {
            combos.push(Combo::FourOfAKind(face));
        }
    }
    for combo in [
        Combo::DoubleTriplets,
        Combo::Straight,
        Combo::FourOfAKindPlusPair,
        Combo::ThreePairs,
    ] {
        if combo.is_available_in(roll) {
            combos.push(combo);
        }
    }
    for face in MIN_FACE..=MAX_FACE {
        if Combo::ThreeOfAKind(face).is_available_in(roll) {
            combos.push(Combo::ThreeOfAKind(face));
        }
    }
    if Combo::SingleOne.is_available_in(roll) {
        combos.push(Combo::SingleOne);
    }
    if Combo::SingleFive.is_available_in(roll) {
        combos.push(Combo::SingleFive);
    }
    // Stable sort: catalog order above resolves equal-point ties.
    combos.sort_by(|a, b| b.points().cmp(&a.points()));
    combos
}

/// Negated bust ("farkle") predicate: true when the roll contains any scoring
/// dice or combination.
pub fn has_scoring_dice(roll: &[Face]) -> bool {
    if roll.is_empty() {
        return false;
    }
    let counts = DiceCounts::from_faces(roll);
    if counts.of(1) > 0 || counts.of(5) > 0 {
        return true;
    }
    if counts.max_count() >= 3 {
        return true;
    }
    if roll.len() == DICE_PER_TURN
        && (counts.is_straight() || counts.exact_pairs() == 3 || counts.exact_triplets() == 2)
    {
        return true;
    }
    false
}
