use serde::{Deserialize, Serialize};

/// Value shown by a single die.
pub type Face = u8;

pub const MIN_FACE: Face = 1;
pub const MAX_FACE: Face = 6;
/// Dice available to a player each turn.
pub const DICE_PER_TURN: usize = 6;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// Returns true if the value is a legal die face.
#[inline]
pub fn is_valid_face(face: Face) -> bool {
    (MIN_FACE..=MAX_FACE).contains(&face)
}

/// Per-face occurrence counts for a dice multiset.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct DiceCounts {
    counts: [u8; 6],
    total: u8,
}

impl DiceCounts {
    pub fn from_faces(faces: &[Face]) -> Self {
        let mut counts = [0u8; 6];
        for &face in faces {
            debug_assert!(is_valid_face(face));
            counts[(face - 1) as usize] += 1;
        }
        Self {
            counts,
            total: faces.len() as u8,
        }
    }

    /// Number of dice showing the given face.
    #[inline]
    pub fn of(&self, face: Face) -> u8 {
        debug_assert!(is_valid_face(face));
        self.counts[(face - 1) as usize]
    }

    /// Number of faces appearing exactly twice.
    pub fn exact_pairs(&self) -> u8 {
        self.counts.iter().filter(|&&c| c == 2).count() as u8
    }

    /// Number of faces appearing exactly three times.
    pub fn exact_triplets(&self) -> u8 {
        self.counts.iter().filter(|&&c| c == 3).count() as u8
    }

    /// True when every face 1-6 appears exactly once.
    pub fn is_straight(&self) -> bool {
        self.total == DICE_PER_TURN as u8 && self.counts.iter().all(|&c| c == 1)
    }

    /// True when some face appears exactly `n` times.
    pub fn has_exact(&self, n: u8) -> bool {
        self.counts.iter().any(|&c| c == n)
    }

    /// Highest occurrence count across all faces.
    pub fn max_count(&self) -> u8 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}
