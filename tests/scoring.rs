use farkle::{Combo, Face, available_combinations, has_scoring_dice};

#[test]
fn point_table_matches_the_rules() {
    assert_eq!(Combo::SingleOne.points(), 100);
    assert_eq!(Combo::SingleFive.points(), 50);
    assert_eq!(Combo::ThreeOfAKind(1).points(), 300);
    assert_eq!(Combo::FourOfAKind(2).points(), 1_000);
    assert_eq!(Combo::FiveOfAKind(3).points(), 2_000);
    assert_eq!(Combo::SixOfAKind(4).points(), 3_000);
    assert_eq!(Combo::Straight.points(), 1_500);
    assert_eq!(Combo::ThreePairs.points(), 1_500);
    assert_eq!(Combo::DoubleTriplets.points(), 2_500);
    assert_eq!(Combo::FourOfAKindPlusPair.points(), 1_500);
}

#[test]
fn three_of_a_kind_scales_with_face() {
    for face in 2..=6u8 {
        assert_eq!(Combo::ThreeOfAKind(face).points(), u32::from(face) * 100);
    }
    // Three ones outrank their face value.
    assert_eq!(Combo::ThreeOfAKind(1).points(), 300);
}

#[test]
fn combinations_are_ranked_by_descending_points() {
    let combos = available_combinations(&[5, 5, 5, 1, 1, 1]);
    assert_eq!(
        combos,
        vec![
            Combo::DoubleTriplets,
            Combo::ThreeOfAKind(5),
            Combo::ThreeOfAKind(1),
            Combo::SingleOne,
            Combo::SingleFive,
        ]
    );
}

#[test]
fn equal_points_keep_catalog_precedence() {
    // Both triplets are worth 300; the lower face is listed first.
    let combos = available_combinations(&[1, 1, 1, 3, 3, 3]);
    let triplets: Vec<Combo> = combos
        .into_iter()
        .filter(|c| matches!(c, Combo::ThreeOfAKind(_)))
        .collect();
    assert_eq!(
        triplets,
        vec![Combo::ThreeOfAKind(1), Combo::ThreeOfAKind(3)]
    );
}

#[test]
fn four_of_a_kind_plus_pair_outranks_plain_four_of_a_kind() {
    let combos = available_combinations(&[4, 4, 4, 4, 2, 2]);
    assert_eq!(
        combos,
        vec![
            Combo::FourOfAKindPlusPair,
            Combo::FourOfAKind(4),
            Combo::ThreeOfAKind(4),
        ]
    );
}

#[test]
fn straight_and_three_pairs_need_all_six_dice() {
    assert_eq!(
        available_combinations(&[1, 2, 3, 4, 5, 6]),
        vec![Combo::Straight, Combo::SingleOne, Combo::SingleFive]
    );
    assert_eq!(
        available_combinations(&[2, 2, 3, 3, 4, 4]),
        vec![Combo::ThreePairs]
    );
    // The same faces on fewer dice score nothing.
    assert!(available_combinations(&[2, 2, 3, 3]).is_empty());
    assert_eq!(
        available_combinations(&[1, 2, 3, 4, 5]),
        vec![Combo::SingleOne, Combo::SingleFive]
    );
}

#[test]
fn singles_take_exactly_one_die() {
    assert_eq!(Combo::SingleOne.dice_for(&[1, 1, 5]), Some(vec![1]));
    assert_eq!(Combo::SingleFive.dice_for(&[5, 5]), Some(vec![5]));
}

#[test]
fn of_a_kind_takes_exactly_that_many_dice() {
    assert_eq!(
        Combo::ThreeOfAKind(5).dice_for(&[5, 5, 5, 5]),
        Some(vec![5, 5, 5])
    );
    assert_eq!(Combo::FourOfAKind(5).dice_for(&[5, 5, 5]), None);
}

#[test]
fn whole_roll_combinations_take_everything() {
    let roll: Vec<Face> = vec![1, 2, 3, 4, 5, 6];
    assert_eq!(Combo::Straight.dice_for(&roll), Some(roll.clone()));
    let roll: Vec<Face> = vec![2, 2, 4, 4, 6, 6];
    assert_eq!(Combo::ThreePairs.dice_for(&roll), Some(roll.clone()));
}

#[test]
fn known_bust_rolls_have_no_combinations() {
    let bust: Vec<Face> = vec![2, 3, 4, 6, 2, 3];
    assert!(!has_scoring_dice(&bust));
    assert!(available_combinations(&bust).is_empty());
}

#[test]
fn empty_roll_never_scores() {
    assert!(!has_scoring_dice(&[]));
    assert!(available_combinations(&[]).is_empty());
}

#[test]
fn bust_predicate_agrees_with_the_combination_list() {
    // Exhaustive over every roll of one to six dice.
    for len in 1..=6u32 {
        for code in 0..6usize.pow(len) {
            let mut roll = Vec::with_capacity(len as usize);
            let mut rest = code;
            for _ in 0..len {
                roll.push((rest % 6 + 1) as Face);
                rest /= 6;
            }
            assert_eq!(
                has_scoring_dice(&roll),
                !available_combinations(&roll).is_empty(),
                "disagreement on roll {roll:?}"
            );
        }
    }
}
