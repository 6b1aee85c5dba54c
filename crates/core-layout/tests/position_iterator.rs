//! Grouping scenarios and pixel mapping properties for the position iterator.

use core_layout::{CodeType, LayoutProfile, SpaceType, Structure, ViewMode};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn collect(profile: &LayoutProfile, code: CodeType, mode: ViewMode, bpr: usize) -> Vec<SpaceType> {
    let mut it = profile.create_position_iterator(code, mode, bpr);
    let mut out = Vec::new();
    while !it.is_end_reached() {
        out.push(it.next_space_type());
    }
    out
}

#[test]
fn default_profile_three_bytes_dual() {
    use SpaceType::*;
    let got = collect(&LayoutProfile::default(), CodeType::Hexadecimal, ViewMode::Dual, 3);
    assert_eq!(got, vec![None, Single, None, Single, None, Single, None, None]);
}

#[test]
fn grouped_profile_eleven_bytes_binary_code_only() {
    let profile = LayoutProfile::new(2, 4, 8).unwrap();
    let got = collect(&profile, CodeType::Binary, ViewMode::CodeMatrix, 11);
    assert_eq!(got.len(), 88);
    let gaps: Vec<(usize, SpaceType)> = got
        .iter()
        .enumerate()
        .filter(|(_, s)| **s != SpaceType::None)
        .map(|(i, s)| (i, *s))
        .collect();
    assert_eq!(
        gaps,
        vec![
            (15, SpaceType::Half),
            (31, SpaceType::Single),
            (47, SpaceType::Half),
            (63, SpaceType::Double),
            (79, SpaceType::Half),
        ]
    );
}

#[test]
fn iterator_length_matches_code_section() {
    let profile = LayoutProfile::new(2, 4, 8).unwrap();
    for code in CodeType::ALL {
        for mode in [ViewMode::CodeMatrix, ViewMode::Dual, ViewMode::TextPreview] {
            for bpr in [1usize, 3, 8, 16, 17] {
                let s = Structure::compute(mode, code, profile, bpr, 0).unwrap();
                let it = profile.create_position_iterator(code, mode, bpr);
                assert_eq!(it.len(), s.characters_per_code_section());
            }
        }
    }
}

fn code_type() -> impl Strategy<Value = CodeType> {
    prop_oneof![
        Just(CodeType::Binary),
        Just(CodeType::Octal),
        Just(CodeType::Decimal),
        Just(CodeType::Hexadecimal),
    ]
}

fn view_mode() -> impl Strategy<Value = ViewMode> {
    prop_oneof![
        Just(ViewMode::CodeMatrix),
        Just(ViewMode::TextPreview),
        Just(ViewMode::Dual),
    ]
}

proptest! {
    // pixel positions strictly increase column to column
    #[test]
    fn pixel_position_strictly_monotonic(
        code in code_type(),
        mode in view_mode(),
        bpr in 1usize..40,
        half in 0usize..5,
        single in 0usize..9,
        double in 0usize..17,
        cw in 1u32..20,
    ) {
        let profile = LayoutProfile::new(half, single, double).unwrap();
        let s = Structure::compute(mode, code, profile, bpr, 0).unwrap();
        let mut prev = s.compute_pixel_position(0, cw);
        prop_assert_eq!(prev, 0);
        for column in 1..=s.characters_per_row() {
            let x = s.compute_pixel_position(column, cw);
            prop_assert!(x >= prev + u64::from(cw));
            prev = x;
        }
    }

    // every pixel inside a column span maps back to that column
    #[test]
    fn column_at_pixel_inverts_pixel_position(
        code in code_type(),
        mode in view_mode(),
        bpr in 1usize..24,
        single in 0usize..5,
        cw in 1u32..12,
        pick in 0usize..1000,
    ) {
        let profile = LayoutProfile::new(0, single, 0).unwrap();
        let s = Structure::compute(mode, code, profile, bpr, 0).unwrap();
        let column = pick % s.characters_per_row();
        let start = s.compute_pixel_position(column, cw);
        let end = s.compute_pixel_position(column + 1, cw);
        prop_assert_eq!(s.compute_column_at_pixel(start, cw), column);
        prop_assert_eq!(s.compute_column_at_pixel(end - 1, cw), column);
    }
}
