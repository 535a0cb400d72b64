use nfc_battleship::{hid_to_position, parse_hid, Coordinate, TagError, GRID_SIZE};
use proptest::prelude::*;

#[test]
fn test_first_cell() {
    assert_eq!(hid_to_position("11", GRID_SIZE), Some(Coordinate::new(0, 0)));
    assert_eq!(hid_to_position("44", GRID_SIZE), Some(Coordinate::new(3, 3)));
    assert_eq!(hid_to_position("23", GRID_SIZE), Some(Coordinate::new(1, 2)));
}

#[test]
fn test_out_of_range_tags() {
    assert_eq!(hid_to_position("00", GRID_SIZE), None);
    assert_eq!(hid_to_position("55", GRID_SIZE), None);
    assert_eq!(hid_to_position("15", GRID_SIZE), None);
    assert_eq!(hid_to_position("50", GRID_SIZE), None);
    assert_eq!(
        parse_hid("05", GRID_SIZE),
        Err(TagError::OutOfRange { row: 0, col: 5 })
    );
}

#[test]
fn test_malformed_tags() {
    assert_eq!(hid_to_position("a1", GRID_SIZE), None);
    assert_eq!(parse_hid("a1", GRID_SIZE), Err(TagError::NotADigit('a')));
    assert_eq!(parse_hid("1-", GRID_SIZE), Err(TagError::NotADigit('-')));
    assert_eq!(parse_hid("", GRID_SIZE), Err(TagError::WrongLength(0)));
    assert_eq!(parse_hid("1", GRID_SIZE), Err(TagError::WrongLength(1)));
    assert_eq!(parse_hid("111", GRID_SIZE), Err(TagError::WrongLength(3)));
    // full-width digits are not decimal ASCII digits
    assert_eq!(parse_hid("１１", GRID_SIZE), Err(TagError::NotADigit('１')));
}

#[test]
fn test_larger_grid_accepts_more_tags() {
    assert_eq!(hid_to_position("99", 9), Some(Coordinate::new(8, 8)));
    assert_eq!(hid_to_position("55", 4), None);
    assert_eq!(hid_to_position("55", 5), Some(Coordinate::new(4, 4)));
}

#[test]
fn test_to_hid() {
    assert_eq!(Coordinate::new(0, 0).to_hid(), "11");
    assert_eq!(Coordinate::new(3, 1).to_hid(), "42");
}

proptest! {
    #[test]
    fn hid_roundtrip(grid in 1u8..=9, row in 0u8..9, col in 0u8..9) {
        prop_assume!(row < grid && col < grid);
        let cell = Coordinate::new(row, col);
        prop_assert_eq!(hid_to_position(&cell.to_hid(), grid), Some(cell));
    }

    #[test]
    fn hid_mapping_is_total_and_deterministic(hid in "\\PC{0,4}", grid in 0u8..=12) {
        let first = parse_hid(&hid, grid);
        prop_assert_eq!(first, parse_hid(&hid, grid));
        if let Ok(cell) = first {
            prop_assert!(cell.in_bounds(grid));
            prop_assert_eq!(hid.chars().count(), 2);
        }
    }
}
