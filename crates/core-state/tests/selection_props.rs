//! Selection normalization properties.

use core_state::SelectionRange;
use proptest::prelude::*;

proptest! {
    #[test]
    fn first_not_after_last_when_non_empty(start in 0u64..10_000, end in 0u64..10_000) {
        let s = SelectionRange::new(start, end);
        prop_assert_eq!(s.is_empty(), start == end);
        if !s.is_empty() {
            prop_assert!(s.first() <= s.last());
            prop_assert_eq!(s.last() - s.first() + 1, s.length());
            prop_assert!(s.contains(s.first()));
            prop_assert!(s.contains(s.last()));
        }
    }

    #[test]
    fn clamp_never_exceeds_size(start in 0u64..1000, end in 0u64..1000, size in 0u64..1000) {
        let s = SelectionRange::new(start, end).clamp_to(size);
        prop_assert!(s.start() <= size && s.end() <= size);
    }
}
