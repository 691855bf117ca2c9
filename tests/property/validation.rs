//! Property-based tests for title validation and task serialization.
//!
//! Uses proptest to verify:
//! 1. Any accepted title is trimmed and within the length limit.
//! 2. Whitespace-only input is always rejected.
//! 3. Over-limit input is always rejected.
//! 4. Any `Task` survives a JSON round-trip.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use taskpad_api::task::{MAX_TITLE_LENGTH, Task, TitleError, validate_title};

/// Strategy for titles that should pass validation once trimmed.
fn arb_valid_core() -> impl Strategy<Value = String> {
    // At least one non-whitespace char, within the limit.
    "[a-zA-Z0-9À-ÿ][a-zA-Z0-9À-ÿ ]{0,100}".prop_map(|s| s.trim().to_string())
}

/// Strategy for leading/trailing whitespace padding.
fn arb_padding() -> impl Strategy<Value = String> {
    "[ \t\n]{0,10}"
}

proptest! {
    #[test]
    fn accepted_titles_are_trimmed_and_bounded(
        core in arb_valid_core(),
        left in arb_padding(),
        right in arb_padding(),
    ) {
        let input = format!("{left}{core}{right}");
        let validated = validate_title(&input).unwrap();
        prop_assert_eq!(&validated, core.trim());
        prop_assert!(validated.chars().count() <= MAX_TITLE_LENGTH);
        prop_assert_eq!(validated.trim(), &validated);
    }

    #[test]
    fn whitespace_only_is_always_rejected(input in "[ \t\n\r]{0,64}") {
        prop_assert_eq!(validate_title(&input), Err(TitleError::Empty));
    }

    #[test]
    fn over_limit_titles_are_always_rejected(extra in 1usize..64) {
        let input = "x".repeat(MAX_TITLE_LENGTH + extra);
        prop_assert_eq!(validate_title(&input), Err(TitleError::TooLong));
    }

    #[test]
    fn limit_counts_characters_not_bytes(extra in 0usize..8) {
        // Multibyte chars up to the limit are fine even though the
        // byte length exceeds it.
        let input = "é".repeat(MAX_TITLE_LENGTH - extra);
        prop_assert!(validate_title(&input).is_ok());
    }

    #[test]
    fn task_survives_json_round_trip(
        title in arb_valid_core(),
        description in "[a-zA-Z0-9 ]{0,200}",
        completed in any::<bool>(),
    ) {
        prop_assume!(!title.is_empty());
        let mut task = Task::new(title, description);
        task.completed = completed;

        let json = serde_json::to_string(&task).unwrap();
        let decoded: Task = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(task, decoded);
    }
}
