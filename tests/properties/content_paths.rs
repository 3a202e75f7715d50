//! Properties of relative content path handling

use proptest::prelude::*;
use webdeploy::domain::value_objects::content_path;

fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.-]{1,8}".prop_filter("not a dot segment", |s| s != "." && s != "..")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn normalize_never_panics(input in "[a-z/\\\\.]{0,24}") {
        let _ = content_path::normalize(&input);
    }

    #[test]
    fn normalize_is_idempotent(input in "[a-z/\\\\.]{0,24}") {
        if let Ok(once) = content_path::normalize(&input) {
            prop_assert_eq!(content_path::normalize(&once).unwrap(), once);
        }
    }

    #[test]
    fn normalized_paths_have_no_empty_segments(input in "[a-z/\\\\.]{0,24}") {
        if let Ok(path) = content_path::normalize(&input) {
            prop_assert!(!path.starts_with('/'));
            prop_assert!(!path.ends_with('/'));
            prop_assert!(!path.contains("//"));
            prop_assert!(!path.contains('\\'));
        }
    }

    #[test]
    fn parent_of_join_is_the_parent(
        parent in prop::collection::vec(segment(), 0..4),
        child in segment(),
    ) {
        let parent = parent.join("/");
        let joined = content_path::join(&parent, &child);
        prop_assert_eq!(content_path::parent(&joined), Some(parent.as_str()));
    }

    #[test]
    fn dot_dot_segments_are_rejected(
        before in prop::collection::vec(segment(), 0..3),
        after in prop::collection::vec(segment(), 0..3),
    ) {
        let mut segments = before;
        segments.push("..".to_string());
        segments.extend(after);
        prop_assert!(content_path::normalize(&segments.join("/")).is_err());
    }
}
