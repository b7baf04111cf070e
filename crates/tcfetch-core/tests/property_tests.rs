//! Property-based tests for entry name validation and extraction.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::uninlined_format_args)]

use std::fs;
use std::io::Cursor;

use proptest::prelude::*;
use tcfetch_core::DestDir;
use tcfetch_core::ExtractionError;
use tcfetch_core::SafePath;
use tcfetch_core::formats::ZipArchive;
use tcfetch_core::test_utils::ZipTestBuilder;
use tempfile::TempDir;

fn create_test_dest() -> (TempDir, DestDir) {
    let temp = TempDir::new().expect("failed to create temp dir");
    let dest = DestDir::create(temp.path().to_path_buf()).expect("failed to create dest");
    (temp, dest)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Plain relative names always resolve inside the destination.
    #[test]
    fn prop_relative_names_stay_inside(
        components in prop::collection::vec("[a-zA-Z0-9_-]{1,16}", 1..6)
    ) {
        let (_temp, dest) = create_test_dest();
        let name = components.join("/");

        let safe = SafePath::validate(&name, &dest).expect("valid name rejected");

        prop_assert!(dest.join(&safe).starts_with(dest.as_path()));
    }

    /// A leading `..` is rejected however the rest looks.
    #[test]
    fn prop_leading_parent_rejected(
        ups in 1usize..4,
        suffix in "[a-z]{1,8}(/[a-z]{1,8}){0,3}"
    ) {
        let (_temp, dest) = create_test_dest();
        let name = format!("{}{}", "../".repeat(ups), suffix);

        let result = SafePath::validate(&name, &dest);

        prop_assert!(
            matches!(result, Err(ExtractionError::PathTraversal { .. })),
            "accepted {}", name
        );
    }

    /// Climbing above the root from inside a prefix is rejected.
    #[test]
    fn prop_excess_parents_rejected(
        prefix in prop::collection::vec("[a-z]{1,8}", 1..4),
        extra in 1usize..3
    ) {
        let (_temp, dest) = create_test_dest();
        let name = format!(
            "{}/{}escape.txt",
            prefix.join("/"),
            "../".repeat(prefix.len() + extra)
        );

        prop_assert!(SafePath::validate(&name, &dest).is_err(), "accepted {}", name);
    }

    /// Absolute names are rejected.
    #[test]
    fn prop_absolute_rejected(suffix in "[a-z]{1,8}(/[a-z]{1,8}){0,3}") {
        let (_temp, dest) = create_test_dest();

        let slash = format!("/{}", suffix);
        let backslash = format!("\\{}", suffix);
        prop_assert!(SafePath::validate(&slash, &dest).is_err());
        prop_assert!(SafePath::validate(&backslash, &dest).is_err());
    }

    /// Extracted file contents match the archived bytes.
    #[test]
    fn prop_extracted_content_matches(
        components in prop::collection::vec("[a-z0-9]{1,12}", 1..4),
        content in prop::collection::vec(any::<u8>(), 0..2048)
    ) {
        let (temp, dest) = create_test_dest();
        let name = components.join("/");
        let data = ZipTestBuilder::new().deflated().add_file(&name, &content).build();

        let mut archive = ZipArchive::new(Cursor::new(data)).unwrap();
        let report = archive.extract(&dest).unwrap();

        prop_assert_eq!(report.files_extracted, 1);
        prop_assert_eq!(report.bytes_written, content.len() as u64);
        prop_assert_eq!(fs::read(temp.path().join(&name)).unwrap(), content);
    }
}
