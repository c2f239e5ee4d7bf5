//! Property tests for the moderation pass, the sanitizer and the splicer.

use proptest::prelude::*;
use std::sync::Arc;

use guestbook_core::{
    Author, Comment, CommentId, DocumentSplicer, ModerationEngine, ProfanityClassifier,
    RenderedEntry, TextSanitizer,
};

const MARKER: &str = "<!--guestbook-->";

fn comment(index: usize, profane: bool) -> Comment {
    let body = if profane { format!("shit number {index}") } else { format!("hello number {index}") };
    Comment {
        id: CommentId::new(format!("c{index}")),
        author: Author::ghost(),
        body_text: body,
        updated_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn moderation_keeps_clean_comments_in_order_up_to_limit(
        flags in proptest::collection::vec(any::<bool>(), 0..25),
        limit in 1usize..8,
    ) {
        let comments: Vec<Comment> = flags.iter().enumerate().map(|(i, &p)| comment(i, p)).collect();
        let expected: Vec<CommentId> = comments
            .iter()
            .filter(|c| c.body_text.starts_with("hello"))
            .take(limit)
            .map(|c| c.id.clone())
            .collect();

        let classifier = Arc::new(ProfanityClassifier::with_defaults().unwrap());
        let engine = ModerationEngine::new(classifier.clone(), limit);
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let result = runtime.block_on(engine.moderate(comments));

        prop_assert!(result.clean.len() <= limit);
        prop_assert!(result.clean.iter().all(|c| !classifier.is_profane(&c.body_text)));
        let ids: Vec<CommentId> = result.clean.iter().map(|c| c.id.clone()).collect();
        prop_assert_eq!(ids, expected);
        prop_assert_eq!(result.flagged.len(), flags.iter().filter(|&&p| p).count());
    }

    #[test]
    fn sanitized_output_is_single_line_bounded_and_stable(
        raw in "[a-y <>/`\n\r\t]{0,300}",
        max_length in 1usize..120,
    ) {
        let classifier = ProfanityClassifier::from_terms(vec!["zzz".to_string()], '*').unwrap();
        let sanitizer = TextSanitizer::new(max_length);

        let once = sanitizer.sanitize(&raw, &classifier);
        prop_assert!(!once.contains('\n') && !once.contains('\r'));
        prop_assert!(once.chars().count() <= max_length + 3);
        prop_assert_eq!(sanitizer.sanitize(&once, &classifier), once);
    }

    #[test]
    fn splice_preserves_outside_text_and_is_idempotent(
        prefix in "[a-z #\n]{0,40}",
        old in "[a-z \n]{0,40}",
        suffix in "[a-z #\n]{0,40}",
        bodies in proptest::collection::vec("[a-z ]{1,20}", 0..4),
    ) {
        let splicer = DocumentSplicer::new(MARKER).unwrap();
        let document = format!("{prefix}{MARKER}{old}{MARKER}{suffix}");
        let entries: Vec<RenderedEntry> = bodies.iter().map(RenderedEntry::new).collect();

        let once = splicer.splice(&document, &entries).unwrap();
        let expected_head = format!("{prefix}{MARKER}");
        let expected_tail = format!("{MARKER}{suffix}");
        prop_assert!(once.starts_with(&expected_head));
        prop_assert!(once.ends_with(&expected_tail));
        prop_assert_eq!(once.matches(MARKER).count(), 2);
        prop_assert_eq!(splicer.splice(&once, &entries).unwrap(), once);
    }
}
