// Unit tests for Skill Match

use std::collections::HashSet;
use std::sync::Arc;

use skill_match::core::{
    compute_score, normalize_skill_name, rank_candidates, score_breakdown, BatchClassifier, Categorizer,
    CategorizerSettings, CategoryLexicon, OTHER_CATEGORY,
};
use skill_match::models::SkillProfile;

const SAMPLE_NAMES: &[&str] = &[
    "React",
    "Guitar",
    "Italian Cooking",
    "Spanish",
    "Yoga",
    "Watercolor Painting",
    "Digital Marketing",
    "Calculus",
    "Quantum Entanglement Theory",
    "",
    "   ",
    "12345",
    "!!!",
    "C++",
    "Music Production",
    "UX/UI Design",
    "Marathon running",
    "Machine Learning with Python",
    "Underwater Basket Weaving",
    "Ñandú Dancing",
];

fn profile(id: &str, teach: &[&str], learn: &[&str]) -> SkillProfile {
    SkillProfile::new(id, teach.to_vec(), learn.to_vec())
}

#[test]
fn test_confidence_bounds_and_known_categories() {
    let categorizer = Categorizer::with_builtin_lexicon();
    let known: HashSet<String> = categorizer.categories().into_iter().collect();

    for name in SAMPLE_NAMES {
        let result = categorizer.categorize(name);
        assert!(
            (0.0..=1.0).contains(&result.confidence),
            "{} scored {}",
            name,
            result.confidence
        );
        assert!(known.contains(&result.category), "{} -> {}", name, result.category);
    }
}

#[test]
fn test_categorize_is_deterministic() {
    let categorizer = Categorizer::with_builtin_lexicon();
    let other = Categorizer::with_builtin_lexicon();

    for name in SAMPLE_NAMES {
        let first = categorizer.categorize(name);
        assert_eq!(first, categorizer.categorize(name));
        assert_eq!(first, other.categorize(name));
    }
}

#[test]
fn test_categorize_scenarios() {
    let categorizer = Categorizer::with_builtin_lexicon();
    let threshold = categorizer.settings().acceptance_threshold;

    let react = categorizer.categorize("React");
    assert_eq!(react.category, "Technology");
    assert!(react.confidence > threshold);

    let quantum = categorizer.categorize("Quantum Entanglement Theory");
    assert_eq!(quantum.category, OTHER_CATEGORY);
    assert!(quantum.confidence < threshold);
    assert!(quantum.reasoning.is_empty());
}

#[test]
fn test_other_results_have_no_reasoning() {
    let categorizer = Categorizer::with_builtin_lexicon();

    for name in SAMPLE_NAMES {
        let result = categorizer.categorize(name);
        if result.category == OTHER_CATEGORY {
            assert!(result.reasoning.is_empty(), "{} carried reasoning", name);
        } else {
            assert!(!result.reasoning.is_empty(), "{} had no reasoning", name);
        }
    }
}

#[test]
fn test_case_and_punctuation_insensitive() {
    let categorizer = Categorizer::with_builtin_lexicon();

    assert_eq!(categorizer.categorize("GUITAR"), categorizer.categorize("guitar"));
    assert_eq!(categorizer.categorize("  Guitar!  "), categorizer.categorize("Guitar"));
    assert_eq!(normalize_skill_name("Web-Development"), "web development");
    assert_eq!(normalize_skill_name("UX/UI Design"), "ux ui design");
}

#[test]
fn test_threshold_is_configurable() {
    let strict = Categorizer::new(
        Arc::new(CategoryLexicon::builtin()),
        CategorizerSettings {
            acceptance_threshold: 1.0,
            ..CategorizerSettings::default()
        },
    );
    let lenient = Categorizer::with_builtin_lexicon();

    // "music" alone carries less than full weight
    let name = "Music";
    let lenient_result = lenient.categorize(name);
    assert_eq!(lenient_result.category, "Music");
    assert!(lenient_result.confidence < 1.0);

    let strict_result = strict.categorize(name);
    assert_eq!(strict_result.category, OTHER_CATEGORY);
    assert_eq!(strict_result.confidence, lenient_result.confidence);
}

#[test]
fn test_custom_lexicon_from_toml() {
    let lexicon = CategoryLexicon::from_toml_str(
        r#"
            version = "test-1"
            priority = ["Games"]

            [[categories]]
            name = "Games"
            keywords = [{ phrase = "Chess", weight = 1.0 }]

            [[categories]]
            name = "Puzzles"
            keywords = [{ phrase = "chess problems", weight = 1.0 }]
        "#,
    )
    .unwrap();
    let categorizer = Categorizer::new(Arc::new(lexicon), CategorizerSettings::default());

    assert_eq!(categorizer.lexicon_version(), "test-1");
    assert_eq!(categorizer.categories(), vec!["Games", "Puzzles", OTHER_CATEGORY]);

    // Both categories saturate; the priority list settles the tie
    let result = categorizer.categorize("Chess Problems");
    assert_eq!(result.category, "Games");
    assert_eq!(result.confidence, 1.0);

    assert_eq!(categorizer.categorize("React").category, OTHER_CATEGORY);
}

#[test]
fn test_batch_preserves_order_and_duplicates() {
    let classifier = BatchClassifier::new(Arc::new(Categorizer::with_builtin_lexicon()));
    let names = ["Piano", "React", "Piano", "Quantum Entanglement Theory"];

    let results = classifier.categorize_many(&names);
    let categories: Vec<&str> = results.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(categories, vec!["Music", "Technology", "Music", OTHER_CATEGORY]);

    let stats = classifier.category_stats(&names);
    assert_eq!(stats.get("Music"), Some(&2));
    assert_eq!(stats.get("Technology"), Some(&1));
    assert_eq!(stats.get(OTHER_CATEGORY), Some(&1));
    assert_eq!(stats.get("Cooking"), None);
}

#[test]
fn test_full_mutual_fit() {
    let a = profile("a", &["Guitar"], &["Cooking"]);
    let b = profile("b", &["Cooking"], &["Guitar"]);

    let breakdown = score_breakdown(&a, &b);
    assert_eq!(breakdown.score, 1.0);
    assert_eq!(breakdown.union_size, 2);
    assert_eq!(breakdown.a_teaches_b.len() + breakdown.b_teaches_a.len(), 2);
}

#[test]
fn test_score_symmetry_and_bounds() {
    let users = vec![
        profile("a", &["Guitar", "Python"], &["Cooking"]),
        profile("b", &["Cooking"], &["Guitar"]),
        profile("c", &["cooking", "Yoga"], &["python", "Piano"]),
        profile("d", &[], &[]),
        profile("e", &["Piano", "Piano"], &["Yoga", "Guitar"]),
        profile("f", &["Chess"], &["Chess"]),
    ];

    for a in &users {
        for b in &users {
            let ab = compute_score(a, b);
            let ba = compute_score(b, a);
            assert_eq!(ab, ba, "{} vs {}", a.user_id, b.user_id);
            assert!((0.0..=1.0).contains(&ab));
        }
    }
}

#[test]
fn test_score_matches_on_normalized_names() {
    let a = profile("a", &["Web-Development"], &["ITALIAN cooking"]);
    let b = profile("b", &["italian  Cooking"], &["web development"]);

    assert_eq!(compute_score(&a, &b), 1.0);
}

#[test]
fn test_rank_ordering_and_exclusions() {
    let user = profile("u", &["Guitar", "Piano"], &["Cooking", "Yoga"]);
    let pool = vec![
        profile("u", &["Cooking"], &["Guitar"]),           // self
        profile("m", &["Cooking", "Yoga"], &["Guitar", "Piano"]), // excluded by match
        profile("z", &["Cooking"], &["Guitar"]),
        profile("b", &["Cooking"], &["Guitar"]),
        profile("c", &["Yoga"], &[]),
        profile("x", &["Chess"], &["Knitting"]),
        profile("b", &["Yoga", "Cooking"], &["Guitar", "Piano"]), // repeated id
    ];
    let excluded: HashSet<String> = ["m".to_string()].into_iter().collect();

    let ranked = rank_candidates(&user, &pool, &excluded);
    let ids: Vec<&str> = ranked.iter().map(|c| c.candidate_id.as_str()).collect();

    assert_eq!(ids, vec!["b", "z", "c"]);
    for pair in ranked.windows(2) {
        assert!(
            pair[0].score > pair[1].score
                || (pair[0].score == pair[1].score && pair[0].candidate_id < pair[1].candidate_id)
        );
    }
    assert!(ranked.iter().all(|c| c.score > 0.0));
}
