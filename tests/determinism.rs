use ingredient_screen::{normalize, split_and_normalize, AnalysisReport, Matcher, MatchType};

const LABELS: &[&str] = &[
    "Enriched Wheat Flour (Wheat Flour, Niacin, Reduced Iron, Thiamine Mononitrate, Riboflavin, \
     Folic Acid), Sugar, Soybean Oil, High Fructose Corn Syrup, Salt, Soy Lecithin, \
     Artificial Flavor, Red 40, Yellow 5",
    "Carbonated Water, Caramel Color, Aspartame, Phosphoric Acid, Potassium Benzoate, \
     Natural Flavors, Citric Acid, Caffeine",
    "Water, Sugar, Carrageenan, Vegetable Oil (Canola And/Or Sunflower Oil)",
    "Rolled Oats, Water, Sea Salt",
    "Sugar, Palm Oil, Hazelnuts (13%), Skimmed Milk Powder (8.7%), Fat\u{2013}Reduced Cocoa (7.4%)",
    "CONTAINS: Vit. C, Crème Fraîche;  Salt.",
];

#[test]
fn test_normalize_is_idempotent() {
    for label in LABELS {
        let once = normalize(label);
        assert_eq!(normalize(&once), once, "normalize not idempotent for {label:?}");

        for term in split_and_normalize(label) {
            assert_eq!(normalize(&term), term, "split term {term:?} is not normalized");
        }
    }
}

#[test]
fn test_split_is_deterministic() {
    for label in LABELS {
        let first = split_and_normalize(label);
        for run in 0..50 {
            assert_eq!(split_and_normalize(label), first, "run {run} split {label:?} differently");
        }
    }
}

#[test]
fn test_analysis_is_deterministic() {
    let matcher = Matcher::bundled().unwrap();
    let tags = ["en:e171", "en:e955", "en:e476"];

    for label in LABELS {
        let first = matcher.assess(Some(label), Some(tags.as_slice()));
        for run in 0..50 {
            let again = matcher.assess(Some(label), Some(tags.as_slice()));
            assert_eq!(again, first, "run {run} produced a different report for {label:?}");
        }
    }
}

#[test]
fn test_rebuilt_index_gives_same_results() {
    let a = Matcher::bundled().unwrap();
    let b = Matcher::bundled().unwrap();

    for label in LABELS {
        assert_eq!(
            a.analyze(Some(label), None::<&[&str]>),
            b.analyze(Some(label), None::<&[&str]>),
            "independently built matchers disagree on {label:?}"
        );
    }
}

#[test]
fn test_results_are_ordered_by_confidence() {
    let matcher = Matcher::bundled().unwrap();
    let report: AnalysisReport = matcher.assess(Some(LABELS[0]), None::<&[&str]>);

    let names: Vec<&str> = report.matches.iter().map(|m| m.canonical_name.as_str()).collect();
    assert_eq!(
        names,
        [
            "Soybean Oil",
            "High Fructose Corn Syrup",
            "Soy Lecithin",
            "Artificial Flavors",
            "Red 40",
            "Yellow 5",
            "Corn Syrup",
            "Yellow 6",
        ]
    );
    assert!(
        report
            .matches
            .windows(2)
            .all(|pair| pair[0].confidence >= pair[1].confidence)
    );

    let corn_syrup = &report.matches[6];
    assert_eq!(corn_syrup.match_type, MatchType::Substring);
    assert_eq!(corn_syrup.ingredient, "high fructose corn syrup");

    let yellow_6 = &report.matches[7];
    assert_eq!(yellow_6.match_type, MatchType::Fuzzy);
    assert_eq!(yellow_6.ingredient, "yellow 5");
}
