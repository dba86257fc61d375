use std::sync::Arc;
use std::thread;

use ingredient_screen::{AnalysisInput, Matcher, Verdict};
use rayon::prelude::*;

const LABELS: &[&str] = &[
    "Carbonated Water, Caramel Color, Aspartame, Phosphoric Acid, Potassium Benzoate",
    "Water, Sugar, Carrageenan, Vegetable Oil (Canola And/Or Sunflower Oil)",
    "Rolled Oats, Water, Sea Salt",
    "water, canola oil, sucralose, titanium dioxide",
];

#[test]
fn test_concurrent_analysis_matches_sequential() {
    let matcher = Arc::new(Matcher::bundled().unwrap());
    let expected: Vec<_> = LABELS
        .iter()
        .map(|label| matcher.analyze(Some(label), None::<&[&str]>))
        .collect();
    let expected = Arc::new(expected);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let matcher = Arc::clone(&matcher);
            let expected = Arc::clone(&expected);
            thread::spawn(move || {
                for _ in 0..25 {
                    for (label, want) in LABELS.iter().zip(expected.iter()) {
                        let got = matcher.analyze(Some(label), None::<&[&str]>);
                        assert_eq!(&got, want, "Thread {i} produced different matches for {label:?}");
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("analysis thread panicked");
    }
}

#[test]
fn test_batch_matches_sequential() {
    let matcher = Matcher::bundled().unwrap();
    let mut inputs: Vec<AnalysisInput> = LABELS.iter().map(|label| AnalysisInput::text(*label)).collect();
    inputs.push(AnalysisInput::default());
    inputs.push(AnalysisInput::text("sugar, salt").with_tags(["en:e171"]));

    let batch = matcher.analyze_batch(&inputs);
    assert_eq!(batch.len(), inputs.len());

    for (input, report) in inputs.iter().zip(&batch) {
        let sequential = matcher.assess(
            input.ingredients_text.as_deref(),
            input.additive_tags.as_deref(),
        );
        assert_eq!(report, &sequential);
    }

    assert_eq!(batch[2].verdict, Verdict::Clean);
    assert_eq!(batch[4].verdict, Verdict::Unknown);
    assert_eq!(batch[5].verdict, Verdict::Flagged);
    assert_eq!(batch[5].matches[0].canonical_name, "Titanium Dioxide");
}

#[test]
fn test_shared_matcher_under_rayon() {
    let matcher = Matcher::bundled().unwrap();
    let labels: Vec<String> = (0..200)
        .map(|i| format!("{}, ingredient {i}", LABELS[i % LABELS.len()]))
        .collect();

    let parallel: Vec<usize> = labels
        .par_iter()
        .map(|label| matcher.analyze(Some(label), None::<&[&str]>).len())
        .collect();
    let sequential: Vec<usize> = labels
        .iter()
        .map(|label| matcher.analyze(Some(label), None::<&[&str]>).len())
        .collect();

    assert_eq!(parallel, sequential);
}
