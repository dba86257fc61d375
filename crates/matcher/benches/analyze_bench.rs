use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use matcher::{AnalysisInput, Matcher};

const LABEL: &str = "Enriched Flour (Wheat Flour, Niacin, Reduced Iron, Thiamine Mononitrate, \
    Riboflavin, Folic Acid), Sugar, Soybean Oil, High Fructose Corn Syrup, Partially \
    Hydrogenated Cottonseed Oil, Cocoa (Processed with Alkali), Contains 2% or less of: Salt, \
    Soy Lecithin, Sodium Benzoate, Red 40 Lake, Yellow 5, Artificial Flavor, TBHQ";

const CLEAN_LABEL: &str = "Organic Rolled Oats, Organic Cane Sugar, Sea Salt, Cinnamon";

fn bench_analyze(c: &mut Criterion) {
    let matcher = Matcher::bundled().expect("bundled list builds");
    let tags = ["en:e322", "en:e211", "en:e129", "en:e102", "en:e319"];

    let mut group = c.benchmark_group("analyze");
    group.throughput(Throughput::Bytes(LABEL.len() as u64));
    group.bench_function("flagged_label", |b| {
        b.iter(|| matcher.analyze(Some(black_box(LABEL)), Some(tags.as_slice())))
    });
    group.bench_function("clean_label", |b| {
        b.iter(|| matcher.analyze(Some(black_box(CLEAN_LABEL)), None::<&[&str]>))
    });
    group.finish();

    let inputs: Vec<AnalysisInput> = (0..256)
        .map(|i| {
            if i % 2 == 0 {
                AnalysisInput::text(LABEL).with_tags(tags)
            } else {
                AnalysisInput::text(CLEAN_LABEL)
            }
        })
        .collect();

    let mut batch = c.benchmark_group("analyze_batch");
    batch.throughput(Throughput::Elements(inputs.len() as u64));
    batch.bench_function("x256", |b| b.iter(|| matcher.analyze_batch(black_box(&inputs))));
    batch.finish();
}

criterion_group!(benches, bench_analyze);
criterion_main!(benches);
