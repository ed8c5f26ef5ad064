use criterion::{Criterion, criterion_group, criterion_main};
use emmet_blocks_engine::{BlockMapper, Composer, TagTable, parse_fragment};

const PAGE: &str = "header#top.site>h1{Title}+p.lead{Intro}^main>(section.card*6>h2{Card $}+p{Body $}+ul>li{Item $}*5)+row>stack*3>p{Cell}^^footer>sep+p{Bye}";

fn bench_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("mapping");
    group.sample_size(10);

    let composer = Composer::emmet(BlockMapper::new(TagTable::core()));
    let html = composer.expand_html(PAGE).unwrap_or_default();

    group.bench_function("expand", |b| {
        b.iter(|| emmet_blocks_syntax::expand(std::hint::black_box(PAGE)));
    });

    group.bench_function("parse_fragment", |b| {
        b.iter(|| parse_fragment(std::hint::black_box(&html)));
    });

    group.bench_function("map", |b| {
        let elements = parse_fragment(&html);
        let mapper = BlockMapper::default();
        b.iter(|| mapper.map_all(std::hint::black_box(&elements)));
    });

    group.bench_function("compose", |b| {
        b.iter(|| composer.compose(std::hint::black_box(PAGE)));
    });

    group.finish();
}

criterion_group!(benches, bench_mapping);
criterion_main!(benches);
