use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use unitconf_lexer::Lexer;

fn sample_input() -> String {
    let block = "# service definition\n\
service web /usr/bin/web --port 8080 \\\n    --workers 4\n\
    class \"main daemons\" # inline\n\
    user www\n\n\
on boot\n\
    exec \"mkdir -p /var/run/web\"\n";
    block.repeat(200)
}

fn bench_lexer(c: &mut Criterion) {
    let input = sample_input();
    let mut group = c.benchmark_group("lexer");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("tokenize", |b| {
        b.iter(|| {
            let tokens = Lexer::from_text(black_box(&input)).tokenize();
            black_box(tokens)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_lexer);
criterion_main!(benches);
