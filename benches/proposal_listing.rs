//! Benchmarks for proposal listing and the vote codec
//!
//! Listing fetches every record named by the Index concurrently, skips bad
//! entries, and sorts newest first. Measured against the in-memory directory
//! so only the repository work shows up.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use urbanplan::codec;
use urbanplan::directory::MockDirectory;
use urbanplan::proposals::record::{record_key, ProposalRecord, INDEX_KEY};
use urbanplan::proposals::{District, ProposalRepository, ProposalStatus};

/// Directory holding `count` proposals, every tenth one corrupt
fn populated_directory(count: usize) -> MockDirectory {
    let directory = MockDirectory::new();
    let mut ids = Vec::with_capacity(count);

    for i in 0..count {
        let id = format!("prop-{}-{:04}", 1_700_000_000_000u64 + i as u64, i % 10_000);
        if i % 10 == 9 {
            directory.put_raw(&record_key(&id), b"{corrupt");
        } else {
            let record = ProposalRecord {
                votes: codec::encode(i as f64),
                timestamp: 1_700_000_000 + (i as u64 * 7919) % 100_000,
                owner: format!("0x{:040x}", i % 5),
                location: District::new((i % 16) as u8 + 1).unwrap(),
                status: ProposalStatus::Pending,
                title: format!("Proposal {}", i),
                description: String::new(),
            };
            directory.put_raw(&record_key(&id), &serde_json::to_vec(&record).unwrap());
        }
        ids.push(id);
    }

    directory.put_raw(INDEX_KEY, &serde_json::to_vec(&ids).unwrap());
    directory
}

fn bench_list_all(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("list_all");

    for count in [10, 100, 1_000] {
        let repository = ProposalRepository::new(populated_directory(count));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                let listed = runtime.block_on(repository.list_all()).unwrap();
                black_box(listed)
            });
        });
    }

    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let token = codec::encode(123_456.0);

    c.bench_function("codec_encode", |b| b.iter(|| codec::encode(black_box(123_456.0))));
    c.bench_function("codec_decode", |b| {
        b.iter(|| codec::decode(black_box(&token)).unwrap())
    });
}

criterion_group!(benches, bench_list_all, bench_codec);
criterion_main!(benches);
