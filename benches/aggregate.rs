use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vote_shift::filter::Selection;
use vote_shift::model::{office, VoteRecord};
use vote_shift::{municipal_shares, regional_summaries, ShareBasis};

const PARTIES: [&str; 5] = ["PT", "PL", "MDB", "PSDB", "PDT"];
const REGIONS: [&str; 5] = ["Centro-Oeste", "Nordeste", "Norte", "Sudeste", "Sul"];

fn synthetic_records(municipalities: u32) -> Vec<VoteRecord> {
    let mut records = Vec::with_capacity(municipalities as usize * PARTIES.len());
    for muni in 0..municipalities {
        let region = REGIONS[(muni % 5) as usize];
        for (i, party) in PARTIES.iter().enumerate() {
            records.push(VoteRecord {
                year: 2022,
                office_code: office::PRESIDENT,
                region: region.to_string(),
                municipality_code: muni,
                party: party.to_string(),
                valid_votes: 1000 + (muni as u64 * 13 + i as u64 * 7) % 5000,
            });
        }
    }
    records
}

fn bench_aggregation(c: &mut Criterion) {
    // Roughly the size of the real dataset: 5570 municipalities.
    let records = synthetic_records(5570);

    c.bench_function("municipal_shares", |b| {
        b.iter(|| {
            municipal_shares(
                black_box(&records),
                &Selection::All,
                ShareBasis::OfMunicipality,
            )
        })
    });

    let shares = municipal_shares(&records, &Selection::All, ShareBasis::OfMunicipality);
    c.bench_function("regional_summaries", |b| {
        b.iter(|| regional_summaries(black_box(&shares)))
    });
}

criterion_group!(benches, bench_aggregation);
criterion_main!(benches);
