use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use slimcsv::{HeaderIndex, Reader, Row, Writer};

fn orders(rows: usize) -> Vec<u8> {
    let mut w = Writer::new(Vec::new());
    w.write_row(["order_id", "symbol", "side", "price", "qty"]).unwrap();
    for i in 0..rows {
        w.write_field(i).unwrap();
        w.write_field("BTCUSDT").unwrap();
        w.write_field(if i % 2 == 0 { "buy" } else { "sell" }).unwrap();
        w.write_field(20_000.0 + i as f64 * 0.25).unwrap();
        w.write_field(i % 17).unwrap();
        w.end_line().unwrap();
    }
    w.into_inner().unwrap()
}

fn bench_scan(c: &mut Criterion) {
    let data = orders(100_000);

    let mut group = c.benchmark_group("scan");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("next", |b| {
        b.iter(|| {
            let mut reader = Reader::new(black_box(&data));
            reader.skip();
            let mut row = Row::new();
            let mut fields = 0;
            while reader.next(&mut row) {
                fields += row.len();
            }
            fields
        })
    });

    group.bench_function("next_coerce", |b| {
        let header = std::sync::Arc::new(HeaderIndex::parse("order_id,symbol,side,price,qty"));
        b.iter(|| {
            let mut reader = Reader::new(black_box(&data));
            reader.skip();
            let mut row = Row::with_header(header.clone());
            let mut notional = 0.0;
            while reader.next(&mut row) {
                let price = row.by_name("price").unwrap().try_as_float().unwrap();
                let qty = row.by_name("qty").unwrap().try_as_size().unwrap();
                notional += price * qty as f64;
            }
            notional
        })
    });

    group.finish();
}

criterion_group!(benches, bench_scan);
criterion_main!(benches);
