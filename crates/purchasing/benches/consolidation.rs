use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{NaiveDate, Utc};
use stitchworks_core::{Entity, Money, SequenceIdGenerator};
use stitchworks_orders::{OrderKind, SourceLineItem, SourceOrder, SourceOrderId};
use stitchworks_purchasing::{
    commit, consolidate, ConsolidationRequest, OverReceiptPolicy, ReceivingSession, SupplierId,
};
use stitchworks_sizes::{Size, SizeVector};

const STYLES: [&str; 4] = ["Gildan G500", "Gildan G640", "Bella 3001", "Next Level 6210"];
const COLORS: [&str; 4] = ["Black", "Navy", "White", "Sport Grey"];

fn request() -> ConsolidationRequest {
    ConsolidationRequest {
        supplier_id: SupplierId::new("sup-77"),
        order_date: NaiveDate::from_ymd_opt(2024, 3, 18).unwrap(),
        expected_delivery_date: None,
        shipping: Money::from_cents(1_500),
        tax: Money::ZERO,
        notes: None,
        tracking: None,
    }
}

/// A selection of `count` orders drawing on a small style/color pool, so
/// consolidation keys actually collide the way real order books do.
fn selection(count: usize) -> Vec<SourceOrder> {
    (0..count)
        .map(|index| SourceOrder {
            kind: if index % 3 == 0 {
                OrderKind::Quote
            } else {
                OrderKind::Job
            },
            id: SourceOrderId::new(format!("job-{index}")),
            display_number: format!("J{index}"),
            customer_name: format!("Customer {}", index % 25),
            line_items: (0..3)
                .map(|line| SourceLineItem {
                    style_name: STYLES[(index + line) % STYLES.len()].to_string(),
                    brand_name: "Gildan".to_string(),
                    color_name: COLORS[(index * 7 + line) % COLORS.len()].to_string(),
                    color_code: None,
                    sizes: SizeVector::new()
                        .with(Size::M, 4)
                        .with(Size::L, 6)
                        .with(Size::Xl, 2),
                    unit_price: Money::from_cents(500),
                })
                .collect(),
        })
        .collect()
}

fn bench_consolidation(c: &mut Criterion) {
    let mut group = c.benchmark_group("consolidation");

    for order_count in [10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*order_count as u64));
        group.bench_with_input(
            BenchmarkId::new("merge_selection", order_count),
            order_count,
            |b, &count| {
                let orders = selection(count);
                b.iter(|| {
                    let ids = SequenceIdGenerator::new();
                    consolidate(black_box(&orders), request(), &ids, Utc::now()).unwrap()
                });
            },
        );
    }

    group.finish();
}

fn bench_receiving_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("receiving_commit");

    // Remaining-to-receive folds the whole receipt ledger, so commit cost
    // grows with ledger depth.
    for ledger_depth in [1, 10, 100].iter() {
        group.bench_with_input(
            BenchmarkId::new("ledger_depth", ledger_depth),
            ledger_depth,
            |b, &depth| {
                let ids = SequenceIdGenerator::new();
                let order = SourceOrder {
                    kind: OrderKind::Job,
                    id: SourceOrderId::new("job-0"),
                    display_number: "J0".to_string(),
                    customer_name: "Harbor Cafe".to_string(),
                    line_items: vec![SourceLineItem {
                        style_name: "Gildan G500".to_string(),
                        brand_name: "Gildan".to_string(),
                        color_name: "Black".to_string(),
                        color_code: None,
                        sizes: SizeVector::new().with(Size::M, 10_000),
                        unit_price: Money::from_cents(500),
                    }],
                };
                let mut po = consolidate(&[order], request(), &ids, Utc::now()).unwrap();
                let line_id = po.line_items()[0].id().clone();

                for _ in 0..depth {
                    let mut session = ReceivingSession::for_order(&po);
                    session.set_size(&line_id, Size::M, 1).unwrap();
                    po = commit(
                        &session,
                        "Alice",
                        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
                        OverReceiptPolicy::Reject,
                        &ids,
                        Utc::now(),
                    )
                    .unwrap();
                }

                b.iter(|| {
                    let mut session = ReceivingSession::for_order(black_box(&po));
                    session.set_size(&line_id, Size::M, 1).unwrap();
                    commit(
                        &session,
                        "Alice",
                        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
                        OverReceiptPolicy::Reject,
                        &ids,
                        Utc::now(),
                    )
                    .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_consolidation, bench_receiving_commit);
criterion_main!(benches);
