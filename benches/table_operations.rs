use std::hint::black_box;

use billboard_console::columns::{available_actions, render_row, ActionsMode, BillboardColumn};
use billboard_console::data::{
    Billboard, HateoasLink, Links, LocationInfo, ADD_TO_CAMPAIGN, REMOVE_FROM_CAMPAIGN,
};
use billboard_console::pagination::Pager;
use billboard_console::state::CollectionState;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use uuid::Uuid;

/// Create N billboards, every other one carrying campaign action links
fn create_billboards(count: usize) -> Vec<Billboard> {
    (0..count)
        .map(|i| {
            let id = Uuid::new_v4();
            let actions = if i % 2 == 0 {
                vec![
                    HateoasLink {
                        name: ADD_TO_CAMPAIGN.to_string(),
                        method: "POST".to_string(),
                        href: format!("/api/v1/campaigns/c/billboards/{id}"),
                    },
                    HateoasLink {
                        name: REMOVE_FROM_CAMPAIGN.to_string(),
                        method: "DELETE".to_string(),
                        href: format!("/api/v1/campaigns/c/billboards/{id}"),
                    },
                ]
            } else {
                Vec::new()
            };
            Billboard {
                id,
                width_mt: 10.0 + i as f64,
                height_mt: 3.0,
                dollars_per_day: 100.0 + (i % 50) as f64,
                location_id: Uuid::new_v4(),
                location: LocationInfo {
                    address: format!("{} Main St", i),
                    city: "Austin".to_string(),
                    state: "TX".to_string(),
                    country_code: "US".to_string(),
                    lat: 30.26,
                    lng: -97.74,
                },
                links: Some(Links {
                    self_link: None,
                    actions: Some(actions),
                    related: None,
                }),
            }
        })
        .collect()
}

/// Benchmark slicing every page of a collection
fn bench_page_slicing(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_slicing");

    for count in [10, 100, 1000].iter() {
        let billboards = create_billboards(*count);

        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &len| {
            b.iter(|| {
                let mut pager = Pager::new();
                let mut rows = pager.slice(&billboards).len();
                while pager.next(len) {
                    rows += pager.slice(black_box(&billboards)).len();
                }
                rows
            });
        });
    }
    group.finish();
}

/// Benchmark replacing a collection after a reload
fn bench_collection_replace(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection_replace");

    for count in [10, 100, 1000].iter() {
        let billboards = create_billboards(*count);

        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            let mut state = CollectionState::new();
            state.replace(billboards.clone());
            while state.next_page() {}
            b.iter(|| {
                state.begin_loading();
                state.replace(black_box(billboards.clone()));
            });
        });
    }
    group.finish();
}

/// Benchmark rendering one page of billboard cells in each actions mode
fn bench_render_cells(c: &mut Criterion) {
    let billboards = create_billboards(5);
    let mut group = c.benchmark_group("render_cells");

    for mode in [ActionsMode::Full, ActionsMode::Current, ActionsMode::Available] {
        group.bench_function(format!("{mode:?}"), |b| {
            b.iter(|| {
                billboards
                    .iter()
                    .map(|billboard| {
                        render_row::<BillboardColumn>(black_box(billboard), mode)
                            .iter()
                            .map(|cell| cell.display().len())
                            .sum::<usize>()
                    })
                    .sum::<usize>()
            });
        });
    }
    group.finish();
}

/// Benchmark resolving row actions from HATEOAS links
fn bench_available_actions(c: &mut Criterion) {
    let billboards = create_billboards(100);

    c.bench_function("available_actions", |b| {
        b.iter(|| {
            billboards
                .iter()
                .map(|billboard| {
                    available_actions::<BillboardColumn>(black_box(billboard), ActionsMode::Available)
                        .len()
                })
                .sum::<usize>()
        });
    });
}

criterion_group!(
    benches,
    bench_page_slicing,
    bench_collection_replace,
    bench_render_cells,
    bench_available_actions
);
criterion_main!(benches);
