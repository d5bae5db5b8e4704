use criterion::{black_box, criterion_group, criterion_main, AxisScale, Criterion, PlotConfiguration};
use signal_timing::control_system::{allocate_signal_timings, SignalCycle};
use signal_timing::shared_data::{Direction, Lane};
use signal_timing::SignalConfig;
use std::time::Duration;

// Builds a cycle from an allocated plan with the given number of lanes.
fn create_cycle(lane_count: usize) -> SignalCycle {
    let lanes: Vec<Lane> = (0..lane_count)
        .map(|i| Lane {
            id: format!("lane{}", i),
            name: format!("Lane {}", i + 1),
            direction: Direction::North,
            vehicle_count: (i as u32 * 9) % 70,
        })
        .collect();
    SignalCycle::new(allocate_signal_timings(&lanes, &SignalConfig::default()).timings)
}

fn bench_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("signal_cycle");
    group.sample_size(100);
    group.measurement_time(Duration::from_secs(5));
    group.warm_up_time(Duration::from_secs(2));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Linear));

    for &size in [2, 4, 8].iter() {
        group.bench_function(format!("tick_size_{}", size), |b| {
            let mut cycle = create_cycle(size);
            b.iter(|| {
                cycle.tick();
                black_box(&cycle);
            });
        });

        group.bench_function(format!("state_at_size_{}", size), |b| {
            let cycle = create_cycle(size);
            let mut offset = 0u32;
            b.iter(|| {
                offset = offset.wrapping_add(7);
                black_box(cycle.state_at(black_box(offset)));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cycle);
criterion_main!(benches);
