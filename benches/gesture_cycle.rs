//! Microbenchmarks for the gesture arbiter hot path.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rfab::gesture::{
    ArbiterConfig, GestureArbiter, ManualClock, ManualScheduler, RecordingSink,
};

fn bench_gesture_cycles(c: &mut Criterion) {
    c.bench_function("press_hold_drag_release", |b| {
        let clock = ManualClock::new();
        let scheduler = ManualScheduler::new();
        let sink = RecordingSink::new();
        let mut arbiter = GestureArbiter::new(
            ArbiterConfig::default(),
            Arc::new(clock.clone()),
            Box::new(scheduler.clone()),
            Box::new(sink.clone()),
        );

        b.iter(|| {
            arbiter.on_press_start().unwrap();
            let (id, delay) = scheduler.take_pending().unwrap();
            clock.advance(delay);
            arbiter.on_timer_fire(id);
            arbiter.on_move(black_box(70.0)).unwrap();
            arbiter.on_release().unwrap();
            black_box(sink.take())
        });
    });

    c.bench_function("tap_toggle", |b| {
        let clock = ManualClock::new();
        let scheduler = ManualScheduler::new();
        let sink = RecordingSink::new();
        let mut arbiter = GestureArbiter::new(
            ArbiterConfig::default(),
            Arc::new(clock.clone()),
            Box::new(scheduler.clone()),
            Box::new(sink.clone()),
        );

        b.iter(|| {
            arbiter.on_press_start().unwrap();
            arbiter.on_release().unwrap();
            black_box(sink.take())
        });
    });
}

criterion_group!(benches, bench_gesture_cycles);
criterion_main!(benches);
