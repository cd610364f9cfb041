//! Drive a path animation from a manual clock.
//!
//! The animator only ever sees timestamps, so the same code runs under a
//! frame callback in a UI or a plain loop here.
//!
//! Run with: cargo run --example animated_marker

use route_viz::{AnimatorConfig, PathAnimator, RoutePoint};

fn main() {
    let path = vec![
        RoutePoint::new(51.9244, 4.4777),  // Rotterdam
        RoutePoint::new(36.1408, -5.3536), // Gibraltar
        RoutePoint::new(30.0444, 32.3499), // Suez
        RoutePoint::new(1.2644, 103.8400), // Singapore
    ];

    let config = AnimatorConfig::default();
    let mut animator = PathAnimator::start(path, config.duration_ms);

    println!("Animating over {}ms:\n", config.duration_ms);

    // Simulate frames arriving roughly every 250ms of wall-clock time.
    let mut now_ms = 100_000.0;
    while let Some(frame) = animator.tick(now_ms) {
        println!(
            "  t={:>6.0}ms progress={:.2} marker at {:>8.4}, {:>9.4}{}",
            now_ms - 100_000.0,
            frame.progress,
            frame.position.lat,
            frame.position.lng,
            if frame.done { "  (done)" } else { "" },
        );
        now_ms += 250.0;
    }

    // Cancel-and-restart begins cleanly from progress 0.
    animator.restart();
    let first = animator.tick(200_000.0).expect("restarted animator ticks");
    println!("\nAfter restart: progress={:.2}", first.progress);
    animator.cancel();
    assert!(animator.tick(200_500.0).is_none());
    println!("After cancel: no further frames");
}
