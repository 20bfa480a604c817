//! Builds an engine from a synthetic open sketch and logs what each period
//! draws. Run with `RUST_LOG=debug` to see the engine's own log lines.
use epicycles::{EpicycleConfig, Epicycles, Style};

fn main() {
    env_logger::init();

    // An open spiral: its ends are far apart, so Gibbs padding kicks in.
    let sketch: Vec<(f64, f64)> = (0..120)
        .map(|i| {
            let t = i as f64 * 0.1;
            (200.0 + 8.0 * t * t.cos(), 200.0 + 8.0 * t * t.sin())
        })
        .collect();

    let config = EpicycleConfig::from_env();
    let mut engine = match Epicycles::from_points(&sketch, config) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("cannot build engine: {}", err);
            return;
        }
    };
    println!(
        "{} sketched points, {} after padding, {} ticks per period",
        sketch.len(),
        engine.len(),
        engine.period()
    );

    let mut longest_trace = 0;
    for tick in 1..=2 * engine.period() {
        let frame = engine.tick();
        let trace_segments = frame
            .commands
            .iter()
            .filter(|c| c.style() == Style::Trace)
            .count();
        longest_trace = longest_trace.max(trace_segments);
        if tick % engine.period() == 0 {
            println!(
                "tick {}: tip at {}, longest trace {} segments",
                tick, frame.trace_point, longest_trace
            );
            longest_trace = 0;
        }
    }
}
