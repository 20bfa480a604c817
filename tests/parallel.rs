// Parallel and serial direct transforms must agree bit for bit, and the
// runtime threshold override must fall back cleanly.
#![cfg(feature = "parallel")]

use epicycles::dft::{
    direct_transform_slice, parallel_dft_threshold, set_parallel_dft_threshold,
    DEFAULT_PARALLEL_DFT_THRESHOLD,
};
use epicycles::Complex;
use rand::{Rng, SeedableRng};

const LEN: usize = 300;

// One test function: the override is process-wide state.
#[test]
fn parallel_matches_serial_and_override_resets() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let input: Vec<Complex> = (0..LEN)
        .map(|_| Complex::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0)))
        .collect();

    set_parallel_dft_threshold(1);
    assert_eq!(parallel_dft_threshold(), 1);
    let parallel = direct_transform_slice(&input);

    set_parallel_dft_threshold(usize::MAX);
    assert_eq!(parallel_dft_threshold(), usize::MAX);
    let serial = direct_transform_slice(&input);

    set_parallel_dft_threshold(0);
    let from_env = std::env::var("EPICYCLES_PAR_DFT_THRESHOLD")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v != 0);
    assert_eq!(
        parallel_dft_threshold(),
        from_env.unwrap_or(DEFAULT_PARALLEL_DFT_THRESHOLD)
    );

    assert_eq!(parallel.len(), LEN);
    for (k, (p, s)) in parallel.iter().zip(serial.iter()).enumerate() {
        assert_eq!(p.re.to_bits(), s.re.to_bits(), "bin {} re", k);
        assert_eq!(p.im.to_bits(), s.im.to_bits(), "bin {} im", k);
    }
}
