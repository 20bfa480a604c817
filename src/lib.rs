//! # epicycles - draw a sketch with rotating circles
//!
//! Decompose a hand-drawn curve into its discrete Fourier components and
//! replay it as a chain of rotating vectors ("epicycles"), one animation tick
//! at a time.
//!
//! ## Features
//!
//! - **Complex arithmetic** with both pure and in-place operations ([`num`])
//! - **Growable complex sequences** with `linspace` and compact printing ([`sequence`])
//! - **Direct DFT** (normalized, any length) and the signed bin-frequency map ([`dft`])
//! - **In-place radix-2 FFT** (unnormalized, fixed power-of-two sizes) with a
//!   cached cosine-table planner ([`fft`])
//! - **Epicycle engine** that renders through an abstract [`draw::Canvas`] ([`epicycle`])
//!
//! ## Cargo Features
//!
//! - `std` (default): `std::error::Error` impls and environment overrides
//! - `parallel`: evaluate direct-transform bins on a Rayon pool
//!
//! ## Scale conventions
//!
//! [`dft::direct_transform`] divides by `N`; [`fft::fast_transform_in_place`]
//! does not. On the same input the fast result is exactly `N` times the
//! direct one.
//!
//! ## Example
//!
//! ```
//! use epicycles::{Complex, Epicycles};
//!
//! let sketch: Vec<Complex> = (0..32)
//!     .map(|i| Complex::expi(i as f64 * core::f64::consts::TAU / 32.0).scale(50.0))
//!     .collect();
//! let mut engine = Epicycles::new(&sketch).unwrap();
//! let frame = engine.tick();
//! assert!(!frame.commands.is_empty());
//! ```

#![no_std]
extern crate alloc;
#[cfg(any(feature = "std", test))]
extern crate std;

pub mod config;
pub mod dft;
pub mod draw;
pub mod epicycle;
pub mod error;
pub mod fft;
pub mod num;
pub mod sequence;

pub use config::{EpicycleConfig, SynthesisStrategy};
pub use dft::{direct_transform, frequency_table, FrequencyTable};
pub use draw::{Canvas, CommandRecorder, DrawCommand, Style};
pub use epicycle::{Epicycles, Frame};
pub use error::FourierError;
pub use fft::{fast_transform_in_place, FftPlanner};
pub use num::Complex;
pub use sequence::ComplexSequence;
