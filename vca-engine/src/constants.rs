// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Constants
//!
//! Defines the numerical defaults used in the calculation

pub const DEFAULT_KRYLOV_DEPTH: usize = 200; // Number of Lanczos steps per starting vector
pub const DEFAULT_BROADENING: f64 = 0.05; // Imaginary part added to the frequency
pub const DEFAULT_EIGENSOLVER_TOLERANCE: f64 = 1e-10; // Residual norm at which the ground state is accepted
pub const DEFAULT_EIGENSOLVER_ITERATIONS: usize = 100; // Maximum number of Lanczos restarts
pub const DEFAULT_EIGENSOLVER_SUBSPACE: usize = 64; // Krylov dimension between restarts
pub const LANCZOS_BREAKDOWN: f64 = 1e-10; // Relative size of the residual at which the Krylov space is exhausted
pub const ZERO_NORM: f64 = 1e-14; // Starting vectors below this norm contribute nothing
