//! # Pantokit Kinematics
//!
//! Forward and inverse kinematics for the two-arm pantograph plotter.
//!
//! - **Forward**: motor angle pair to pen position, via circle-circle
//!   intersection of the two far arms.
//! - **Inverse**: pen position to motor angle pair, via derivative-free
//!   minimization of the positioning error. Solver strategies are tried
//!   in a fixed order (Nelder-Mead, then Powell) from a fixed initial
//!   guess, keeping results reproducible.

pub mod model;
pub mod solver;

pub use model::{forward, inverse, INITIAL_GUESS, TOLERANCE};
pub use solver::{strategies, NelderMead, Powell, SolveOutcome, Solver};
