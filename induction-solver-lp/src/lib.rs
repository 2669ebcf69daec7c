//! Mixed-integer solver backend for the induction planner.
//!
//! This crate provides [`LpSolver`], the default implementation of the
//! [`Solver`](induction_core::Solver) trait. It translates a
//! [`DecisionModel`](induction_core::DecisionModel) into a binary program for
//! `good_lp`, solves it with the pure-Rust `microlp` backend and reads the
//! flags back into an [`Assignment`](induction_core::Assignment).
//!
//! `microlp` proves optimality whenever it returns, so this backend reports
//! either [`SolverOutcome::Optimal`](induction_core::SolverOutcome::Optimal),
//! infeasibility, or an unknown outcome when the optional time limit expires
//! or the backend fails.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod lp;
mod solver;

pub use solver::{LpSolver, LpSolverConfig};
