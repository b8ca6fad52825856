//! Tour planning over an obstacle arena.
//!
//! This crate ties the planner together. Given an [`Arena`](planner_arena::Arena)
//! it derives landing goals, solves every ordered pair of goals, picks the
//! cheapest visiting order and encodes the result as drive commands:
//!
//! - [`salesman`] - goal ordering by exhaustive or memoized search
//! - [`command`] - the `<S|L|R><F|B><ddd>` token stream and annotated records
//! - [`TourPlanner`] - the pipeline, rerun with relaxed margins until a tour
//!   exists
//!
//! # Example
//!
//! ```
//! use planner_arena::{Arena, parse_map_string};
//! use planner_tour::solve_tour;
//! use planner_types::ArenaConfig;
//!
//! let obstacles = parse_map_string("MAP=[[1,1,12,1],[2,11,11,3]]").unwrap();
//! let arena = Arena::with_obstacles(ArenaConfig::default(), &obstacles).unwrap();
//!
//! let tour = solve_tour(&arena, arena.config().start_pose()).unwrap();
//! assert_eq!(tour.goal_order()[0], 2);
//! for command in tour.commands() {
//!     println!("{command}");
//! }
//! ```
//!
//! # Failure
//!
//! Unreachable goal pairs are not errors; they only constrain the order.
//! When no order works at all, margins are relaxed step by step. Running out
//! of steps is [`PlannerError::Unsolvable`](planner_types::PlannerError::Unsolvable).

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

pub mod command;
pub mod planner;
pub mod salesman;

pub use command::{CommandEncoder, MOVING_TAG, RESET_COMMAND, SCAN_MARKER};
pub use planner::{PlanOutcome, TourPlanner, solve_tour};
pub use salesman::{MEMOIZED_GOAL_LIMIT, TourCosts, order_goals};
