//! +EV Parlay and Arbitrage Engine
//!
//! Compares a fixed-line prop feed (the platform assumes a 50% over/under
//! split on every line) against true-probability sportsbook quotes, scores
//! the gap as an edge, and builds recommendations on top of the ranked set.
//!
//! ## Architecture
//!
//! ```text
//! Fixed-line props ─┐
//!                   ├─→ Edge calculator ─→ ranked MatchedProp set
//! Market quotes  ───┘                            │
//!                    ┌───────────────────────────┼─────────────────┐
//!                    ↓                           ↓                 ↓
//!             Parlay builder            Arbitrage detector    Stake sizer
//!             (correlation model)       (pairs / triples)     (fractional Kelly)
//! ```
//!
//! Every component is a pure, synchronous computation over in-memory
//! snapshots: no I/O, no shared state, safe to call from any thread.

pub mod arbitrage;
pub mod config;
pub mod correlation;
pub mod edge;
pub mod error;
pub mod parlay;
pub mod stake;
pub mod types;


pub use error::{Error, Result};
