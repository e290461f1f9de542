//! Card piles: draw, hand, discard, exhaust.
//!
//! Pile membership is mutually exclusive. Exhaust is a permanent sink; every
//! other move conserves the total card count.

pub mod piles;

pub use piles::{CardPiles, DrawStep, Pile};
