//! Read-only inputs injected into the engines.
//!
//! Nothing in this module is ever mutated by gameplay: alphabets and question
//! banks are immutable content, and the RNG oracle is a pure function of its
//! seed. Engines receive these at construction so tests can supply synthetic
//! content and fixed seeds.
mod alphabet;
mod error;
mod questions;
mod rng;

pub use alphabet::{Alphabet, Symbol};
pub use error::ContentError;
pub use questions::{Question, QuestionBank};
pub use rng::{Dice, PcgRng, RngOracle, compute_seed};
