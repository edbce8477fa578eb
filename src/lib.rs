/*
    Top-level
*/

mod digit;
mod error;

pub mod poly;

pub use digit::*;
pub use error::*;
