/*
    Polynomial numbers
*/

mod mantissa;
mod number;
mod parse;
mod transform;

pub use mantissa::*;
pub use number::*;
pub use parse::SEP;
