// Word and phrase classification over a set of per-locale scorers.

pub mod phrase;
pub mod word;
