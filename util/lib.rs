/*!
Shared helpers for the salary classification crates.
*/

pub mod serve;
