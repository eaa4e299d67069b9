pub mod error;
#[allow(non_snake_case)]
pub mod Funnel;
#[allow(non_snake_case)]
pub mod Oscillator;
#[allow(non_snake_case)]
pub mod Population;
#[allow(non_snake_case)]
pub mod Utils;
pub mod cli;
pub mod settings;
