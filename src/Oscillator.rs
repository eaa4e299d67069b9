/// Harmonic oscillator x'' = -D*x/m as a first order system solved with the BDF
/// solver, several spring/mass combinations side by side.
#[allow(non_snake_case)]
pub mod harmonic_oscillator_IVP;
/// plotting of the oscillator solutions and CSV export
pub mod oscillator_plot;
