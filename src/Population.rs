/// reading of the yearly world population table
pub mod population_data;
/// linear and logarithmic plots of the population
pub mod population_plot;
