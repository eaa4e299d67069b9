/// radius profiles of the funnel shapes and their normalisation to a common volume
pub mod funnel_shapes;
/// Torricelli outflow and the explicit height recurrence
pub mod funnel_drainage;
/// multi-panel animation of the draining funnels
pub mod funnel_animation;
