pub mod fixture_grid;
pub mod identicon;
pub mod pitch;
