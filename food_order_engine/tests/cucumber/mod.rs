pub mod setups;
pub mod steps;

pub use world::FoodOrderWorld;
