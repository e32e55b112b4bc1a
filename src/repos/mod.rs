pub mod drink_repo;
pub mod error;
#[cfg(test)]
pub mod memory;
pub mod schema;

pub use drink_repo::{Drink, DrinkRepo, PgDrinkRepo};
