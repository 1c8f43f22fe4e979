pub mod creation;
pub mod movement;
pub mod query;
