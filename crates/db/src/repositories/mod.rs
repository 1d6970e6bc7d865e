//! Query sets, one per table.

mod dog_repo;

pub use dog_repo::DogRepo;
