pub mod client;
pub mod error;
pub mod model;

pub use client::GardenApi;
pub use error::GardenError;
pub use model::{
    GardenEntry, GardenPlant, Health, NewGardenEntry, Species, User, VerifiedIdentity,
};
