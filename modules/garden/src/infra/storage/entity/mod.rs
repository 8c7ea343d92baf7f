pub mod garden_entry;
pub mod plant;
pub mod user;
