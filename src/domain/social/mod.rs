pub mod comment;
pub mod follow;
pub mod reaction;
pub mod repository;
pub mod scrap;
