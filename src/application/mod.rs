pub mod comment;
pub mod follow;
pub mod project;
pub mod reaction;
pub mod review;
pub mod scrap;
pub mod user;
