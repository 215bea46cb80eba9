pub mod project;
pub mod review;
pub mod shared;
pub mod social;
pub mod user;
