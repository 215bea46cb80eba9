pub mod local_file_storage;
pub mod traits;
pub mod validation;
