pub mod assembler;
pub mod dto;
pub mod use_case;
