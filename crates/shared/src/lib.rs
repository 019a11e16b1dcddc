pub mod arrange;
pub mod domain;
pub mod error;
pub mod protocol;
