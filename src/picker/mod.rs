pub mod action;
pub mod error;
pub mod machine;
pub mod picker_model;
pub mod scanner;
