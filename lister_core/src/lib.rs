// lister_core/src/lib.rs
extern crate self as lister_core;

pub mod constants;
pub mod ecs;
pub mod error;
pub mod logging;
pub mod report;
pub mod scene;
pub mod storage;

pub use ecs::reflect::Reflect;
pub use error::ListerError;
pub use reflect_derive::Reflect;
pub use report::lister::{ListOutcome, list_variables, list_variables_with};
