#![allow(non_camel_case_types)]

pub mod amount;
pub mod error;
pub mod helpers;
pub mod model;
pub mod transform;
pub mod types;
