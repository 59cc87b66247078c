// src/backend/utils/mod.rs

pub mod console;
pub mod crypto;
pub mod guards;
pub mod money;
pub mod rng;
pub mod shape;
pub mod time;
