//! CPU-side resource descriptions

mod material;

pub use material::{Material, MaterialUbo};
