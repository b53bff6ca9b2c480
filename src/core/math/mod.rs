pub mod polyfit;

pub use polyfit::{Endpoint, PolynomialFit};
