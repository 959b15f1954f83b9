pub mod clock;
pub mod driver;
pub mod population;
pub mod random;
pub mod sky;
