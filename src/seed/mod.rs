pub mod catalog;
mod stages;

pub use stages::run;
