pub mod batch;
pub mod client;
pub mod types;

pub use batch::SaveBatch;
pub use client::InventoryClient;
