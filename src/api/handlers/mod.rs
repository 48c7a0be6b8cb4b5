//! HTTP request handlers.

pub mod apartments;
pub mod assemble;
pub mod documents;
pub mod health;

pub use apartments::{apartment_list_handler, delete_apartment_handler};
pub use assemble::assemble_handler;
pub use documents::document_list_handler;
pub use health::health_handler;
