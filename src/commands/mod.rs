pub mod config;
pub mod controller;
pub mod help;
pub mod result;
pub mod upload;

pub use controller::UploadController;
pub use result::CommandResult;
