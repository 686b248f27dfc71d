// Input readers and report writers

pub mod csv;
pub mod error;
pub mod export;
pub mod json;
pub mod layout;
pub mod load;
pub mod workbook;

pub use error::IoError;
pub use layout::InputLayout;
pub use load::{load_input, InputSource, LoadReport};
