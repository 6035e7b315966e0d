//! Individual preprocessing steps

pub mod encode;
pub mod resize;
