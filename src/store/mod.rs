mod client;
mod memory;
mod result;

pub use client::*;
pub use memory::*;
pub use result::*;
