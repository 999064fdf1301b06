//! Font descriptor flags used when classifying observed fonts during
//! analysis (bold/italic/symbolic bits from `/FontDescriptor /Flags`).

pub mod font_descriptor;

pub use font_descriptor::{FontDescriptor, FontFlags};
