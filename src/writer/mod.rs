// src/writer/mod.rs
mod sync_writer;

pub use sync_writer::TdmsWriter;
