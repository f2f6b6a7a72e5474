// src/metadata/mod.rs
mod object_path;
mod raw_data_index;
mod object;

pub use object_path::ObjectPath;
pub use raw_data_index::RawDataIndex;
pub use object::TdmsObject;
