// src/reader/mod.rs
mod sync_reader;
mod channel_reader;

pub use sync_reader::{ReadSeek, TdmsReader};
pub use channel_reader::{ChannelData, ChannelReader};
