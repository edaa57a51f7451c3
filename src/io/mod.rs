mod file_reader;
mod slice_reader;

pub use file_reader::{load_file, DEFAULT_MAX_FILE_SIZE};
pub use slice_reader::{read_u16_be, read_u16_le, read_u32_be, read_u32_le, SliceReader};
