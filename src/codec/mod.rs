pub mod reader;

pub use reader::ByteReader;
