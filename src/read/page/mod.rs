mod reader;

pub use reader::{PageMetaData, PageReader};
