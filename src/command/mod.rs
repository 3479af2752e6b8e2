pub use self::font::Font;
pub use self::command::Command;
pub use self::code_table::CodeTable;
pub use self::image_mode::ImageMode;
pub use self::barcode::BarcodeSystem;

mod code_table;
mod command;
mod font;
mod image_mode;
mod barcode;
