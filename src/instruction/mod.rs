pub use self::instruction::{Instruction, Job};
pub use self::justification::{Justification};
pub use self::escpos_image::EscposImage;
pub use self::dither::{Bitmap, DitherMode};

pub mod coerce;
pub mod decode;
pub mod dither;
pub mod escpos_image;
mod instruction;
mod justification;
