pub mod frame;
pub mod stroke;

pub use frame::FrameSlot;
pub use stroke::StrokeState;
