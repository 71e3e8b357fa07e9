pub mod avi;
pub mod video;

pub use avi::FrameCodec;
pub use video::{EncodeSettings, VideoEncoder};
