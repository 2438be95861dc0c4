pub mod encoder;
pub mod frame_pipeline;
pub mod image_source;
pub mod transport;

pub use encoder::{parse_fixed_text, Encoding, WireEncoder, FIXED_TEXT_LEN};
pub use frame_pipeline::{FramePipeline, PipelineSettings, StatefulPipeline};
pub use image_source::{decode_frame, FileImageSource};
pub use transport::{FrameSink, MemorySink, UdpSink};
