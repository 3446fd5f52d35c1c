pub mod accumulator;
pub mod decoder;
pub mod progress;
pub mod snapshot;

pub use accumulator::{StreamAccumulator, EMPTY_RESPONSE_NOTICE};
pub use decoder::{FrameDecoder, DATA_PREFIX, DONE_MARKER};
pub use progress::{decode_progress, FrameBatchStream};
pub use snapshot::ResponseSnapshot;
