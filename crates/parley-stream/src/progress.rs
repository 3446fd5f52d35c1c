use futures::{Stream, StreamExt};
use parley_types::StreamFrame;
use std::pin::Pin;
use tracing::debug;

use crate::decoder::FrameDecoder;
use crate::snapshot::ResponseSnapshot;

/// One item per progress event: the frames that chunk completed (possibly none)
pub type FrameBatchStream<E> = Pin<Box<dyn Stream<Item = Result<Vec<StreamFrame>, E>> + Send>>;

/// Decode a stream of body chunks into per-chunk frame batches.
///
/// Every chunk yields exactly one item, so consumers can react to the first byte
/// even before a full line has arrived. After the body ends the unterminated
/// tail is flushed as a final batch. The first transport error is yielded and
/// ends the stream.
pub fn decode_progress<S, E>(chunks: S) -> FrameBatchStream<E>
where
    S: Stream<Item = Result<Vec<u8>, E>> + Send + 'static,
    E: Send + 'static,
{
    Box::pin(async_stream::stream! {
        let mut chunks = Box::pin(chunks);
        let mut snapshot = ResponseSnapshot::with_capacity(8192);
        let mut decoder = FrameDecoder::new();
        let mut failed = false;

        while let Some(chunk) = chunks.next().await {
            match chunk {
                Ok(bytes) => {
                    snapshot.extend(&bytes);
                    yield Ok(decoder.decode(snapshot.text()));
                }
                Err(e) => {
                    failed = true;
                    yield Err(e);
                    break;
                }
            }
        }

        if !failed {
            snapshot.finish();
            let tail = decoder.finish(snapshot.text());
            debug!(bytes = snapshot.len(), tail_frames = tail.len(), "Response body ended");
            if !tail.is_empty() {
                yield Ok(tail);
            }
        }
    })
}
