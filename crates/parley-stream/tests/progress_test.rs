use futures::{stream, StreamExt};
use parley_stream::{decode_progress, FrameDecoder, StreamAccumulator};
use parley_types::StreamFrame;

const BODY: &str = concat!(
    "data: {\"content\":\"Hi\",\"done\":false}\n\n",
    "data: {\"reasoning_content\":\"greet\",\"done\":false}\n\n",
    "data: {\"content\":\" there\",\"done\":false}\n\n",
    "data: {\"done\":true,\"chat\":{\"id\":42,\"message\":\"hello\",\"response\":\"Hi there\"}}\n\n",
);

fn chunked(body: &str, size: usize) -> Vec<Result<Vec<u8>, String>> {
    body.as_bytes()
        .chunks(size)
        .map(|c| Ok(c.to_vec()))
        .collect()
}

#[test]
fn test_at_most_once_over_growing_snapshots() {
    // Feed every prefix of the body; each source line must decode exactly once.
    let mut decoder = FrameDecoder::new();
    let mut frames = Vec::new();

    for end in 1..=BODY.len() {
        frames.extend(decoder.decode(&BODY[..end]));
    }
    // Re-scanning the full snapshot again yields nothing new.
    frames.extend(decoder.decode(BODY));

    assert_eq!(frames.len(), 4);
    assert_eq!(frames[0], StreamFrame::content("Hi"));
    assert_eq!(frames[1], StreamFrame::reasoning("greet"));
    assert_eq!(frames[2], StreamFrame::content(" there"));
    assert!(frames[3].is_done());
}

#[tokio::test]
async fn test_decode_progress_yields_per_chunk() {
    let chunks = chunked(BODY, 7);
    let chunk_count = chunks.len();

    let batches: Vec<_> = decode_progress(stream::iter(chunks)).collect().await;
    assert_eq!(batches.len(), chunk_count);

    let mut acc = StreamAccumulator::new();
    for batch in batches {
        acc.extend(batch.unwrap());
    }

    assert!(acc.is_done());
    assert_eq!(acc.content(), "Hi there");
    assert_eq!(acc.reasoning(), "greet");

    let record = acc.finalize("hello", "gpt-x", 1).unwrap();
    assert_eq!(record.id, 42);
    assert_eq!(record.response_text, "Hi there");
}

#[tokio::test]
async fn test_decode_progress_flushes_unterminated_tail() {
    let body = "data: {\"content\":\"a\",\"done\":false}\ndata: {\"done\":true}";
    let chunks = vec![Ok::<_, String>(body.as_bytes().to_vec())];

    let frames: Vec<StreamFrame> = decode_progress(stream::iter(chunks))
        .map(|batch| batch.unwrap())
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .flatten()
        .collect();

    assert_eq!(frames, vec![StreamFrame::content("a"), StreamFrame::done(None)]);
}

#[tokio::test]
async fn test_decode_progress_stops_at_error() {
    let chunks = vec![
        Ok(b"data: {\"content\":\"a\",\"done\":false}\n".to_vec()),
        Err("connection reset".to_string()),
        Ok(b"data: {\"content\":\"b\",\"done\":false}\n".to_vec()),
    ];

    let items: Vec<_> = decode_progress(stream::iter(chunks)).collect().await;

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_ref().unwrap(), &vec![StreamFrame::content("a")]);
    assert_eq!(items[1].as_ref().unwrap_err(), "connection reset");
}
