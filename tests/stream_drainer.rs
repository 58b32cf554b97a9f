// tests/stream_drainer.rs

mod common;

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use common::{init_tracing, with_timeout};
use shellstep::exec::StreamDrainer;
use tokio::io::{AsyncRead, AsyncWriteExt, ReadBuf};

/// A stream that always has another byte ready and never ends.
struct Endless;

impl AsyncRead for Endless {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if buf.remaining() > 0 {
            buf.put_slice(b"x");
        }
        Poll::Ready(Ok(()))
    }
}

#[tokio::test]
async fn collects_everything_written_before_eof() {
    init_tracing();
    // A tiny buffer forces the writer to block until the drainer reads.
    let (mut writer, reader) = tokio::io::duplex(64);
    let drainer = StreamDrainer::spawn("stdout", reader);

    let payload: Vec<u8> = (0..100_000u32).map(|i| (i % 251) as u8).collect();
    let expected = payload.clone();
    let producer = tokio::spawn(async move {
        writer.write_all(&payload).await.expect("write payload");
        // Dropping the writer closes the stream.
    });

    with_timeout(producer).await.expect("producer task");
    let captured = with_timeout(drainer.finish()).await;

    assert_eq!(captured, expected);
}

#[tokio::test]
async fn finish_keeps_pending_bytes_while_writer_is_open() {
    init_tracing();
    let (mut writer, reader) = tokio::io::duplex(1024);
    let drainer = StreamDrainer::spawn("stderr", reader);

    writer.write_all(b"partial line").await.expect("write");

    let started = Instant::now();
    let captured = with_timeout(drainer.finish()).await;

    assert_eq!(captured, b"partial line");
    // Writer still open: the flush gives up after a short idle window.
    assert!(started.elapsed() < Duration::from_secs(2));
    drop(writer);
}

#[tokio::test]
async fn final_flush_is_bounded_when_writer_never_stops() {
    init_tracing();
    let (mut writer, reader) = tokio::io::duplex(4096);
    let drainer = StreamDrainer::spawn("stdout", reader);

    let chatter = tokio::spawn(async move {
        loop {
            if writer.write_all(b"still here\n").await.is_err() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    let started = Instant::now();
    let captured = with_timeout(drainer.finish()).await;

    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(captured.starts_with(b"still here\n"));
    chatter.abort();
}

#[tokio::test]
async fn empty_stream_yields_empty_sink() {
    init_tracing();
    let (writer, reader) = tokio::io::duplex(64);
    drop(writer);

    let drainer = StreamDrainer::spawn("stdout", reader);
    let captured = with_timeout(drainer.finish()).await;

    assert!(captured.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn finish_is_bounded_when_data_is_always_ready() {
    init_tracing();
    let drainer = StreamDrainer::spawn("stdout", Endless);
    tokio::time::sleep(Duration::from_millis(20)).await;

    let started = Instant::now();
    let captured = with_timeout(drainer.finish()).await;

    assert!(
        started.elapsed() < Duration::from_secs(5),
        "finish took {:?}",
        started.elapsed()
    );
    assert!(!captured.is_empty());
    assert!(captured.iter().all(|&b| b == b'x'));
}
