//! Integration tests for the digitizer-daemon command pipeline.
//!
//! These tests script a host conversation over an in-memory serial stream,
//! run it through the public command loop, and check both the acknowledgment
//! bytes and the exact frames that reached the (recorded) gadget nodes.

use std::time::Duration;

use digitizer_core::ReportId;
use digitizer_daemon::application::command_loop::{run_command_loop, ResponseEmitter, SessionEnd};
use digitizer_daemon::application::device_writer::DeviceWriter;
use digitizer_daemon::application::process_command::{CommandProcessor, ProcessorSettings};
use digitizer_daemon::infrastructure::hid_gadget::mock::RecordingSink;
use tokio::io::{duplex, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::watch;
use tokio_test::io::Builder;

/// Builds a processor whose pointer and consumer sinks share one recorder.
fn recording_processor(settings: ProcessorSettings) -> (CommandProcessor, RecordingSink) {
    let recorder = RecordingSink::new();
    let writer = DeviceWriter::new(Box::new(recorder.clone()), Box::new(recorder.clone()));
    (CommandProcessor::new(writer, settings), recorder)
}

#[tokio::test(start_paused = true)]
async fn test_full_host_session() {
    // Arrange
    let reader = Builder::new()
        .read(b"MOVE 100 200\n")
        .read(b"CLICK left\n")
        .read(b"MOVE 99999 100\n")
        .read(b"CLICK up\n")
        .read(b"MEDIA_NEXT\n")
        .read(b"BUTTON_PRESS left\nBUTTON_PRESS right\nRELEASE\n")
        .build();
    let writer = Builder::new()
        .write(b"OK\n")
        .write(b"OK\n")
        .write(b"ERROR INVALID_COORDINATE: X coordinate 99999 out of range [0, 32767]\n")
        .write(b"ERROR INVALID_BUTTON: invalid button 'up', must be one of: left, right\n")
        .write(b"OK\n")
        .write(b"OK\n")
        .write(b"OK\n")
        .write(b"OK\n")
        .build();
    let mut emitter = ResponseEmitter::new(writer);
    let (mut processor, recorder) = recording_processor(ProcessorSettings::default());
    let (_tx, mut rx) = watch::channel(false);

    // Act
    let end = run_command_loop(BufReader::new(reader), &mut emitter, &mut processor, &mut rx)
        .await
        .expect("session");

    // Assert
    assert_eq!(end, SessionEnd::EndOfStream);
    assert_eq!(
        recorder.frames(),
        vec![
            vec![0x01, 0x00, 0x64, 0x00, 0xC8, 0x00], // MOVE
            vec![0x01, 0x01, 0x64, 0x00, 0xC8, 0x00], // CLICK press
            vec![0x01, 0x00, 0x64, 0x00, 0xC8, 0x00], // CLICK release
            vec![0x02, 0x02],                         // MEDIA_NEXT press
            vec![0x02, 0x00],                         // MEDIA_NEXT release
            vec![0x01, 0x01, 0x64, 0x00, 0xC8, 0x00], // BUTTON_PRESS left
            vec![0x01, 0x03, 0x64, 0x00, 0xC8, 0x00], // BUTTON_PRESS right
            vec![0x01, 0x00, 0x64, 0x00, 0xC8, 0x00], // RELEASE
        ]
    );
    assert_eq!(processor.state().position(), (100, 200));
}

#[tokio::test(start_paused = true)]
async fn test_configured_hold_separates_media_frames() {
    // Arrange
    let reader = Builder::new().read(b"MEDIA_PLAY_PAUSE\n").build();
    let writer = Builder::new().write(b"OK\n").build();
    let mut emitter = ResponseEmitter::new(writer);
    let settings = ProcessorSettings {
        hold: Duration::from_millis(120),
        ..ProcessorSettings::default()
    };
    let (mut processor, recorder) = recording_processor(settings);
    let (_tx, mut rx) = watch::channel(false);

    // Act
    run_command_loop(BufReader::new(reader), &mut emitter, &mut processor, &mut rx)
        .await
        .expect("session");

    // Assert
    let records = recorder.records();
    assert_eq!(records.len(), 2);
    assert!(records
        .iter()
        .all(|r| r.report_id == Some(ReportId::Consumer)));
    assert_eq!(records[0].bytes, vec![0x02, 0x01]);
    assert_eq!(records[1].bytes, vec![0x02, 0x00]);
    assert!(records[1].at - records[0].at >= Duration::from_millis(120));
}

#[tokio::test]
async fn test_device_failure_reported_and_session_continues() {
    // Arrange
    let reader = Builder::new()
        .read(b"MOVE 300 400\n")
        .read(b"MOVE 1 2\n")
        .build();
    let writer = Builder::new()
        .write(b"ERROR DEVICE_WRITE_FAILED: pointer report write failed: recording sink set to fail\n")
        .write(b"OK\n")
        .build();
    let mut emitter = ResponseEmitter::new(writer);
    let (mut processor, recorder) = recording_processor(ProcessorSettings::default());
    recorder.set_failing(true);
    let (_tx, mut rx) = watch::channel(false);

    // Act: fail the first write only.
    let mut reader = BufReader::new(reader);
    let mut first = Vec::new();
    reader.read_until(b'\n', &mut first).await.expect("first line");
    let response = processor.handle_line(&first).await.expect("response");
    emitter.emit(&response).await.expect("emit");
    recorder.set_failing(false);
    let end = run_command_loop(reader, &mut emitter, &mut processor, &mut rx)
        .await
        .expect("session");

    // Assert
    assert_eq!(end, SessionEnd::EndOfStream);
    assert_eq!(recorder.frames(), vec![vec![0x01, 0x00, 0x01, 0x00, 0x02, 0x00]]);
}

#[tokio::test(start_paused = true)]
async fn test_pointer_state_survives_a_new_session() {
    // Arrange
    let (mut processor, recorder) = recording_processor(ProcessorSettings::default());
    let (_tx, mut rx) = watch::channel(false);

    let first = Builder::new().read(b"MOVE 500 600\nBUTTON_PRESS right\n").build();
    let mut first_emitter = ResponseEmitter::new(Builder::new().write(b"OK\n").write(b"OK\n").build());
    run_command_loop(BufReader::new(first), &mut first_emitter, &mut processor, &mut rx)
        .await
        .expect("first session");
    recorder.clear();

    // Act: the host reconnects and clicks without moving.
    let second = Builder::new().read(b"CLICK left\n").build();
    let mut second_emitter = ResponseEmitter::new(Builder::new().write(b"OK\n").build());
    run_command_loop(BufReader::new(second), &mut second_emitter, &mut processor, &mut rx)
        .await
        .expect("second session");

    // Assert: position and the held right button carried over.
    assert_eq!(
        recorder.frames(),
        vec![
            vec![0x01, 0x03, 0xF4, 0x01, 0x58, 0x02],
            vec![0x01, 0x02, 0xF4, 0x01, 0x58, 0x02],
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_waits_for_in_progress_hold() {
    // Arrange: a live duplex pipe standing in for the serial port.
    let (host, device) = duplex(256);
    let (device_read, device_write) = tokio::io::split(device);
    let (mut host_read, mut host_write) = tokio::io::split(host);
    let (mut processor, recorder) = recording_processor(ProcessorSettings::default());
    let (tx, mut rx) = watch::channel(false);

    host_write.write_all(b"CLICK right\n").await.expect("host write");

    // Act: request shutdown as soon as the press frame has been written.
    let watcher = recorder.clone();
    let session = async {
        let mut emitter = ResponseEmitter::new(device_write);
        run_command_loop(BufReader::new(device_read), &mut emitter, &mut processor, &mut rx).await
    };
    let trigger = async {
        while watcher.frames().is_empty() {
            tokio::task::yield_now().await;
        }
        tx.send(true).expect("receiver alive");
    };
    let (end, ()) = tokio::join!(session, trigger);

    // Assert: the click completed and was acknowledged before the loop stopped.
    assert_eq!(end.expect("session"), SessionEnd::Shutdown);
    assert_eq!(recorder.frames().len(), 2);
    let mut ack = Vec::new();
    BufReader::new(&mut host_read)
        .read_until(b'\n', &mut ack)
        .await
        .expect("ack");
    assert_eq!(ack, b"OK\n");
}
