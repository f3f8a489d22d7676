//! USB HID gadget device nodes (`/dev/hidgN`).
//!
//! Each node created by the kernel's HID gadget function accepts one complete
//! input report per `write(2)`.  [`GadgetSink`] wraps an async file handle and
//! flushes after every frame so a write error is reported against the frame
//! that caused it.

pub mod mock;

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::application::device_writer::{DeviceError, DeviceWriter, ReportSink};
use crate::infrastructure::storage::config::DeviceConfig;

/// A report sink backed by a gadget device node.
#[derive(Debug)]
pub struct GadgetSink {
    path: PathBuf,
    file: File,
}

impl GadgetSink {
    /// Opens `path` write-only.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Open`] if the node cannot be opened.
    pub async fn open(path: &Path) -> Result<Self, DeviceError> {
        let file = OpenOptions::new()
            .write(true)
            .open(path)
            .await
            .map_err(|source| DeviceError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// A second handle onto the same node.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Open`] if the descriptor cannot be duplicated.
    pub async fn try_clone(&self) -> Result<Self, DeviceError> {
        let file = self
            .file
            .try_clone()
            .await
            .map_err(|source| DeviceError::Open {
                path: self.path.clone(),
                source,
            })?;
        Ok(Self {
            path: self.path.clone(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ReportSink for GadgetSink {
    async fn write_report(&mut self, frame: &[u8]) -> io::Result<()> {
        self.file.write_all(frame).await?;
        self.file.flush().await
    }
}

/// Opens the configured gadget nodes and builds a [`DeviceWriter`] over them.
///
/// When both report IDs are configured to the same node it is opened once and
/// the handle is shared.
///
/// # Errors
///
/// Returns [`DeviceError::Open`] if either node cannot be opened.
pub async fn open_device_writer(config: &DeviceConfig) -> Result<DeviceWriter, DeviceError> {
    let pointer = GadgetSink::open(&config.pointer_path).await?;
    let consumer = if config.shares_node() {
        pointer.try_clone().await?
    } else {
        GadgetSink::open(&config.consumer_path).await?
    };
    info!(
        pointer = %pointer.path().display(),
        consumer = %consumer.path().display(),
        "opened HID gadget nodes"
    );
    Ok(DeviceWriter::new(Box::new(pointer), Box::new(consumer)))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
