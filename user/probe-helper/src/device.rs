use std::{
    fs::{File, OpenOptions},
    io::{self, Read, Seek, SeekFrom, Write},
    path::Path,
};

use log::{debug, info};

use crate::error::{Access, DeviceError, Result};

/// An opened, seekable, read-write device resource.
///
/// The inner stream is owned exclusively and released when the handle is
/// dropped, so every early return closes the device.
pub struct DeviceHandle<D: Read + Write + Seek> {
    inner: D,
    pos: u64,
}

impl DeviceHandle<File> {
    /// Open the device node at `path` for reading and writing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| DeviceError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        info!("opened device {}", path.display());
        Ok(Self::new(file))
    }
}

impl<D: Read + Write + Seek> DeviceHandle<D> {
    pub fn new(inner: D) -> Self {
        Self { inner, pos: 0 }
    }

    /// Read the single byte stored at `offset`.
    pub fn read_byte(&mut self, offset: u64) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.seek_to(offset, Access::Read)?;
        self.inner
            .read_exact(&mut buf)
            .map_err(|source| io_error(Access::Read, offset, source))?;
        debug!("read 0x{:02X} at offset 0x{:02X}", buf[0], offset);
        Ok(buf[0])
    }

    /// Store `value` at `offset`.
    pub fn write_byte(&mut self, offset: u64, value: u8) -> Result<()> {
        self.seek_to(offset, Access::Write)?;
        self.inner
            .write_all(&[value])
            .map_err(|source| io_error(Access::Write, offset, source))?;
        debug!("wrote 0x{:02X} at offset 0x{:02X}", value, offset);
        Ok(())
    }

    /// Flush pending writes and release the device.
    pub fn close(mut self) -> Result<()> {
        let pos = self.pos;
        self.inner
            .flush()
            .map_err(|source| io_error(Access::Write, pos, source))?;
        info!("closed device");
        Ok(())
    }

    fn seek_to(&mut self, offset: u64, access: Access) -> Result<()> {
        let pos = self
            .inner
            .seek(SeekFrom::Start(offset))
            .map_err(|source| io_error(access, offset, source))?;
        if pos != offset {
            return Err(io_error(
                access,
                offset,
                io::Error::new(
                    io::ErrorKind::Other,
                    format!("seek landed at 0x{:02X}", pos),
                ),
            ));
        }
        self.pos = offset;
        Ok(())
    }
}

fn io_error(access: Access, offset: u64, source: io::Error) -> DeviceError {
    DeviceError::Io {
        access,
        offset,
        source,
    }
}
