use std::{
    io::{Read, Seek, Write},
    path::{Path, PathBuf},
};

use log::{error, info};

use crate::{
    device::DeviceHandle,
    error::{DeviceError, Result},
};

/// Number of leading bytes the probe reads and then clears.
pub const PROBE_LEN: u64 = 16;
/// Value written to every probed offset.
pub const FILL_BYTE: u8 = 0x00;

/// Outcome of a successful probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub path: PathBuf,
    /// Bytes observed at offsets `0..PROBE_LEN` before they were cleared.
    pub values: [u8; PROBE_LEN as usize],
}

/// Read-then-clear round trip against a raw device path.
pub struct DeviceProbe {
    path: PathBuf,
}

impl DeviceProbe {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the device and run both phases, printing progress to `out`.
    ///
    /// Nothing is printed and no access is attempted if the open fails.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<ProbeReport> {
        info!("probing {}", self.path.display());
        let handle = DeviceHandle::open(&self.path).map_err(|err| {
            error!("{}", err);
            err
        })?;
        writeln!(out, "Communicating with device {}", self.path.display())?;
        let values = run_on(handle, out)?;
        Ok(ProbeReport {
            path: self.path.clone(),
            values,
        })
    }
}

/// Run the read phase then the write phase on an opened handle.
///
/// The handle is consumed; it is released whether the phases succeed or not.
pub fn run_on<D, W>(mut handle: DeviceHandle<D>, out: &mut W) -> Result<[u8; PROBE_LEN as usize]>
where
    D: Read + Write + Seek,
    W: Write,
{
    let mut values = [0u8; PROBE_LEN as usize];
    for (offset, slot) in (0..PROBE_LEN).zip(values.iter_mut()) {
        writeln!(out, "Reading from offset 0x{:02X}", offset)?;
        *slot = handle.read_byte(offset).map_err(log_failure)?;
        writeln!(out, "data read = 0x{:02X}", *slot)?;
    }
    for offset in 0..PROBE_LEN {
        writeln!(out, "Writing to offset 0x{:02X}", offset)?;
        handle
            .write_byte(offset, FILL_BYTE)
            .map_err(log_failure)?;
        writeln!(out, "wrote data")?;
    }
    handle.close()?;
    Ok(values)
}

fn log_failure(err: DeviceError) -> DeviceError {
    error!("{}", err);
    err
}
