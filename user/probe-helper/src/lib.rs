//! Plain file I/O against a character device node: read the first bytes one
//! at a time, then clear them.

mod device;
mod error;
mod logger;
#[cfg(test)]
mod mock;
mod probe;

pub use device::DeviceHandle;
pub use error::{describe, errno_name, Access, DeviceError, Result};
pub use logger::init_logger;
pub use probe::{run_on, DeviceProbe, ProbeReport, FILL_BYTE, PROBE_LEN};

/// Printed when no device path is given.
pub const USAGE: &str = "usage: devprobe /dev/accesio/device";
