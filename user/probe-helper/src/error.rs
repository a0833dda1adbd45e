use std::{fmt, io, path::PathBuf};

pub type Result<T> = core::result::Result<T, DeviceError>;

/// Which half of the probe touched the device when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Read => f.write_str("read"),
            Access::Write => f.write_str("write"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DeviceError {
    #[error("could not open device '{}' (are you root?): {}", .path.display(), describe(.source))]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{access} failed at offset 0x{offset:02X}: {}", describe(.source))]
    Io {
        access: Access,
        offset: u64,
        #[source]
        source: io::Error,
    },
    #[error("failed to print report: {0}")]
    Report(#[from] io::Error),
}

impl DeviceError {
    /// The name printed in front of the description.
    pub fn kind_name(&self) -> &'static str {
        match self {
            DeviceError::Open { .. } => "DeviceOpenError",
            DeviceError::Io { .. } => "DeviceIOError",
            DeviceError::Report(_) => "ReportError",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            DeviceError::Open { .. } => 1,
            DeviceError::Io { .. } => 2,
            DeviceError::Report(_) => 3,
        }
    }

    /// Offset the failing access targeted, if any.
    pub fn offset(&self) -> Option<u64> {
        match self {
            DeviceError::Io { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

/// Human readable form of an io error, tagged with the errno symbol when the
/// OS reported one.
pub fn describe(err: &io::Error) -> String {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        return "short read".to_string();
    }
    match err.raw_os_error().and_then(errno_name) {
        Some(name) => format!("{} [{}]", err, name),
        None => err.to_string(),
    }
}

macro_rules! declare_errno {
    ($($err:ident = $val:literal),+ $(,)?) => {
        /// Symbolic name of a Linux errno value.
        pub fn errno_name(errno: i32) -> Option<&'static str> {
            if !cfg!(target_os = "linux") {
                return None;
            }
            match errno {
                $($val => Some(stringify!($err)),)+
                _ => None,
            }
        }
    };
}

declare_errno! {
    EPERM = 1,
    ENOENT = 2,
    EINTR = 4,
    EIO = 5,
    ENXIO = 6,
    EBADF = 9,
    EAGAIN = 11,
    ENOMEM = 12,
    EACCES = 13,
    EFAULT = 14,
    ENOTBLK = 15,
    EBUSY = 16,
    ENODEV = 19,
    ENOTDIR = 20,
    EISDIR = 21,
    EINVAL = 22,
    ENFILE = 23,
    EMFILE = 24,
    ENOTTY = 25,
    ETXTBSY = 26,
    EFBIG = 27,
    ENOSPC = 28,
    ESPIPE = 29,
    EROFS = 30,
}
