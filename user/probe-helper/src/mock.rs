//! In-memory device used by the unit tests. Records every access and can be
//! told to fail a read or write at a given offset.

use std::{
    cell::RefCell,
    io::{self, Read, Seek, SeekFrom, Write},
    rc::Rc,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Seek(u64),
    Read(u64),
    Write(u64, u8),
}

#[derive(Debug, Default)]
pub struct MockState {
    pub bytes: Vec<u8>,
    pub pos: u64,
    pub ops: Vec<Op>,
    pub fail_read_at: Option<u64>,
    pub fail_write_at: Option<u64>,
    pub released: bool,
}

impl MockState {
    pub fn reads(&self) -> Vec<u64> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Read(off) => Some(*off),
                _ => None,
            })
            .collect()
    }

    pub fn writes(&self) -> Vec<u64> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Write(off, _) => Some(*off),
                _ => None,
            })
            .collect()
    }
}

pub struct MockDevice {
    state: Rc<RefCell<MockState>>,
}

impl MockDevice {
    pub fn with_bytes(bytes: &[u8]) -> (Self, Rc<RefCell<MockState>>) {
        let state = Rc::new(RefCell::new(MockState {
            bytes: bytes.to_vec(),
            ..Default::default()
        }));
        (
            MockDevice {
                state: state.clone(),
            },
            state,
        )
    }
}

impl Read for MockDevice {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut state = self.state.borrow_mut();
        let pos = state.pos;
        state.ops.push(Op::Read(pos));
        if state.fail_read_at == Some(pos) {
            return Err(io::Error::from_raw_os_error(5));
        }
        let idx = pos as usize;
        if idx >= state.bytes.len() || buf.is_empty() {
            return Ok(0);
        }
        buf[0] = state.bytes[idx];
        state.pos += 1;
        Ok(1)
    }
}

impl Write for MockDevice {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state.borrow_mut();
        let pos = state.pos;
        let Some(&value) = buf.first() else {
            return Ok(0);
        };
        state.ops.push(Op::Write(pos, value));
        if state.fail_write_at == Some(pos) {
            return Err(io::Error::from_raw_os_error(6));
        }
        let idx = pos as usize;
        if idx >= state.bytes.len() {
            state.bytes.resize(idx + 1, 0);
        }
        state.bytes[idx] = value;
        state.pos += 1;
        Ok(1)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for MockDevice {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let mut state = self.state.borrow_mut();
        let target = match pos {
            SeekFrom::Start(off) => off,
            _ => return Err(io::Error::from_raw_os_error(29)),
        };
        state.ops.push(Op::Seek(target));
        state.pos = target;
        Ok(target)
    }
}

impl Drop for MockDevice {
    fn drop(&mut self) {
        self.state.borrow_mut().released = true;
    }
}
