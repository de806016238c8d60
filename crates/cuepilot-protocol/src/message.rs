//! OSC 1.0 binary message encoding.
//!
//! Wire layout: `<address> <typetags> <arg>...` where the address and type
//! tag string are null-terminated and zero-padded to a 4-byte boundary, and
//! every argument occupies a multiple of 4 bytes. Integers and floats are
//! big-endian.

use std::fmt;

/// A single OSC argument. The receiver convention only needs `i`, but the
/// `f` and `s` tags cost nothing and keep the encoder honest OSC.
#[derive(Debug, Clone, PartialEq)]
pub enum OscArg {
    Int(i32),
    Float(f32),
    Str(String),
}

impl OscArg {
    /// The type tag character for this argument.
    fn tag(&self) -> u8 {
        match self {
            OscArg::Int(_) => b'i',
            OscArg::Float(_) => b'f',
            OscArg::Str(_) => b's',
        }
    }

    fn encode_into(&self, buf: &mut Vec<u8>) {
        match self {
            OscArg::Int(v) => buf.extend_from_slice(&v.to_be_bytes()),
            OscArg::Float(v) => buf.extend_from_slice(&v.to_be_bytes()),
            OscArg::Str(s) => write_padded_str(buf, s),
        }
    }
}

/// One outbound OSC message: address path plus arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct OscMessage {
    pub address: String,
    pub args: Vec<OscArg>,
}

impl OscMessage {
    pub fn new(address: impl Into<String>, args: Vec<OscArg>) -> Self {
        Self {
            address: address.into(),
            args,
        }
    }

    /// The common single-int form (`/...../connect 1`).
    pub fn int(address: impl Into<String>, value: i32) -> Self {
        Self::new(address, vec![OscArg::Int(value)])
    }

    /// Encode to the datagram bytes sent on the wire.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.address.len() + 8 + self.args.len() * 4);

        write_padded_str(&mut buf, &self.address);

        // Type tag string: ',' followed by one tag char per argument.
        let mut tags = Vec::with_capacity(self.args.len() + 1);
        tags.push(b',');
        tags.extend(self.args.iter().map(OscArg::tag));
        write_padded_bytes(&mut buf, &tags);

        for arg in &self.args {
            arg.encode_into(&mut buf);
        }
        buf
    }
}

impl fmt::Display for OscMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)?;
        for arg in &self.args {
            match arg {
                OscArg::Int(v) => write!(f, " {}", v)?,
                OscArg::Float(v) => write!(f, " {}", v)?,
                OscArg::Str(s) => write!(f, " {:?}", s)?,
            }
        }
        Ok(())
    }
}

/// Append `s`, a terminating null, and zero padding to the next 4-byte
/// boundary. OSC strings always carry at least one null.
fn write_padded_str(buf: &mut Vec<u8>, s: &str) {
    write_padded_bytes(buf, s.as_bytes());
}

fn write_padded_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(bytes);
    let pad = 4 - (bytes.len() % 4);
    buf.extend(std::iter::repeat(0u8).take(pad));
}
