//! Primitive encoding for the WKB binary format.
//!
//! Implements byte-order aware writing of 32-bit integers and IEEE-754
//! doubles.

use lazy_static::lazy_static;

use crate::error::{Error, Result};

lazy_static! {
    static ref NATIVE_BYTE_ORDER: ByteOrder = probe_native_byte_order();
}

/// WKB byte order, numbered by its marker byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ByteOrder {
    /// Big-endian.
    #[default]
    Xdr = 0,
    /// Little-endian.
    Ndr = 1,
}

impl ByteOrder {
    /// Creates a ByteOrder from its marker byte.
    pub fn from_u8(v: u8) -> Result<ByteOrder> {
        match v {
            0 => Ok(ByteOrder::Xdr),
            1 => Ok(ByteOrder::Ndr),
            _ => Err(Error::UnexpectedValue(format!("Unsupported byte order {v}"))),
        }
    }

    /// The marker byte written before every WKB record.
    pub fn marker(self) -> u8 {
        self as u8
    }
}

/// Byte order of the running machine, probed once per process.
pub fn native_byte_order() -> ByteOrder {
    *NATIVE_BYTE_ORDER
}

fn probe_native_byte_order() -> ByteOrder {
    if u16::from_ne_bytes([1, 0]) == 1 {
        ByteOrder::Ndr
    } else {
        ByteOrder::Xdr
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding binary data in a fixed byte order.
#[derive(Debug, Clone)]
pub struct Writer {
    buf: Vec<u8>,
    order: ByteOrder,
    swap: bool,
}

impl Writer {
    /// Creates a new writer.
    pub fn new(order: ByteOrder) -> Self {
        Self::with_capacity(order, 0)
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(order: ByteOrder, capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            order,
            swap: order != native_byte_order(),
        }
    }

    /// Returns the byte order multi-byte fields are written in.
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Writes the byte-order marker.
    #[inline]
    pub fn write_byte_order(&mut self) {
        self.write_byte(self.order.marker());
    }

    /// Writes a u32.
    #[inline]
    pub fn write_u32(&mut self, value: u32) {
        let bytes = match self.order {
            ByteOrder::Xdr => value.to_be_bytes(),
            ByteOrder::Ndr => value.to_le_bytes(),
        };
        self.buf.extend_from_slice(&bytes);
    }

    /// Writes a length or count as u32.
    pub fn write_count(&mut self, count: usize) -> Result<()> {
        let count = u32::try_from(count)
            .map_err(|_| Error::UnexpectedValue(format!("Count {count} exceeds u32")))?;
        self.write_u32(count);
        Ok(())
    }

    /// Writes an f64, swapping the native representation when the target
    /// order differs from the machine's.
    #[inline]
    pub fn write_f64(&mut self, value: f64) {
        let mut bytes = value.to_ne_bytes();
        if self.swap {
            bytes.reverse();
        }
        self.buf.extend_from_slice(&bytes);
    }
}
