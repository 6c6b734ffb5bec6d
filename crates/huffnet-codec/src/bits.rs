//! LSB-first bit packing.
//!
//! Bit `n` of a stream lives in byte `n / 8` at position `n % 8`.

use huffnet_dsa::Code;

/// Appends bits into a pre-zeroed, exactly sized payload.
pub struct BitWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> BitWriter<'a> {
    /// `buf` must be zeroed; writes only ever OR bits in.
    pub fn new(buf: &'a mut [u8]) -> Self {
        debug_assert!(buf.iter().all(|&b| b == 0));
        Self { buf, pos: 0 }
    }

    /// Appends the low `len` bits of `value`, least-significant first.
    ///
    /// # Panics
    /// If the payload was sized too small. Callers size it from the same code
    /// lengths they write.
    #[inline(always)]
    pub fn write_bits(&mut self, value: u16, len: u8) {
        for i in 0..len {
            if (value >> i) & 1 == 1 {
                self.buf[self.pos / 8] |= 1 << (self.pos % 8);
            }
            self.pos += 1;
        }
    }

    #[inline(always)]
    pub fn write_code(&mut self, code: Code) {
        self.write_bits(code.bits(), code.len());
    }

    /// Bits written so far.
    pub fn position(&self) -> usize {
        self.pos
    }
}

/// Reads bits from an untrusted payload.
///
/// Every read is checked against both `bit_length` and the slice itself, so a
/// corrupt header can never steer a read outside the buffer.
pub struct BitReader<'a> {
    payload: &'a [u8],
    bit_length: usize,
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// `bit_length` is clamped to the bits the payload actually holds.
    pub fn new(payload: &'a [u8], bit_length: usize) -> Self {
        Self {
            payload,
            bit_length: bit_length.min(payload.len() * 8),
            pos: 0,
        }
    }

    #[inline(always)]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline(always)]
    pub fn bit_length(&self) -> usize {
        self.bit_length
    }

    #[inline(always)]
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.bit_length
    }

    /// The bit under the cursor, or `None` at the end of the stream.
    #[inline(always)]
    pub fn peek_bit(&self) -> Option<bool> {
        if self.is_exhausted() {
            return None;
        }
        let byte = self.payload.get(self.pos / 8)?;
        Some((byte >> (self.pos % 8)) & 1 == 1)
    }

    /// Moves past a bit returned by `peek_bit`.
    #[inline(always)]
    pub fn skip_bit(&mut self) {
        if !self.is_exhausted() {
            self.pos += 1;
        }
    }

    #[inline(always)]
    pub fn read_bit(&mut self) -> Option<bool> {
        let bit = self.peek_bit()?;
        self.pos += 1;
        Some(bit)
    }

    /// Reads eight bits as one byte, possibly straddling two payload bytes.
    /// Leaves the cursor untouched on failure.
    #[inline(always)]
    pub fn read_byte(&mut self) -> Option<u8> {
        if self.pos + 8 > self.bit_length {
            return None;
        }
        let index = self.pos / 8;
        let shift = self.pos % 8;
        let low = *self.payload.get(index)?;
        let value = if shift == 0 {
            low
        } else {
            let high = *self.payload.get(index + 1)?;
            (low >> shift) | (high << (8 - shift))
        };
        self.pos += 8;
        Some(value)
    }
}
