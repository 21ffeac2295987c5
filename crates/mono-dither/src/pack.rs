/// Accumulates 1-bit pixels into bytes, most significant bit first.
pub(crate) struct BitPacker {
    bytes: Vec<u8>,
    current: u8,
    filled: u8,
}

impl BitPacker {
    pub(crate) fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            current: 0,
            filled: 0,
        }
    }

    /// Shift the pending byte left and OR in `on`; flush every 8th bit.
    #[inline]
    pub(crate) fn push(&mut self, on: bool) {
        self.current = (self.current << 1) | on as u8;
        self.filled += 1;
        if self.filled == 8 {
            self.bytes.push(self.current);
            self.current = 0;
            self.filled = 0;
        }
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        debug_assert_eq!(self.filled, 0, "bit count must be a multiple of 8");
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_is_first_pixel() {
        let mut packer = BitPacker::with_capacity(1);
        packer.push(true);
        for _ in 0..7 {
            packer.push(false);
        }
        assert_eq!(packer.finish(), vec![0x80]);
    }

    #[test]
    fn test_multiple_bytes() {
        let mut packer = BitPacker::with_capacity(2);
        for bit in [0, 0, 0, 0, 1, 1, 1, 1, 1, 0, 1, 0, 1, 0, 1, 0] {
            packer.push(bit == 1);
        }
        assert_eq!(packer.finish(), vec![0x0F, 0xAA]);
    }
}
