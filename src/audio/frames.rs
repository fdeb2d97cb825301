/// Slices a mono PCM buffer into consecutive, non-overlapping windows of a
/// fixed length, in original order. The final partial chunk is never emitted;
/// the sequence simply ends. Owns the buffer and advances a cursor; nothing
/// downstream holds onto raw samples once a spectrum has been computed.
pub struct FrameSource {
    samples: Vec<f32>,
    cursor: usize,
    window_len: usize,
}

impl FrameSource {
    pub fn new(samples: Vec<f32>, window_len: usize) -> Self {
        assert!(window_len > 0, "window length must be nonzero");
        Self {
            samples,
            cursor: 0,
            window_len,
        }
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// Number of full windows this source will emit in total.
    pub fn total_windows(&self) -> usize {
        self.samples.len() / self.window_len
    }

    /// Samples not yet consumed.
    pub fn remaining(&self) -> usize {
        self.samples.len() - self.cursor
    }

    /// Next full window, or `None` once fewer than `window_len` samples remain.
    pub fn next_window(&mut self) -> Option<&[f32]> {
        if self.remaining() < self.window_len {
            return None;
        }
        let start = self.cursor;
        self.cursor += self.window_len;
        Some(&self.samples[start..self.cursor])
    }

    /// Consume the leftover tail (shorter than one window), zero-padded to a
    /// full window. `None` when nothing is left or the tail was already taken.
    pub fn take_tail_padded(&mut self) -> Option<Vec<f32>> {
        let remaining = self.remaining();
        if remaining == 0 || remaining >= self.window_len {
            return None;
        }
        let mut window = vec![0.0f32; self.window_len];
        window[..remaining].copy_from_slice(&self.samples[self.cursor..]);
        self.cursor = self.samples.len();
        Some(window)
    }
}
