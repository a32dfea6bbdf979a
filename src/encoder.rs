//! Hash-chain match finder and token emitter.
//!
//! The encoder walks the input once. At each position it asks a hash-chain
//! index over the sliding window for the longest earlier occurrence of the
//! bytes ahead; unmatched bytes accumulate into a pending literal run that is
//! flushed together with the next match token. The effort level bounds how
//! many chain candidates are examined per position; level 9 additionally
//! checks whether deferring by one or two bytes yields a strictly longer
//! match.

use crate::error::{OxiLzError, Result};
use crate::level::Level;
use crate::token::{
    self, EXCESS, HASH_SIZE, LEN_LIMIT, MIN_MATCH, RUN_LIMIT, WINDOW_MASK, WINDOW_SIZE,
};

/// Maximum supported input length.
///
/// Chain positions are stored as `i32`, so one compress call handles at most
/// this many bytes.
pub const MAX_INPUT: usize = i32::MAX as usize;

/// Chain slot sentinel for "no predecessor".
const NIL: i32 = -1;

/// An exactly-minimum match is discarded rather than split a pending run of
/// at least this length.
const RUN_SUPPRESS: usize = RUN_LIMIT + 128;

/// Reusable LZ77 compressor.
///
/// Owns roughly 1.5 MB of hash-chain scratch that is recycled across calls;
/// build one `Encoder` and feed it many buffers to amortize the allocation.
/// No state carries over between calls.
pub struct Encoder {
    level: Level,
    /// Most recent position per hash bucket, or NIL.
    head: Vec<i32>,
    /// Previous position with the same hash, indexed by position mod window.
    tail: Vec<i32>,
}

impl Encoder {
    /// Create a new encoder with the default effort level.
    pub fn new() -> Self {
        Self::with_level(Level::DEFAULT)
    }

    /// Create a new encoder with a specific effort level.
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            head: vec![NIL; HASH_SIZE],
            tail: vec![0; WINDOW_SIZE],
        }
    }

    /// The configured effort level.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Link `pos` into its hash chain.
    ///
    /// Positions with fewer than 4 bytes remaining are not indexed; they can
    /// never verify a full prefix.
    #[inline]
    fn insert(&mut self, input: &[u8], pos: usize) {
        if pos + MIN_MATCH > input.len() {
            return;
        }
        let h = token::hash32(token::read_u32(input, pos));
        self.tail[pos & WINDOW_MASK] = self.head[h];
        self.head[h] = pos as i32;
    }

    /// Longest match for the bytes at `pos`, preferring the shortest
    /// distance among equals.
    ///
    /// Returns `(best_len, dist)`; `best_len < MIN_MATCH` means no match.
    /// Candidates are visited newest-first and only strictly longer matches
    /// replace the current best, so ties resolve to the nearest occurrence.
    fn find_best_match(&self, input: &[u8], pos: usize) -> (usize, usize) {
        let mut best_len = MIN_MATCH - 1;
        let mut dist = 0;

        let max_match = input.len() - pos;
        if max_match < MIN_MATCH {
            return (best_len, dist);
        }

        let limit = (pos as i32 - WINDOW_SIZE as i32).max(NIL);
        let mut chain_len = self.level.max_chain();
        let prefix = token::read_u32(input, pos);

        let mut s = self.head[token::hash32(prefix)];
        while s > limit {
            let sp = s as usize;
            // guard byte: skip candidates that cannot beat the current best
            if input[sp + best_len] == input[pos + best_len]
                && token::read_u32(input, sp) == prefix
            {
                let mut len = MIN_MATCH;
                while len < max_match && input[sp + len] == input[pos + len] {
                    len += 1;
                }
                if len > best_len {
                    best_len = len;
                    dist = pos - sp;
                    if len == max_match {
                        break;
                    }
                }
            }
            chain_len -= 1;
            if chain_len == 0 {
                break;
            }
            s = self.tail[sp & WINDOW_MASK];
        }

        (best_len, dist)
    }

    /// Whether any window position matches exactly `target_len` bytes at
    /// `pos`.
    ///
    /// Used by the level-9 lookahead; `guard` is the length of the match the
    /// lookahead is trying to beat. Caller keeps `pos + MIN_MATCH` and
    /// `pos + target_len` within the input.
    fn has_match_of_len(&self, input: &[u8], pos: usize, target_len: usize, guard: usize) -> bool {
        let limit = (pos as i32 - WINDOW_SIZE as i32).max(NIL);
        let mut chain_len = self.level.max_chain();
        let prefix = token::read_u32(input, pos);

        let mut s = self.head[token::hash32(prefix)];
        while s > limit {
            let sp = s as usize;
            if input[sp + guard] == input[pos + guard] && token::read_u32(input, sp) == prefix {
                let mut len = MIN_MATCH;
                while len < target_len && input[sp + len] == input[pos + len] {
                    len += 1;
                }
                if len == target_len {
                    return true;
                }
            }
            chain_len -= 1;
            if chain_len == 0 {
                break;
            }
            s = self.tail[sp & WINDOW_MASK];
        }

        false
    }

    /// Compress `input` into a caller-supplied buffer, returning the number
    /// of bytes written.
    ///
    /// `output` must hold at least `input.len() + EXCESS` bytes. The
    /// uncompressed length is not recorded in the stream; callers transmit
    /// it out of band and pass it back to
    /// [`decompress`](crate::decompress).
    ///
    /// # Errors
    ///
    /// [`OxiLzError::BufferTooSmall`] if `output` is under-sized,
    /// [`OxiLzError::InputTooLarge`] if `input` exceeds [`MAX_INPUT`].
    pub fn compress_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        if input.len() > MAX_INPUT {
            return Err(OxiLzError::input_too_large(input.len(), MAX_INPUT));
        }
        if output.len() < input.len() + EXCESS {
            return Err(OxiLzError::buffer_too_small(
                input.len() + EXCESS,
                output.len(),
            ));
        }

        self.head.fill(NIL);

        let len = input.len();
        let mut op = 0;
        let mut run = 0;
        let mut pos = 0;

        while pos < len {
            let (mut best_len, dist) = self.find_best_match(input, pos);

            // never split a long pending run for a minimum-length match
            if best_len == MIN_MATCH && run >= RUN_SUPPRESS {
                best_len = 0;
            }

            // Level 9: discard the match if a strictly longer one starts one
            // or two bytes ahead; it will be rediscovered there.
            if self.level.lazy() && best_len >= MIN_MATCH && best_len < len - pos {
                for i in 1..=2 {
                    if best_len == 0 {
                        break;
                    }
                    let ahead = pos + i;
                    let target = best_len + i;
                    if ahead + MIN_MATCH > len || target > len - ahead {
                        continue;
                    }
                    if self.has_match_of_len(input, ahead, target, best_len) {
                        best_len = 0;
                    }
                }
            }

            if best_len >= MIN_MATCH {
                let extra = best_len - MIN_MATCH;

                let need = 1
                    + if run >= RUN_LIMIT {
                        token::varint_len((run - RUN_LIMIT) as u32)
                    } else {
                        0
                    }
                    + run
                    + if extra >= LEN_LIMIT {
                        token::varint_len((extra - LEN_LIMIT) as u32)
                    } else {
                        0
                    }
                    + 2;
                if output.len() - op < need {
                    return Err(OxiLzError::buffer_too_small(op + need, output.len()));
                }

                let tmp = (((dist >> 12) & 16) as u8) | extra.min(LEN_LIMIT) as u8;

                if run > 0 {
                    if run >= RUN_LIMIT {
                        output[op] = ((RUN_LIMIT as u8) << 5) | tmp;
                        op += 1;
                        token::write_varint(output, &mut op, (run - RUN_LIMIT) as u32);
                    } else {
                        output[op] = ((run as u8) << 5) | tmp;
                        op += 1;
                    }
                    output[op..op + run].copy_from_slice(&input[pos - run..pos]);
                    op += run;
                    run = 0;
                } else {
                    output[op] = tmp;
                    op += 1;
                }

                if extra >= LEN_LIMIT {
                    token::write_varint(output, &mut op, (extra - LEN_LIMIT) as u32);
                }
                output[op..op + 2].copy_from_slice(&(dist as u16).to_le_bytes());
                op += 2;

                // index every covered position; later matches may reference
                // the interior of this one
                for q in pos..pos + best_len {
                    self.insert(input, q);
                }
                pos += best_len;
            } else {
                self.insert(input, pos);
                run += 1;
                pos += 1;
            }
        }

        // Trailing literals, with no match component; the decoder stops on
        // input exhaustion.
        if run > 0 {
            let need = 1
                + if run >= RUN_LIMIT {
                    token::varint_len((run - RUN_LIMIT) as u32)
                } else {
                    0
                }
                + run;
            if output.len() - op < need {
                return Err(OxiLzError::buffer_too_small(op + need, output.len()));
            }

            if run >= RUN_LIMIT {
                output[op] = (RUN_LIMIT as u8) << 5;
                op += 1;
                token::write_varint(output, &mut op, (run - RUN_LIMIT) as u32);
            } else {
                output[op] = (run as u8) << 5;
                op += 1;
            }
            output[op..op + run].copy_from_slice(&input[len - run..]);
            op += run;
        }

        Ok(op)
    }

    /// Compress `input` into a freshly allocated `Vec`.
    ///
    /// # Errors
    ///
    /// [`OxiLzError::InputTooLarge`] if `input` exceeds [`MAX_INPUT`].
    pub fn compress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = vec![0u8; crate::max_compressed_len(input.len())];
        let written = self.compress_into(input, &mut output)?;
        output.truncate(written);
        Ok(output)
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}
