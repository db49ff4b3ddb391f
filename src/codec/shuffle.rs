//! Byte-wise shuffle filter.
//!
//! Rearranges an item stream so that the first bytes of all items come first,
//! then all second bytes, and so on. For typed numeric data this groups
//! high-order bytes together and improves compression ratios considerably.
//! Bytes past the last complete item are copied through unchanged.

/// Applies the shuffle filter for items of `typesize` bytes.
pub fn shuffle(typesize: usize, src: &[u8]) -> Vec<u8> {
    debug_assert!(typesize >= 1);
    let nitems = src.len() / typesize;
    let mut dest = vec![0u8; src.len()];
    for j in 0..typesize {
        for i in 0..nitems {
            dest[j * nitems + i] = src[i * typesize + j];
        }
    }
    let tail = nitems * typesize;
    dest[tail..].copy_from_slice(&src[tail..]);
    dest
}

/// Inverse of [`shuffle`].
pub fn unshuffle(typesize: usize, src: &[u8]) -> Vec<u8> {
    debug_assert!(typesize >= 1);
    let nitems = src.len() / typesize;
    let mut dest = vec![0u8; src.len()];
    for j in 0..typesize {
        for i in 0..nitems {
            dest[i * typesize + j] = src[j * nitems + i];
        }
    }
    let tail = nitems * typesize;
    dest[tail..].copy_from_slice(&src[tail..]);
    dest
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shuffle_transposes_items() {
        // Two 4-byte items: shuffled layout is first-bytes, second-bytes, ...
        let src = [1u8, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(shuffle(4, &src), vec![1, 5, 2, 6, 3, 7, 4, 8]);
    }

    #[test]
    fn leftover_bytes_pass_through() {
        let src = [1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let shuffled = shuffle(4, &src);
        assert_eq!(&shuffled[8..], &[9, 10]);
        assert_eq!(unshuffle(4, &shuffled), src.to_vec());
    }

    #[test]
    fn unshuffle_inverts_shuffle() {
        for typesize in [1usize, 2, 3, 4, 8, 16] {
            for len in [0usize, 1, 5, 16, 64, 257] {
                let src: Vec<u8> = (0..len).map(|i| (i * 31 % 251) as u8).collect();
                let round = unshuffle(typesize, &shuffle(typesize, &src));
                assert_eq!(round, src, "typesize {} len {}", typesize, len);
            }
        }
    }

    #[test]
    fn typesize_one_is_identity() {
        let src: Vec<u8> = (0..100u8).collect();
        assert_eq!(shuffle(1, &src), src);
        assert_eq!(unshuffle(1, &src), src);
    }
}
