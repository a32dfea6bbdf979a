//! Round-trip integration tests across effort levels and data shapes.

use oxilz::{
    EXCESS, Encoder, Level, compress, compress_with_level, decompress, decompress_into,
    max_compressed_len,
};

/// Deterministic pseudo-random bytes (linear congruential generator).
fn lcg_bytes(size: usize, mut seed: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    data
}

fn roundtrip_at_all_levels(data: &[u8]) {
    for level in 1..=9 {
        let level = Level::new(level).unwrap();
        let compressed = compress_with_level(data, level).expect("compression failed");
        assert!(
            compressed.len() <= max_compressed_len(data.len()),
            "level {}: {} bytes from {}",
            level.level(),
            compressed.len(),
            data.len()
        );
        let restored = decompress(&compressed, data.len()).expect("decompression failed");
        assert_eq!(restored, data, "level {}", level.level());
    }
}

#[test]
fn test_roundtrip_empty() {
    let compressed = compress(b"").unwrap();
    assert!(compressed.is_empty());
    assert_eq!(decompress(&compressed, 0).unwrap(), b"");
}

#[test]
fn test_roundtrip_single_byte() {
    roundtrip_at_all_levels(b"A");
}

#[test]
fn test_roundtrip_text() {
    let data = b"The quick brown fox jumps over the lazy dog. ".repeat(200);
    roundtrip_at_all_levels(&data);
    let compressed = compress(&data).unwrap();
    assert!(compressed.len() < data.len() / 2);
}

#[test]
fn test_roundtrip_all_zero() {
    let data = vec![0u8; 100];
    roundtrip_at_all_levels(&data);
    // a literal plus one distance-1 match
    let compressed = compress(&data).unwrap();
    assert!(compressed.len() <= 8);
}

#[test]
fn test_roundtrip_abc_short_distance() {
    // distance-3 back-reference, expanded by the byte-at-a-time path
    let data: Vec<u8> = b"ABC".iter().copied().cycle().take(1024).collect();
    roundtrip_at_all_levels(&data);
    let compressed = compress(&data).unwrap();
    assert!(compressed.len() <= 16);
}

#[test]
fn test_roundtrip_incompressible() {
    let data = lcg_bytes(4096, 0x123456789ABCDEF0);
    roundtrip_at_all_levels(&data);
    // random data stays within the size bound
    let compressed = compress(&data).unwrap();
    assert!(compressed.len() <= data.len() + EXCESS);
}

#[test]
fn test_roundtrip_all_byte_values() {
    let one: Vec<u8> = (0..=255).collect();
    let data = one.repeat(4);
    roundtrip_at_all_levels(&data);
}

#[test]
fn test_roundtrip_long_run_with_minimum_matches() {
    // long incompressible runs around the 135-literal threshold, each
    // followed by a copy of an earlier 4-gram
    let mut data = lcg_bytes(150, 7);
    data.extend_from_slice(&data[..4].to_vec());
    data.extend(lcg_bytes(140, 11));
    data.extend_from_slice(&data[150..154].to_vec());
    data.extend(lcg_bytes(64, 13));
    roundtrip_at_all_levels(&data);
}

#[test]
fn test_roundtrip_far_match_high_distance_bit() {
    // a repeated block 100 000 bytes apart needs bit 16 of the distance
    let marker = b"-- far marker block, sixty four bytes of highly marked text --!!";
    assert_eq!(marker.len(), 64);
    let mut data = Vec::new();
    data.extend_from_slice(marker);
    data.extend(lcg_bytes(100_000, 99));
    data.extend_from_slice(marker);
    for level in [8, 9] {
        let level = Level::new(level).unwrap();
        let compressed = compress_with_level(&data, level).unwrap();
        let restored = decompress(&compressed, data.len()).unwrap();
        assert_eq!(restored, data, "level {}", level.level());
    }
}

#[test]
fn test_repeat_beyond_window_finds_no_match() {
    // the same block 140 000 bytes apart is outside the 131 072-byte window
    let marker = b"window floor probe";
    let mut data = Vec::new();
    data.extend_from_slice(marker);
    data.extend(lcg_bytes(140_000, 42));
    data.extend_from_slice(marker);
    roundtrip_at_all_levels(&data);
}

#[test]
fn test_effort_is_statistically_monotone() {
    // a small vocabulary repeated in pseudo-random order gives the deeper
    // chain walks something to find
    let words: [&[u8]; 8] = [
        b"alpha ", b"bravo ", b"charlie ", b"delta ", b"echo ", b"foxtrot ", b"golf ", b"hotel ",
    ];
    let mut data = Vec::new();
    let mut seed: u64 = 5;
    while data.len() < 50_000 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.extend_from_slice(words[(seed >> 33) as usize % words.len()]);
    }

    let low = compress_with_level(&data, Level::MIN).unwrap();
    let mid = compress_with_level(&data, Level::DEFAULT).unwrap();
    let high = compress_with_level(&data, Level::new(8).unwrap()).unwrap();
    assert!(mid.len() <= low.len());
    assert!(high.len() <= mid.len());
    for compressed in [&low, &mid, &high] {
        assert_eq!(decompress(compressed, data.len()).unwrap(), data);
    }
}

#[test]
fn test_encoder_reuse_across_buffers() {
    let mut encoder = Encoder::with_level(Level::MAX);
    let texts = [
        b"first buffer first buffer first buffer".to_vec(),
        vec![0xEE; 10_000],
        lcg_bytes(2048, 3),
    ];
    for data in &texts {
        let compressed = encoder.compress(data).unwrap();
        assert_eq!(decompress(&compressed, data.len()).unwrap(), *data);
    }
}

#[test]
fn test_compress_into_matches_vec_api() {
    let data = b"matching outputs between the two entry points ".repeat(40);
    let mut encoder = Encoder::new();
    let from_vec = encoder.compress(&data).unwrap();

    let mut buf = vec![0u8; data.len() + EXCESS];
    let written = encoder.compress_into(&data, &mut buf).unwrap();
    assert_eq!(&buf[..written], &from_vec[..]);
}

#[test]
fn test_decompress_into_exact_capacity() {
    let data = b"capacity check capacity check capacity check";
    let compressed = compress(data).unwrap();
    let mut out = vec![0u8; data.len()];
    let written = decompress_into(&compressed, &mut out).unwrap();
    assert_eq!(written, data.len());
    assert_eq!(&out[..], &data[..]);
}
