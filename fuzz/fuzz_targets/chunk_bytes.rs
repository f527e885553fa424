#![no_main]

use libfuzzer_sys::fuzz_target;
use maxcdc::{ChunkConfig, Chunker};

fuzz_target!(|data: Vec<u8>| {
    // Test with various chunk configurations
    let configs = vec![
        // Tiny chunks, tight backup
        ChunkConfig::new(4, 8, 64, 6).unwrap(),
        // Medium chunks
        ChunkConfig::new(16, 64, 1024, 192).unwrap(),
        // Backup window too large to ever confirm: degenerates to max-size cuts
        ChunkConfig::new(4, 8, 64, 60).unwrap(),
        // Default config
        ChunkConfig::default(),
    ];

    for config in configs {
        let chunker = Chunker::new(config).unwrap();
        let chunks = chunker.chunk_bytes(&data);

        // Verify: all chunks are within min/max bounds
        for (i, chunk) in chunks.iter().enumerate() {
            assert!(chunk.len() <= config.max_size() as u64);
            // Only enforce min_size for chunks that are not the last one
            if i < chunks.len() - 1 {
                assert!(chunk.len() >= config.min_size() as u64);
            }
        }

        // Verify: chunks partition the input exactly, in order
        let mut expected_start = 0u64;
        for chunk in &chunks {
            assert_eq!(chunk.start, expected_start);
            assert!(chunk.end > chunk.start);
            expected_start = chunk.end;
        }
        assert_eq!(expected_start, data.len() as u64);

        // Verify: determinism - same input produces same chunks
        let chunks2 = chunker.chunk_bytes(&data);
        assert_eq!(chunks, chunks2);
    }
});
