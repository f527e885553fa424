//! File chunking example.
//!
//! Run with:
//!     cargo run --example sync_file -- /path/to/file

use std::env;
use std::fs::File;

use maxcdc::{ChunkConfig, Chunker};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "Cargo.toml".to_string());

    println!("Chunking file: {}\n", path);

    let file = File::open(&path)?;
    let metadata = file.metadata()?;
    println!("File size: {} bytes\n", metadata.len());

    // Custom config for larger chunks
    let config = ChunkConfig::new(
        48,         // window: 48 bytes
        8 * 1024,   // min: 8 KiB
        128 * 1024, // max: 128 KiB
        24 * 1024,  // backup: 24 KiB
    )?;

    let chunker = Chunker::new(config)?;

    let mut total_chunks = 0u64;
    let mut total_bytes = 0u64;

    for chunk in chunker.chunk(file) {
        let chunk = chunk?;
        total_chunks += 1;
        total_bytes += chunk.len();

        println!(
            "Chunk {}: [{:>10}, {:>10}), len={:>8}",
            total_chunks,
            chunk.start,
            chunk.end,
            chunk.len()
        );
    }

    println!("\nTotal: {} chunks, {} bytes", total_chunks, total_bytes);
    if total_chunks > 0 {
        println!("Average chunk size: {} bytes", total_bytes / total_chunks);
    }

    Ok(())
}
