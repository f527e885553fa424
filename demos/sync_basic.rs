//! Basic synchronous chunking example.
//!
//! Run with:
//!     cargo run --example sync_basic

use std::io::Cursor;

use maxcdc::{ChunkConfig, Chunker};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create some sample data with a little structure in it
    let data: Vec<u8> = (0..1024 * 1024u32).map(|i| (i * 7 + 13) as u8).collect();

    // Create chunker with default config
    let chunker = Chunker::new(ChunkConfig::default())?;

    println!("Chunking {} bytes of data...\n", data.len());

    let mut total_chunks = 0u64;
    let mut total_bytes = 0u64;

    for chunk in chunker.chunk(Cursor::new(&data)) {
        let chunk = chunk?;
        total_chunks += 1;
        total_bytes += chunk.len();

        println!(
            "Chunk {}: [{:>8}, {:>8}), len={:>8}",
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
