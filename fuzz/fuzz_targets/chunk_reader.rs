#![no_main]

use std::io::Read;

use libfuzzer_sys::fuzz_target;
use maxcdc::{ChunkConfig, Chunker};

/// A reader that serves the data in fixed-size pieces.
struct PieceReader<'a> {
    data: &'a [u8],
    pos: usize,
    piece: usize,
}

impl Read for PieceReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.piece.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

fuzz_target!(|input: (Vec<u8>, u8)| {
    let (data, piece) = input;
    // Read granularity must never influence the boundaries.
    let piece = piece as usize % 512 + 1;

    let config = ChunkConfig::new(16, 64, 1024, 192).unwrap();
    let chunker = Chunker::new(config).unwrap();

    let from_slice = chunker.chunk_bytes(&data);

    let reader = PieceReader {
        data: &data,
        pos: 0,
        piece,
    };
    let from_reader: Vec<_> = chunker
        .chunk(reader)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert_eq!(from_slice, from_reader);
});
