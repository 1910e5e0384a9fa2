//! Minimal RIFF/WAVE header probe.
//!
//! Reads just enough of the header to pull channel count, sample rate,
//! and byte rate out of the `fmt ` chunk. Probing is best-effort by
//! contract: a malformed or unreadable file yields `None`, never an
//! error, so listings stay cheap and never fail on odd files.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use sampleferry_core::WaveInfo;

const RIFF_MAGIC: &[u8; 4] = b"RIFF";
const WAVE_MAGIC: &[u8; 4] = b"WAVE";
const FMT_CHUNK: &[u8; 4] = b"fmt ";

/// Chunks scanned before giving up on a file without a `fmt ` chunk.
const MAX_CHUNKS: usize = 32;

/// Read audio parameters from a wave file header.
pub fn probe_wave(path: &Path) -> Option<WaveInfo> {
    let file = File::open(path).ok()?;
    read_wave_header(BufReader::new(file))
}

fn read_wave_header<R: Read + Seek>(mut reader: R) -> Option<WaveInfo> {
    let mut riff = [0u8; 12];
    reader.read_exact(&mut riff).ok()?;
    if &riff[0..4] != RIFF_MAGIC || &riff[8..12] != WAVE_MAGIC {
        return None;
    }

    for _ in 0..MAX_CHUNKS {
        let mut header = [0u8; 8];
        reader.read_exact(&mut header).ok()?;
        let size = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);

        if &header[0..4] == FMT_CHUNK {
            if size < 16 {
                return None;
            }
            let mut fmt = [0u8; 16];
            reader.read_exact(&mut fmt).ok()?;
            let channels = u16::from_le_bytes([fmt[2], fmt[3]]);
            let sample_rate = u32::from_le_bytes([fmt[4], fmt[5], fmt[6], fmt[7]]);
            let byte_rate = u32::from_le_bytes([fmt[8], fmt[9], fmt[10], fmt[11]]);
            if channels == 0 || sample_rate == 0 {
                return None;
            }
            return Some(WaveInfo::new(
                channels,
                sample_rate,
                byte_rate.saturating_mul(8),
            ));
        }

        // Chunks are word-aligned; odd sizes carry a pad byte.
        let skip = u64::from(size) + u64::from(size % 2);
        reader.seek(SeekFrom::Current(skip as i64)).ok()?;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn fmt_chunk(channels: u16, sample_rate: u32, bits: u16) -> Vec<u8> {
        let byte_rate = sample_rate * u32::from(channels) * u32::from(bits) / 8;
        let block_align = channels * bits / 8;
        let mut out = Vec::new();
        out.extend_from_slice(FMT_CHUNK);
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // PCM
        out.extend_from_slice(&channels.to_le_bytes());
        out.extend_from_slice(&sample_rate.to_le_bytes());
        out.extend_from_slice(&byte_rate.to_le_bytes());
        out.extend_from_slice(&block_align.to_le_bytes());
        out.extend_from_slice(&bits.to_le_bytes());
        out
    }

    fn wav_bytes(channels: u16, sample_rate: u32, bits: u16) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(RIFF_MAGIC);
        out.extend_from_slice(&36u32.to_le_bytes());
        out.extend_from_slice(WAVE_MAGIC);
        out.extend_from_slice(&fmt_chunk(channels, sample_rate, bits));
        out.extend_from_slice(b"data");
        out.extend_from_slice(&0u32.to_le_bytes());
        out
    }

    #[test]
    fn test_parses_canonical_header() {
        let info = read_wave_header(Cursor::new(wav_bytes(2, 44_100, 16))).unwrap();
        assert_eq!(info.channels, 2);
        assert_eq!(info.sample_rate, 44_100);
        assert_eq!(info.bit_rate, 44_100 * 2 * 16);
    }

    #[test]
    fn test_skips_leading_junk_chunk() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(RIFF_MAGIC);
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(WAVE_MAGIC);
        bytes.extend_from_slice(b"JUNK");
        bytes.extend_from_slice(&3u32.to_le_bytes());
        bytes.extend_from_slice(&[0, 0, 0, 0]); // 3 bytes + pad
        bytes.extend_from_slice(&fmt_chunk(1, 48_000, 24));

        let info = read_wave_header(Cursor::new(bytes)).unwrap();
        assert_eq!(info.channels, 1);
        assert_eq!(info.sample_rate, 48_000);
    }

    #[test]
    fn test_rejects_non_riff() {
        assert!(read_wave_header(Cursor::new(b"MP3 junk data here".to_vec())).is_none());
    }

    #[test]
    fn test_rejects_truncated_fmt() {
        let mut bytes = wav_bytes(2, 44_100, 16);
        bytes.truncate(24);
        assert!(read_wave_header(Cursor::new(bytes)).is_none());
    }

    #[test]
    fn test_rejects_zero_channels() {
        assert!(read_wave_header(Cursor::new(wav_bytes(0, 44_100, 16))).is_none());
    }

    #[test]
    fn test_probe_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("loop.wav");
        std::fs::write(&path, wav_bytes(2, 48_000, 16)).unwrap();

        let info = probe_wave(&path).unwrap();
        assert_eq!(info.sample_rate, 48_000);
        assert!(probe_wave(&temp.path().join("missing.wav")).is_none());
    }
}
