//! File-backed stream helpers.

use std::fs;

use phmd5::io::{PREFIX_LEN, digest_blocks, digest_file, digest_file_prefix, digest_padded};
use phmd5::digest;
use tempfile::tempdir;

fn sample(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 241) as u8 ^ 0x3c).collect()
}

#[test]
fn file_digest_matches_in_memory_digest() {
    let dir = tempdir().unwrap();
    for len in [0usize, 1, 64, 65_535, 65_536, 200_001] {
        let path = dir.path().join(format!("sample-{len}"));
        let data = sample(len);
        fs::write(&path, &data).unwrap();
        assert_eq!(digest_file(&path).unwrap(), digest(&data), "{len}");
    }
}

#[test]
fn prefix_digest_covers_first_16_kib() {
    let dir = tempdir().unwrap();
    let long = dir.path().join("long");
    let short = dir.path().join("short");
    let data = sample(100_000);
    fs::write(&long, &data).unwrap();
    fs::write(&short, &data[..1000]).unwrap();

    assert_eq!(
        digest_file_prefix(&long).unwrap(),
        digest(&data[..PREFIX_LEN as usize])
    );
    assert_eq!(digest_file_prefix(&short).unwrap(), digest(&data[..1000]));
}

#[test]
fn block_digests_agree_with_file_and_padded_digests() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blocks");
    let data = sample(150_000);
    fs::write(&path, &data).unwrap();

    let result = digest_blocks(fs::File::open(&path).unwrap(), 40_000).unwrap();

    assert_eq!(result.len, data.len() as u64);
    assert_eq!(result.file, digest_file(&path).unwrap());
    assert_eq!(result.blocks.len(), 4);
    for (index, (slice_digest, chunk)) in result.blocks.iter().zip(data.chunks(40_000)).enumerate() {
        assert_eq!(*slice_digest, digest_padded(chunk, 40_000), "slice {index}");
    }
}

#[test]
fn exact_multiple_has_no_padded_slice() {
    let data = sample(4096 * 3);
    let result = digest_blocks(&data[..], 4096).unwrap();
    assert_eq!(result.blocks.len(), 3);
    assert_eq!(result.blocks[2], digest(&data[8192..]));
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let err = digest_file(dir.path().join("absent")).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}
