//! Rayon integration.
//!
//! Parallelism here is across inputs: each worker owns its own contexts, so
//! nothing is shared beyond the process-wide dispatcher.

use rayon::prelude::*;
use std::io;
use std::path::Path;

use crate::{Digest, digest_batch, io::digest_file};

/// Computes MD5 digests from a parallel iterator.
///
/// # Example
///
/// ```
/// use rayon::prelude::*;
/// use phmd5::ParallelMd5;
///
/// let data: Vec<Vec<u8>> = vec![
///     b"hello".to_vec(),
///     b"world".to_vec(),
///     b"test".to_vec(),
/// ];
///
/// let digests = data.par_iter().md5_digest();
/// assert_eq!(digests.len(), 3);
/// assert_eq!(digests[0], phmd5::digest(b"hello"));
/// ```
pub trait ParallelMd5<T> {
    /// Digests every item, preserving order.
    fn md5_digest(self) -> Vec<Digest>;
}

impl<I, T> ParallelMd5<T> for I
where
    I: ParallelIterator<Item = T>,
    T: AsRef<[u8]> + Send + Sync,
{
    fn md5_digest(self) -> Vec<Digest> {
        // pairs go through the dual-lane path on one worker
        let items: Vec<T> = self.collect();
        items
            .par_chunks(2)
            .flat_map_iter(|pair| digest_batch(pair))
            .collect()
    }
}

/// Digests the files at `paths` in parallel, streaming each one.
///
/// # Example
///
/// ```no_run
/// use phmd5::digest_files;
///
/// let paths = ["file1.txt", "file2.txt"];
/// for (path, result) in paths.iter().zip(digest_files(&paths)) {
///     match result {
///         Ok(digest) => println!("{path}: {digest:02x?}"),
///         Err(e) => println!("{path}: error - {e}"),
///     }
/// }
/// ```
pub fn digest_files<P: AsRef<Path> + Sync>(paths: &[P]) -> Vec<io::Result<Digest>> {
    paths.par_iter().map(digest_file).collect()
}
