//! PDF synthesis and merging.
//!
//! CPU-bound core of the assembly pipeline: [`cover::synthesize`] renders
//! the cover page from applicant identity and lease terms, and
//! [`merge::merge`] concatenates page fragments, in the order supplied,
//! into one self-contained document.
//!
//! Nothing in this module performs I/O; fragments arrive as already-fetched
//! bytes and the merged document leaves as bytes.

pub mod cover;
pub mod fragment;
pub mod merge;

pub use cover::{SynthesisError, synthesize};
pub use fragment::PageFragment;
pub use merge::{MergeError, merge};
