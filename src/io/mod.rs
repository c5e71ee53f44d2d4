//! File export and import of `Mesh`es in [STL]
//!
//! [STL]: https://en.wikipedia.org/wiki/STL_(file_format)

pub mod stl;

pub use stl::StlFormat;
