// Adapters layer: concrete Source Adapters for the stores issues are listed in.

pub mod bucket;
pub mod page;

pub use bucket::BucketSource;
pub use page::PageSource;

#[cfg(feature = "s3")]
pub mod s3;

#[cfg(feature = "s3")]
pub use s3::S3ObjectLister;
