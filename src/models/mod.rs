pub mod package_format;

pub use package_format::{PackageFormat, SignatureFormat};
