use crate::error::PackagingError;

pub fn get_exit_code(error: &PackagingError) -> i32 {
    match error {
        PackagingError::UnknownPlatform(_)
        | PackagingError::UnknownPlatformVersion { .. }
        | PackagingError::UnknownCodename(_)
        | PackagingError::InvalidPlatformTag(_)
        | PackagingError::UnknownPackageFormat(_)
        | PackagingError::NotDebianPlatform(_) => 2,

        PackagingError::ConfigurationError(_)
        | PackagingError::ConfigFile(_)
        | PackagingError::Config(_)
        | PackagingError::UnknownDebianRepository { .. } => 3,

        PackagingError::CannotDetermineComponent(_) | PackagingError::CannotDetermineTag(_) => 4,

        _ => 1,
    }
}
