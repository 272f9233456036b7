/// File extensions treated as photos, compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "heic"];

/// Folder macOS adds to archives it creates.
const MACOS_METADATA_DIR: &str = "__MACOSX";
/// Prefix of AppleDouble sidecar files.
const APPLE_DOUBLE_PREFIX: &str = "._";

/// Decides whether an archive entry is a photo worth reading tags from.
///
/// Directories and platform metadata are skipped, not counted as failures.
pub fn is_candidate(name: &str, is_directory: bool) -> bool {
    if is_directory || name.ends_with('/') || name.contains(MACOS_METADATA_DIR) {
        return false;
    }

    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    if base.starts_with(APPLE_DOUBLE_PREFIX) {
        return false;
    }

    base.rsplit_once('.').is_some_and(|(stem, extension)| {
        !stem.is_empty()
            && SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| extension.eq_ignore_ascii_case(supported))
    })
}
