//! Denylist over repository paths
//!
//! Paths are GitHub tree paths: `/`-separated and relative to the repository
//! root. The predicate only looks at the string, so it is deterministic and
//! independent of the order in which paths are checked.

/// Directories whose contents never describe the project itself
const EXCLUDED_DIRECTORIES: &[&str] = &["node_modules", ".git", "dist", "build", "coverage"];

/// Infixes marking test, spec and minified files (`a.test.ts`, `app.min.js`)
const EXCLUDED_INFIXES: &[&str] = &[".test.", ".spec.", ".min."];

/// Images, stylesheets and source maps, compared case-insensitively
const EXCLUDED_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "ico", "webp", "css", "scss", "sass", "less", "map",
];

const EXCLUDED_FILE_NAMES: &[&str] = &["package-lock.json", "yarn.lock", "pnpm-lock.yaml"];

/// Returns `true` when the path is worth sending to the model.
pub fn is_relevant_path(path: &str) -> bool {
    let mut segments = path.split('/').filter(|s| !s.is_empty()).peekable();
    let mut file_name = "";

    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            file_name = segment;
        } else if EXCLUDED_DIRECTORIES.contains(&segment) {
            return false;
        }
    }

    if file_name.is_empty() || EXCLUDED_FILE_NAMES.contains(&file_name) {
        return false;
    }

    if EXCLUDED_INFIXES.iter().any(|infix| file_name.contains(infix)) {
        return false;
    }

    match file_name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => {
            let extension = extension.to_ascii_lowercase();
            !EXCLUDED_EXTENSIONS.contains(&extension.as_str())
        }
        _ => true,
    }
}
