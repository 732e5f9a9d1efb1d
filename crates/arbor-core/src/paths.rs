//! Lexical path helpers for import resolution
//!
//! All graph paths are project-relative, `/`-separated strings; resolution
//! never touches the filesystem.

/// Drop the file extension from a posix-style path string.
pub fn strip_extension(path: &str) -> String {
    if let Some(dot) = path.rfind('.') {
        let slash = path.rfind('/').map(|i| i + 1).unwrap_or(0);
        if dot > slash {
            return path[..dot].to_string();
        }
    }
    path.to_string()
}

/// Directory part of a posix-style path.
pub fn posix_dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(i) if i > 0 => &path[..i],
        Some(_) => "/",
        None => ".",
    }
}

/// Normalize a posix-style path: collapse `.` and resolve `..` segments.
pub fn posix_normalize(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for seg in path.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            s => parts.push(s),
        }
    }
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_extension() {
        assert_eq!(strip_extension("/foo/bar.ts"), "/foo/bar");
        assert_eq!(strip_extension("/foo/bar"), "/foo/bar");
        assert_eq!(strip_extension("main.rs"), "main");
        assert_eq!(strip_extension("a.b/c"), "a.b/c");
    }

    #[test]
    fn dirname() {
        assert_eq!(posix_dirname("src/auth/login.ts"), "src/auth");
        assert_eq!(posix_dirname("main.ts"), ".");
        assert_eq!(posix_dirname("/root/file.ts"), "/root");
    }

    #[test]
    fn normalizes_dots() {
        assert_eq!(posix_normalize("src/auth/../utils/helper"), "src/utils/helper");
        assert_eq!(posix_normalize("src/./auth/login"), "src/auth/login");
        assert_eq!(posix_normalize("a/b/c"), "a/b/c");
        assert_eq!(posix_normalize("./x"), "x");
    }
}
