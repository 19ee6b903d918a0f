//! Path manipulation utilities.

use std::path::{Component, Path, PathBuf};

/// Normalize a path by resolving `.` and `..` without hitting the filesystem.
pub fn normalize(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(p) => components.push(Component::Prefix(p)),
            Component::RootDir => {
                components.clear();
                components.push(Component::RootDir);
            }
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::ParentDir) | None => components.push(Component::ParentDir),
                _ => {}
            },
            Component::Normal(c) => components.push(Component::Normal(c)),
        }
    }

    if components.is_empty() {
        PathBuf::from(".")
    } else {
        components.iter().collect()
    }
}

/// Show `path` relative to `root` when it lives underneath it.
pub fn display_relative(path: impl AsRef<Path>, root: impl AsRef<Path>) -> PathBuf {
    let path = normalize(path);
    let root = normalize(root);

    if root == Path::new(".") {
        return path;
    }

    path.strip_prefix(&root)
        .map(Path::to_path_buf)
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        let cases = [
            ("./a/b/../c", "a/c"),
            ("a/./b", "a/b"),
            ("a/../b", "b"),
            ("../../a/b", "../../a/b"),
            ("", "."),
            (".", "."),
        ];

        for (input, expected) in cases {
            assert_eq!(normalize(input), PathBuf::from(expected), "input: {input}");
        }
    }

    #[test]
    fn test_display_relative() {
        assert_eq!(
            display_relative("/work/proj/project_context/vision.md", "/work/proj"),
            PathBuf::from("project_context/vision.md")
        );
        assert_eq!(
            display_relative("./project_context/vision.md", "."),
            PathBuf::from("project_context/vision.md")
        );
        assert_eq!(
            display_relative("/elsewhere/x.md", "/work/proj"),
            PathBuf::from("/elsewhere/x.md")
        );
    }
}
