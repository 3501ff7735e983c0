//! Source assembly: ordering, merging, and pagination.
//!
//! Reads each selected file into clean lines, prefixes a file-name
//! header, and concatenates backend files before frontend files. Within
//! a role, files are ordered by an importance score unless the caller
//! supplies an explicit order.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::processing::reader::read_source_lines;
use crate::processing::scanner::SourceSet;

/// Keywords that raise a file's importance, highest weight first.
const IMPORTANT_KEYWORDS: [&str; 9] = [
    "main",
    "core",
    "app",
    "index",
    "server",
    "api",
    "config",
    "model",
    "controller",
];

/// Heuristic importance score for automatic file ordering.
///
/// File-name keywords weigh more the earlier they appear in
/// [`IMPORTANT_KEYWORDS`]; well-known directory names add smaller
/// bonuses.
pub fn importance_score(path: &Path) -> i32 {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let path_lower = path.to_string_lossy().to_lowercase();

    let mut score = 0;

    for (i, keyword) in IMPORTANT_KEYWORDS.iter().enumerate() {
        if file_name.contains(keyword) {
            score += 10 - i as i32;
        }
    }

    for (dir, bonus) in [
        ("core", 5),
        ("model", 4),
        ("service", 3),
        ("controller", 2),
        ("util", 1),
    ] {
        if path_lower.contains(dir) {
            score += bonus;
        }
    }

    score
}

/// Sort files by importance, highest first. The sort is stable so
/// equally scored files keep their scan order.
pub fn sort_by_importance(files: &mut [PathBuf]) {
    files.sort_by_key(|p| std::cmp::Reverse(importance_score(p)));
}

/// The header line written above each file's content: just the file name.
pub fn file_header(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Merged output of an assembly run.
#[derive(Debug, Clone, Default)]
pub struct MergedSource {
    /// All lines in emission order, file headers included.
    pub lines: Vec<String>,
    /// Files that contributed at least one line, in emission order.
    pub processed_files: Vec<PathBuf>,
}

/// Merge a scanned source set into one line sequence.
///
/// With `file_order`, files are emitted in exactly that order (entries
/// not present in the set are ignored). Otherwise backend files come
/// first, then frontend, each sorted by importance. Files that read as
/// empty are skipped.
pub fn merge_sources(set: &SourceSet, file_order: Option<&[PathBuf]>) -> MergedSource {
    let mut merged = MergedSource::default();

    let ordered: Vec<PathBuf> = match file_order {
        Some(order) if !order.is_empty() => {
            debug!(files = order.len(), "merging with explicit file order");
            order
                .iter()
                .filter(|p| set.contains(p))
                .cloned()
                .collect()
        }
        _ => {
            debug!("merging with automatic importance ordering");
            let mut backend = set.backend.clone();
            let mut frontend = set.frontend.clone();
            sort_by_importance(&mut backend);
            sort_by_importance(&mut frontend);
            backend.into_iter().chain(frontend).collect()
        }
    };

    for path in ordered {
        let content = read_source_lines(&path);
        if content.is_empty() {
            continue;
        }
        merged.lines.push(file_header(&path));
        merged.lines.extend(content);
        merged.processed_files.push(path);
    }

    merged
}

/// Split lines into fixed-size pages; the last page may be shorter.
pub fn split_into_pages(lines: &[String], lines_per_page: usize) -> Vec<Vec<String>> {
    if lines_per_page == 0 {
        return vec![lines.to_vec()];
    }
    lines
        .chunks(lines_per_page)
        .map(|chunk| chunk.to_vec())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_importance_ordering() {
        assert!(importance_score(Path::new("src/main.py")) > importance_score(Path::new("src/helpers.py")));
        assert!(
            importance_score(Path::new("core/model/user.py"))
                > importance_score(Path::new("misc/notes.py"))
        );

        let mut files = vec![
            PathBuf::from("src/helpers.py"),
            PathBuf::from("src/main.py"),
            PathBuf::from("src/config.py"),
        ];
        sort_by_importance(&mut files);
        assert_eq!(files[0], PathBuf::from("src/main.py"));
    }

    #[test]
    fn test_file_header_is_file_name() {
        assert_eq!(file_header(Path::new("a/b/app.py")), "app.py");
    }

    #[test]
    fn test_merge_backend_before_frontend() {
        let dir = TempDir::new().unwrap();
        let py = dir.path().join("api.py");
        let js = dir.path().join("view.js");
        fs::write(&py, "print('backend')\n").unwrap();
        fs::write(&js, "render();\n").unwrap();

        let set = SourceSet {
            backend: vec![py.clone()],
            frontend: vec![js.clone()],
        };
        let merged = merge_sources(&set, None);

        assert_eq!(
            merged.lines,
            vec!["api.py", "print('backend')", "view.js", "render();"]
        );
        assert_eq!(merged.processed_files, vec![py, js]);
    }

    #[test]
    fn test_merge_with_explicit_order() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.py");
        let b = dir.path().join("b.py");
        fs::write(&a, "aa\n").unwrap();
        fs::write(&b, "bb\n").unwrap();

        let set = SourceSet {
            backend: vec![a.clone(), b.clone()],
            frontend: vec![],
        };
        let order = vec![b.clone(), a.clone(), PathBuf::from("ghost.py")];
        let merged = merge_sources(&set, Some(&order));

        assert_eq!(merged.lines, vec!["b.py", "bb", "a.py", "aa"]);
    }

    #[test]
    fn test_binary_files_contribute_no_lines() {
        use crate::processing::scanner::FileScanner;

        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.py"), "print('ok')\n").unwrap();
        // A source extension does not save a binary blob from the reader.
        fs::write(dir.path().join("blob.py"), b"\x00\x01\x02\x03print('hidden')\n").unwrap();

        let set = FileScanner::default().scan(dir.path());
        let merged = merge_sources(&set, None);

        assert_eq!(merged.lines, vec!["app.py", "print('ok')"]);
        assert!(merged.processed_files.iter().all(|p| !p.ends_with("blob.py")));
    }

    #[test]
    fn test_empty_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        let empty = dir.path().join("empty.py");
        fs::write(&empty, "\n\n").unwrap();

        let set = SourceSet {
            backend: vec![empty],
            frontend: vec![],
        };
        let merged = merge_sources(&set, None);
        assert!(merged.lines.is_empty());
        assert!(merged.processed_files.is_empty());
    }

    #[test]
    fn test_pagination() {
        let lines: Vec<String> = (0..7).map(|i| format!("l{}", i)).collect();
        let pages = split_into_pages(&lines, 3);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), 3);
        assert_eq!(pages[2], vec!["l6"]);

        assert_eq!(split_into_pages(&lines, 0).len(), 1);
    }
}
