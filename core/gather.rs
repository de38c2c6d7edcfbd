use indexmap::IndexMap;
use log;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

pub const CODE_EXTENSIONS: [&str; 9] = [
    ".js", ".ts", ".wxml", ".wxss", ".json", ".py", ".java", ".go", ".rs",
];
pub const EXCLUDED_DIRS: [&str; 6] = [".git", "node_modules", "__pycache__", "dist", "build", ".trae"];

const PRIORITY_FILENAMES: [(&str, u8); 3] = [("app.js", 0), ("main.js", 1), ("index.js", 2)];
const PRIORITY_PATH_MARKERS: [(&str, u8); 4] =
    [("utils", 10), ("pages", 20), ("components", 30), ("config", 40)];
const DEFAULT_PRIORITY: u8 = 50;

const FILE_MARKER: &str = "file";

pub type DirectoryTree = IndexMap<String, TreeEntry>;

#[derive(Debug, Clone, PartialEq)]
pub enum TreeEntry {
    File,
    Dir(DirectoryTree),
}

impl Serialize for TreeEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            TreeEntry::File => serializer.serialize_str(FILE_MARKER),
            TreeEntry::Dir(children) => children.serialize(serializer),
        }
    }
}

/// Walks `project_root` and returns the relative paths of all code files,
/// ordered by [`file_priority`]. Excluded directories are never descended into.
pub fn collect_code_files(project_root: &Path) -> Vec<PathBuf> {
    log::info!("Walking project directory: {}", project_root.display());
    let walker = WalkDir::new(project_root)
        .follow_links(false)
        .sort_by(discovery_order)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_excluded_dir(entry));

    let mut code_files = Vec::new();
    for entry_result in walker {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Error walking directory: {}", e);
                continue;
            }
        };
        // The root itself is never a code file, even when it names a file.
        if entry.depth() == 0 || is_directory_like(&entry) {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if !CODE_EXTENSIONS.iter().any(|ext| file_name.ends_with(ext)) {
            log::trace!("Skipping non-code file: {}", entry.path().display());
            continue;
        }
        match pathdiff::diff_paths(entry.path(), project_root) {
            Some(relative_path) => {
                log::trace!("Collected code file: {}", relative_path.display());
                code_files.push(relative_path);
            }
            None => log::warn!("Could not get relative path for: {}", entry.path().display()),
        }
    }

    // Stable: equal priorities keep discovery order.
    code_files.sort_by_key(|path| file_priority(path));
    log::debug!("Collected {} code files.", code_files.len());
    code_files
}

/// Files sort before subdirectories within a directory, each group by name.
fn discovery_order(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Directories and symlinks to directories. File symlinks, broken ones
/// included, are listed like regular files.
fn is_directory_like(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir())
}

fn is_excluded_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| EXCLUDED_DIRS.contains(&name))
}

pub fn file_priority(path: &Path) -> u8 {
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        if let Some((_, rank)) = PRIORITY_FILENAMES.iter().find(|(f, _)| *f == name) {
            return *rank;
        }
    }
    let path_str = path.to_string_lossy();
    PRIORITY_PATH_MARKERS
        .iter()
        .find(|(marker, _)| path_str.contains(marker))
        .map_or(DEFAULT_PRIORITY, |(_, rank)| *rank)
}

pub fn build_tree_from_paths(paths: &[PathBuf]) -> DirectoryTree {
    let mut root = DirectoryTree::new();
    for path in paths {
        let components: Vec<String> = path
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        if !insert_path(&mut root, &components) {
            log::warn!(
                "Tree conflict: a file component blocks path \"{}\"",
                path.display()
            );
        }
    }
    root
}

fn insert_path(level: &mut DirectoryTree, components: &[String]) -> bool {
    let Some((first, rest)) = components.split_first() else {
        return true;
    };
    if rest.is_empty() {
        level.insert(first.clone(), TreeEntry::File);
        return true;
    }
    let entry = level
        .entry(first.clone())
        .or_insert_with(|| TreeEntry::Dir(DirectoryTree::new()));
    match entry {
        TreeEntry::Dir(children) => insert_path(children, rest),
        TreeEntry::File => false,
    }
}

/// Renders the tree with box-drawing connectors, rooted at `root_label`.
pub fn render_tree(tree: &DirectoryTree, root_label: &str) -> String {
    let mut out = String::new();
    out.push_str(root_label);
    out.push('\n');
    render_level(tree, "", &mut out);
    out
}

fn render_level(level: &DirectoryTree, prefix: &str, out: &mut String) {
    let count = level.len();
    for (i, (name, entry)) in level.iter().enumerate() {
        let last = i + 1 == count;
        out.push_str(prefix);
        out.push_str(if last { "└── " } else { "├── " });
        out.push_str(name);
        match entry {
            TreeEntry::File => out.push('\n'),
            TreeEntry::Dir(children) => {
                out.push_str("/\n");
                let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
                render_level(children, &child_prefix, out);
            }
        }
    }
}
