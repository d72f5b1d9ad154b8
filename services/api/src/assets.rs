use std::path::{Component, Path, PathBuf};

const INDEX_FILE: &str = "index.html";

/// Map a request path onto a file under `root`. Paths that climb out of the
/// root or use absolute/prefix components resolve to nothing.
pub(crate) fn resolve_asset_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = request_path.trim_start_matches('/');
    let mut resolved = root.to_path_buf();

    for component in Path::new(relative).components() {
        match component {
            Component::Normal(segment) => resolved.push(segment),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if relative.is_empty() || relative.ends_with('/') {
        resolved.push(INDEX_FILE);
    }
    Some(resolved)
}

pub(crate) fn content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_and_directories_resolve_to_index() {
        let root = Path::new("public");
        assert_eq!(
            resolve_asset_path(root, "/"),
            Some(PathBuf::from("public/index.html"))
        );
        assert_eq!(
            resolve_asset_path(root, "/editor/"),
            Some(PathBuf::from("public/editor/index.html"))
        );
        assert_eq!(
            resolve_asset_path(root, "/js/app.js"),
            Some(PathBuf::from("public/js/app.js"))
        );
    }

    #[test]
    fn traversal_is_rejected() {
        let root = Path::new("public");
        assert_eq!(resolve_asset_path(root, "/../Cargo.toml"), None);
        assert_eq!(resolve_asset_path(root, "/css/../../secret"), None);
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type(Path::new("index.html")), "text/html");
        assert_eq!(content_type(Path::new("style.css")), "text/css");
        assert_eq!(content_type(Path::new("blob")), "application/octet-stream");
    }
}
