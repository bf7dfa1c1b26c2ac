// src/handler/page_handler.rs

use std::path::{Path, PathBuf};

use actix_files::NamedFile;
use actix_web::{web, Result};

use crate::constants::{DASHBOARD_PATH, INDEX_FILE};
use crate::state::AppState;

pub struct PageHandler;

impl PageHandler {
    /// Entry page with the sign-in form.
    pub async fn index(state: web::Data<AppState>) -> Result<NamedFile> {
        let path = Path::new(&state.config.static_dir).join(INDEX_FILE);
        Ok(NamedFile::open_async(path).await?)
    }

    /// Dashboard assets. Unknown paths fall back to the dashboard index so
    /// client-side routes keep working on reload.
    pub async fn dashboard(
        tail: Option<web::Path<String>>,
        state: web::Data<AppState>,
    ) -> Result<NamedFile> {
        let root = dashboard_root(&state.config.static_dir);

        if let Some(file) = tail.and_then(|tail| asset_path(&root, &tail)) {
            if file.is_file() {
                return Ok(NamedFile::open_async(file).await?);
            }
        }

        Ok(NamedFile::open_async(root.join(INDEX_FILE)).await?)
    }
}

fn dashboard_root(static_dir: &str) -> PathBuf {
    Path::new(static_dir).join(DASHBOARD_PATH.trim_start_matches('/'))
}

/// Joins a request tail under `root`, refusing anything that could step out
/// of it or reach hidden files.
fn asset_path(root: &Path, tail: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    for segment in tail.split('/').filter(|s| !s.is_empty()) {
        if segment.starts_with('.') || segment.contains('\\') {
            return None;
        }
        path.push(segment);
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_path() {
        let root = Path::new("/srv/public/dashboard");
        assert_eq!(
            asset_path(root, "assets/app.js"),
            Some(PathBuf::from("/srv/public/dashboard/assets/app.js"))
        );
        assert_eq!(asset_path(root, ""), Some(root.to_path_buf()));
        assert_eq!(asset_path(root, "../index.html"), None);
        assert_eq!(asset_path(root, "a/../../etc/passwd"), None);
        assert_eq!(asset_path(root, ".env"), None);
    }

    #[test]
    fn test_dashboard_root() {
        assert_eq!(dashboard_root("./public"), PathBuf::from("./public/dashboard"));
    }
}
