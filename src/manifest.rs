//! Loading the appfilter manifest from an icon pack repository.
//!
//! The current manifest comes from the working tree; the previous one is read
//! straight out of git history at a tag, branch or commit, so no checkout is
//! needed. Release tags are found and ordered here as well.

use std::fs;
use std::path::{Path, PathBuf};

use git2::{ErrorCode, Repository};

use crate::appfilter::{AppfilterItem, parse_appfilter};
use crate::error::{ReleaseError, Result};
use crate::version::Version;

/// Opens the Git repository containing `repo_path`.
///
/// Searches upward from the given path, like `git` itself does. Bare
/// repositories are rejected since the current manifest is read from the
/// working tree.
///
/// # Returns
///
/// The repository and the absolute path of its working directory.
pub fn open_repository(repo_path: &Path) -> Result<(Repository, PathBuf)> {
    let repo = Repository::discover(repo_path).map_err(|_| ReleaseError::RepoNotFound {
        path: repo_path.to_path_buf(),
    })?;

    let workdir = repo
        .workdir()
        .ok_or_else(|| ReleaseError::RepoNotFound {
            path: repo_path.to_path_buf(),
        })?
        .to_path_buf();

    Ok((repo, workdir))
}

/// Reads the appfilter from the working tree.
///
/// `appfilter` is relative to the repository root.
pub fn load_working_tree(repo_root: &Path, appfilter: &Path) -> Result<Vec<AppfilterItem>> {
    let path = repo_root.join(appfilter);
    let xml = fs::read_to_string(&path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ReleaseError::ManifestNotFound { path: path.clone() }
        } else {
            ReleaseError::IoError {
                path: path.clone(),
                source,
            }
        }
    })?;

    Ok(parse_appfilter(&xml))
}

/// Reads the appfilter as it was at `reference` (a tag, branch or commit).
///
/// A manifest that did not exist yet at that point yields no items, so the
/// first release that introduces it counts every icon as new.
pub fn load_at_revision(
    repo: &Repository,
    reference: &str,
    appfilter: &Path,
) -> Result<Vec<AppfilterItem>> {
    let object = repo
        .revparse_single(reference)
        .map_err(|_| ReleaseError::RevisionNotFound {
            reference: reference.to_string(),
        })?;
    let tree = object.peel_to_tree()?;

    let entry = match tree.get_path(appfilter) {
        Ok(entry) => entry,
        Err(e) if e.code() == ErrorCode::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let blob = entry.to_object(repo)?.peel_to_blob()?;
    let xml =
        std::str::from_utf8(blob.content()).map_err(|source| ReleaseError::ManifestEncoding {
            reference: reference.to_string(),
            path: appfilter.to_path_buf(),
            source,
        })?;

    Ok(parse_appfilter(xml))
}

/// Finds the highest `v<major>.<minor>.<patch>` tag in the repository.
///
/// Tags that do not match the pattern are ignored.
pub fn latest_release_tag(repo: &Repository) -> Result<(String, Version)> {
    let tags = repo.tag_names(Some("v*"))?;

    tags.iter()
        .flatten()
        .filter_map(|name| {
            name.parse::<Version>()
                .ok()
                .map(|version| (name.to_string(), version))
        })
        .max_by_key(|(_, version)| *version)
        .ok_or(ReleaseError::NoReleaseTag)
}

#[cfg(test)]
mod tests {
    use git2::Signature;
    use tempfile::TempDir;

    use super::*;

    const APPFILTER: &str = "app/assets/appfilter.xml";

    fn write_manifest(dir: &Path, body: &str) {
        let path = dir.join(APPFILTER);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, format!("<resources>\n{body}</resources>\n")).unwrap();
    }

    fn commit_all(repo: &Repository, message: &str) -> git2::Oid {
        let mut index = repo.index().unwrap();
        index
            .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
            .unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("Test", "test@example.com").unwrap();

        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    fn tag(repo: &Repository, name: &str, oid: git2::Oid) {
        let object = repo.find_object(oid, None).unwrap();
        repo.tag_lightweight(name, &object, false).unwrap();
    }

    #[test]
    fn test_load_at_revision_reads_tagged_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let repo = Repository::init(temp_dir.path()).unwrap();

        write_manifest(
            temp_dir.path(),
            "<item component=\"A\" drawable=\"a\" />\n",
        );
        let first = commit_all(&repo, "first");
        tag(&repo, "v1.0.0", first);

        write_manifest(
            temp_dir.path(),
            "<item component=\"A\" drawable=\"a\" />\n<item component=\"B\" drawable=\"b\" />\n",
        );

        let previous = load_at_revision(&repo, "v1.0.0", Path::new(APPFILTER)).unwrap();
        assert_eq!(previous.len(), 1);

        let current = load_working_tree(temp_dir.path(), Path::new(APPFILTER)).unwrap();
        assert_eq!(current.len(), 2);
    }

    #[test]
    fn test_missing_manifest_at_revision_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let repo = Repository::init(temp_dir.path()).unwrap();
        fs::write(temp_dir.path().join("README.md"), "icons").unwrap();
        commit_all(&repo, "initial");

        let items = load_at_revision(&repo, "HEAD", Path::new(APPFILTER)).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_unknown_revision() {
        let temp_dir = TempDir::new().unwrap();
        let repo = Repository::init(temp_dir.path()).unwrap();
        fs::write(temp_dir.path().join("README.md"), "icons").unwrap();
        commit_all(&repo, "initial");

        let err = load_at_revision(&repo, "v9.9.9", Path::new(APPFILTER)).unwrap_err();
        assert!(matches!(err, ReleaseError::RevisionNotFound { reference } if reference == "v9.9.9"));
    }

    #[test]
    fn test_non_utf8_manifest_at_revision() {
        let temp_dir = TempDir::new().unwrap();
        let repo = Repository::init(temp_dir.path()).unwrap();
        let path = temp_dir.path().join(APPFILTER);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            b"<resources>\n<item component=\"A\" drawable=\"caf\xe9\" />\n</resources>\n",
        )
        .unwrap();
        let oid = commit_all(&repo, "latin-1 manifest");
        tag(&repo, "v1.0.0", oid);

        let err = load_at_revision(&repo, "v1.0.0", Path::new(APPFILTER)).unwrap_err();
        match err {
            ReleaseError::ManifestEncoding {
                reference, path, ..
            } => {
                assert_eq!(reference, "v1.0.0");
                assert_eq!(path, Path::new(APPFILTER));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_working_tree_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_working_tree(temp_dir.path(), Path::new(APPFILTER)).unwrap_err();
        assert!(matches!(err, ReleaseError::ManifestNotFound { .. }));
    }

    #[test]
    fn test_latest_release_tag_uses_version_order() {
        let temp_dir = TempDir::new().unwrap();
        let repo = Repository::init(temp_dir.path()).unwrap();
        fs::write(temp_dir.path().join("README.md"), "icons").unwrap();
        let oid = commit_all(&repo, "initial");

        for name in ["v2.9.0", "v2.10.0", "v2.10.0-rc1", "vnext", "nightly"] {
            tag(&repo, name, oid);
        }

        let (name, version) = latest_release_tag(&repo).unwrap();
        assert_eq!(name, "v2.10.0");
        assert_eq!(version, Version::new(2, 10, 0));
    }

    #[test]
    fn test_no_release_tag() {
        let temp_dir = TempDir::new().unwrap();
        let repo = Repository::init(temp_dir.path()).unwrap();
        fs::write(temp_dir.path().join("README.md"), "icons").unwrap();
        commit_all(&repo, "initial");

        let err = latest_release_tag(&repo).unwrap_err();
        assert!(matches!(err, ReleaseError::NoReleaseTag));
    }

    #[test]
    fn test_repo_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let result = open_repository(temp_dir.path());
        assert!(matches!(result, Err(ReleaseError::RepoNotFound { .. })));
    }
}
