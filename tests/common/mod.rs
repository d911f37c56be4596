use std::fs;
use std::path::Path;

use assert_fs::TempDir;
use git2::{Oid, Repository, Signature};

pub const APPFILTER: &str = "app/assets/appfilter.xml";

/// An icon pack repository in a temporary directory.
pub struct IconPackRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl IconPackRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes the appfilter with the given `(package, drawable)` items.
    pub fn write_appfilter(&self, items: &[(&str, &str)]) {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources>\n");
        for (package, drawable) in items {
            xml.push_str(&format!(
                "    <item component=\"ComponentInfo{{{package}/{package}.MainActivity}}\" \
                 drawable=\"{drawable}\" name=\"{package}\" />\n"
            ));
        }
        xml.push_str("</resources>\n");

        let path = self.path().join(APPFILTER);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, xml).unwrap();
    }

    /// Commits everything in the working tree and tags the commit.
    pub fn commit_and_tag(&self, tag: &str) -> Oid {
        let mut index = self.repo.index().unwrap();
        index
            .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
            .unwrap();
        index.write().unwrap();

        let tree = self.repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = Signature::now("Icon Bot", "icons@example.com").unwrap();
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, &format!("Release {tag}"), &tree, &parents)
            .unwrap();
        let object = self.repo.find_object(oid, None).unwrap();
        self.repo.tag_lightweight(tag, &object, false).unwrap();
        oid
    }
}
