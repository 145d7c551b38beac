//! Corpus file layout and writes.
//!
//! ```text
//! {root}/__cts__.xml                          textgroup index
//! {root}/{group}/{code}/__cts__.xml           work index
//! {root}/{group}/{code}/{group}.{code}.cdli-akk.xml   one file per edition/translation
//! ```
//!
//! A work is written through `.tmp` siblings that are renamed into place
//! once all of them exist, work index last. On failure every file of the
//! work written so far is removed.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use atf_model::{DivisionType, Document, TextGroup, Work, group_segment, part_file_name};
use tracing::{debug, warn};

use crate::xml::render;

/// File name of every CTS index.
pub const INDEX_FILE_NAME: &str = "__cts__.xml";

/// Extension appended to a file while its work is being staged.
const STAGING_EXTENSION: &str = "tmp";

/// Paths of a corpus rooted at one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusLayout {
    root: PathBuf,
}

impl CorpusLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn textgroup_index(&self) -> PathBuf {
        self.root.join(INDEX_FILE_NAME)
    }

    pub fn work_dir(&self, group_urn: &str, code: &str) -> PathBuf {
        self.root.join(group_segment(group_urn)).join(code)
    }

    pub fn work_index(&self, group_urn: &str, code: &str) -> PathBuf {
        self.work_dir(group_urn, code).join(INDEX_FILE_NAME)
    }

    /// Path of the file for an edition or translation id.
    pub fn part_path(&self, group_urn: &str, code: &str, id: &str) -> PathBuf {
        self.work_dir(group_urn, code).join(part_file_name(id))
    }
}

/// Everything written for one work, rendered up front so nothing touches
/// the disk unless rendering succeeded for every file.
#[derive(Debug, Clone)]
pub struct RenderedWork {
    pub code: String,
    pub group_urn: String,
    pub work_index: String,
    /// `(edition or translation id, TEI document)` in document order.
    pub parts: Vec<(String, String)>,
}

/// Render the work index and one TEI document per top-level part.
///
/// Parts must already carry their urn ids as names, and no two parts may
/// share one (each id names its own file).
pub fn render_work(document: &Document, work: &Work) -> Result<RenderedWork> {
    let code = document
        .header
        .code
        .clone()
        .ok_or_else(|| anyhow!("document has no code"))?;
    let group_urn = work
        .group_urn
        .clone()
        .ok_or_else(|| anyhow!("work {code} has no group urn"))?;
    let work_index = render(work).with_context(|| format!("render work index for {code}"))?;

    let mut parts = Vec::new();
    let mut seen = HashSet::new();
    for (index, part) in document.parts.iter().enumerate() {
        if part.division == DivisionType::Textpart {
            continue;
        }
        let id = part
            .name
            .clone()
            .ok_or_else(|| anyhow!("{} part of {code} has no urn", part.division.as_str()))?;
        if !seen.insert(id.clone()) {
            bail!("{} part of {code} reuses id {id}", part.division.as_str());
        }
        let single = document
            .with_single_part(index)
            .ok_or_else(|| anyhow!("part {index} of {code} is missing"))?;
        let xml = render(&single).with_context(|| format!("render {id}"))?;
        parts.push((id, xml));
    }
    Ok(RenderedWork {
        code,
        group_urn,
        work_index,
        parts,
    })
}

/// Write a rendered work. Returns the paths written, work index last.
///
/// Either every file of the work ends up in place or none of them does.
pub fn write_work(layout: &CorpusLayout, rendered: &RenderedWork) -> Result<Vec<PathBuf>> {
    let dir = layout.work_dir(&rendered.group_urn, &rendered.code);
    if dir.exists() {
        warn!(
            code = %rendered.code,
            dir = %dir.display(),
            "work directory already exists, overwriting"
        );
    }
    let mut files: Vec<(PathBuf, &str)> = rendered
        .parts
        .iter()
        .map(|(id, xml)| {
            let path = layout.part_path(&rendered.group_urn, &rendered.code, id);
            (path, xml.as_str())
        })
        .collect();
    files.push((
        layout.work_index(&rendered.group_urn, &rendered.code),
        rendered.work_index.as_str(),
    ));

    let mut staged = Vec::with_capacity(files.len());
    for (path, contents) in &files {
        let temp = staging_path(path);
        if let Err(err) = write_file(&temp, contents) {
            staged.push(temp);
            discard(&dir, &staged);
            return Err(err);
        }
        staged.push(temp);
    }

    let mut written = Vec::with_capacity(files.len());
    for (index, (path, _)) in files.iter().enumerate() {
        if let Err(err) = fs::rename(&staged[index], path) {
            written.extend_from_slice(&staged[index..]);
            discard(&dir, &written);
            return Err(err).with_context(|| format!("move {} into place", path.display()));
        }
        written.push(path.clone());
    }
    debug!(code = %rendered.code, files = written.len(), "wrote work");
    Ok(written)
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(STAGING_EXTENSION);
    PathBuf::from(name)
}

/// Remove `paths`, then `dir` if that left it empty.
fn discard(dir: &Path, paths: &[PathBuf]) {
    for path in paths {
        if let Err(err) = fs::remove_file(path)
            && err.kind() != std::io::ErrorKind::NotFound
        {
            warn!(path = %path.display(), error = %err, "could not remove partial output");
        }
    }
    if fs::remove_dir(dir).is_ok() {
        debug!(dir = %dir.display(), "removed empty work directory");
    }
}

/// Render and write the textgroup index.
pub fn write_textgroup_index(layout: &CorpusLayout, group: &TextGroup) -> Result<PathBuf> {
    let xml = render(group).context("render textgroup index")?;
    let path = layout.textgroup_index();
    write_file(&path, &xml)?;
    Ok(path)
}

/// Create `path` (and its parent directories) and write `contents`.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents.as_bytes())
        .with_context(|| format!("write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_keeps_the_full_file_name() {
        assert_eq!(
            staging_path(Path::new("out/test/X1/test.X1.cdli-akk.xml")),
            PathBuf::from("out/test/X1/test.X1.cdli-akk.xml.tmp")
        );
    }

    #[test]
    fn layout_nests_work_under_group_segment() {
        let layout = CorpusLayout::new("out");
        assert_eq!(layout.textgroup_index(), PathBuf::from("out/__cts__.xml"));
        assert_eq!(
            layout.work_index("urn:cts:cdli:test", "X001001"),
            PathBuf::from("out/test/X001001/__cts__.xml")
        );
        assert_eq!(
            layout.part_path(
                "urn:cts:cdli:test",
                "X001001",
                "urn:cts:cdli:test.X001001.cdli-akk"
            ),
            PathBuf::from("out/test/X001001/test.X001001.cdli-akk.xml")
        );
    }
}
