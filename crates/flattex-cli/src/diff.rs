//! Two-revision diff workflow.
//!
//! Flattens the main document at two Git revisions, runs `latexdiff` over
//! the flattened copies, typesets the diff with `pdflatex`, and moves the
//! resulting PDF to its destination.

use std::env;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use flattex_core::{Config, Resolver};
use tracing::info;

use crate::exec;
use crate::git::GitRepo;

/// Extra options passed to `latexdiff`.
const LATEXDIFF_OPTIONS: &[&str] = &["--append-textcmd=hint.*,todo"];
/// Options passed to every `pdflatex` round.
const PDFLATEX_OPTIONS: &[&str] = &["-interaction=batchmode"];
/// Number of pdflatex rounds needed to stabilize cross-references.
const TEX_ROUNDS: usize = 3;

const TEX_EXTENSION: &str = ".tex";
const PDF_EXTENSION: &str = ".pdf";

/// A fully resolved diff request.
pub struct DiffJob {
    main_file: PathBuf,
    main_dir: PathBuf,
    diff_pdf: PathBuf,
    old_rev: String,
    new_rev: String,
}

impl DiffJob {
    /// Resolve paths from command-line values and refuse to clobber an
    /// existing diff unless `overwrite` is set.
    pub fn new(
        main: &Path,
        old_rev: String,
        new_rev: String,
        diff_name: &Path,
        overwrite: bool,
    ) -> Result<Self> {
        let main_file = absolute_with_extension(main, TEX_EXTENSION)?;
        let main_dir = main_file
            .parent()
            .context("main file has no parent directory")?
            .to_path_buf();
        let diff_pdf = absolute_with_extension(diff_name, PDF_EXTENSION)?;
        if !overwrite && diff_pdf.exists() {
            bail!(
                "destination file {} exists; pass --overwrite to replace it",
                diff_pdf.display()
            );
        }
        Ok(Self {
            main_file,
            main_dir,
            diff_pdf,
            old_rev,
            new_rev,
        })
    }

    /// Directory of the main file; the repository is discovered from here.
    pub fn main_dir(&self) -> &Path {
        &self.main_dir
    }

    /// Execute the whole workflow.
    ///
    /// TeX tools must run in the main file's directory to see the project's
    /// auxiliary files, and relative `\input` paths resolve against the
    /// process working directory, so the process moves there first.
    pub fn run(&self, repo: &GitRepo) -> Result<()> {
        env::set_current_dir(&self.main_dir)
            .with_context(|| format!("cannot change into {}", self.main_dir.display()))?;

        // A new revision given as the default HEAD is pinned to the ref that
        // was checked out at discovery, so the final restore does not change
        // what got diffed.
        let new_rev = if self.new_rev == "HEAD" {
            repo.initial_rev().to_string()
        } else {
            self.new_rev.clone()
        };

        let old_tex = self.flatten_revision(repo, &self.old_rev)?;
        let new_tex = self.flatten_revision(repo, &new_rev)?;
        repo.restore()?;

        let diff_tex = self.run_latexdiff(&old_tex, &new_tex)?;
        let diff_tex_arg = path_str(&diff_tex)?;
        for round in 1..=TEX_ROUNDS {
            info!(round, "running pdflatex");
            let mut args = PDFLATEX_OPTIONS.to_vec();
            args.push(diff_tex_arg);
            exec::capture("pdflatex", &args, &self.main_dir)?;
        }

        let produced_pdf = diff_tex.with_extension("pdf");
        fs::rename(&produced_pdf, &self.diff_pdf).with_context(|| {
            format!(
                "cannot move {} to {}",
                produced_pdf.display(),
                self.diff_pdf.display()
            )
        })?;

        // Drop the flattened inputs and every pdflatex byproduct of the
        // diff document (aux, log, out, ...).
        fs::remove_file(&old_tex)
            .with_context(|| format!("cannot remove {}", old_tex.display()))?;
        fs::remove_file(&new_tex)
            .with_context(|| format!("cannot remove {}", new_tex.display()))?;
        remove_files_with_stem(&self.main_dir, &diff_tex)?;

        info!(diff = %self.diff_pdf.display(), "diff complete");
        Ok(())
    }

    /// Check out `revision` and flatten the main file into a kept temporary
    /// file in the main directory. Returns the temporary's path.
    fn flatten_revision(&self, repo: &GitRepo, revision: &str) -> Result<PathBuf> {
        repo.checkout(revision)?;
        info!(revision, "flattening main file");

        let tmp = tempfile::Builder::new()
            .prefix("tmp")
            .suffix(TEX_EXTENSION)
            .tempfile_in(&self.main_dir)
            .context("cannot create temporary file")?;
        let (file, path) = tmp.keep().context("cannot keep temporary file")?;

        let input = BufReader::new(File::open(&self.main_file).with_context(|| {
            format!("cannot open main file {}", self.main_file.display())
        })?);
        let mut output = BufWriter::new(file);
        Resolver::new(Config::default())
            .resolve(input, &mut output)
            .with_context(|| {
                format!(
                    "flattening {} at {} failed",
                    self.main_file.display(),
                    revision
                )
            })?;
        output.flush().context("cannot flush flattened output")?;
        Ok(path)
    }

    /// Run latexdiff over the two flattened documents and store its output
    /// in another kept temporary file.
    fn run_latexdiff(&self, old_tex: &Path, new_tex: &Path) -> Result<PathBuf> {
        info!("running latexdiff");
        let mut args = LATEXDIFF_OPTIONS.to_vec();
        args.push(path_str(old_tex)?);
        args.push(path_str(new_tex)?);
        let diff_source = exec::capture("latexdiff", &args, &self.main_dir)?;

        let tmp = tempfile::Builder::new()
            .prefix("tmp")
            .suffix(TEX_EXTENSION)
            .tempfile_in(&self.main_dir)
            .context("cannot create temporary file")?;
        let (mut file, path) = tmp.keep().context("cannot keep temporary file")?;
        file.write_all(diff_source.as_bytes())
            .with_context(|| format!("cannot write {}", path.display()))?;
        Ok(path)
    }
}

/// Make `path` absolute and ensure it ends with `extension`.
///
/// The extension is appended, never substituted: `notes.v2` becomes
/// `notes.v2.tex`.
pub fn absolute_with_extension(path: &Path, extension: &str) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .context("cannot determine current directory")?
            .join(path)
    };
    let name = absolute
        .to_str()
        .context("path is not valid UTF-8")?;
    Ok(if name.ends_with(extension) {
        absolute
    } else {
        PathBuf::from(format!("{}{}", name, extension))
    })
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str().context("path is not valid UTF-8")
}

/// Remove every file in `dir` whose name starts with `tex_file`'s stem,
/// which catches all pdflatex byproducts of that document.
fn remove_files_with_stem(dir: &Path, tex_file: &Path) -> Result<()> {
    let stem = tex_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("temporary file has no stem")?;
    for entry in fs::read_dir(dir).with_context(|| format!("cannot read {}", dir.display()))? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with(stem) {
            fs::remove_file(entry.path())
                .with_context(|| format!("cannot remove {}", entry.path().display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_appended_when_missing() {
        let path = absolute_with_extension(Path::new("/tmp/report"), ".tex").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/report.tex"));
    }

    #[test]
    fn extension_kept_when_present() {
        let path = absolute_with_extension(Path::new("/tmp/report.tex"), ".tex").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/report.tex"));
    }

    #[test]
    fn extension_appended_not_substituted() {
        let path = absolute_with_extension(Path::new("/tmp/notes.v2"), ".tex").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/notes.v2.tex"));
    }

    #[test]
    fn relative_path_made_absolute() {
        let path = absolute_with_extension(Path::new("report"), ".tex").unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("report.tex"));
    }
}
