//! Recursive inclusion resolver.
//!
//! Copies an input stream to an output sink line by line, replacing every
//! non-commented `\input`/`\include` directive with the recursively expanded
//! contents of the referenced file. Expansion is a strict depth-first,
//! pre-order traversal of the inclusion tree; writes reach the sink in
//! exactly the order the content appears in the source documents.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};

use tracing::debug;

use crate::config::Config;
use crate::directive::{find_directive, normalize_filename};
use crate::error::ResolveError;

/// Recursive inclusion resolver.
///
/// Holds the per-run [`Config`] and the stack of files currently being
/// expanded. One resolver can flatten any number of documents in sequence;
/// internal state is reset at each [`resolve`](Resolver::resolve) call.
pub struct Resolver {
    config: Config,
    /// Normalized names of the files currently open, outermost first.
    stack: Vec<String>,
}

impl Resolver {
    /// Create a resolver with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            stack: Vec::new(),
        }
    }

    /// The configuration this resolver runs with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Flatten `input` into `output`.
    ///
    /// Lines are copied in order; each directive is replaced in place by the
    /// expanded referent, opened relative to the process working directory.
    /// On error, everything written so far stays in `output`; nothing is
    /// rolled back.
    pub fn resolve<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        mut output: W,
    ) -> Result<(), ResolveError> {
        self.stack.clear();
        self.copy_expanded(&mut input, &mut output)
    }

    fn copy_expanded(
        &mut self,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> Result<(), ResolveError> {
        let mut line = String::new();
        loop {
            line.clear();
            if input.read_line(&mut line).map_err(ResolveError::Read)? == 0 {
                return Ok(());
            }
            match find_directive(&line) {
                Some(directive) => {
                    output
                        .write_all(directive.before.as_bytes())
                        .map_err(ResolveError::Write)?;
                    let name = normalize_filename(directive.filename, &self.config.extension);
                    self.insert_file(&name, output)?;
                    output
                        .write_all(directive.after.as_bytes())
                        .map_err(ResolveError::Write)?;
                }
                None => {
                    output
                        .write_all(line.as_bytes())
                        .map_err(ResolveError::Write)?;
                }
            }
        }
    }

    /// Expand one included file into `output`, recursing into its directives.
    fn insert_file(&mut self, name: &str, output: &mut dyn Write) -> Result<(), ResolveError> {
        if let Some(limit) = self.config.max_depth {
            if self.stack.len() >= limit {
                return Err(ResolveError::TooDeep {
                    path: name.to_string(),
                    limit,
                });
            }
        }
        if self.config.detect_cycles && self.stack.iter().any(|open| open == name) {
            return Err(ResolveError::Cycle {
                path: name.to_string(),
            });
        }

        debug!(file = name, depth = self.stack.len() + 1, "inserting file");

        // The begin marker goes out before the open attempt, so a failed
        // open leaves it as the last line of the partial output.
        if self.config.markers {
            writeln!(output, "% ========= begin insertion of {} ==========", name)
                .map_err(ResolveError::Write)?;
        }

        let file = File::open(name).map_err(|source| ResolveError::Open {
            path: name.to_string(),
            source,
        })?;
        self.stack.push(name.to_string());
        let expanded = self.copy_expanded(&mut BufReader::new(file), output);
        self.stack.pop();
        expanded?;

        if self.config.markers {
            writeln!(output, "% ========= end insertion of {} ==========", name)
                .map_err(ResolveError::Write)?;
        }
        Ok(())
    }
}
