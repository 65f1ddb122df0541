//! Operator interaction
//!
//! The engine shows the candidates of one project at a time and reads a
//! single line in reply. [`ConsolePrompt`] is the terminal implementation;
//! any reader/writer pair can back it.

use super::ProjectCandidates;
use crate::error::ResolveError;
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Port through which the operator picks an upgrade
pub trait Prompt {
    /// Present the candidates of one project
    fn show(&mut self, candidates: &ProjectCandidates) -> Result<(), ResolveError>;

    /// Read one line of input; an empty line skips the project
    fn read_selection(&mut self) -> Result<String, ResolveError>;
}

/// Prompt over a line reader and a writer, usually stdin and stdout
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl ConsolePrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process's terminal
    pub fn stdio(color: bool) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), color)
    }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W, color: bool) -> Self {
        Self {
            input,
            output,
            color,
        }
    }

    /// Consume the prompt, returning its writer
    pub fn into_output(self) -> W {
        self.output
    }

    fn write_candidates(&mut self, candidates: &ProjectCandidates) -> io::Result<()> {
        let project = &candidates.project;
        let title = format!("{} {}", project.name(), project.version().version);
        writeln!(self.output)?;
        if self.color {
            writeln!(self.output, "{}", title.bold())?;
        } else {
            writeln!(self.output, "{}", title)?;
        }
        writeln!(self.output)?;

        for (index, candidate) in candidates.candidates.iter().enumerate() {
            let missing = if candidate.missing_modules.is_empty() {
                String::new()
            } else {
                let names: Vec<&str> = candidate
                    .missing_modules
                    .iter()
                    .map(|m| m.artifact_id.as_str())
                    .collect();
                let text = format!(" (Some modules are missing: {})", names.join(", "));
                if self.color {
                    text.yellow().to_string()
                } else {
                    text
                }
            };
            writeln!(
                self.output,
                "    {}. {}{}",
                index + 1,
                candidate.version,
                missing
            )?;
        }

        writeln!(self.output)?;
        write!(self.output, "Please select a version: ")?;
        self.output.flush()
    }
}

impl<R: BufRead, W: Write> Prompt for ConsolePrompt<R, W> {
    fn show(&mut self, candidates: &ProjectCandidates) -> Result<(), ResolveError> {
        self.write_candidates(candidates)
            .map_err(|source| ResolveError::PromptFailed { source })
    }

    fn read_selection(&mut self) -> Result<String, ResolveError> {
        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .map_err(|source| ResolveError::PromptFailed { source })?;
        Ok(line.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom::{BomVersion, Module, Project, ProjectName};
    use crate::upgrade::Candidate;
    use crate::version::DependencyVersion;
    use std::io::Cursor;

    fn candidates() -> ProjectCandidates {
        let mut project = Project::new(
            ProjectName::from_property("spring-framework.version"),
            BomVersion::new(
                "spring-framework.version",
                DependencyVersion::parse("5.1.4.RELEASE"),
            ),
            Module::new("org.springframework", "spring-core"),
        );
        project.add_module(Module::new("org.springframework", "spring-aop"));
        ProjectCandidates {
            project,
            candidates: vec![
                Candidate {
                    version: DependencyVersion::parse("5.1.5.RELEASE"),
                    missing_modules: Vec::new(),
                },
                Candidate {
                    version: DependencyVersion::parse("5.2.0.RELEASE"),
                    missing_modules: vec![
                        Module::new("org.springframework", "spring-core"),
                        Module::new("org.springframework", "spring-aop"),
                    ],
                },
            ],
        }
    }

    #[test]
    fn test_show_lists_numbered_candidates() {
        let mut prompt = ConsolePrompt::new(Cursor::new(""), Vec::new(), false);
        prompt.show(&candidates()).unwrap();
        let output = String::from_utf8(prompt.into_output()).unwrap();

        assert_eq!(
            output,
            "\nSpring Framework 5.1.4.RELEASE\n\n    1. 5.1.5.RELEASE\n    2. 5.2.0.RELEASE (Some modules are missing: spring-core, spring-aop)\n\nPlease select a version: "
        );
    }

    #[test]
    fn test_read_selection_trims_line() {
        let mut prompt = ConsolePrompt::new(Cursor::new(" 2 \n1\n"), Vec::new(), false);
        assert_eq!(prompt.read_selection().unwrap(), "2");
        assert_eq!(prompt.read_selection().unwrap(), "1");
    }

    #[test]
    fn test_read_selection_at_end_of_input_is_empty() {
        let mut prompt = ConsolePrompt::new(Cursor::new(""), Vec::new(), false);
        assert_eq!(prompt.read_selection().unwrap(), "");
    }
}
