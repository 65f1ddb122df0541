//! Text output formatter for human-readable display
//!
//! This module provides:
//! - One aligned line per selected upgrade
//! - Governing property and modules in verbose mode
//! - Dry-run and commit markers

use crate::orchestrator::UpgradeReport;
use crate::output::{OutputFormatter, Verbosity};
use crate::upgrade::Upgrade;
use colored::Colorize;
use std::io::Write;

/// Minimum width of the project name column
const NAME_WIDTH: usize = 20;

/// Text formatter for human-readable output
pub struct TextFormatter {
    verbosity: Verbosity,
    dry_run: bool,
    color: bool,
}

impl TextFormatter {
    pub fn new(verbosity: Verbosity, dry_run: bool) -> Self {
        Self::with_color(verbosity, dry_run, true)
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, dry_run: bool, color: bool) -> Self {
        Self {
            verbosity,
            dry_run,
            color,
        }
    }

    fn dry_run_prefix(&self) -> String {
        if !self.dry_run {
            String::new()
        } else if self.color {
            format!("{} ", "(dry-run)".cyan())
        } else {
            "(dry-run) ".to_string()
        }
    }

    fn write_line(
        &self,
        upgrade: &Upgrade,
        width: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let name = upgrade.project().name().as_str();
        let from = upgrade.project().version().version.as_str();
        let to = upgrade.version().as_str();

        if self.color {
            writeln!(
                writer,
                "  {} {} {} {}",
                format!("{:width$}", name, width = width).bold(),
                from.dimmed(),
                "→".dimmed(),
                to.bright_white().bold()
            )
        } else {
            writeln!(writer, "  {:width$} {} -> {}", name, from, to, width = width)
        }
    }

    fn write_details(&self, upgrade: &Upgrade, writer: &mut dyn Write) -> std::io::Result<()> {
        let property = &upgrade.project().version().property;
        let modules: Vec<String> = upgrade
            .project()
            .modules()
            .iter()
            .map(|m| m.to_string())
            .collect();
        let details = [
            format!("property: {}", property),
            format!("modules: {}", modules.join(", ")),
        ];
        for line in details {
            if self.color {
                writeln!(writer, "      {}", line.dimmed())?;
            } else {
                writeln!(writer, "      {}", line)?;
            }
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &UpgradeReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let path = report.bom.display().to_string();

        if report.upgrades.is_empty() {
            if self.verbosity != Verbosity::Quiet {
                writeln!(
                    writer,
                    "{}No upgrades selected for {} ({} projects)",
                    self.dry_run_prefix(),
                    path,
                    report.projects
                )?;
            }
            return Ok(());
        }

        let count = report.upgrades.len();
        let noun = if count == 1 { "upgrade" } else { "upgrades" };
        if self.color {
            writeln!(
                writer,
                "{}{}: {} {}",
                self.dry_run_prefix(),
                path.bold(),
                count.to_string().green(),
                noun
            )?;
        } else {
            writeln!(writer, "{}{}: {} {}", self.dry_run_prefix(), path, count, noun)?;
        }

        if self.verbosity == Verbosity::Quiet {
            return Ok(());
        }

        for upgrade in &report.upgrades {
            self.format_upgrade(upgrade, writer)?;
        }

        if report.committed {
            writeln!(writer)?;
            writeln!(writer, "Committed {} {}", count, noun)?;
        }
        Ok(())
    }

    fn format_upgrade(&self, upgrade: &Upgrade, writer: &mut dyn Write) -> std::io::Result<()> {
        let width = upgrade.project().name().as_str().len().max(NAME_WIDTH);
        self.write_line(upgrade, width, writer)?;
        if self.verbosity == Verbosity::Verbose {
            self.write_details(upgrade, writer)?;
        }
        Ok(())
    }
}
