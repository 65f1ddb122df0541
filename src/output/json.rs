//! JSON output formatter for machine processing

use crate::orchestrator::UpgradeReport;
use crate::output::OutputFormatter;
use crate::upgrade::Upgrade;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of the full report
#[derive(Serialize)]
struct JsonOutput<'a> {
    bom: String,
    dry_run: bool,
    committed: bool,
    /// Number of projects found in the BOM
    projects: usize,
    upgrades: Vec<JsonUpgrade<'a>>,
}

/// JSON representation of one upgrade
#[derive(Serialize)]
struct JsonUpgrade<'a> {
    project: &'a str,
    property: &'a str,
    from: &'a str,
    to: &'a str,
    /// `groupId:artifactId` of every module moved by the upgrade
    modules: Vec<String>,
}

impl<'a> From<&'a Upgrade> for JsonUpgrade<'a> {
    fn from(upgrade: &'a Upgrade) -> Self {
        let project = upgrade.project();
        Self {
            project: project.name().as_str(),
            property: &project.version().property,
            from: project.version().version.as_str(),
            to: upgrade.version().as_str(),
            modules: project.modules().iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &UpgradeReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            bom: report.bom.display().to_string(),
            dry_run: report.dry_run,
            committed: report.committed,
            projects: report.projects,
            upgrades: report.upgrades.iter().map(JsonUpgrade::from).collect(),
        };
        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }

    fn format_upgrade(&self, upgrade: &Upgrade, writer: &mut dyn Write) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, &JsonUpgrade::from(upgrade))?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::report;

    fn render(report: &UpgradeReport) -> serde_json::Value {
        let mut output = Vec::new();
        JsonFormatter::new().format(report, &mut output).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn test_format_json() {
        let parsed = render(&report(false));

        assert_eq!(parsed["bom"], "bom/pom.xml");
        assert_eq!(parsed["dry_run"], false);
        assert_eq!(parsed["committed"], false);
        assert_eq!(parsed["projects"], 3);

        let first = &parsed["upgrades"][0];
        assert_eq!(first["project"], "Spring Framework");
        assert_eq!(first["property"], "spring-framework.version");
        assert_eq!(first["from"], "5.1.4.RELEASE");
        assert_eq!(first["to"], "5.1.5.RELEASE");
        assert_eq!(
            first["modules"],
            serde_json::json!([
                "org.springframework:spring-core",
                "org.springframework:spring-aop"
            ])
        );
        assert_eq!(parsed["upgrades"][1]["project"], "Netty");
    }

    #[test]
    fn test_format_json_dry_run() {
        let parsed = render(&report(true));
        assert_eq!(parsed["dry_run"], true);
    }

    #[test]
    fn test_format_json_without_upgrades() {
        let mut report = report(false);
        report.upgrades.clear();
        let parsed = render(&report);
        assert_eq!(parsed["upgrades"], serde_json::json!([]));
    }

    #[test]
    fn test_format_upgrade() {
        let report = report(false);
        let mut output = Vec::new();
        JsonFormatter::new()
            .format_upgrade(&report.upgrades[1], &mut output)
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed["to"], "4.1.43.Final");
        assert_eq!(parsed["modules"], serde_json::json!(["io.netty:netty-codec"]));
    }
}
