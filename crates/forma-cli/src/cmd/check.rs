use anyhow::{anyhow, Result};
use serde::Serialize;
use termcolor::Color;

use forma_core::check::{check_schema, CheckFinding, CheckLevel};

use crate::io::input;
use crate::output;

#[derive(Debug, Serialize)]
pub struct CheckOut {
    pub ok: bool,
    pub errors: usize,
    pub warnings: usize,
    pub findings: Vec<CheckFinding>,
}

pub fn run(schema_path: &str) -> Result<()> {
    let schema = input::read_schema(schema_path)?;
    let report = check_schema(&schema);

    let out = CheckOut {
        ok: report.ok,
        errors: report
            .findings
            .iter()
            .filter(|f| f.level == CheckLevel::Error)
            .count(),
        warnings: report.warnings(),
        findings: report.findings.clone(),
    };
    output::print(&out)?;

    if !output::is_json() {
        for finding in &report.findings {
            let (tag, color) = match finding.level {
                CheckLevel::Info => ("info", Color::Cyan),
                CheckLevel::Warning => ("warning", Color::Yellow),
                CheckLevel::Error => ("error", Color::Red),
            };
            output::tagged_line(tag, color, &format!("{} {}", finding.code, finding.message))?;
        }
    }

    if report.has_errors() {
        return Err(anyhow!("schema has errors"));
    }
    Ok(())
}
