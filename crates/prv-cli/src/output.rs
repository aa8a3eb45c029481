//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use prv_domain::{Availability, ProvenanceRecord};
use prv_store::StoreSnapshot;
use prv_verifier::VerificationMetrics;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Get the output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format extracted records.
    pub fn format_records(&self, records: &[ProvenanceRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_records_json(records),
            OutputFormat::Table => Ok(self.format_records_table(records)),
        }
    }

    /// Format verification results, one row per record.
    ///
    /// `servers` fixes the column order. JSON output is the store snapshot
    /// keyed by fingerprint.
    pub fn format_results(
        &self,
        records: &[ProvenanceRecord],
        servers: &[String],
        snapshot: &StoreSnapshot,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(snapshot.to_json_pretty()?),
            OutputFormat::Table => Ok(self.format_results_table(records, servers, snapshot)),
        }
    }

    /// Plain representation of every record, as a JSON array.
    pub fn format_records_json(&self, records: &[ProvenanceRecord]) -> Result<String> {
        let plain = records
            .iter()
            .map(ProvenanceRecord::to_plain)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(serde_json::to_string_pretty(&plain)?)
    }

    fn format_records_table(&self, records: &[ProvenanceRecord]) -> String {
        if records.is_empty() {
            return self.colorize("No provenance records found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Label", "File", "Size", "Fingerprint", "Steps"]);

        for record in records {
            builder.push_record([
                record.label.clone(),
                record.file_name(),
                record.size.to_string(),
                record.fingerprint().to_string(),
                record.lineage.len().to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    fn format_results_table(&self, records: &[ProvenanceRecord], servers: &[String], snapshot: &StoreSnapshot) -> String {
        if records.is_empty() {
            return self.colorize("No provenance records found.", "yellow");
        }

        let mut header = vec!["Label".to_string(), "File".to_string(), "Size".to_string(), "Local".to_string()];
        header.extend(servers.iter().cloned());

        let mut builder = Builder::default();
        builder.push_record(header);

        for record in records {
            // Records the run never reached show as unknown
            let result = snapshot.get(&record.fingerprint());
            let local = result.map(|r| r.local_status).unwrap_or_default();

            let mut row = vec![
                record.label.clone(),
                record.file_name(),
                record.size.to_string(),
                self.marker(local),
            ];
            for server in servers {
                let status = result.map(|r| r.server_availability(server)).unwrap_or_default();
                row.push(self.marker(status));
            }
            builder.push_record(row);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Availability marker, colored when enabled.
    pub fn marker(&self, status: Availability) -> String {
        match status {
            Availability::Present => self.colorize(status.marker(), "green"),
            Availability::Absent => self.colorize(status.marker(), "red"),
            Availability::Unknown => status.marker().to_string(),
        }
    }

    /// Format run metrics.
    pub fn summary(&self, metrics: &VerificationMetrics) -> String {
        self.colorize(&metrics.summary(), "cyan")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
