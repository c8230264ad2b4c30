use crate::sox::error::{SoxError, SoxResult};
use log::debug;
use std::path::Path;
use tokio::process::Command;

pub mod error;

const FORMATS_PREFIX: &str = "AUDIO FILE FORMATS: ";

/// What we know about the splitter executable.
#[derive(Debug, Clone, PartialEq)]
pub struct SoxProperties {
    pub exe_name: String,
    pub compression_level: Option<f64>,
    /// Formats in the order the executable reports them.
    pub supported_formats: Vec<String>,
}

impl SoxProperties {
    /// Runs `<exe> -h` and collects the formats it can read and write.
    pub async fn probe(exe_name: &str, compression_level: Option<f64>) -> SoxResult<Self> {
        debug!("Probing {exe_name} for supported formats");

        let output = Command::new(exe_name)
            .arg("-h")
            .output()
            .await
            .map_err(|source| SoxError::NotInvokable {
                exe: exe_name.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(SoxError::ExitStatus {
                exe: exe_name.to_string(),
                status: output.status,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let supported_formats = parse_supported_formats(&stdout)
            .ok_or_else(|| SoxError::NoFormatList(exe_name.to_string()))?;

        debug!("{exe_name} supports: {}", supported_formats.join(" "));

        Ok(Self {
            exe_name: exe_name.to_string(),
            compression_level,
            supported_formats,
        })
    }

    pub fn supports(&self, format: &str) -> bool {
        self.supported_formats.iter().any(|f| f == format)
    }

    pub fn ensure_format_supported(&self, format: &str) -> SoxResult<()> {
        if self.supports(format) {
            Ok(())
        } else {
            Err(SoxError::UnsupportedFormat {
                format: format.to_string(),
                exe: self.exe_name.clone(),
            })
        }
    }

    /// Builds the command line that cuts one track out of `source`.
    ///
    /// An `end` of `0` trims to the end of the source. A compression level of
    /// `0` is treated as unset and leaves `-C` out.
    pub fn render_command(&self, source: &Path, destination: &Path, start: f64, end: f64) -> String {
        let mut parts = vec![format!("{} -V1", self.exe_name)];

        parts.push(format!("\"{}\"", source.display()));

        if let Some(level) = self.compression_level.filter(|level| *level != 0.0) {
            parts.push(format!("-C {}", format_decimal(level)));
        }

        // Comments are written by the tagger afterwards
        parts.push("--comment=\"\"".to_string());

        let trim_end = if end != 0.0 {
            format!(" ={}t", format_decimal(end))
        } else {
            String::new()
        };
        parts.push(format!(
            "\"{}\" trim {}t{trim_end}",
            destination.display(),
            format_decimal(start)
        ));

        parts.join(" ")
    }
}

pub fn parse_supported_formats(help_output: &str) -> Option<Vec<String>> {
    help_output
        .lines()
        .find_map(|line| line.strip_prefix(FORMATS_PREFIX))
        .map(|formats| formats.split_whitespace().map(str::to_string).collect())
}

/// Shortest round-trip decimal, always with a fractional part (`0.0`, `807.32`).
pub fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
