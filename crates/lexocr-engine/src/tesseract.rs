//! Tesseract worker backend.
//!
//! Each recognition runs the `tesseract` binary as an isolated child
//! process with TSV output, which carries both the recognized words and
//! per-word confidence scores.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, trace};

use crate::{EngineError, EngineProvider, Recognition, RecognitionEngine, Result};

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Provider that starts Tesseract workers.
#[derive(Debug, Clone)]
pub struct TesseractProvider {
    binary: PathBuf,
    page_segmentation_mode: Option<u8>,
    timeout: Duration,
}

impl TesseractProvider {
    /// Create a provider using `tesseract` from `PATH`.
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("tesseract"),
            page_segmentation_mode: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Use a specific Tesseract binary.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Set the page segmentation mode (`--psm`).
    pub fn with_page_segmentation_mode(mut self, psm: Option<u8>) -> Self {
        self.page_segmentation_mode = psm;
        self
    }

    /// Set the per-recognition worker timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for TesseractProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EngineProvider for TesseractProvider {
    type Engine = TesseractEngine;

    async fn start(&self, lang: &str) -> Result<TesseractEngine> {
        // Probing the binary up front surfaces a missing install (or a
        // missing language pack) as a startup error rather than a
        // confusing recognition failure later.
        let probe = Command::new(&self.binary)
            .arg("--version")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                EngineError::Startup(format!(
                    "cannot run {}: {}",
                    self.binary.display(),
                    e
                ))
            })?;

        if !probe.status.success() {
            return Err(EngineError::Startup(
                String::from_utf8_lossy(&probe.stderr).trim().to_string(),
            ));
        }

        let scratch = TempDir::new().map_err(EngineError::Io)?;
        debug!(
            "started tesseract worker (lang={}, scratch={})",
            lang,
            scratch.path().display()
        );

        Ok(TesseractEngine {
            binary: self.binary.clone(),
            lang: lang.to_string(),
            page_segmentation_mode: self.page_segmentation_mode,
            timeout: self.timeout,
            scratch: Some(scratch),
        })
    }
}

/// One Tesseract worker, scoped to a single recognition call.
pub struct TesseractEngine {
    binary: PathBuf,
    lang: String,
    page_segmentation_mode: Option<u8>,
    timeout: Duration,
    scratch: Option<TempDir>,
}

#[async_trait]
impl RecognitionEngine for TesseractEngine {
    async fn recognize(&mut self, image: &[u8]) -> Result<Recognition> {
        let scratch = self
            .scratch
            .as_ref()
            .ok_or_else(|| EngineError::Worker("engine already terminated".to_string()))?;

        let input = scratch.path().join("capture.img");
        tokio::fs::write(&input, image).await?;

        let mut cmd = Command::new(&self.binary);
        cmd.arg(&input)
            .arg("stdout")
            .arg("-l")
            .arg(&self.lang)
            .arg("tsv")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(psm) = self.page_segmentation_mode {
            cmd.arg("--psm").arg(psm.to_string());
        }

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| {
                EngineError::Worker(format!(
                    "worker timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| EngineError::Worker(format!("failed to run worker: {}", e)))?;

        if !output.status.success() {
            return Err(EngineError::Recognition(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let tsv = String::from_utf8_lossy(&output.stdout);
        let recognition = parse_tsv(&tsv);
        debug!(
            "worker recognized {} chars (confidence {:.1})",
            recognition.text.len(),
            recognition.confidence
        );

        Ok(recognition)
    }

    async fn terminate(&mut self) -> Result<()> {
        if let Some(scratch) = self.scratch.take() {
            scratch.close().map_err(EngineError::Io)?;
            trace!("tesseract worker released");
        }
        Ok(())
    }
}

/// Parse Tesseract TSV output into joined text plus mean word confidence.
///
/// TSV columns: level, page_num, block_num, par_num, line_num, word_num,
/// left, top, width, height, conf, text. Word rows have level 5; rows with
/// a negative confidence are structural and carry no text.
fn parse_tsv(tsv: &str) -> Recognition {
    let mut lines_out: Vec<String> = Vec::new();
    let mut current_key: Option<(u32, u32, u32)> = None;
    let mut current_line: Vec<&str> = Vec::new();
    let mut conf_sum = 0.0f32;
    let mut conf_count = 0u32;

    for row in tsv.lines().skip(1) {
        let cols: Vec<&str> = row.split('\t').collect();
        if cols.len() < 12 || cols[0] != "5" {
            continue;
        }

        let conf: f32 = cols[10].parse().unwrap_or(-1.0);
        let word = cols[11].trim();
        if conf < 0.0 || word.is_empty() {
            continue;
        }

        let key = (
            cols[2].parse().unwrap_or(0),
            cols[3].parse().unwrap_or(0),
            cols[4].parse().unwrap_or(0),
        );

        if current_key != Some(key) {
            if !current_line.is_empty() {
                lines_out.push(current_line.join(" "));
                current_line.clear();
            }
            current_key = Some(key);
        }

        current_line.push(word);
        conf_sum += conf;
        conf_count += 1;
    }

    if !current_line.is_empty() {
        lines_out.push(current_line.join(" "));
    }

    let confidence = if conf_count > 0 {
        conf_sum / conf_count as f32
    } else {
        0.0
    };

    Recognition {
        text: lines_out.join("\n"),
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str =
        "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    fn word_row(block: u32, par: u32, line: u32, word: u32, conf: &str, text: &str) -> String {
        format!("5\t1\t{block}\t{par}\t{line}\t{word}\t0\t0\t10\t10\t{conf}\t{text}")
    }

    #[test]
    fn parse_tsv_joins_words_and_lines() {
        let tsv = [
            HEADER.to_string(),
            "1\t1\t0\t0\t0\t0\t0\t0\t100\t100\t-1\t".to_string(),
            word_row(1, 1, 1, 1, "96.0", "Article"),
            word_row(1, 1, 1, 2, "94.0", "1234"),
            word_row(1, 1, 2, 1, "90.0", "du"),
            word_row(1, 1, 2, 2, "88.0", "Code"),
            word_row(1, 1, 2, 3, "92.0", "civil"),
        ]
        .join("\n");

        let recognition = parse_tsv(&tsv);

        assert_eq!(recognition.text, "Article 1234\ndu Code civil");
        assert_eq!(recognition.confidence, 92.0);
    }

    #[test]
    fn parse_tsv_skips_structural_and_empty_rows() {
        let tsv = [
            HEADER.to_string(),
            "2\t1\t1\t0\t0\t0\t0\t0\t50\t50\t-1\t".to_string(),
            word_row(1, 1, 1, 1, "-1", "ghost"),
            word_row(1, 1, 1, 2, "80.0", "visible"),
            word_row(1, 1, 1, 3, "70.0", "   "),
        ]
        .join("\n");

        let recognition = parse_tsv(&tsv);

        assert_eq!(recognition.text, "visible");
        assert_eq!(recognition.confidence, 80.0);
    }

    #[test]
    fn parse_tsv_handles_empty_page() {
        let recognition = parse_tsv(HEADER);

        assert_eq!(recognition.text, "");
        assert_eq!(recognition.confidence, 0.0);
    }

    #[tokio::test]
    async fn start_fails_for_missing_binary() {
        let provider = TesseractProvider::new().with_binary("/nonexistent/tesseract-bin");

        let result = provider.start("fra").await;

        assert!(matches!(result, Err(EngineError::Startup(_))));
    }

    #[tokio::test]
    async fn recognize_after_terminate_is_an_error() {
        let mut engine = TesseractEngine {
            binary: PathBuf::from("tesseract"),
            lang: "fra".to_string(),
            page_segmentation_mode: None,
            timeout: Duration::from_secs(1),
            scratch: None,
        };

        let result = engine.recognize(b"jpeg").await;

        assert!(matches!(result, Err(EngineError::Worker(_))));
    }
}
