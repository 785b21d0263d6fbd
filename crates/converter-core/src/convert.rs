//! Conversion dispatch.
//!
//! The actual format work is delegated to external tools (LibreOffice,
//! ImageMagick, ffmpeg). The dispatcher validates the input, runs the
//! converter and records the output in the activity log only after the
//! output file exists.

use crate::activity::ActivityLog;
use crate::config::ToolSettings;
use crate::error::StoreError;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Input file not found: {0}")]
    MissingInput(PathBuf),

    #[error("{kind} does not accept {path}")]
    UnsupportedInput { kind: &'static str, path: PathBuf },

    #[error("Conversion tool not found: {0}")]
    ToolNotFound(String),

    #[error("{tool} failed ({status}): {stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("Conversion produced no output at {0}")]
    MissingOutput(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionKind {
    DocxToPdf,
    PdfToDocx,
    JpgToPng,
    PngToJpg,
    VideoToMp3,
}

impl ConversionKind {
    pub const ALL: [ConversionKind; 5] = [
        ConversionKind::DocxToPdf,
        ConversionKind::PdfToDocx,
        ConversionKind::JpgToPng,
        ConversionKind::PngToJpg,
        ConversionKind::VideoToMp3,
    ];

    /// Label written to the activity log
    pub fn label(self) -> &'static str {
        match self {
            ConversionKind::DocxToPdf => "DOCX→PDF",
            ConversionKind::PdfToDocx => "PDF→DOCX",
            ConversionKind::JpgToPng => "JPG→PNG",
            ConversionKind::PngToJpg => "PNG→JPG",
            ConversionKind::VideoToMp3 => "Video→MP3",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            ConversionKind::DocxToPdf => "docx-to-pdf",
            ConversionKind::PdfToDocx => "pdf-to-docx",
            ConversionKind::JpgToPng => "jpg-to-png",
            ConversionKind::PngToJpg => "png-to-jpg",
            ConversionKind::VideoToMp3 => "video-to-mp3",
        }
    }

    pub fn input_extensions(self) -> &'static [&'static str] {
        match self {
            ConversionKind::DocxToPdf => &["docx"],
            ConversionKind::PdfToDocx => &["pdf"],
            ConversionKind::JpgToPng => &["jpg", "jpeg"],
            ConversionKind::PngToJpg => &["png"],
            ConversionKind::VideoToMp3 => &["mp4", "avi", "mov"],
        }
    }

    pub fn output_extension(self) -> &'static str {
        match self {
            ConversionKind::DocxToPdf => "pdf",
            ConversionKind::PdfToDocx => "docx",
            ConversionKind::JpgToPng => "png",
            ConversionKind::PngToJpg => "jpg",
            ConversionKind::VideoToMp3 => "mp3",
        }
    }

    pub fn accepts(self, input: &Path) -> bool {
        input
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.input_extensions()
                    .iter()
                    .any(|allowed| ext.eq_ignore_ascii_case(allowed))
            })
            .unwrap_or(false)
    }

    /// Output lands next to the input with the extension swapped.
    pub fn output_path(self, input: &Path) -> PathBuf {
        input.with_extension(self.output_extension())
    }
}

impl FromStr for ConversionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for kind in ConversionKind::ALL {
            if kind.slug().eq_ignore_ascii_case(s) || kind.label() == s {
                return Ok(kind);
            }
        }
        let known: Vec<_> = ConversionKind::ALL.iter().map(|k| k.slug()).collect();
        Err(format!(
            "unknown conversion '{s}' (expected one of: {})",
            known.join(", ")
        ))
    }
}

pub trait Converter {
    fn convert(
        &self,
        kind: ConversionKind,
        input: &Path,
        output: &Path,
    ) -> Result<(), ConvertError>;
}

/// Shells out to the configured command-line tools.
#[derive(Debug, Clone)]
pub struct ExternalToolConverter {
    tools: ToolSettings,
}

impl ExternalToolConverter {
    pub fn new(tools: ToolSettings) -> Self {
        Self { tools }
    }

    fn office_args(
        filter: Option<&str>,
        target: &str,
        input: &Path,
        output: &Path,
    ) -> Vec<OsString> {
        let outdir = output
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let mut args = vec![OsString::from("--headless")];
        if let Some(filter) = filter {
            args.push(OsString::from(format!("--infilter={filter}")));
        }
        args.push(OsString::from("--convert-to"));
        args.push(OsString::from(target));
        args.push(OsString::from("--outdir"));
        args.push(outdir.into_os_string());
        args.push(input.as_os_str().to_owned());
        args
    }
}

impl Converter for ExternalToolConverter {
    fn convert(
        &self,
        kind: ConversionKind,
        input: &Path,
        output: &Path,
    ) -> Result<(), ConvertError> {
        let (tool, args): (&str, Vec<OsString>) = match kind {
            ConversionKind::DocxToPdf => (
                self.tools.office.as_str(),
                Self::office_args(None, "pdf", input, output),
            ),
            ConversionKind::PdfToDocx => (
                self.tools.office.as_str(),
                Self::office_args(
                    Some("writer_pdf_import"),
                    "docx:MS Word 2007 XML",
                    input,
                    output,
                ),
            ),
            ConversionKind::JpgToPng => (
                self.tools.imagemagick.as_str(),
                vec![input.into(), output.into()],
            ),
            // JPEG has no alpha channel; flatten onto white first.
            ConversionKind::PngToJpg => (
                self.tools.imagemagick.as_str(),
                vec![
                    input.into(),
                    "-background".into(),
                    "white".into(),
                    "-flatten".into(),
                    output.into(),
                ],
            ),
            ConversionKind::VideoToMp3 => (
                self.tools.ffmpeg.as_str(),
                vec![
                    "-y".into(),
                    "-loglevel".into(),
                    "error".into(),
                    "-i".into(),
                    input.into(),
                    "-vn".into(),
                    output.into(),
                ],
            ),
        };
        run_tool(tool, &args)
    }
}

fn run_tool(tool: &str, args: &[OsString]) -> Result<(), ConvertError> {
    debug!(tool, ?args, "running conversion tool");
    let output = match Command::new(tool).args(args).output() {
        Ok(output) => output,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ConvertError::ToolNotFound(tool.to_string()))
        }
        Err(e) => return Err(e.into()),
    };
    if !output.status.success() {
        return Err(ConvertError::ToolFailed {
            tool: tool.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}

pub struct Dispatcher<C> {
    converter: C,
    log: ActivityLog,
}

impl<C: Converter> Dispatcher<C> {
    pub fn new(converter: C, log: ActivityLog) -> Self {
        Self { converter, log }
    }

    /// Convert `input` and log the result. Nothing is logged on failure.
    pub fn run(&self, kind: ConversionKind, input: &Path) -> Result<PathBuf, ConvertError> {
        if !input.is_file() {
            return Err(ConvertError::MissingInput(input.to_path_buf()));
        }
        if !kind.accepts(input) {
            return Err(ConvertError::UnsupportedInput {
                kind: kind.label(),
                path: input.to_path_buf(),
            });
        }
        let input = input.canonicalize()?;
        let output = kind.output_path(&input);

        if let Err(e) = self.converter.convert(kind, &input, &output) {
            warn!(
                action = kind.label(),
                input = %input.display(),
                error = %e,
                "conversion failed"
            );
            return Err(e);
        }
        if !output.is_file() {
            warn!(
                action = kind.label(),
                output = %output.display(),
                "conversion produced no output"
            );
            return Err(ConvertError::MissingOutput(output));
        }

        self.log.append(&output.to_string_lossy(), kind.label())?;
        info!(
            action = kind.label(),
            output = %output.display(),
            "conversion complete"
        );
        Ok(output)
    }
}
