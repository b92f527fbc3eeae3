//! `pressroom render` command implementation.

use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use pressroom_markdown::{detect_mode, render};
use tracing::info;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (default: read stdin; `-` also reads stdin).
    file: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or output cannot be written.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let source = match self.file.as_deref() {
            Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)?,
            _ => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };

        info!("Rendering {} bytes in {:?} mode", source.len(), detect_mode(&source));
        output.result(&render(&source))?;
        Ok(())
    }
}
