//! `pressroom meta` command implementation.

use clap::Args;

use crate::context::AppContext;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the meta command.
#[derive(Args)]
pub(crate) struct MetaArgs {
    /// Page URL to extract link preview metadata from.
    url: String,
}

impl MetaArgs {
    /// Execute the meta command.
    ///
    /// # Errors
    ///
    /// Returns an error if the result cannot be written.
    pub(crate) fn execute(self, ctx: &AppContext, output: &Output) -> Result<(), CliError> {
        let metadata = ctx.metadata.fetch(&self.url);
        if metadata.is_empty() {
            output.warning(&format!("No metadata found for {}", self.url));
        }
        output.result(&serde_json::to_string_pretty(&metadata)?)?;
        Ok(())
    }
}
