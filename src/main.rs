//! orgsync binary entry point.

use std::process::ExitCode;

use orgsync::ui::output;

#[tokio::main]
async fn main() -> ExitCode {
    match orgsync::cli::run().await {
        Ok(code) => code,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
