use clap::Parser;
use openapi_partials_merge::{run, MergeConfig, MergeError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Merge per-directory OpenAPI partials into one validated document")]
struct Cli {
    /// Primary OpenAPI document providing `openapi`, `info` and `security`
    #[arg(long, env = "OPENAPI_MERGE_MAIN")]
    main: PathBuf,

    /// Directory whose subdirectories hold the partial `*.yaml` files
    #[arg(long, env = "OPENAPI_MERGE_APIDIR")]
    apidir: PathBuf,

    /// Output directory; the merged document is written to `openapi.yaml` inside it
    #[arg(long, env = "OPENAPI_MERGE_OUTDIR")]
    outdir: PathBuf,
}

impl From<Cli> for MergeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            main: cli.main,
            api_dir: cli.apidir,
            out_dir: cli.outdir,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "openapi_partials_merge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = MergeConfig::from(Cli::parse());

    match run(&config) {
        Ok(summary) => {
            println!(
                "✓ Wrote {} ({} v{}): {} partial(s), {} path(s)",
                summary.output.display(),
                summary.title,
                summary.version,
                summary.partials,
                summary.paths
            );
            ExitCode::SUCCESS
        }
        Err(MergeError::Load(errors)) => {
            for error in &errors {
                eprintln!("✗ {}", error);
            }
            println!("Exiting due to load error");
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("✗ {} failed: {}", e.stage(), e);
            if let MergeError::Validation { problems, .. } = &e {
                for problem in problems {
                    eprintln!("  {}", problem);
                }
            }
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_flags_map_onto_config() {
        let cli = Cli::try_parse_from([
            "openapi-merge",
            "--main",
            "api/main.yaml",
            "--apidir",
            "api",
            "--outdir",
            "build",
        ])
        .unwrap();

        let config = MergeConfig::from(cli);

        assert_eq!(config.main, PathBuf::from("api/main.yaml"));
        assert_eq!(config.api_dir, PathBuf::from("api"));
        assert_eq!(config.out_dir, PathBuf::from("build"));
    }
}
