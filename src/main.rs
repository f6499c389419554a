//! TikTok Downloader - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, EnvFilter};

use tiktok_downloader::{
    api::{ensure_signing_scripts, signer_from_config, TikTokApi},
    cli::Args,
    config::{parse_post_url, validate_config, Config, SignerKind},
    download::{download_post, GlobalState},
    error::{exit_codes, Error, Result},
    output::{
        create_spinner, print_banner, print_config_summary, print_error, print_global_stats,
        print_info, print_post_stats, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            ExitCode::from(exit_code_for(&e) as u8)
        }
    }
}

fn exit_code_for(error: &Error) -> i32 {
    match error {
        Error::Config(_)
        | Error::ConfigValidation { .. }
        | Error::TomlParse(_)
        | Error::InvalidFilename(_) => exit_codes::CONFIG_ERROR,
        Error::PageFetch(_) | Error::JsonNotFound | Error::Http(_) => exit_codes::FETCH_ERROR,
        Error::SigningUnavailable(_) => exit_codes::SIGNING_ERROR,
        Error::MediaNotFound(_) | Error::InvalidLink(_) | Error::AssetWrite { .. } => {
            exit_codes::DOWNLOAD_ERROR
        }
        Error::Cancelled => exit_codes::ABORT,
        _ => exit_codes::UNEXPECTED_ERROR,
    }
}

async fn run() -> Result<i32> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        tracing::debug!("No configuration file at {}", config_path.display());
        Config::default()
    };

    // Merge CLI arguments into config
    let urls = args.merge_into_config(&mut config);

    validate_config(&config)?;

    print_config_summary(
        urls.len(),
        &config.options.download_mode.to_string(),
        &config.signer.kind.to_string(),
        &config.output_directory().display().to_string(),
    );

    let api = TikTokApi::new(&config, signer_from_config(&config))?;

    if config.signer.kind == SignerKind::Script && config.signer.auto_update {
        let spinner = create_spinner("Checking signing scripts...");
        let report = ensure_signing_scripts(
            api.http(),
            &config.scripts_directory(),
            &config.signer.script_base_url,
        )
        .await;
        spinner.finish_and_clear();

        for (name, status) in &report.scripts {
            tracing::info!("{}: {}", name, status);
        }
        if !report.is_usable() {
            print_warning("Some signing scripts could not be fetched; signing may fail");
        }
    }

    // Cancel in-flight work on Ctrl-C
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                print_warning("Interrupted, stopping after the current request...");
                cancel.cancel();
            }
        });
    }

    let mut global_state = GlobalState::default();
    let mut last_error = None;

    for input in &urls {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let url = match parse_post_url(input) {
            Ok(url) => url,
            Err(e) => {
                print_error(&format!("Skipping {}: {}", input, e));
                global_state.mark_post_failed();
                last_error = Some(e);
                continue;
            }
        };

        print_info(&format!("Processing post: {}", url));

        match download_post(&api, &config, &url, &cancel).await {
            Ok(state) => {
                print_post_stats(&state);
                global_state.add_post_stats(&state);
            }
            Err(Error::Cancelled) => return Err(Error::Cancelled),
            Err(e) => {
                print_error(&format!("Failed to process {}: {}", url, e));
                global_state.mark_post_failed();
                last_error = Some(e);
            }
        }
    }

    print_global_stats(&global_state);

    if global_state.posts_failed == 0 {
        return Ok(exit_codes::SUCCESS);
    }

    // A lone failing post reports its own cause
    match last_error {
        Some(e) if urls.len() == 1 => Ok(exit_code_for(&e)),
        _ => Ok(exit_codes::SOME_POSTS_FAILED),
    }
}
