mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use vf_av::{
    derive_file_name_or, FallbackAdvisory, OutcomeResponse, ToolRegistry, TranscodeOrchestrator,
};
use vf_core::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "vidfetch=trace,vf_av=trace,vf_core=debug".to_string()
        } else {
            "vidfetch=info,vf_av=info,vf_core=info".to_string()
        }
    });

    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Fetch { url, name, output } => {
            let config = Config::load_or_default(cli.config.as_deref());
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(fetch(&config, &url, name.as_deref(), &output))
        }
        Commands::Advise { url, name } => {
            let config = Config::load_or_default(cli.config.as_deref());
            advise(&config, &url, name.as_deref())
        }
        Commands::CheckTools => {
            let config = Config::load_or_default(cli.config.as_deref());
            check_tools(&config)
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
    }
}

async fn fetch(config: &Config, url: &str, name: Option<&str>, output_dir: &Path) -> Result<()> {
    let orchestrator = TranscodeOrchestrator::from_config(config);
    tracing::debug!("{:?}", orchestrator);

    let outcome = orchestrator.run_url(url, name).await?;
    let failed = outcome.is_failed();

    match OutcomeResponse::from(outcome) {
        OutcomeResponse::Binary {
            content_disposition,
            content_length,
            body,
            ..
        } => {
            let file_name = derive_file_name_or(name, &config.transcode.default_file_name);
            std::fs::create_dir_all(output_dir)
                .with_context(|| format!("failed to create {}", output_dir.display()))?;
            let dest = output_dir.join(&file_name);
            std::fs::write(&dest, &body)
                .with_context(|| format!("failed to write {}", dest.display()))?;

            tracing::debug!("Content-Disposition: {content_disposition}");
            println!("Saved {} ({} bytes)", dest.display(), content_length);
        }
        OutcomeResponse::Json { body, .. } => {
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    if failed {
        anyhow::bail!("conversion failed; see advisory above for alternatives");
    }

    Ok(())
}

fn advise(config: &Config, url: &str, name: Option<&str>) -> Result<()> {
    if url.trim().is_empty() {
        anyhow::bail!("source url is required");
    }

    let file_name = derive_file_name_or(name, &config.transcode.default_file_name);
    let advisory = FallbackAdvisory::build(url, &file_name);
    println!("{}", serde_json::to_string_pretty(&advisory)?);

    Ok(())
}

fn check_tools(config: &Config) -> Result<()> {
    println!("Checking external tools...\n");

    let registry = ToolRegistry::discover(&config.tools);
    let tools = registry.check_all();
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All tools are available!");
    } else {
        println!("Some tools are missing. HLS downloads need ffmpeg.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = Config::load(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("  Timeout: {}s", config.transcode.timeout_secs);
    println!(
        "  Scratch dir: {}",
        config.transcode.resolved_scratch_dir().display()
    );
    println!("  Default name: {}", config.transcode.default_file_name);

    let warnings = config.validate();
    for warning in &warnings {
        println!("  warning: {warning}");
    }

    Ok(())
}
