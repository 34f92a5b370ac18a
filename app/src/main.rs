mod cli;
mod config;
mod service_provider;
mod telemetry;

use bytes::Bytes;
use clap::Parser;
use colored::Colorize;
use domain_upload::model::{
    entity::ItemRef,
    vo::{ItemContent, UploadRequest},
};

use crate::cli::{Cli, Command, UploadArgs};
use crate::service_provider::ServiceProvider;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = match config::build_config(&cli.configs) {
        Ok(x) => x,
        Err(e) => {
            eprintln!("{}: {}", "Cannot build config".red(), e);
            std::process::exit(2);
        }
    };
    if let Err(e) = telemetry::initialize_telemetry(&config.telemetry) {
        eprintln!("{}: {}", "Cannot build logger".red(), e);
        std::process::exit(2);
    }
    let service_provider = match ServiceProvider::build(&config) {
        Ok(x) => x,
        Err(e) => {
            eprintln!("{}: {}", "Cannot build Service Provider".red(), e);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(cli.command, &service_provider).await {
        tracing::error!("{e:#}");
        eprintln!("{}: {:#}", "Failed".red(), e);
        std::process::exit(1);
    }
}

async fn run(command: Command, sp: &ServiceProvider) -> anyhow::Result<()> {
    match command {
        Command::Upload(args) => {
            let request = upload_request(args).await?;
            let item = sp.upload_service.upload(request).await?;
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        Command::Status { owner, id } => {
            let status = sp.content_service.item_status(&ItemRef::new(id, owner)).await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }
    Ok(())
}

async fn upload_request(args: UploadArgs) -> anyhow::Result<UploadRequest> {
    let metadata = args.metadata();
    let content = match (args.file, args.url, args.text) {
        (Some(path), _, _) => {
            let payload = tokio::fs::read(&path)
                .await
                .map_err(|e| anyhow::anyhow!("cannot read {}: {e}", path.display()))?;
            tracing::debug!(path = %path.display(), size = payload.len(), "Payload loaded.");
            ItemContent::Payload(Bytes::from(payload))
        }
        (None, Some(url), _) => ItemContent::Url(url),
        (None, None, Some(text)) => ItemContent::Text(text),
        (None, None, None) => anyhow::bail!("one of --file, --url or --text is required"),
    };
    Ok(UploadRequest {
        owner: args.owner,
        metadata,
        content,
        access: args.access.into(),
    })
}
