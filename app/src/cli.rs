use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use domain_upload::model::vo::{Access, Extent, ItemMetadata};

#[derive(Parser, Debug)]
#[command(author, version, about = "Publish items to a content service")]
pub struct Cli {
    /// Extra yaml configuration files, applied in order.
    #[arg(long = "config", global = true)]
    pub configs: Vec<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an item and upload its content
    Upload(UploadArgs),
    /// Print the processing status of an item
    Status { owner: String, id: String },
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    #[arg(long)]
    pub owner: String,
    #[arg(long)]
    pub title: String,
    #[arg(long = "type")]
    pub item_type: String,
    /// File uploaded in parts
    #[arg(long, conflicts_with_all = ["url", "text"], required_unless_present_any = ["url", "text"])]
    pub file: Option<PathBuf>,
    /// Remote content fetched by the service
    #[arg(long, conflicts_with = "text")]
    pub url: Option<String>,
    /// Inline item body
    #[arg(long)]
    pub text: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub snippet: Option<String>,
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// `xmin,ymin,xmax,ymax`
    #[arg(long)]
    pub extent: Option<String>,
    #[arg(long, value_enum, default_value_t = AccessArg::Private)]
    pub access: AccessArg,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum AccessArg {
    Private,
    Org,
    Public,
}

impl From<AccessArg> for Access {
    fn from(value: AccessArg) -> Self {
        match value {
            AccessArg::Private => Access::Private,
            AccessArg::Org => Access::Org,
            AccessArg::Public => Access::Public,
        }
    }
}

impl UploadArgs {
    pub fn metadata(&self) -> ItemMetadata {
        ItemMetadata {
            title: self.title.to_owned(),
            item_type: self.item_type.to_owned(),
            description: self.description.to_owned(),
            snippet: self.snippet.to_owned(),
            tags: self.tags.to_owned(),
            extent: self.extent.as_ref().map(|e| Extent::Text(e.to_owned())),
            ..Default::default()
        }
    }
}
