use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "splitter")]
#[command(about = "Split a long PDF file of brass band parts into separate PDF files")]
#[command(version)]
pub struct Cli {
    /// Directory containing the PDF file and the part config (.yaml, .yml or .json)
    pub dir: PathBuf,

    /// Password for an encrypted PDF
    #[arg(short, long)]
    pub password: Option<String>,
}
