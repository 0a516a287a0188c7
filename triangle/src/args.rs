use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
pub struct Args {
    /// Path to a JSON5 run configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Vertex shader source file, replacing the built-in one
    #[arg(long)]
    pub vert: Option<PathBuf>,
    /// Fragment shader source file, replacing the built-in one
    #[arg(long)]
    pub frag: Option<PathBuf>,
}
