//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum, ValueHint};

use crate::domain::LayoutKind;

/// Render a work-breakdown-structure outline (JSON) as a mind-map PDF
#[derive(Parser, Debug)]
#[command(name = "generate_diagram")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Outline JSON file [default: data/outline.json]
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Destination PDF [default: output/secure-clinical-communication.pdf]
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Render resolution, positive integer [default: 150]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub dpi: Option<u32>,

    /// Layout policy [default: radial]
    #[arg(long, value_enum)]
    pub layout: Option<LayoutArg>,

    /// Config file (instead of ./.wbs-mindmap.toml)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print the outline hierarchy before rendering
    #[arg(long)]
    pub show_tree: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,

    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutArg {
    /// Root in the center, branches fanned out around it
    Radial,
    /// Left-to-right tree
    Tree,
}

impl From<LayoutArg> for LayoutKind {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Radial => LayoutKind::Radial,
            LayoutArg::Tree => LayoutKind::Tree,
        }
    }
}
