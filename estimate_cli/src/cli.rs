use std::path::PathBuf;

use clap::{Parser, Subcommand};

use estimate_core::layout::LayoutPreset;

#[derive(Parser, Debug)]
#[command(name = "estimate_cli", version, about = "Design effort estimation from the terminal")]
pub struct Cli {
    #[arg(long, global = true, help = "Print the projected report as JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Report layout: full or summary (defaults to the configured layout)"
    )]
    pub layout: Option<LayoutPreset>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Describe a project, submit it and print the estimation
    Submit {
        #[arg(long, help = "JSON request file; skips the interactive prompts")]
        request: Option<PathBuf>,
        #[arg(long, help = "Save the raw response to this file")]
        save: Option<PathBuf>,
    },
    /// Render a previously saved response
    Render {
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submit_with_flags() {
        let cli = Cli::try_parse_from([
            "estimate_cli",
            "submit",
            "--request",
            "atlas.json",
            "--save",
            "out.json",
            "--layout",
            "summary",
        ])
        .unwrap();
        assert_eq!(cli.layout, Some(LayoutPreset::Summary));
        match cli.command {
            Commands::Submit { request, save } => {
                assert_eq!(request, Some(PathBuf::from("atlas.json")));
                assert_eq!(save, Some(PathBuf::from("out.json")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from(["estimate_cli", "render", "saved.json", "--json"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.layout, None);
        match cli.command {
            Commands::Render { file } => assert_eq!(file, PathBuf::from("saved.json")),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_layout() {
        let args = ["estimate_cli", "render", "x.json", "--layout", "poster"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
