//! Command-line interface definition.

use clap::Parser;
use std::path::PathBuf;

use crate::dataset::DEFAULT_ROOT;

/// Interactive gesture dataset collection tool
#[derive(Parser, Debug)]
#[command(name = "gesture-collector")]
#[command(about = "Interactive gesture dataset collection tool", long_about = None)]
#[command(after_help = "CONTROLS:
    0-5     Select gesture class (number of fingers)
    SPACE   Capture and save current frame
    P       Toggle preview of the preprocessed image
    Q       Quit

Each capture is stored as <DATASET_DIR>/<class>/sample_NNN.raw (headerless
8-bit grayscale) and sample_NNN.png.")]
pub struct Args {
    /// Dataset root directory
    #[arg(value_name = "DATASET_DIR", default_value = DEFAULT_ROOT)]
    pub dataset_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_default_dataset_dir() {
        let args = Args::parse_from(["gesture-collector"]);
        assert_eq!(args.dataset_dir, PathBuf::from("datasets/finger_count"));
    }

    #[test]
    fn test_positional_dataset_dir() {
        let args = Args::parse_from(["gesture-collector", "/tmp/gestures"]);
        assert_eq!(args.dataset_dir, PathBuf::from("/tmp/gestures"));
    }

    #[test]
    fn test_help_is_display_help() {
        let err = Args::try_parse_from(["gesture-collector", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn test_rejects_extra_arguments() {
        assert!(Args::try_parse_from(["gesture-collector", "a", "b"]).is_err());
        assert!(Args::try_parse_from(["gesture-collector", "--fps", "30"]).is_err());
        for flag in ["--version", "-V"] {
            let err = Args::try_parse_from(["gesture-collector", flag]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
        }
    }

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }
}
