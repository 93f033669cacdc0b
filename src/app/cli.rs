use clap::Parser;
use std::path::PathBuf;

/// StageLens - navigation, captions and performer zoom for a concert lens 🎤
#[derive(Parser, Debug)]
#[command(name = "stagelens", version, about)]
pub struct Args {
    /// Path to config.toml (default: <config dir>/stagelens/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory for persisted user settings (default: <config dir>/stagelens/state)
    #[arg(long)]
    pub state_dir: Option<PathBuf>,

    /// Override the mock detector's confidence (0.0 - 1.0)
    #[arg(long)]
    pub mock_confidence: Option<f32>,

    /// Generate default config.toml to stdout
    #[arg(long)]
    pub generate_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["stagelens"]);
        assert!(args.config.is_none());
        assert!(args.mock_confidence.is_none());
        assert!(!args.generate_config);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "stagelens",
            "--config",
            "/tmp/lens.toml",
            "--mock-confidence",
            "0.3",
            "--state-dir",
            "/tmp/state",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/lens.toml")));
        assert_eq!(args.state_dir, Some(PathBuf::from("/tmp/state")));
        assert_eq!(args.mock_confidence, Some(0.3));
    }
}
