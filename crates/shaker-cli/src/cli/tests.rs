#[cfg(test)]
mod tests {
    use crate::cli::validation::parse_order;
    use crate::cli::{Cli, Command};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_parse_order_valid() {
        assert_eq!(parse_order("common-device"), Ok("common-device".to_string()));
        assert_eq!(
            parse_order("common-action-device-skin-region-lang"),
            Ok("common-action-device-skin-region-lang".to_string())
        );
    }

    #[test]
    fn test_parse_order_invalid() {
        assert!(parse_order("").is_err());
        assert!(parse_order("common-planet").is_err());
        assert!(parse_order("common-device-device").is_err());
    }

    #[test]
    fn test_build_defaults() {
        let cli = Cli::try_parse_from(["shaker", "build"]).unwrap();
        match cli.command {
            Command::Build(args) => {
                assert!(args.root.is_none());
                assert!(args.order.is_none());
                assert!(args.output.is_none());
                assert!(args.config.is_none());
            }
            other => panic!("expected build, got {other:?}"),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn test_build_all_flags() {
        let cli = Cli::try_parse_from([
            "shaker",
            "build",
            "--root",
            "app",
            "--order",
            "common-device",
            "--output",
            "build/meta.json",
            "--config",
            "ci.json",
        ])
        .unwrap();
        let Command::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.root, Some(PathBuf::from("app")));
        assert_eq!(args.order.as_deref(), Some("common-device"));
        assert_eq!(args.output, Some(PathBuf::from("build/meta.json")));
        assert_eq!(args.config, Some(PathBuf::from("ci.json")));
    }

    #[test]
    fn test_build_rejects_bad_order() {
        assert!(Cli::try_parse_from(["shaker", "build", "--order", "common-moon"]).is_err());
    }

    #[test]
    fn test_check_root() {
        let cli = Cli::try_parse_from(["shaker", "check", "-r", "site"]).unwrap();
        let Command::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.root, Some(PathBuf::from("site")));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["shaker", "check", "--verbose", "--no-color"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert!(Cli::try_parse_from(["shaker", "check", "-v", "-q"]).is_err());
    }
}
