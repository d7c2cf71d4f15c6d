//! CLI Command Tests
//!
//! Tests for the scriptable subcommands with a mocked OMDb backend.
//! Covers argument parsing, exit codes, and input validation.

// =============================================================================
// CLI Argument Parsing Tests
// =============================================================================

mod cli_parsing {
    use clap::Parser;
    use popcorntui::cli::{Cli, Command, Format};

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from(["popcorntui"]);
        assert!(cli.is_tui());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_search_command_basic() {
        let cli = Cli::parse_from(["popcorntui", "search", "batman"]);
        assert!(!cli.is_tui());
        match cli.command {
            Some(Command::Search(cmd)) => {
                assert_eq!(cmd.query, "batman");
                assert_eq!(cmd.limit, 10); // default
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_search_alias() {
        let cli = Cli::parse_from(["popcorntui", "s", "blade runner", "--limit", "2"]);
        match cli.command {
            Some(Command::Search(cmd)) => {
                assert_eq!(cmd.query, "blade runner");
                assert_eq!(cmd.limit, 2);
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["popcorntui", "info", "tt0083658", "--json"]);
        assert!(cli.json);
        assert_eq!(cli.format(), Format::Json);
    }

    #[test]
    fn test_missing_query_is_error() {
        assert!(Cli::try_parse_from(["popcorntui", "search"]).is_err());
    }

    #[test]
    fn test_bad_limit_is_error() {
        assert!(Cli::try_parse_from(["popcorntui", "search", "heat", "-l", "many"]).is_err());
    }
}

// =============================================================================
// Command Execution Tests
// =============================================================================

mod commands {
    use mockito::{Matcher, Server};
    use popcorntui::cli::{ExitCode, Format, InfoCmd, Output, SearchCmd};
    use popcorntui::commands::{info_cmd, search_cmd};
    use popcorntui::Config;

    fn output() -> Output {
        Output {
            format: Format::Json,
            quiet: true,
        }
    }

    fn config_for(server: &Server) -> Config {
        Config {
            omdb_api_key: Some("test_key".into()),
            omdb_base_url: Some(server.url()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_search_not_found_exit_code() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(Matcher::UrlEncoded("s".into(), "qwertyuiop".into()))
            .with_status(200)
            .with_body(r#"{"Response":"False","Error":"Movie not found!"}"#)
            .create_async()
            .await;

        let cmd = SearchCmd {
            query: "qwertyuiop".into(),
            limit: 10,
        };
        let code = search_cmd(cmd, &config_for(&server), &output()).await;
        assert_eq!(code, ExitCode::NotFound);
    }

    #[tokio::test]
    async fn test_search_server_error_exit_code() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(502)
            .create_async()
            .await;

        let cmd = SearchCmd {
            query: "heat".into(),
            limit: 10,
        };
        let code = search_cmd(cmd, &config_for(&server), &output()).await;
        assert_eq!(code, ExitCode::NetworkError);
    }

    #[tokio::test]
    async fn test_info_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::UrlEncoded("i".into(), "tt0083658".into()))
            .with_status(200)
            .with_body(
                r#"{"Title":"Blade Runner","Year":"1982","Runtime":"117 min","imdbRating":"8.1",
                    "imdbID":"tt0083658","Response":"True"}"#,
            )
            .create_async()
            .await;

        let cmd = InfoCmd {
            imdb_id: "tt0083658".into(),
        };
        let code = info_cmd(cmd, &config_for(&server), &output()).await;

        mock.assert_async().await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_info_unknown_id() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#)
            .create_async()
            .await;

        let cmd = InfoCmd {
            imdb_id: "tt9999999".into(),
        };
        let code = info_cmd(cmd, &config_for(&server), &output()).await;
        assert_eq!(code, ExitCode::NotFound);
    }

    #[tokio::test]
    async fn test_invalid_id_never_hits_network() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let cmd = InfoCmd {
            imdb_id: "not-an-id".into(),
        };
        let code = info_cmd(cmd, &config_for(&server), &output()).await;

        assert_eq!(code, ExitCode::InvalidArgs);
        mock.assert_async().await;
    }
}
