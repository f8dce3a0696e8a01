//! Command-line interface definitions for News Map.
//!
//! Every flag is optional and falls back to an environment variable, then to
//! the YAML config file, then to a built-in default (see [`crate::config`]).

use crate::render::FillMode;
use clap::Parser;

/// Command-line arguments for the News Map server.
///
/// # Examples
///
/// ```sh
/// # Serve a local SQLite store on the default port
/// news_map --database-url sqlite://articles.db -b ./countries_geo.json
///
/// # Everything from a config file, port from the environment
/// PORT=8080 news_map -c ./news_map.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long, env = "NEWS_MAP_CONFIG")]
    pub config: Option<String>,

    /// Port to listen on (default 3001)
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Article store connection string, e.g. `sqlite://articles.db`
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Country boundary GeoJSON: a file path or an http(s) URL
    #[arg(short, long, env = "BOUNDARY_SOURCE")]
    pub boundary_source: Option<String>,

    /// How country fill colors are chosen
    #[arg(long, value_enum, env = "FILL_MODE")]
    pub fill_mode: Option<FillMode>,

    /// Location whose popup is pinned to a marker at the map center
    #[arg(long, env = "FEATURED_LOCATION")]
    pub featured_location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "news_map",
            "--port",
            "8080",
            "--database-url",
            "sqlite://articles.db",
            "--boundary-source",
            "./countries_geo.json",
        ]);

        assert_eq!(cli.port, Some(8080));
        assert_eq!(cli.database_url.as_deref(), Some("sqlite://articles.db"));
        assert_eq!(cli.boundary_source.as_deref(), Some("./countries_geo.json"));
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["news_map", "-c", "/etc/news_map.yaml", "-p", "4000"]);

        assert_eq!(cli.config.as_deref(), Some("/etc/news_map.yaml"));
        assert_eq!(cli.port, Some(4000));
    }

    #[test]
    fn test_cli_fill_mode() {
        let cli = Cli::parse_from(["news_map", "--fill-mode", "random"]);
        assert_eq!(cli.fill_mode, Some(FillMode::Random));
    }

    #[test]
    fn test_cli_featured_location() {
        let cli = Cli::parse_from(["news_map", "--featured-location", "Myanmar"]);
        assert_eq!(cli.featured_location.as_deref(), Some("Myanmar"));
    }

    #[test]
    fn test_every_flag_has_env_fallback() {
        let cmd = Cli::command();
        let envs: Vec<_> = ["fill_mode", "featured_location"]
            .iter()
            .map(|id| {
                cmd.get_arguments()
                    .find(|arg| arg.get_id() == *id)
                    .and_then(|arg| arg.get_env())
                    .and_then(|env| env.to_str())
                    .unwrap()
            })
            .collect();
        assert_eq!(envs, vec!["FILL_MODE", "FEATURED_LOCATION"]);
        assert!(
            cmd.get_arguments()
                .filter(|arg| !matches!(arg.get_id().as_str(), "help" | "version"))
                .all(|arg| arg.get_env().is_some())
        );
    }
}
