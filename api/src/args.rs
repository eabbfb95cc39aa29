use std::time::Duration;

use clap::{Args as ClapArgs, Parser};
use truthbite_core::domain::common::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, LLMConfig, TruthbiteConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "truthbite-api", version, about = "TruthBite label scoring API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LLMArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix prepended to every route, e.g. `/api`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LLMArgs {
    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY", default_value = "", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub gemini_model: String,

    #[arg(long = "gemini-base-url", env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,

    #[arg(long = "gemini-timeout-secs", env = "GEMINI_TIMEOUT_SECS", default_value_t = 60)]
    pub gemini_timeout_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for TruthbiteConfig {
    fn from(args: Args) -> Self {
        TruthbiteConfig {
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                gemini_base_url: args.llm.gemini_base_url,
                request_timeout: Duration::from_secs(args.llm.gemini_timeout_secs),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn default_of(command: &clap::Command, id: &str) -> Option<String> {
        command
            .get_arguments()
            .find(|arg| arg.get_id() == id)
            .and_then(|arg| arg.get_default_values().first())
            .and_then(|value| value.to_str())
            .map(str::to_string)
    }

    #[test]
    fn test_declared_defaults() {
        let command = Args::command();
        assert_eq!(default_of(&command, "port").as_deref(), Some("3333"));
        assert_eq!(default_of(&command, "root_path").as_deref(), Some(""));
        assert_eq!(
            default_of(&command, "gemini_model").as_deref(),
            Some(DEFAULT_GEMINI_MODEL)
        );
        assert_eq!(default_of(&command, "gemini_timeout_secs").as_deref(), Some("60"));
    }

    #[test]
    fn test_explicit_flags_parse() {
        let args = Args::parse_from([
            "truthbite-api",
            "--server-port",
            "8080",
            "--server-root-path",
            "/api",
            "--gemini-model",
            "gemini-test",
        ]);
        assert_eq!(args.server.port, 8080);
        assert_eq!(args.server.root_path, "/api");
        assert_eq!(args.llm.gemini_model, "gemini-test");
    }

    #[test]
    fn test_origins_split_on_comma() {
        let args = Args::parse_from([
            "truthbite-api",
            "--allowed-origins",
            "http://a.test,http://b.test",
        ]);
        assert_eq!(
            args.server.allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn test_into_config() {
        let args = Args::parse_from([
            "truthbite-api",
            "--gemini-api-key",
            "k",
            "--gemini-timeout-secs",
            "5",
        ]);
        let config = TruthbiteConfig::from(args);
        assert_eq!(config.llm.gemini_api_key, "k");
        assert_eq!(config.llm.request_timeout, Duration::from_secs(5));
    }
}
