use clap::Parser;

/// Runtime configuration, from flags or the environment.
/// The ports default to the values the ExternalDNS webhook documentation
/// asks for.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Base URL of the USG DNS API
    #[arg(long, env = "USG_DNS_URL")]
    pub url: String,
    /// Token sent verbatim in the Authorization header
    #[arg(long, env = "USG_DNS_TOKEN", hide_env_values = true)]
    pub token: String,
    /// Comma separated list of domains this provider claims authority over
    #[arg(long, env = "DOMAIN_FILTER", value_delimiter = ',')]
    pub domain_filter: Vec<String>,
    /// Port the webhook protocol server listens on
    #[arg(long, env = "SERVER_PORT", default_value_t = 8888)]
    pub port: u16,
    /// Port the health server listens on
    #[arg(long, env = "HEALTH_PORT", default_value_t = 8080)]
    pub health_port: u16,
    /// Log intended changes without sending them to the backend
    #[arg(long, env = "DRY_RUN", default_value_t = false)]
    pub dry_run: bool,
}

impl Config {
    /// Filter entries as configured, minus surrounding whitespace and empty
    /// leftovers from stray commas.
    pub fn domain_filters(&self) -> Vec<String> {
        self.domain_filter
            .iter()
            .map(|filter| filter.trim().to_string())
            .filter(|filter| !filter.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_webhook_contract() {
        let config =
            Config::try_parse_from(["prog", "--url", "http://dns.local", "--token", "secret"])
                .unwrap();

        assert_eq!(config.port, 8888);
        assert_eq!(config.health_port, 8080);
        assert!(!config.dry_run);
        assert!(config.domain_filters().is_empty());
    }

    #[test]
    fn url_and_token_are_required() {
        assert!(Config::try_parse_from(["prog", "--url", "http://dns.local"]).is_err());
        assert!(Config::try_parse_from(["prog", "--token", "secret"]).is_err());
    }

    #[test]
    fn domain_filter_splits_and_trims() {
        let config = Config::try_parse_from([
            "prog",
            "--url",
            "http://dns.local",
            "--token",
            "secret",
            "--domain-filter",
            "example.com, test.local ,",
        ])
        .unwrap();

        assert_eq!(config.domain_filters(), vec!["example.com", "test.local"]);
    }

    #[test]
    fn ports_and_dry_run_parse() {
        let config = Config::try_parse_from([
            "prog",
            "--url",
            "http://dns.local",
            "--token",
            "secret",
            "--port",
            "9999",
            "--health-port",
            "9998",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(config.port, 9999);
        assert_eq!(config.health_port, 9998);
        assert!(config.dry_run);
    }
}
