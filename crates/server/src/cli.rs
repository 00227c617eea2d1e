use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[clap(name = "workout tracker server")]
pub struct Cli {
    #[clap(long, env, default_value = "workouts.sqlite")]
    pub sqlite_connection_string: String,
    #[clap(long, env, default_value = "3000")]
    pub port: u16,
    #[clap(long, env, default_value = "127.0.0.1")]
    pub bind_addr: String,
    /// Origin allowed to call the API from a browser, `*` allows any
    #[arg(long, env, default_value = "*")]
    pub cors_origin: String,

    /// Deletes the database before starting the main program for debug purposes
    #[arg(long, env, default_value = "false")]
    pub debug_delete_database: bool,
}

#[cfg(test)]
mod test {
    use clap::Parser;

    use super::Cli;

    #[test]
    fn test_database_is_kept_by_default() {
        let cli = Cli::parse_from(["server"]);
        assert!(!cli.debug_delete_database);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "server",
            "--port",
            "8081",
            "--sqlite-connection-string",
            "other.sqlite",
            "--cors-origin",
            "http://localhost:5173",
        ]);
        assert_eq!(cli.port, 8081);
        assert_eq!(cli.sqlite_connection_string, "other.sqlite");
        assert_eq!(cli.cors_origin, "http://localhost:5173");
    }
}
