pub mod env_var {
    use lazy_static::lazy_static;

    use crate::app::validation::WhitespacePolicy;

    lazy_static! {
        static ref ENV_VAR: EnvVar = load_env();
    }

    #[derive(Debug, Clone)]
    pub struct EnvVar {
        pub port: u16,
        pub whitespace_policy: WhitespacePolicy,
        /// Absent when no `DATABASE_HOST` is set; users are then kept in memory.
        pub database: Option<DatabaseVar>,
    }

    #[derive(Debug, Clone)]
    pub struct DatabaseVar {
        pub host: String,
        pub port: u16,
        pub name: String,
        pub user: String,
        pub password: String,
    }

    impl DatabaseVar {
        pub fn url(&self) -> String {
            format!(
                "postgres://{}:{}@{}:{}/{}",
                self.user, self.password, self.host, self.port, self.name
            )
        }
    }

    macro_rules! get_env {
        ($env:literal) => {
            std::env::var($env).expect(concat!("Missing env var ", $env))
        };
    }

    fn load_database() -> Option<DatabaseVar> {
        let host = std::env::var("DATABASE_HOST").ok()?;

        Some(DatabaseVar {
            host,
            port: get_env!("DATABASE_PORT")
                .parse()
                .expect("Invalid DATABASE_PORT"),
            name: get_env!("DATABASE_NAME"),
            user: get_env!("DATABASE_USER"),
            password: get_env!("DATABASE_PASSWORD"),
        })
    }

    fn load_env() -> EnvVar {
        let port: u16 = get_env!("PORT").parse().expect("Invalid PORT");
        let whitespace_policy = std::env::var("WHITESPACE_POLICY")
            .map(|policy| policy.parse().expect("Invalid WHITESPACE_POLICY"))
            .unwrap_or_default();

        EnvVar {
            port,
            whitespace_policy,
            database: load_database(),
        }
    }

    pub fn get() -> &'static EnvVar {
        &ENV_VAR
    }
}
