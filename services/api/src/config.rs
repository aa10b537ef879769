use anyhow::{bail, Context, Result};

/// Where ledger rows live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { database_url: String },
    /// Process-local tables, lost on restart. Meant for local runs and tests.
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub store: StoreBackend,
    /// Secret the provider must echo during the webhook handshake. Left
    /// unset, every webhook request is answered with 500.
    pub verify_token: Option<String>,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .context("PORT must be a valid port number")?;

        let store = match lookup("STORE_BACKEND").as_deref().unwrap_or("postgres") {
            "postgres" => StoreBackend::Postgres {
                database_url: lookup("DATABASE_URL")
                    .context("DATABASE_URL must be set when STORE_BACKEND=postgres")?,
            },
            "memory" => StoreBackend::Memory,
            other => bail!("unknown STORE_BACKEND {other:?}, expected \"postgres\" or \"memory\""),
        };

        Ok(Self {
            port,
            store,
            verify_token: lookup("WHATSAPP_VERIFY_TOKEN").filter(|token| !token.is_empty()),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        })
    }
}
