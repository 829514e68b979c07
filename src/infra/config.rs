use crate::clients::perspective::DEFAULT_API_BASE;

#[derive(Debug)]
pub struct Config {
    pub mode: String, // "server" or "stdio"
    pub port: u16,
    pub api_key: String,
    pub api_base: String,
}

impl Config {
    /// Read configuration from the environment. A missing
    /// `PERSPECTIVE_API_KEY` is fatal: the process must not start.
    pub fn from_env() -> anyhow::Result<Self> {
        let mode = std::env::var("MODE").unwrap_or_else(|_| "server".into());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);
        let api_key = std::env::var("PERSPECTIVE_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("PERSPECTIVE_API_KEY environment variable is required"))?;
        let api_base = std::env::var("PERSPECTIVE_BASE_URL")
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.into());

        Ok(Self { mode, port, api_key, api_base })
    }
}
