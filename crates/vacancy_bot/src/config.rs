use anyhow::{Context, Result};

const DEFAULT_API_URL: &str = "https://job.ubtuit.uz/api/v1/vacancies/";
const DEFAULT_JOB_URL_BASE: &str = "https://job.ubtuit.uz/job/";

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    /// Upstream catalog endpoint queried with `page` and `query` parameters.
    pub api_url: String,
    /// Base URL for per-vacancy application links in the detail view.
    pub job_url_base: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let bot_token = std::env::var("BOT_TOKEN").context("BOT_TOKEN is not set")?;
        let api_url =
            std::env::var("VACANCY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let job_url_base = std::env::var("VACANCY_JOB_URL_BASE")
            .unwrap_or_else(|_| DEFAULT_JOB_URL_BASE.to_string());

        Ok(Self {
            bot_token,
            api_url,
            job_url_base,
        })
    }
}
