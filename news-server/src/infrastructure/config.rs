use site_core::infrastructure::config::parse_flag;

pub const DEFAULT_PORT: u16 = 8000;
pub const NEWS_COUNT_ON_HOME_PAGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewsSettings {
    pub news_count_on_home_page: usize,
    pub comment_filter_case_insensitive: bool,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            news_count_on_home_page: NEWS_COUNT_ON_HOME_PAGE,
            comment_filter_case_insensitive: false,
        }
    }
}

impl NewsSettings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let news_count_on_home_page = match lookup("NEWS_COUNT_ON_HOME_PAGE") {
            Some(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid NEWS_COUNT_ON_HOME_PAGE: {}", e))?,
            None => NEWS_COUNT_ON_HOME_PAGE,
        };
        if news_count_on_home_page == 0 {
            anyhow::bail!("NEWS_COUNT_ON_HOME_PAGE must be at least 1");
        }
        let comment_filter_case_insensitive = parse_flag(
            "COMMENT_FILTER_CASE_INSENSITIVE",
            lookup("COMMENT_FILTER_CASE_INSENSITIVE"),
        )?;

        Ok(Self {
            news_count_on_home_page,
            comment_filter_case_insensitive,
        })
    }
}
