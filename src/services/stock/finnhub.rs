//! Finnhub 接口
//!
//! 公司资料、实时报价、分析师评级、公司新闻、同业公司、内部人情绪、历史盈利、代码搜索
//! 对接 https://finnhub.io/api/v1，API Key 通过 `token` 参数传递

use url::Url;

use super::endpoint;
use crate::models::DateRange;

pub struct Finnhub {
    base: Url,
    api_key: String,
}

impl Finnhub {
    pub fn new(base: Url, api_key: String) -> Self {
        Self { base, api_key }
    }

    /// GET /stock/profile2?symbol=
    pub fn profile_url(&self, symbol: &str) -> Url {
        self.symbol_url(&["stock", "profile2"], symbol)
    }

    /// GET /quote?symbol=
    pub fn quote_url(&self, symbol: &str) -> Url {
        self.symbol_url(&["quote"], symbol)
    }

    /// GET /stock/recommendation?symbol=
    pub fn recommendation_url(&self, symbol: &str) -> Url {
        self.symbol_url(&["stock", "recommendation"], symbol)
    }

    /// GET /stock/peers?symbol=
    pub fn peers_url(&self, symbol: &str) -> Url {
        self.symbol_url(&["stock", "peers"], symbol)
    }

    /// GET /stock/insider-sentiment?symbol=
    pub fn insider_sentiment_url(&self, symbol: &str) -> Url {
        self.symbol_url(&["stock", "insider-sentiment"], symbol)
    }

    /// GET /stock/earnings?symbol=
    pub fn earnings_url(&self, symbol: &str) -> Url {
        self.symbol_url(&["stock", "earnings"], symbol)
    }

    /// GET /search?q=
    pub fn symbol_lookup_url(&self, query: &str) -> Url {
        let mut url = endpoint(&self.base, &["search"]);
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("token", &self.api_key);
        url
    }

    /// GET /company-news?symbol=&from=&to=
    pub fn company_news_url(&self, symbol: &str, range: &DateRange) -> Url {
        let mut url = endpoint(&self.base, &["company-news"]);
        url.query_pairs_mut()
            .append_pair("symbol", symbol)
            .append_pair("from", &range.format_from())
            .append_pair("to", &range.format_to())
            .append_pair("token", &self.api_key);
        url
    }

    fn symbol_url(&self, segments: &[&str], symbol: &str) -> Url {
        let mut url = endpoint(&self.base, segments);
        url.query_pairs_mut()
            .append_pair("symbol", symbol)
            .append_pair("token", &self.api_key);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn finnhub() -> Finnhub {
        Finnhub::new(Url::parse("https://finnhub.io/api/v1").unwrap(), "fk".to_string())
    }

    #[test]
    fn test_symbol_endpoints() {
        let f = finnhub();
        assert_eq!(
            f.profile_url("AAPL").as_str(),
            "https://finnhub.io/api/v1/stock/profile2?symbol=AAPL&token=fk"
        );
        assert_eq!(f.quote_url("AAPL").as_str(), "https://finnhub.io/api/v1/quote?symbol=AAPL&token=fk");
        assert_eq!(
            f.recommendation_url("MSFT").as_str(),
            "https://finnhub.io/api/v1/stock/recommendation?symbol=MSFT&token=fk"
        );
    }

    #[test]
    fn test_fundamentals_endpoints() {
        let f = finnhub();
        assert_eq!(f.peers_url("AAPL").as_str(), "https://finnhub.io/api/v1/stock/peers?symbol=AAPL&token=fk");
        assert_eq!(
            f.insider_sentiment_url("AAPL").as_str(),
            "https://finnhub.io/api/v1/stock/insider-sentiment?symbol=AAPL&token=fk"
        );
        assert_eq!(
            f.earnings_url("AAPL").as_str(),
            "https://finnhub.io/api/v1/stock/earnings?symbol=AAPL&token=fk"
        );
    }

    #[test]
    fn test_symbol_lookup_url_encodes_query() {
        let url = finnhub().symbol_lookup_url("apple inc");
        assert_eq!(url.as_str(), "https://finnhub.io/api/v1/search?q=apple+inc&token=fk");
    }

    #[test]
    fn test_company_news_url() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let url = finnhub().company_news_url("TSLA", &DateRange::trailing(today, 30));
        assert_eq!(
            url.as_str(),
            "https://finnhub.io/api/v1/company-news?symbol=TSLA&from=2024-02-14&to=2024-03-15&token=fk"
        );
    }

    #[test]
    fn test_symbol_is_query_encoded() {
        let url = finnhub().quote_url("BRK.B&token=x");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("symbol".to_string(), "BRK.B&token=x".to_string()));
        assert_eq!(pairs[1], ("token".to_string(), "fk".to_string()));
        assert_eq!(pairs.len(), 2);
    }
}
