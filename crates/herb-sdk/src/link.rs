use herb_types::BatchId;

/// The journey URL for a batch, as encoded into its QR code.
///
/// A trailing `/` on `base_url` is ignored.
pub fn journey_link(base_url: &str, id: &BatchId) -> String {
    format!("{}/?batch={}&page=Journey", base_url.trim_end_matches('/'), id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;

    #[test]
    fn default_base() {
        let id = BatchId::parse("ASH-20250914-083005").unwrap();
        assert_eq!(
            journey_link(DEFAULT_BASE_URL, &id),
            "http://localhost:8501/?batch=ASH-20250914-083005&page=Journey"
        );
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let id = BatchId::parse("NEE-20250101-000000").unwrap();
        assert_eq!(
            journey_link("https://trace.example.org/", &id),
            "https://trace.example.org/?batch=NEE-20250101-000000&page=Journey"
        );
    }
}
