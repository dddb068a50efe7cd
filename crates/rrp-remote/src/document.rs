//! Fetches a published commission document and splits it into table rows.
//!
//! Only text tables are read here. Binary documents are reported as
//! [`RemoteError::UnsupportedDocument`] so the caller can keep its current
//! schedule.

use std::time::Duration;

use reqwest::Client;

use crate::error::RemoteError;
use crate::retry::retry_with_backoff;

const PDF_MAGIC: &[u8] = b"%PDF";

pub struct DocumentClient {
    client: Client,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl DocumentClient {
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(timeout_secs: u64) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("rrp/0.1 (commission-sync)")
            .build()?;
        Ok(Self {
            client,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, RemoteError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Downloads `url` and returns its non-empty rows split into cells.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::InvalidUrl`] for non-http(s) URLs,
    /// [`RemoteError::Http`] on transport or status failures, and
    /// [`RemoteError::UnsupportedDocument`] for PDF or non-UTF-8 bodies.
    pub async fn fetch_rows(&self, url: &str) -> Result<Vec<Vec<String>>, RemoteError> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(RemoteError::InvalidUrl {
                url: url.to_string(),
                reason: "expected an http(s) URL".to_string(),
            });
        }

        let body = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.fetch_bytes(url)
        })
        .await?;

        if body.starts_with(PDF_MAGIC) {
            return Err(RemoteError::UnsupportedDocument {
                url: url.to_string(),
                kind: "pdf".to_string(),
            });
        }
        let text = String::from_utf8(body).map_err(|_| RemoteError::UnsupportedDocument {
            url: url.to_string(),
            kind: "binary".to_string(),
        })?;

        let rows = split_rows(&text);
        tracing::debug!(url, rows = rows.len(), "commission document fetched");
        Ok(rows)
    }
}

/// Splits text into rows of trimmed cells. Tabs win over `|`, which wins over
/// `;`. Lines with no delimiter become single-cell rows.
#[must_use]
pub fn split_rows(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let delimiter = ['\t', '|', ';']
                .into_iter()
                .find(|d| line.contains(*d));
            match delimiter {
                Some(d) => line
                    .split(d)
                    .map(str::trim)
                    .filter(|cell| !cell.is_empty())
                    .map(str::to_string)
                    .collect(),
                None => vec![line.to_string()],
            }
        })
        .filter(|cells: &Vec<String>| !cells.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_tab_separated_rows() {
        let rows = split_rows("Категория\tКомиссия\nТелевизоры\t7,5%\n\n");
        assert_eq!(
            rows,
            vec![
                vec!["Категория".to_string(), "Комиссия".to_string()],
                vec!["Телевизоры".to_string(), "7,5%".to_string()],
            ]
        );
    }

    #[test]
    fn pipe_tables_drop_border_cells() {
        let rows = split_rows("| Смартфоны | 5 % |");
        assert_eq!(rows, vec![vec!["Смартфоны".to_string(), "5 %".to_string()]]);
    }

    #[test]
    fn plain_lines_are_single_cells() {
        let rows = split_rows("  Приложение 1  ");
        assert_eq!(rows, vec![vec!["Приложение 1".to_string()]]);
    }
}
