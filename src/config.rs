use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::biomart::DEFAULT_HOST;

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_id_column() -> String {
    "id".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateConfig {
    /// BioMart dataset, e.g. "hsapiens_gene_ensembl".
    pub dataset: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_id_column")]
    pub id_column: String,
    #[serde(default)]
    pub drop_empty_rows: bool,
}

impl AnnotateConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.dataset.ends_with("_gene_ensembl") {
            bail!(
                "invalid dataset '{}': expected an Ensembl gene dataset such as 'hsapiens_gene_ensembl'",
                self.dataset
            );
        }
        if !(self.host.starts_with("http://") || self.host.starts_with("https://")) {
            bail!("invalid host '{}': expected an http(s) URL", self.host);
        }
        if self.id_column.is_empty() {
            bail!("idColumn must not be empty");
        }
        Ok(())
    }
}
