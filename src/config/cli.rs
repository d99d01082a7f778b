use crate::utils::error::Result;
use std::path::PathBuf;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

const STDIO: &str = "-";

/// Reads one request envelope from a file (or stdin) and writes the response back out.
#[derive(Debug, Clone)]
pub struct LocalEventSource {
    input: String,
    output: Option<String>,
}

impl LocalEventSource {
    pub fn new(input: String, output: Option<String>) -> Self {
        Self { input, output }
    }

    pub async fn read_event(&self) -> Result<String> {
        if self.input == STDIO {
            let mut body = String::new();
            tokio::io::stdin().read_to_string(&mut body).await?;
            return Ok(body);
        }

        let body = tokio::fs::read_to_string(PathBuf::from(&self.input)).await?;
        Ok(body)
    }

    pub async fn write_response(&self, body: &str) -> Result<()> {
        match self.output.as_deref() {
            None | Some(STDIO) => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(body.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
            Some(path) => {
                let full_path = PathBuf::from(path);
                if let Some(parent) = full_path.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
                tokio::fs::write(full_path, body).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_event_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("launch.json");
        tokio::fs::write(&path, "{\"version\":\"1.0\"}").await.unwrap();

        let source = LocalEventSource::new(path.to_str().unwrap().to_string(), None);
        assert_eq!(source.read_event().await.unwrap(), "{\"version\":\"1.0\"}");
    }

    #[tokio::test]
    async fn test_read_missing_file_fails() {
        let source = LocalEventSource::new("/definitely/not/here.json".to_string(), None);
        assert!(source.read_event().await.is_err());
    }

    #[tokio::test]
    async fn test_write_response_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("response.json");

        let source = LocalEventSource::new(
            STDIO.to_string(),
            Some(path.to_str().unwrap().to_string()),
        );
        source.write_response("{}").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }
}
