//! Reading command inputs from files, arguments and stdin.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use chrono::Local;
use serde_json::Value;
use tokio::io::AsyncReadExt;
use tracing::debug;
use webclip_extract::{parse_highlights, Article, Document, PageContent};

use super::{CommandError, Result};
use crate::cli::PageArgs;

/// Reads a whole file, naming the path in any error.
pub async fn read_file(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CommandError::Io(io::Error::new(e.kind(), format!("{}: {e}", path.display()))))
}

async fn read_optional(path: Option<&Path>) -> Result<Option<String>> {
    match path {
        Some(path) => read_file(path).await.map(Some),
        None => Ok(None),
    }
}

async fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    tokio::io::stdin().read_to_string(&mut buf).await?;
    Ok(buf)
}

/// Resolves a text argument: `@FILE` reads a file, `-` or nothing reads
/// stdin, anything else is used as written.
pub async fn read_text_arg(arg: Option<&str>) -> Result<String> {
    match arg {
        None | Some("-") => read_stdin().await,
        Some(arg) => match arg.strip_prefix('@') {
            Some(path) => read_file(Path::new(path)).await,
            None => Ok(arg.to_string()),
        },
    }
}

/// Reads every file named by `args` concurrently and assembles the page.
pub async fn load_page(args: &PageArgs) -> Result<PageContent> {
    let (html, schema, highlights, selection, article, extracted) = tokio::try_join!(
        read_file(&args.html),
        read_optional(args.schema.as_deref()),
        read_optional(args.highlights.as_deref()),
        read_optional(args.selection.as_deref()),
        read_optional(args.article.as_deref()),
        read_optional(args.extracted.as_deref()),
    )?;

    let schema = match schema {
        Some(text) => Some(serde_json::from_str::<Value>(&text)?),
        None => {
            let discovered = Document::parse(&html).json_ld();
            debug!(found = discovered.is_some(), "using page JSON-LD");
            discovered
        }
    };

    let mut page = PageContent::new(html, args.url.clone());
    page.schema = schema;

    if let Some(text) = highlights {
        let raw: Value = serde_json::from_str(&text)?;
        page.highlights = parse_highlights(&raw, &Local::now())?;
    }
    if let Some(selection) = selection {
        page.selected_html = selection;
    }
    if let Some(text) = article {
        page.article = serde_json::from_str::<Option<Article>>(&text)?;
    }
    if let Some(text) = extracted {
        page.extracted = serde_json::from_str::<BTreeMap<String, String>>(&text)?;
    }

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn page_args(dir: &TempDir) -> PageArgs {
        let html = dir.path().join("page.html");
        fs::write(
            &html,
            r#"<html><head><script type="application/ld+json">{"@type":"Article","headline":"H"}</script></head><body><p>x</p></body></html>"#,
        )
        .unwrap();
        PageArgs {
            html,
            url: "https://example.com/".to_string(),
            schema: None,
            highlights: None,
            selection: None,
            article: None,
            extracted: None,
        }
    }

    #[tokio::test]
    async fn test_text_arg_literal_and_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("t.txt");
        fs::write(&path, "from file").unwrap();

        assert_eq!(read_text_arg(Some("plain")).await.unwrap(), "plain");
        let file_arg = format!("@{}", path.display());
        assert_eq!(read_text_arg(Some(&file_arg)).await.unwrap(), "from file");
    }

    #[tokio::test]
    async fn test_missing_file_names_path() {
        let err = read_file(Path::new("/nonexistent/page.html")).await.unwrap_err();
        assert!(matches!(err, CommandError::Io(_)));
        assert!(err.to_string().contains("/nonexistent/page.html"));
    }

    #[tokio::test]
    async fn test_schema_discovered_from_page() {
        let dir = TempDir::new().unwrap();
        let page = load_page(&page_args(&dir)).await.unwrap();
        assert_eq!(page.schema.unwrap()["headline"], "H");
    }

    #[tokio::test]
    async fn test_optional_files_are_loaded() {
        let dir = TempDir::new().unwrap();
        let mut args = page_args(&dir);

        let write = |name: &str, body: &str| -> PathBuf {
            let path = dir.path().join(name);
            fs::write(&path, body).unwrap();
            path
        };
        args.schema = Some(write("ld.json", r#"{"headline":"Given"}"#));
        args.highlights = Some(write("hl.json", r#"["quoted"]"#));
        args.selection = Some(write("sel.html", "<p>picked</p>"));
        args.article = Some(write("article.json", r#"{"content":"<p>a</p>","title":"T"}"#));
        args.extracted = Some(write("extra.json", r#"{"custom":"value"}"#));

        let page = load_page(&args).await.unwrap();
        assert_eq!(page.schema.unwrap()["headline"], "Given");
        assert_eq!(page.highlights[0].content, "<div>quoted</div>");
        assert_eq!(page.selected_html, "<p>picked</p>");
        assert_eq!(page.article.unwrap().title.as_deref(), Some("T"));
        assert_eq!(page.extracted["custom"], "value");
    }

    #[tokio::test]
    async fn test_null_article_is_none() {
        let dir = TempDir::new().unwrap();
        let mut args = page_args(&dir);
        let path = dir.path().join("article.json");
        fs::write(&path, "null").unwrap();
        args.article = Some(path);

        assert!(load_page(&args).await.unwrap().article.is_none());
    }

    #[tokio::test]
    async fn test_bad_json_is_error() {
        let dir = TempDir::new().unwrap();
        let mut args = page_args(&dir);
        let path = dir.path().join("ld.json");
        fs::write(&path, "{not json").unwrap();
        args.schema = Some(path);

        assert!(matches!(load_page(&args).await, Err(CommandError::Json(_))));
    }
}
