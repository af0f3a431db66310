//! Integration tests building note variables from page files on disk.

use std::fs;

use chrono::DateTime;
use serde_json::json;
use tempfile::TempDir;
use webclip_extract::{
    parse_highlights, placeholder, Document, PageContent, VariableBuilder,
};

const RECIPE_PAGE: &str = r#"<!doctype html>
<html>
<head>
  <title>Tomato Soup | Example Kitchen</title>
  <meta name="description" content="A quick weeknight soup.">
  <meta property="og:site_name" content="Example Kitchen">
  <meta name="keywords" content="soup,tomato">
  <script type="application/ld+json">
    {"@context": "https://schema.org", "@type": "Recipe", "name": "Tomato Soup",
     "author": [{"@type": "Person", "name": "Ada"}, {"@type": "Person", "name": "Grace"}],
     "datePublished": "2024-02-03", "totalTime": "PT45M",
     "recipeInstructions": [{"@type": "HowToStep", "text": "Chop"}, {"@type": "HowToStep", "text": "Simmer"}]}
  </script>
  <script type="application/ld+json">{ not json </script>
</head>
<body>
  <h1>Tomato Soup</h1>
  <p>Simmer <a href="/tips">gently</a>.</p>
</body>
</html>"#;

fn write_page(dir: &TempDir) -> String {
    let path = dir.path().join("recipe.html");
    fs::write(&path, RECIPE_PAGE).unwrap();
    fs::read_to_string(&path).unwrap()
}

#[test]
fn test_recipe_page_to_note() {
    let dir = TempDir::new().unwrap();
    let html = write_page(&dir);

    let schema = Document::parse(&html).json_ld().unwrap();
    let page = PageContent::new(html, "https://www.example.com/recipes/soup").with_schema(schema);
    let now = DateTime::parse_from_rfc3339("2024-03-01T12:00:00+00:00").unwrap();
    let built = VariableBuilder::default().with_clock(now).build(&page).unwrap();
    let vars = &built.variables;

    assert_eq!(built.note_name, "Tomato Soup  Example Kitchen");
    assert_eq!(vars.get("author"), Some("Ada, Grace"));
    assert_eq!(vars.get("published"), Some("2024-02-03"));
    assert_eq!(vars.get("site"), Some("Example Kitchen"));
    assert_eq!(vars.get("schema:totalTime"), Some("PT45M"));
    assert_eq!(vars.get("schema:recipeInstructions[1].text"), Some("Simmer"));
    assert_eq!(
        vars.get("schema:recipeInstructions[0]"),
        Some(r#"{"@type":"HowToStep","text":"Chop"}"#)
    );

    let note = vars.render(
        "---\nsource: {{url}}\ndate: {{date}}\ntags: {{meta:name:keywords}}\n---\n{{description}}\n\n{{content}}",
    );
    assert_eq!(
        note,
        "---\nsource: https://www.example.com/recipes/soup\ndate: 2024-03-01T12:00:00+00:00\ntags: soup,tomato\n---\nA quick weeknight soup.\n\n# Tomato Soup\n\nSimmer [gently](https://www.example.com/tips)."
    );
}

#[test]
fn test_highlight_file_to_note() {
    let dir = TempDir::new().unwrap();
    let html = write_page(&dir);
    let highlights_path = dir.path().join("highlights.json");
    fs::write(
        &highlights_path,
        json!([
            {"type": "text", "id": 1706918400000u64, "xpath": "/html/body/p[1]",
             "content": "<p>Simmer gently.</p>", "startOffset": 0, "endOffset": 15,
             "notes": ["lower heat"]},
            "Tomato Soup"
        ])
        .to_string(),
    )
    .unwrap();

    let now = DateTime::parse_from_rfc3339("2024-03-01T12:00:00+00:00").unwrap();
    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&highlights_path).unwrap()).unwrap();
    let highlights = parse_highlights(&raw, &now).unwrap();

    let page = PageContent::new(html, "https://example.com/recipes/soup").with_highlights(highlights);
    let vars = VariableBuilder::default().with_clock(now).build(&page).unwrap().variables;

    assert_eq!(vars.get("content"), Some("Simmer gently.\n\nTomato Soup"));
    let quoted = vars.expand("highlights", "> ${text}\n> (${timestamp})");
    assert_eq!(
        quoted,
        "> Simmer gently.\n> (2024-02-03T00:00:00.000Z)\n\n> Tomato Soup\n> (2024-03-01T12:00:00.000Z)"
    );
}

#[test]
fn test_template_lists_every_placeholder() {
    let page = PageContent::new("<p>x</p>", "https://example.com/");
    let vars = VariableBuilder::default().build(&page).unwrap().variables;

    let names: Vec<&str> = vars.iter().map(|(name, _)| name).collect();
    for expected in [
        "author", "content", "contentHtml", "date", "description", "domain", "fullHtml",
        "highlights", "image", "noteName", "published", "site", "time", "title", "url",
    ] {
        assert!(names.contains(&expected), "missing {}", placeholder(expected));
    }
}
