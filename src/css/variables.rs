//! Variable cross-reference rendering

use crate::lookup::DefinitionLocation;

/// Hover markdown for a custom property usage
///
/// `lines` are the preview lines fetched from the defining file, the first
/// of them being 0-based line `first_line`.
pub fn render_variable_preview(
    location: &DefinitionLocation,
    first_line: u32,
    lines: &[String],
    definition_url: Option<&str>,
    search_url: Option<&str>,
) -> String {
    let mut markdown = match definition_url {
        Some(url) => format!("[{}]({})\n\n", location.file_path, url),
        None => format!("`{}`\n\n", location.file_path),
    };

    if !lines.is_empty() {
        let last_number = first_line as usize + lines.len();
        let width = last_number.to_string().len();

        markdown.push_str("```css\n");
        for (i, line) in lines.iter().enumerate() {
            let number = first_line as usize + i + 1;
            markdown.push_str(&format!("{:>width$}  {}\n", number, line, width = width));
        }
        markdown.push_str("```\n");
    }

    if let Some(url) = search_url {
        markdown.push_str(&format!("\n[Search variable]({})", url));
    }

    markdown.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> DefinitionLocation {
        DefinitionLocation {
            repository: "github.com/acme/styles".to_string(),
            file_path: "src/tokens.css".to_string(),
            revision: "3f2a9c1".to_string(),
            line: 9,
        }
    }

    #[test]
    fn test_render_with_links() {
        let lines = vec![
            ":root {".to_string(),
            "  --gap: 4px;".to_string(),
            "  --pad: 8px;".to_string(),
        ];
        let markdown = render_variable_preview(
            &location(),
            8,
            &lines,
            Some("https://sg.example.com/def"),
            Some("https://sg.example.com/search"),
        );

        assert_eq!(
            markdown,
            "[src/tokens.css](https://sg.example.com/def)\n\n\
             ```css\n \
             9  :root {\n\
             10    --gap: 4px;\n\
             11    --pad: 8px;\n\
             ```\n\n\
             [Search variable](https://sg.example.com/search)"
        );
    }

    #[test]
    fn test_render_without_links_or_preview() {
        let markdown = render_variable_preview(&location(), 8, &[], None, None);
        assert_eq!(markdown, "`src/tokens.css`");
    }
}
