use anyhow::Result;
use clap::ValueEnum;
use colored::*;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error, info};

use crate::code_examples::format_example_section;
use crate::collector::{collect_files, find_example_dirs, SourceFile};
use crate::front_matter::split_front_matter;
use crate::markdown::{
    escape_html, markdown_to_html, shift_headings_html, shift_headings_markdown, strip_doc_tags,
};

/// Rendering target for the combined document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Render to HTML and print it to a paginated PDF.
    Pdf,
    /// Write one flat markdown file.
    Md,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Md => "md",
        }
    }
}

/// Builds the combined document from the configured sources.
///
/// Section order is fixed: the secondary repository (when configured), the
/// primary repository (its README guides in list order, then its discovered
/// example sections), and finally the docs-site markdown files in traversal
/// order. Only the README path list is configuration; nothing reorders the
/// sections.
pub struct Assembler {
    docs_dir: PathBuf,
    primary_dir: PathBuf,
    secondary_dir: Option<PathBuf>,
    readme_paths: Vec<String>,
    format: OutputFormat,
}

impl Assembler {
    pub fn new(
        docs_dir: PathBuf,
        primary_dir: PathBuf,
        secondary_dir: Option<PathBuf>,
        readme_paths: Vec<String>,
        format: OutputFormat,
    ) -> Self {
        Self {
            docs_dir,
            primary_dir,
            secondary_dir,
            readme_paths,
            format,
        }
    }

    /// Assemble every configured source into one buffer, handed to the
    /// renderer exactly once by the caller.
    pub async fn assemble(&self) -> Result<String> {
        // Docs files are collected up front so an unreadable docs tree aborts
        // the run before any section is emitted.
        let docs_files = collect_files(&self.docs_dir, &["md", "mdx"]).await?;

        let mut combined = String::new();

        if let Some(secondary_dir) = &self.secondary_dir {
            self.append_repo_section(&mut combined, secondary_dir, &[]).await?;
        }
        self.append_repo_section(&mut combined, &self.primary_dir, &self.readme_paths)
            .await?;

        self.append_docs_files(&mut combined, &docs_files);

        Ok(combined)
    }

    /// One repository's section: a title from the directory name, the
    /// configured README guides, then a section per discovered example
    /// directory under `packages/`.
    async fn append_repo_section(
        &self,
        combined: &mut String,
        repo_dir: &Path,
        readme_paths: &[String],
    ) -> Result<()> {
        let repo_name = path_label(repo_dir);
        info!("Bundling repository {}", repo_name.green());

        match self.format {
            OutputFormat::Pdf => {
                combined.push_str(&format!("<h1>{}</h1>\n", escape_html(&repo_name)))
            }
            OutputFormat::Md => combined.push_str(&format!("# {}\n\n", repo_name)),
        }

        for readme_path in readme_paths {
            let full_path = repo_dir.join(readme_path);

            // A missing or unreadable guide drops that one section, never the
            // whole run.
            let content = match fs::read_to_string(&full_path).await {
                Ok(content) => content,
                Err(e) => {
                    error!("Error reading {}: {}", full_path.display(), e);
                    continue;
                }
            };

            let guide_name = path_label(Path::new(readme_path));
            match self.format {
                OutputFormat::Pdf => {
                    combined.push_str(&format!("<h1>{}</h1>\n", escape_html(&guide_name)));
                    combined.push_str(&shift_headings_html(&markdown_to_html(&content)));
                }
                OutputFormat::Md => {
                    combined.push_str(&format!("# {}\n\n", guide_name));
                    combined.push_str(&shift_headings_markdown(&strip_doc_tags(&content)));
                    combined.push_str("\n\n");
                }
            }
        }

        for example_dir in find_example_dirs(&repo_dir.join("packages")) {
            let package_name = example_dir
                .parent()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "package".to_string());
            debug!("Formatting examples for package {}", package_name);

            let files = collect_files(&example_dir, &["ts"]).await?;
            let section = format_example_section(&package_name, &files, self.format);
            match self.format {
                OutputFormat::Pdf => combined.push_str(&shift_headings_html(&section)),
                OutputFormat::Md => combined.push_str(&shift_headings_markdown(&section)),
            }
        }

        Ok(())
    }

    /// Docs-site files: title from front matter or the file name, a location
    /// line relative to the docs root, an optional excerpt, then the rendered
    /// and shifted body.
    fn append_docs_files(&self, combined: &mut String, files: &[SourceFile]) {
        for file in files {
            let (attrs, body) = split_front_matter(&file.content);
            let title = attrs.title.unwrap_or_else(|| file.base_name());
            let location = self.location_label(&file.path);

            match self.format {
                OutputFormat::Pdf => {
                    combined.push_str(&format!("<h1>{}</h1>\n", escape_html(&title)));
                    combined.push_str(&format!(
                        "<p><em>Location: {}</em></p>\n",
                        escape_html(&location)
                    ));
                    if let Some(excerpt) = &attrs.excerpt {
                        combined.push_str(&format!("<p><em>{}</em></p>\n", escape_html(excerpt)));
                    }
                    combined.push_str(&shift_headings_html(&markdown_to_html(body)));
                }
                OutputFormat::Md => {
                    combined.push_str(&format!("# {}\n\n", title));
                    combined.push_str(&format!("*Location: {}*\n\n", location));
                    if let Some(excerpt) = &attrs.excerpt {
                        combined.push_str(&format!("*{}*\n\n", excerpt));
                    }
                    combined.push_str(&shift_headings_markdown(&strip_doc_tags(body)));
                    combined.push_str("\n\n");
                }
            }
        }
    }

    /// Human-readable position of a docs file: its path relative to the docs
    /// root with the extension stripped.
    fn location_label(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.docs_dir).unwrap_or(path);
        relative.with_extension("").display().to_string()
    }
}

/// Last path component as a display string.
fn path_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_match_formats() {
        assert_eq!(OutputFormat::Pdf.extension(), "pdf");
        assert_eq!(OutputFormat::Md.extension(), "md");
    }

    #[test]
    fn location_label_is_relative_and_extension_free() {
        let assembler = Assembler::new(
            PathBuf::from("/docs"),
            PathBuf::from("/primary"),
            None,
            Vec::new(),
            OutputFormat::Md,
        );

        assert_eq!(
            assembler.location_label(Path::new("/docs/guides/intro.md")),
            "guides/intro"
        );
    }

    #[test]
    fn path_label_uses_the_last_component() {
        assert_eq!(path_label(Path::new("/checkout/effect")), "effect");
        assert_eq!(path_label(Path::new("packages/cli/README.md")), "README.md");
    }
}
