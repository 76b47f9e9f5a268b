use crate::assembler::OutputFormat;
use crate::collector::SourceFile;
use crate::markdown::escape_html;

/// Format a package's example files into one titled section: a top-level
/// header naming the package, then one subsection per file with its full text
/// as a TypeScript-tagged code listing.
///
/// The caller nests the section under a repository title by header-shifting
/// the whole fragment afterwards.
pub fn format_example_section(
    package_name: &str,
    files: &[SourceFile],
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Pdf => {
            let mut section = format!("<h1>{} Examples</h1>\n", escape_html(package_name));
            for file in files {
                section.push_str(&format!("<h2>{}</h2>\n", escape_html(&file.base_name())));
                section.push_str(&format!(
                    "<pre><code class=\"language-typescript\">{}</code></pre>\n",
                    escape_html(&file.content)
                ));
            }
            section
        }
        OutputFormat::Md => {
            let mut section = format!("# {} Examples\n\n", package_name);
            for file in files {
                section.push_str(&format!("## {}\n\n", file.base_name()));
                section.push_str(&format!("```typescript\n{}\n```\n\n", file.content));
            }
            section
        }
    }
}
