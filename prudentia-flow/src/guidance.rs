use serde::{Deserialize, Serialize};

/// Guidance text split into the five tabs the UI shows.
///
/// Splitting is a display aid only; the stored response stays verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidanceSections {
    pub analysis: String,
    pub documents: String,
    pub procedure: String,
    pub rights: String,
    pub summary: String,
}

impl GuidanceSections {
    /// Split on lines that open with a `## ` heading; deeper headings stay inside
    /// their section. A section is picked by a marker in its heading line, so
    /// reordered headings still land in the right tab. Text before the first
    /// heading and sections with unknown headings are dropped.
    pub fn parse(text: &str) -> Self {
        let mut sections = Self::default();
        let mut chunks: Vec<Vec<&str>> = Vec::new();
        for line in text.lines() {
            if line.starts_with("## ") {
                chunks.push(vec![line]);
            } else if let Some(chunk) = chunks.last_mut() {
                chunk.push(line);
            }
        }

        for chunk in chunks {
            let heading = chunk[0];
            let slot = if heading.contains("Legal Analysis") {
                &mut sections.analysis
            } else if heading.contains("Required Documents") {
                &mut sections.documents
            } else if heading.contains("Court Procedure") {
                &mut sections.procedure
            } else if heading.contains("Your Rights") {
                &mut sections.rights
            } else if heading.contains("Quick Summary") {
                &mut sections.summary
            } else {
                continue;
            };
            *slot = chunk.join("\n").trim_end().to_string();
        }
        sections
    }

    pub fn is_empty(&self) -> bool {
        self.analysis.is_empty()
            && self.documents.is_empty()
            && self.procedure.is_empty()
            && self.rights.is_empty()
            && self.summary.is_empty()
    }
}
