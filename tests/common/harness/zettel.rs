//! Builder for test zettels.

/// Builder for zettel content in the layout `zet` expects:
///
/// ```text
/// # Title
///
/// body
///
///     #tag1 #tag2
/// ```
#[derive(Debug)]
pub struct TestZettel {
    id: String,
    title: String,
    body: String,
    tags: Vec<String>,
}

impl TestZettel {
    /// Creates a zettel with the given folder name and title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: String::new(),
            tags: Vec::new(),
        }
    }

    /// Sets the body text.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Adds a tag, without the leading `#`.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn get_id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Renders the note file.
    pub fn content(&self) -> String {
        let mut content = format!("# {}\n", self.title);
        if !self.body.is_empty() {
            content.push('\n');
            content.push_str(&self.body);
            content.push('\n');
        }
        if !self.tags.is_empty() {
            let tags: Vec<_> = self.tags.iter().map(|t| format!("#{t}")).collect();
            content.push_str("\n    ");
            content.push_str(&tags.join(" "));
            content.push('\n');
        }
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_zettel_title_only() {
        let zettel = TestZettel::new("20211016205158", "Title");
        assert_eq!(zettel.content(), "# Title\n");
    }

    #[test]
    fn test_zettel_builder_fluent() {
        let zettel = TestZettel::new("20211016205158", "Title")
            .body("Some text.")
            .tag("rust")
            .tag("git");
        assert_eq!(zettel.get_id(), "20211016205158");
        assert_eq!(zettel.title(), "Title");
        assert_eq!(zettel.content(), "# Title\n\nSome text.\n\n    #rust #git\n");
    }
}
