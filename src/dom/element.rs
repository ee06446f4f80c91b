use scraper::ElementRef;

/// Read-only helpers over a borrowed DOM element.
///
/// Everything the selector deriver and the tree extractor need to know about
/// an element goes through this trait, so both see the same notion of tag
/// name, class list and node name.
pub trait ElementExt<'a> {
    /// Lower-cased tag name (e.g. "div", "span")
    fn tag_name(&self) -> String;

    /// Class names in the order they appear in the `class` attribute
    fn class_list(&self) -> Vec<&'a str>;

    /// Check if element has a specific class
    fn has_class(&self, class_name: &str) -> bool;

    /// Non-empty `id` attribute, if any
    fn element_id(&self) -> Option<&'a str>;

    /// `tag` or `tag.class1.class2`, the segment used for selectors and paths
    fn node_name(&self) -> String;

    /// Parent element, `None` at the top of the tree
    fn parent_element(&self) -> Option<ElementRef<'a>>;

    /// Whether this is the outermost element (the document element)
    fn is_document_element(&self) -> bool;

    /// Check if element is a specific tag
    fn is_tag(&self, tag: &str) -> bool;
}

impl<'a> ElementExt<'a> for ElementRef<'a> {
    fn tag_name(&self) -> String {
        self.value().name().to_ascii_lowercase()
    }

    fn class_list(&self) -> Vec<&'a str> {
        // the element borrows from the tree for 'a, so the attribute does too
        let element: &'a scraper::node::Element = self.value();
        element
            .attr("class")
            .map(|classes| classes.split_whitespace().collect())
            .unwrap_or_default()
    }

    fn has_class(&self, class_name: &str) -> bool {
        self.class_list().iter().any(|c| *c == class_name)
    }

    fn element_id(&self) -> Option<&'a str> {
        let element: &'a scraper::node::Element = self.value();
        element.attr("id").filter(|id| !id.is_empty())
    }

    fn node_name(&self) -> String {
        let classes = self.class_list();
        if classes.is_empty() {
            self.tag_name()
        } else {
            format!("{}.{}", self.tag_name(), classes.join("."))
        }
    }

    fn parent_element(&self) -> Option<ElementRef<'a>> {
        self.parent().and_then(ElementRef::wrap)
    }

    fn is_document_element(&self) -> bool {
        self.parent_element().is_none()
    }

    fn is_tag(&self, tag: &str) -> bool {
        self.value().name().eq_ignore_ascii_case(tag)
    }
}
