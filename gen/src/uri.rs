//! URI templates and path-variable extraction.
//!
//! Resource paths are URI templates with `{var}` placeholders
//! (`/widgets/{widgetId}/orders`). The compiler extracts the template
//! variables to bind path keys, and computes the rewritten template used
//! when a caller overrides the resource's name.

use std::fmt;

/// Extracts variable names from a path template, in order of appearance.
///
/// ## Examples
///
/// ```
/// use restive_gen::uri::extract_path_variables;
///
/// assert_eq!(extract_path_variables("/widgets"), Vec::<&str>::new());
/// assert_eq!(
///     extract_path_variables("/widgets/{widgetId}/orders/{orderId}"),
///     vec!["widgetId", "orderId"]
/// );
/// ```
pub fn extract_path_variables(path: &str) -> Vec<&str> {
    let mut variables = Vec::new();
    let mut start = 0;

    for (idx, c) in path.char_indices() {
        if c == '{' {
            start = idx + 1;
        } else if c == '}' && start > 0 {
            let variable = &path[start..idx];
            if !variable.is_empty() {
                variables.push(variable);
            }
            start = 0;
        }
    }

    variables
}

/// A resource's base-URI template.
///
/// The stored form has no leading slash; clients join it onto whatever
/// service prefix they use.
#[derive(Debug, Clone, PartialEq)]
pub struct UriTemplate {
    template: String,
}

impl UriTemplate {
    /// Creates a template from a document path, stripping a leading `/`.
    pub fn new(path: &str) -> Self {
        Self {
            template: path.strip_prefix('/').unwrap_or(path).to_string(),
        }
    }

    /// The template text.
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Template variables in order of appearance.
    pub fn variables(&self) -> Vec<&str> {
        extract_path_variables(&self.template)
    }

    /// Returns true when the template addresses a nested resource.
    pub fn has_parent_segment(&self) -> bool {
        self.template.contains('/')
    }

    /// Rewrites the resource's own (last) path component to `name`.
    ///
    /// Ancestor segments and their variables are preserved, so the
    /// rewrite works at any nesting depth. For a top-level resource the
    /// whole template is the last component and is replaced outright.
    ///
    /// ## Examples
    ///
    /// ```
    /// use restive_gen::uri::UriTemplate;
    ///
    /// let top = UriTemplate::new("/widgets");
    /// assert_eq!(top.with_resource_name("gadgets"), "gadgets");
    ///
    /// let nested = UriTemplate::new("/widgets/{widgetId}/orders");
    /// assert_eq!(
    ///     nested.with_resource_name("purchases"),
    ///     "widgets/{widgetId}/purchases"
    /// );
    /// ```
    pub fn with_resource_name(&self, name: &str) -> String {
        match self.template.rfind('/') {
            Some(idx) => format!("{}/{}", &self.template[..idx], name),
            None => name.to_string(),
        }
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.template)
    }
}
